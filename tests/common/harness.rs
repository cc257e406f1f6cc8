//! Spawns the real router on an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use semantle::gateway::{GatewayState, GenerateGate, create_router};
use semantle::oracle::VectorOracle;
use semantle::pipeline::DailyPipeline;

use super::fixtures::DataDir;

pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_test_server(
    data: &DataDir,
    oracle: Arc<dyn VectorOracle>,
    gate: GenerateGate,
) -> anyhow::Result<TestServer> {
    let pipeline = DailyPipeline::new(data.pipeline_config(), oracle)?;
    let app = create_router(GatewayState::new(Arc::new(pipeline), gate));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer { addr, handle })
}
