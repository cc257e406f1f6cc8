//! On-disk data directories for pipeline and server tests.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::TempDir;

use semantle::pipeline::PipelineConfig;

pub const WORDLIST_FILENAME: &str = "semantle_wordlist.txt";
pub const HISTORY_FILENAME: &str = "history.json";
pub const SNAPSHOT_FILENAME: &str = "daily.json";

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Words `mot00`, `mot01`, … in order.
pub fn numbered_words(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("mot{i:02}")).collect()
}

/// Temporary data directory laid out like the served `public/data`.
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let data = Self::new();
        data.write_words(words);
        data
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn wordlist_path(&self) -> PathBuf {
        self.path().join(WORDLIST_FILENAME)
    }

    pub fn history_path(&self) -> PathBuf {
        self.path().join(HISTORY_FILENAME)
    }

    pub fn seed_path(&self) -> PathBuf {
        self.path().join(format!("{HISTORY_FILENAME}.seed"))
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.path().join(SNAPSHOT_FILENAME)
    }

    pub fn write_words<I, S>(&self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut contents = String::new();
        for word in words {
            contents.push_str(word.as_ref());
            contents.push('\n');
        }
        std::fs::write(self.wordlist_path(), contents).expect("write wordlist");
    }

    pub fn write_history(&self, json: &str) {
        std::fs::write(self.history_path(), json).expect("write history");
    }

    pub fn write_seed(&self, json: &str) {
        std::fs::write(self.seed_path(), json).expect("write seed");
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, contents).expect("write file");
        path
    }

    pub fn read_history(&self) -> serde_json::Map<String, serde_json::Value> {
        let contents = std::fs::read_to_string(self.history_path()).expect("read history");
        match serde_json::from_str(&contents).expect("history is JSON") {
            serde_json::Value::Object(map) => map,
            other => panic!("history is not an object: {other}"),
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(
            self.wordlist_path(),
            self.history_path(),
            self.snapshot_path(),
        )
    }
}
