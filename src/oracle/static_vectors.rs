use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::error::{OracleError, OracleResult};
use super::vector::{WordVector, cosine_similarity};
use super::VectorOracle;

/// Static word embeddings loaded from a word2vec-style text file.
///
/// Format: an optional `"<count> <dim>"` header line, then one `word v1 v2 … vn` line
/// per word. Components are kept as parsed (`f32`); similarity is cosine.
#[derive(Debug, Clone)]
pub struct StaticVectorOracle {
    vectors: HashMap<String, Vec<f32>>,
    dim: usize,
}

impl StaticVectorOracle {
    /// Reads and parses the vectors file at `path`.
    pub fn load(path: &Path) -> OracleResult<Self> {
        if !path.exists() {
            return Err(OracleError::VectorsNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path).map_err(|source| OracleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(OracleError::InvalidConfig {
                reason: format!("vectors file {} is empty", path.display()),
            });
        }

        let text = String::from_utf8(bytes).map_err(|_| OracleError::InvalidEncoding {
            path: path.to_path_buf(),
        })?;

        let oracle = Self::parse(&text)?;

        info!(
            path = %path.display(),
            words = oracle.len(),
            dim = oracle.dim,
            "Static word vectors loaded"
        );

        Ok(oracle)
    }

    /// Parses vectors from text (same format as [`load`](Self::load)).
    pub fn parse(text: &str) -> OracleResult<Self> {
        let mut vectors = HashMap::new();
        let mut dim: Option<usize> = None;

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let rest: Vec<&str> = fields.collect();

            if line_no == 1
                && rest.len() == 1
                && word.parse::<usize>().is_ok()
                && let Ok(header_dim) = rest[0].parse::<usize>()
            {
                debug!(header_dim, "Vectors file header detected");
                dim = Some(header_dim);
                continue;
            }

            let values = rest
                .iter()
                .map(|v| {
                    v.parse::<f32>().map_err(|e| OracleError::Parse {
                        line: line_no,
                        reason: format!("component '{}' for '{}': {}", v, word, e),
                    })
                })
                .collect::<OracleResult<Vec<f32>>>()?;

            if values.is_empty() {
                return Err(OracleError::Parse {
                    line: line_no,
                    reason: format!("no components for '{}'", word),
                });
            }

            match dim {
                Some(expected) if expected != values.len() => {
                    return Err(OracleError::DimensionMismatch {
                        line: line_no,
                        expected,
                        actual: values.len(),
                    });
                }
                Some(_) => {}
                None => dim = Some(values.len()),
            }

            vectors.entry(word.to_string()).or_insert(values);
        }

        let dim = dim.unwrap_or(0);
        if vectors.is_empty() {
            return Err(OracleError::InvalidConfig {
                reason: "vectors file contains no word vectors".to_string(),
            });
        }

        Ok(Self { vectors, dim })
    }

    /// Number of words with a vector.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector dimension shared by every entry.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }
}

impl VectorOracle for StaticVectorOracle {
    fn vector_of(&self, word: &str) -> WordVector {
        match self.vectors.get(word) {
            Some(values) => WordVector::new(word, values.clone()),
            None => WordVector::empty(word),
        }
    }

    fn similarity(&self, a: &WordVector, b: &WordVector) -> f64 {
        cosine_similarity(a.values(), b.values())
    }

    fn describe(&self) -> &'static str {
        "static"
    }
}
