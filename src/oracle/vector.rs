/// Opaque word representation handed out by a [`VectorOracle`](super::VectorOracle).
///
/// The pipeline never reads the components; it only asks the oracle for similarities
/// and checks [`is_empty`](WordVector::is_empty) to skip words with no learned meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct WordVector {
    word: String,
    values: Vec<f32>,
}

impl WordVector {
    pub fn new(word: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            word: word.into(),
            values,
        }
    }

    /// Creates a vector for `word` by copying `values`.
    pub fn from_f32(word: impl Into<String>, values: &[f32]) -> Self {
        Self::new(word, values.to_vec())
    }

    /// The "no vector" sentinel.
    pub fn empty(word: impl Into<String>) -> Self {
        Self::new(word, Vec::new())
    }

    /// Word this vector was resolved for.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Raw components (oracle implementations only).
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` for the sentinel: no components, or every component zero.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }
}

/// Cosine similarity of two `f32` vectors, accumulated in `f64`.
///
/// Mismatched lengths and zero-norm inputs score `0.0`.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f64, 0.0f64, 0.0f64), |(dot, na, nb), (&av, &bv)| {
                let av = f64::from(av);
                let bv = f64::from(bv);
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

/// Scales `values` to unit length in place (no-op for zero vectors).
pub(crate) fn normalize_in_place(values: &mut [f32]) {
    let norm: f32 = values.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in values.iter_mut() {
            *x /= norm;
        }
    }
}
