//! Canonical cache keys.

use ge_common::{Parameters, Quantity};

/// Cache key: (quantity, parameter tuple, digits, truncation bound).
///
/// Floats are rounded to 15 significant digits before keying so values that
/// differ only in the last generated bit (e.g. from range expansion) hit the
/// same entry. A mass-term index is part of the key for phi/alpha/beta.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(
        quantity: Quantity,
        params: &Parameters,
        digits: u32,
        k: u64,
        state: Option<u64>,
    ) -> Self {
        let mut key = format!(
            "{quantity}:{}:{}:{}:{digits}:{k}",
            canonical(params.epsilon()),
            canonical(params.palpha()),
            canonical(params.n_mean()),
        );
        if let Some(n) = state {
            key.push_str(&format!(":{n}"));
        }
        CacheKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 15-significant-digit canonical rendering of a finite positive parameter.
fn canonical(value: f64) -> String {
    format!("{value:.14e}")
}
