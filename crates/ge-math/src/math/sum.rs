//! Compensated summation for long series with terms of mixed magnitude.

/// Neumaier-compensated accumulator.
///
/// Carries a running compensation term so that adding many small entropy
/// contributions to an already-large partial sum loses no low-order bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one term. NaN and infinities flow through into the total.
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    /// The compensated total.
    pub fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_exactly_for_small_inputs() {
        let mut acc = CompensatedSum::new();
        for v in [1.0, 2.0, 3.0, 4.0] {
            acc.add(v);
        }
        assert_eq!(acc.total(), 10.0);
    }

    #[test]
    fn recovers_bits_naive_summation_loses() {
        // 1 + 1e-16 added 10^4 times: naive f64 accumulation drops every
        // small term; the compensated total keeps them.
        let mut acc = CompensatedSum::new();
        let mut naive = 0.0f64;
        acc.add(1.0);
        naive += 1.0;
        for _ in 0..10_000 {
            acc.add(1e-16);
            naive += 1e-16;
        }
        let expected = 1.0 + 1e-12;
        assert_eq!(naive, 1.0); // the failure mode being compensated for
        assert!((acc.total() - expected).abs() < 1e-15);
    }

    #[test]
    fn nan_propagates() {
        let mut acc = CompensatedSum::new();
        acc.add(1.0);
        acc.add(f64::NAN);
        assert!(acc.total().is_nan());
    }
}
