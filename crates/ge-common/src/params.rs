//! Validated parameters of the two-state gene-expression model.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameter tuple of the externally regulated binary gene model.
///
/// - `epsilon`: ratio between promoter switching rates and the product
///   degradation rate.
/// - `palpha`: probability of finding the promoter in the ON state.
/// - `n_mean`: mean number of products of a constitutive gene with the same
///   synthesis/degradation rates.
///
/// Construction validates the mathematical domain (`epsilon > 0`,
/// `0 < palpha < 1`, `n_mean > 0`, all finite), so a `Parameters` value is
/// always safe to evaluate. The entropy normalizers divide by `palpha` and
/// `1 - palpha`, hence the strict bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters", into = "RawParameters")]
pub struct Parameters {
    epsilon: f64,
    palpha: f64,
    n_mean: f64,
}

/// Unvalidated mirror used for serde round-trips.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawParameters {
    epsilon: f64,
    palpha: f64,
    n_mean: f64,
}

impl TryFrom<RawParameters> for Parameters {
    type Error = Error;

    fn try_from(raw: RawParameters) -> Result<Self> {
        Parameters::new(raw.epsilon, raw.palpha, raw.n_mean)
    }
}

impl From<Parameters> for RawParameters {
    fn from(p: Parameters) -> Self {
        RawParameters {
            epsilon: p.epsilon,
            palpha: p.palpha,
            n_mean: p.n_mean,
        }
    }
}

impl Parameters {
    pub fn new(epsilon: f64, palpha: f64, n_mean: f64) -> Result<Self> {
        let domain_error = |reason: &str| Error::Domain {
            reason: reason.to_string(),
            epsilon,
            palpha,
            n_mean,
        };

        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(domain_error("epsilon must be finite and positive"));
        }
        if !palpha.is_finite() || palpha <= 0.0 || palpha >= 1.0 {
            return Err(domain_error("palpha must lie strictly between 0 and 1"));
        }
        if !n_mean.is_finite() || n_mean <= 0.0 {
            return Err(domain_error("n_mean must be finite and positive"));
        }

        Ok(Self {
            epsilon,
            palpha,
            n_mean,
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn palpha(&self) -> f64 {
        self.palpha
    }

    pub fn n_mean(&self) -> f64 {
        self.n_mean
    }

    /// Mean number of gene products: mu = palpha * N.
    pub fn mean(&self) -> f64 {
        self.palpha * self.n_mean
    }

    /// Mean number of products given the promoter is ON:
    /// <n_a> = (epsilon*palpha + 1) / (1 + epsilon) * N.
    pub fn mean_on(&self) -> f64 {
        (self.epsilon * self.palpha + 1.0) / (1.0 + self.epsilon) * self.n_mean
    }

    /// Mean number of products given the promoter is OFF:
    /// <n_b> = epsilon*palpha / (1 + epsilon) * N.
    pub fn mean_off(&self) -> f64 {
        self.epsilon * self.palpha / (1.0 + self.epsilon) * self.n_mean
    }

    /// Fano factor of the marginal distribution:
    /// F = 1 + N*(1 - palpha) / (1 + epsilon).
    pub fn fano(&self) -> f64 {
        1.0 + self.n_mean * (1.0 - self.palpha) / (1.0 + self.epsilon)
    }

    /// Variance of the marginal distribution: sigma^2 = mu * F.
    pub fn variance(&self) -> f64 {
        self.mean() * self.fano()
    }
}

impl std::fmt::Display for Parameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "epsilon={}, palpha={}, n_mean={}",
            self.epsilon, self.palpha, self.n_mean
        )
    }
}
