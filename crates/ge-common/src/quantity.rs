//! Selectors for the derived information-theoretic quantities.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which derived quantity to evaluate.
///
/// The entropy family (`H`, `HOn`, `HOff`, `I`, `HConstitutive`) yields one
/// scalar per parameter tuple; the mass terms (`Phi`, `Alpha`, `Beta`) take a
/// state index as well and expose a single term of the stationary
/// distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quantity {
    /// Shannon entropy of the marginal product-number distribution.
    H,
    /// Entropy conditional on the promoter being ON.
    #[value(name = "h-on")]
    HOn,
    /// Entropy conditional on the promoter being OFF.
    #[value(name = "h-off")]
    HOff,
    /// Mutual information between product number and promoter state,
    /// derived as I = H - palpha*H_ON - (1-palpha)*H_OFF.
    I,
    /// Entropy of the constitutive (Poisson) reference model.
    #[value(name = "h-const")]
    #[serde(rename = "h-const")]
    HConstitutive,
    /// Marginal probability of state n.
    Phi,
    /// Joint probability of state n and promoter ON.
    Alpha,
    /// Joint probability of state n and promoter OFF.
    Beta,
}

impl Quantity {
    /// Whether this quantity is an entropy-family scalar (one value per
    /// parameter tuple), as opposed to a per-state mass term.
    pub fn is_entropy_family(&self) -> bool {
        matches!(
            self,
            Quantity::H | Quantity::HOn | Quantity::HOff | Quantity::I | Quantity::HConstitutive
        )
    }

    /// Axis/legend label for plotting collaborators.
    pub fn label(&self) -> &'static str {
        match self {
            Quantity::H => "H",
            Quantity::HOn => "H_ON",
            Quantity::HOff => "H_OFF",
            Quantity::I => "I",
            Quantity::HConstitutive => "H_const",
            Quantity::Phi => "phi_n",
            Quantity::Alpha => "alpha_n",
            Quantity::Beta => "beta_n",
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::H => write!(f, "h"),
            Quantity::HOn => write!(f, "h-on"),
            Quantity::HOff => write!(f, "h-off"),
            Quantity::I => write!(f, "i"),
            Quantity::HConstitutive => write!(f, "h-const"),
            Quantity::Phi => write!(f, "phi"),
            Quantity::Alpha => write!(f, "alpha"),
            Quantity::Beta => write!(f, "beta"),
        }
    }
}
