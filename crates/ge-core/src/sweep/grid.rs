//! Grid expansion: figure specs to independent work items.

use ge_common::{Parameters, PrecisionSpec, Quantity, Result};
use ge_config::SweepConfig;
use tracing::warn;

/// One independent evaluation: a (figure, quantity, tuple, precision) key.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub figure: String,
    pub quantity: Quantity,
    pub params: Parameters,
    pub spec: PrecisionSpec,
}

/// Expand every figure into work items.
///
/// Returns the items plus the count of grid points whose tuples failed
/// domain validation (logged and dropped; a bad point never aborts the
/// sweep). The precision spec itself failing is a configuration error.
pub fn expand(config: &SweepConfig) -> Result<(Vec<WorkItem>, usize)> {
    let mut items = Vec::new();
    let mut skipped = 0usize;

    for (name, figure) in &config.figures {
        let digits = config.digits_for(figure);
        let spec = match figure.k {
            Some(k) => PrecisionSpec::with_truncation(digits, k)?,
            None => PrecisionSpec::new(digits)?,
        };

        for eps in figure.epsilon.values() {
            for pa in figure.palpha.values() {
                for n_mean in figure.n_mean.values() {
                    let params = match Parameters::new(eps, pa, n_mean) {
                        Ok(p) => p,
                        Err(err) => {
                            warn!(figure = %name, error = %err, "dropping grid point");
                            skipped += figure.quantities.len();
                            continue;
                        }
                    };
                    for &quantity in &figure.quantities {
                        items.push(WorkItem {
                            figure: name.clone(),
                            quantity,
                            params,
                            spec,
                        });
                    }
                }
            }
        }
    }

    Ok((items, skipped))
}
