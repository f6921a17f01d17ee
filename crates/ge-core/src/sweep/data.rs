//! Per-curve data files for the external plotting collaborator.
//!
//! One tab-separated file per (figure, quantity, curve), where a curve fixes
//! every parameter except the figure's x axis. The x axis is the axis with
//! the most grid points; remaining multi-valued axes split the records into
//! one curve each. Undefined values are written as the NaN sentinel, which
//! plotting tools treat as a gap.

use super::SweepRecord;
use crate::format::format_result;
use ge_common::Result;
use ge_config::{FigureSpec, SweepConfig};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

const AXES: [&str; 3] = ["epsilon", "palpha", "n_mean"];

fn axis_len(figure: &FigureSpec, axis: &str) -> usize {
    match axis {
        "epsilon" => figure.epsilon.len(),
        "palpha" => figure.palpha.len(),
        _ => figure.n_mean.len(),
    }
}

fn record_coord(record: &SweepRecord, axis: &str) -> f64 {
    match axis {
        "epsilon" => record.epsilon,
        "palpha" => record.palpha,
        _ => record.n_mean,
    }
}

/// Write data files for every figure/quantity/curve; returns the paths.
pub fn write_data_files(
    dir: &Path,
    config: &SweepConfig,
    records: &[SweepRecord],
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    for (name, figure) in &config.figures {
        let x_axis = AXES
            .into_iter()
            .max_by_key(|axis| axis_len(figure, axis))
            .expect("three axes");
        let curve_axes: Vec<&str> = AXES
            .into_iter()
            .filter(|axis| *axis != x_axis && axis_len(figure, axis) > 1)
            .collect();

        for &quantity in &figure.quantities {
            // Group records into curves by the non-x multi-valued axes.
            let mut curves: BTreeMap<String, Vec<&SweepRecord>> = BTreeMap::new();
            for record in records
                .iter()
                .filter(|r| r.figure == *name && r.quantity == quantity)
            {
                let suffix = curve_axes
                    .iter()
                    .map(|axis| format!("_{axis}_{}", record_coord(record, axis)))
                    .collect::<String>();
                curves.entry(suffix).or_default().push(record);
            }

            for (suffix, mut curve) in curves {
                curve.sort_by(|a, b| {
                    record_coord(a, x_axis)
                        .partial_cmp(&record_coord(b, x_axis))
                        .expect("finite axis values")
                });

                let path = dir.join(format!("fig_{name}_{quantity}{suffix}.data"));
                let mut file = std::fs::File::create(&path)?;
                writeln!(file, "# {x_axis}\t{}", quantity.label())?;
                for record in curve {
                    writeln!(
                        file,
                        "{}\t{}",
                        record_coord(record, x_axis),
                        format_result(record.value, record.digits)
                    )?;
                }
                written.push(path);
            }
        }
    }

    Ok(written)
}
