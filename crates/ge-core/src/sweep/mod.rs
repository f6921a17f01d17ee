//! Parameter-sweep orchestration.
//!
//! A sweep expands each configured figure into a Cartesian grid of parameter
//! tuples, evaluates every (tuple, quantity) pair, and emits one record per
//! pair. Evaluations are fully independent, so they are fanned out to a
//! fixed worker pool and collected over a channel with no ordering
//! guarantee; consumers key on (figure, quantity, tuple), never on position.
//!
//! Failure policy per the error taxonomy: configuration problems abort
//! before any worker starts; per-tuple domain problems are logged and
//! counted; numeric failures become `NaN` records and the sweep continues.

pub mod data;
pub mod grid;

use crate::entropy;
use crate::truncation::resolve_bound;
use ge_cache::{CacheKey, ResultStore};
use ge_common::{Error, EvalResult, Result};
use ge_config::SweepConfig;
use grid::WorkItem;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// One evaluated grid point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRecord {
    pub figure: String,
    pub quantity: ge_common::Quantity,
    pub epsilon: f64,
    pub palpha: f64,
    pub n_mean: f64,
    pub digits: u32,
    pub k: u64,
    /// `null` when the quantity is undefined at this tuple.
    pub value: EvalResult,
}

/// Sweep-wide options.
#[derive(Default)]
pub struct SweepOptions {
    /// Worker threads; defaults to config, then available parallelism.
    pub workers: Option<usize>,
    /// Cooperative cancellation flag, checked between evaluations.
    pub cancel: Option<Arc<AtomicBool>>,
    /// Result cache; `None` disables caching entirely.
    pub cache: Option<Arc<ResultStore>>,
    /// Where to write per-curve data files for the plotting collaborator.
    pub data_dir: Option<PathBuf>,
}

/// Counters reported after a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    /// Records emitted (finite and NaN alike).
    pub evaluated: usize,
    /// Records whose value is the NaN sentinel.
    pub undefined: usize,
    /// Grid points dropped because the tuple failed domain validation.
    pub skipped: usize,
    /// Evaluations answered from the cache.
    pub cache_hits: usize,
    /// True when the sweep stopped early on the cancellation flag.
    pub cancelled: bool,
}

/// Run every figure in `config`, passing each record to `sink`.
///
/// Record order is arbitrary.
pub fn run_sweep<F>(
    config: &SweepConfig,
    options: &SweepOptions,
    sink: &mut F,
) -> Result<SweepSummary>
where
    F: FnMut(&SweepRecord),
{
    // Configuration is fatal before any computation starts.
    ge_config::validate_config(config).map_err(Error::from)?;

    let (items, skipped) = grid::expand(config)?;
    let total = items.len();
    let workers = options
        .workers
        .or(config.defaults.workers)
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
        .max(1)
        .min(total.max(1));
    info!(total, workers, skipped, "starting sweep");

    let queue = Arc::new(Mutex::new(VecDeque::from(items)));
    let cancel = options.cancel.clone();
    let cache = options.cache.clone();
    let (tx, rx) = mpsc::channel::<(SweepRecord, bool)>();

    let mut summary = SweepSummary {
        skipped,
        ..SweepSummary::default()
    };
    let mut records = Vec::with_capacity(total);

    std::thread::scope(|scope| {
        for _ in 0..workers {
            let queue = Arc::clone(&queue);
            let cancel = cancel.clone();
            let cache = cache.clone();
            let tx = tx.clone();
            scope.spawn(move || {
                loop {
                    if cancel
                        .as_ref()
                        .is_some_and(|flag| flag.load(Ordering::Relaxed))
                    {
                        debug!("worker observed cancellation");
                        return;
                    }
                    let item = { queue.lock().expect("queue lock poisoned").pop_front() };
                    let Some(item) = item else { return };
                    let (record, cached) = evaluate_item(&item, cache.as_deref());
                    if tx.send((record, cached)).is_err() {
                        return;
                    }
                }
            });
        }
        drop(tx);

        for (record, cached) in rx.iter() {
            if record.value.is_nan() {
                summary.undefined += 1;
            }
            if cached {
                summary.cache_hits += 1;
            }
            summary.evaluated += 1;
            sink(&record);
            records.push(record);
        }
    });

    summary.cancelled = cancel
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
        && summary.evaluated < total;

    if let Some(dir) = &options.data_dir {
        let written = data::write_data_files(dir, config, &records)?;
        info!(files = written.len(), dir = %dir.display(), "wrote curve data files");
    }

    info!(
        evaluated = summary.evaluated,
        undefined = summary.undefined,
        skipped = summary.skipped,
        cache_hits = summary.cache_hits,
        cancelled = summary.cancelled,
        "sweep finished"
    );
    Ok(summary)
}

/// Evaluate one work item, going through the cache when one is configured.
/// Returns the record and whether the value came from the cache.
fn evaluate_item(item: &WorkItem, cache: Option<&ResultStore>) -> (SweepRecord, bool) {
    let k = resolve_bound(&item.params, &item.spec);

    let compute = || match entropy::evaluate(item.quantity, &item.params, &item.spec) {
        Ok(result) => result,
        Err(err) => {
            // Per-evaluation failures surface as the sentinel with the
            // offending tuple in the log, never as a sweep abort.
            warn!(
                figure = %item.figure,
                quantity = %item.quantity,
                params = %item.params,
                error = %err,
                "evaluation failed"
            );
            EvalResult::NotANumber
        }
    };

    let (value, cached) = match cache {
        Some(store) => {
            let key = CacheKey::new(
                item.quantity,
                &item.params,
                item.spec.digits(),
                k,
                None,
            );
            let computed = std::cell::Cell::new(false);
            let value = store.get_or_compute(&key, || {
                computed.set(true);
                compute()
            });
            (value, !computed.get())
        }
        None => (compute(), false),
    };

    let record = SweepRecord {
        figure: item.figure.clone(),
        quantity: item.quantity,
        epsilon: item.params.epsilon(),
        palpha: item.params.palpha(),
        n_mean: item.params.n_mean(),
        digits: item.spec.digits(),
        k,
        value,
    };
    (record, cached)
}
