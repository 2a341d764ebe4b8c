use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{debug, info};
use rand::Rng;

use crate::data::provider::DatasetProvider;
use crate::error::Result;
use crate::loss::quadratic::QuadraticLoss;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::backprop::backprop;
use crate::train::epoch_stats::EpochStats;
use crate::train::gradients::GradientAccumulator;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` with mini-batch SGD and returns one `EpochStats` per
/// completed epoch.
///
/// Each epoch shuffles `dataset`, then applies full mini-batches of
/// `config.batch_size` examples until fewer than that remain. The trailing
/// remainder is not used that epoch.
///
/// Whatever the outcome (completed, stopped through `config.stop_flag`, or
/// failed), `dataset` is left in canonical order with its cursor at the start.
///
/// # Errors
/// Invalid configuration, a dataset that cannot supply an example, or shapes
/// that do not fit the network. Any error aborts the run; parameters keep the
/// updates applied before it.
pub fn train_loop<D, R>(
    network: &mut Network,
    dataset: &mut D,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<Vec<EpochStats>>
where
    D: DatasetProvider + ?Sized,
    R: Rng,
{
    config.validate()?;
    let result = run_epochs(network, dataset, config, rng);
    dataset.reset_order();
    result
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn run_epochs<D, R>(
    network: &mut Network,
    dataset: &mut D,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<Vec<EpochStats>>
where
    D: DatasetProvider + ?Sized,
    R: Rng,
{
    let optimizer = Sgd::new(config.learning_rate);
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        dataset.shuffle(rng);
        dataset.reset_cursor();

        let mut batches = 0;
        let mut total_cost = 0.0;

        while dataset.remaining() >= config.batch_size {
            if stop_requested(config) {
                info!("training stopped during epoch {epoch} after {batches} mini-batches");
                return Ok(history);
            }
            total_cost += run_mini_batch(network, dataset, &optimizer, config.batch_size)?;
            batches += 1;
            debug!("epoch {epoch}: mini-batch {batches} applied");
        }

        let examples = batches * config.batch_size;
        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            batches,
            examples,
            train_cost: if examples > 0 { total_cost / examples as f64 } else { 0.0 },
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            "epoch {}/{} completed: {} mini-batches, {} examples, cost {:.6}, {} ms",
            stats.epoch, stats.total_epochs, stats.batches, stats.examples, stats.train_cost,
            stats.elapsed_ms
        );

        if let Some(ref tx) = config.progress_tx {
            // A dropped receiver only means nobody is listening any more.
            let _ = tx.send(stats.clone());
        }
        history.push(stats);
    }

    Ok(history)
}

/// Accumulates gradients over the next `batch_size` examples, applies one
/// update, and returns the summed cost of those examples.
fn run_mini_batch<D>(
    network: &mut Network,
    dataset: &mut D,
    optimizer: &Sgd,
    batch_size: usize,
) -> Result<f64>
where
    D: DatasetProvider + ?Sized,
{
    let mut accumulator = GradientAccumulator::new(network)?;
    let mut cost = 0.0;

    for _ in 0..batch_size {
        let target = dataset.current_target()?;
        let (gradients, trace) = backprop(network, dataset.current_input()?, &target)?;
        cost += QuadraticLoss::loss(trace.output(), &target)?;
        accumulator.accumulate(&gradients)?;
        dataset.advance();
    }

    optimizer.step(network, accumulator)?;
    Ok(cost)
}

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}
