//! Row-block decomposition over a chain of worker threads.
//!
//! Each worker owns `N / P` consecutive rows plus one ghost row above and
//! below. Workers share no grid memory: ghost rows travel over channels
//! between chain neighbours, and the coordinator (the calling thread)
//! rebuilds the global grid from the slices the workers send it.

pub mod boundary;
pub mod collector;
pub mod halo;
pub mod partition;
pub mod slice;
pub mod stencil;
pub mod worker;

use std::sync::{Barrier, mpsc};
use std::thread;
use std::time::Instant;

use log::info;

use crate::config::RunConfig;
use crate::error::{HeatError, Result, TransportError};
use crate::grid::Grid;

pub use collector::{Collector, SliceSnapshot, assemble};
pub use halo::HaloLinks;
pub use partition::Partition;
pub use slice::LocalSlice;
pub use worker::{Schedule, Worker};

/// Run the configured number of iterations and return the final grid.
pub fn run_distributed(config: &RunConfig) -> Result<Grid> {
    run_distributed_with(config, |_, _| {})
}

/// Like [`run_distributed`], handing every collected grid to `observer`
/// together with its iteration number (0 is the initial state). Without
/// `snapshot_every` only the final grid is collected.
pub fn run_distributed_with<F>(config: &RunConfig, mut observer: F) -> Result<Grid>
where
    F: FnMut(usize, &Grid),
{
    config.validate()?;

    let partitions = Partition::chain(config.grid_size, config.workers);
    let schedule = Schedule {
        iterations: config.iterations,
        snapshot_every: config.snapshot_every,
    };
    let fireplace = config.fireplace();
    let barrier = Barrier::new(config.workers);
    let mut collector = Collector::new(partitions.clone());
    let (tx, rx) = mpsc::channel::<SliceSnapshot>();

    info!(
        "distributed run: {}x{} grid, {} workers x {} rows, {} iterations",
        config.grid_size,
        config.grid_size,
        config.workers,
        config.block_rows(),
        config.iterations
    );
    let start = Instant::now();

    let (final_grid, outcomes) = thread::scope(|scope| {
        let handles: Vec<_> = partitions
            .iter()
            .copied()
            .zip(HaloLinks::chain(config.workers))
            .map(|(partition, links)| {
                let tx = tx.clone();
                let barrier = &barrier;
                scope.spawn(move || {
                    Worker::new(partition, links, config.ambient)
                        .run(schedule, fireplace, barrier, tx)
                })
            })
            .collect();
        // the receive loop ends once every worker has dropped its sender
        drop(tx);

        let mut final_grid = None;
        for snapshot in rx {
            if let Some((iteration, grid)) = collector.accept(snapshot) {
                observer(iteration, &grid);
                if iteration == schedule.iterations {
                    final_grid = Some(grid);
                }
            }
        }

        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join()).collect();
        (final_grid, outcomes)
    });

    for (rank, outcome) in outcomes.into_iter().enumerate() {
        outcome.map_err(|_| HeatError::WorkerPanicked(rank))??;
    }
    collector.finish()?;

    info!("distributed run finished in {:?}", start.elapsed());
    final_grid.ok_or_else(|| {
        TransportError::CollectorStarved {
            missing: config.workers,
        }
        .into()
    })
}
