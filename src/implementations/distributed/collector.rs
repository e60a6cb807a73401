use std::collections::BTreeMap;

use log::debug;

use super::partition::Partition;
use crate::error::TransportError;
use crate::grid::Grid;

/// A worker's full `new` buffer, ghosts included, after `iteration`.
#[derive(Debug)]
pub struct SliceSnapshot {
    pub rank: usize,
    pub iteration: usize,
    pub data: Vec<f64>,
}

/// Whether the chain gathers its slices after `iteration`.
///
/// Iteration 0 is the state right after the fireplace is installed. The
/// final iteration is always collected.
pub fn is_collected(iteration: usize, iterations: usize, every: Option<usize>) -> bool {
    iteration == iterations || every.is_some_and(|k| k > 0 && iteration % k == 0)
}

/// Rebuild the global grid from one slice per rank, in rank order.
/// Ghost rows are skipped.
pub fn assemble(partitions: &[Partition], slices: &[Vec<f64>]) -> Grid {
    let width = partitions[0].width;
    let mut grid = Grid::filled(width, 0.0);

    for (partition, slice) in partitions.iter().zip(slices) {
        let owned = &slice[width..(partition.block + 1) * width];
        let start = partition.global_offset() * width;
        grid.data[start..start + owned.len()].copy_from_slice(owned);
    }
    grid
}

/// Coordinator side of the gather. Snapshots may arrive interleaved across
/// iterations; a grid is produced as soon as every rank has reported one.
pub struct Collector {
    partitions: Vec<Partition>,
    pending: BTreeMap<usize, Vec<Option<Vec<f64>>>>,
}

impl Collector {
    pub fn new(partitions: Vec<Partition>) -> Self {
        Collector {
            partitions,
            pending: BTreeMap::new(),
        }
    }

    pub fn accept(&mut self, snapshot: SliceSnapshot) -> Option<(usize, Grid)> {
        let workers = self.partitions.len();
        let slots = self
            .pending
            .entry(snapshot.iteration)
            .or_insert_with(|| vec![None; workers]);
        slots[snapshot.rank] = Some(snapshot.data);

        if slots.iter().any(Option::is_none) {
            return None;
        }
        let slices: Vec<Vec<f64>> = self
            .pending
            .remove(&snapshot.iteration)?
            .into_iter()
            .flatten()
            .collect();
        debug!("collected iteration {} from {} workers", snapshot.iteration, workers);
        Some((snapshot.iteration, assemble(&self.partitions, &slices)))
    }

    /// Fails if some round never completed.
    pub fn finish(self) -> Result<(), TransportError> {
        let missing: usize = self
            .pending
            .values()
            .map(|slots| slots.iter().filter(|s| s.is_none()).count())
            .sum();
        if missing > 0 {
            return Err(TransportError::CollectorStarved { missing });
        }
        Ok(())
    }
}
