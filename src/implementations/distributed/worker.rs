use std::sync::Barrier;
use std::sync::mpsc::Sender;

use log::debug;

use super::boundary::install_fireplace;
use super::collector::{SliceSnapshot, is_collected};
use super::halo::HaloLinks;
use super::partition::Partition;
use super::slice::LocalSlice;
use super::stencil::relax;
use crate::config::Fireplace;
use crate::error::TransportError;

/// Settings every worker of a run shares.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    pub iterations: usize,
    pub snapshot_every: Option<usize>,
}

/// One member of the chain. Which neighbours it talks to, and which rows
/// it updates, follow from its partition alone.
pub struct Worker {
    pub partition: Partition,
    pub slice: LocalSlice,
    links: HaloLinks,
}

impl Worker {
    pub fn new(partition: Partition, links: HaloLinks, ambient: f64) -> Self {
        debug_assert_eq!(partition.rank, links.rank);
        let slice = LocalSlice::new(&partition, ambient);
        Worker {
            partition,
            slice,
            links,
        }
    }

    /// Run every iteration, gathering to `collector` on the schedule.
    ///
    /// Per iteration: copy new to old, exchange ghosts, barrier, relax,
    /// barrier, then an optional snapshot.
    pub fn run(
        mut self,
        schedule: Schedule,
        fireplace: Option<Fireplace>,
        barrier: &Barrier,
        collector: Sender<SliceSnapshot>,
    ) -> Result<(), TransportError> {
        let rank = self.partition.rank;
        let update_rows = self.partition.update_rows();
        debug!(
            "worker {} owns rows {:?}, updates local rows {:?}",
            rank,
            self.partition.owned_global_rows(),
            update_rows
        );

        if let Some(fp) = fireplace {
            install_fireplace(&self.partition, &mut self.slice, &fp);
        }
        self.snapshot(0, schedule, &collector)?;

        for iteration in 1..=schedule.iterations {
            self.slice.copy_new_to_old();
            self.links.exchange(&mut self.slice)?;

            // every ghost row is current before anyone reads one
            barrier.wait();

            relax(&mut self.slice, update_rows.clone());

            // nobody starts the next exchange while a peer still writes
            barrier.wait();

            self.snapshot(iteration, schedule, &collector)?;
        }

        debug!("worker {} finished {} iterations", rank, schedule.iterations);
        Ok(())
    }

    fn snapshot(
        &self,
        iteration: usize,
        schedule: Schedule,
        collector: &Sender<SliceSnapshot>,
    ) -> Result<(), TransportError> {
        if !is_collected(iteration, schedule.iterations, schedule.snapshot_every) {
            return Ok(());
        }
        collector
            .send(SliceSnapshot {
                rank: self.partition.rank,
                iteration,
                data: self.slice.new.clone(),
            })
            .map_err(|_| TransportError::CollectorClosed {
                rank: self.partition.rank,
            })
    }
}
