use std::sync::mpsc::{self, Receiver, SyncSender};

use log::trace;

use super::slice::LocalSlice;
use crate::error::TransportError;

/// One direction of the chain as seen from a worker: a send end toward the
/// peer and a receive end from it.
///
/// Channels hold one row, so a send returns before the peer posts its
/// receive. The exchange ordering below relies on that, just like a
/// blocking send of a small message that the transport buffers eagerly.
pub struct Link {
    pub peer: usize,
    tx: SyncSender<Vec<f64>>,
    rx: Receiver<Vec<f64>>,
}

impl Link {
    fn send(&self, rank: usize, row: &[f64]) -> Result<(), TransportError> {
        trace!("worker {} -> {}: {} values", rank, self.peer, row.len());
        self.tx
            .send(row.to_vec())
            .map_err(|_| TransportError::PeerDisconnected {
                rank,
                peer: self.peer,
            })
    }

    fn recv_into(&self, rank: usize, ghost: &mut [f64]) -> Result<(), TransportError> {
        let row = self.rx.recv().map_err(|_| TransportError::PeerDisconnected {
            rank,
            peer: self.peer,
        })?;
        if row.len() != ghost.len() {
            return Err(TransportError::RowLength {
                rank,
                peer: self.peer,
                expected: ghost.len(),
                got: row.len(),
            });
        }
        ghost.copy_from_slice(&row);
        trace!("worker {} <- {}: {} values", rank, self.peer, row.len());
        Ok(())
    }
}

/// A worker's links to its chain neighbours. Either side may be missing,
/// which is what makes a worker a chain end.
pub struct HaloLinks {
    pub rank: usize,
    pub upper: Option<Link>,
    pub lower: Option<Link>,
}

impl HaloLinks {
    /// Wire up a linear chain of `workers` ranks.
    pub fn chain(workers: usize) -> Vec<HaloLinks> {
        let mut links: Vec<HaloLinks> = (0..workers)
            .map(|rank| HaloLinks {
                rank,
                upper: None,
                lower: None,
            })
            .collect();

        for rank in 0..workers.saturating_sub(1) {
            let (down_tx, down_rx) = mpsc::sync_channel(1);
            let (up_tx, up_rx) = mpsc::sync_channel(1);
            links[rank].lower = Some(Link {
                peer: rank + 1,
                tx: down_tx,
                rx: up_rx,
            });
            links[rank + 1].upper = Some(Link {
                peer: rank,
                tx: up_tx,
                rx: down_rx,
            });
        }
        links
    }

    /// Refresh both ghost rows of `slice.old` from the neighbours.
    ///
    /// Upper side: send the top owned row, then receive the upper ghost.
    /// Lower side: the first worker sends before receiving; every other
    /// worker receives before sending. Together this gives rank 0
    /// send/recv, interior ranks send-up/recv-up/recv-down/send-down and
    /// the last rank send-up/recv-up.
    pub fn exchange(&self, slice: &mut LocalSlice) -> Result<(), TransportError> {
        if let Some(up) = &self.upper {
            up.send(self.rank, slice.old_row(slice.first_owned()))?;
            let ghost = slice.upper_ghost();
            up.recv_into(self.rank, slice.old_row_mut(ghost))?;
        }

        if let Some(down) = &self.lower {
            let bottom = slice.last_owned();
            let ghost = slice.lower_ghost();
            if self.upper.is_none() {
                down.send(self.rank, slice.old_row(bottom))?;
                down.recv_into(self.rank, slice.old_row_mut(ghost))?;
            } else {
                down.recv_into(self.rank, slice.old_row_mut(ghost))?;
                down.send(self.rank, slice.old_row(bottom))?;
            }
        }
        Ok(())
    }
}
