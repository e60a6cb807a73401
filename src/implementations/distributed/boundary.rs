use log::debug;

use super::partition::Partition;
use super::slice::LocalSlice;
use crate::config::Fireplace;

/// Write the fireplace into global row 0 of the `new` buffer.
///
/// Only the worker owning global row 0 is touched; for every other worker
/// this is a no-op. Returns whether anything was written.
pub fn install_fireplace(
    partition: &Partition,
    slice: &mut LocalSlice,
    fireplace: &Fireplace,
) -> bool {
    let Some(local) = partition.local_row_of(0) else {
        return false;
    };
    slice.new_row_mut(local)[fireplace.start..fireplace.end].fill(fireplace.temperature);
    debug!(
        "worker {}: fireplace at columns {}..{} = {}",
        partition.rank, fireplace.start, fireplace.end, fireplace.temperature
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const FP: Fireplace = Fireplace {
        start: 3,
        end: 7,
        temperature: 300.0,
    };

    #[test]
    fn only_the_first_worker_is_heated() {
        let chain = Partition::chain(10, 2);
        let mut top = LocalSlice::new(&chain[0], 20.0);
        let mut bottom = LocalSlice::new(&chain[1], 20.0);

        assert!(install_fireplace(&chain[0], &mut top, &FP));
        assert!(!install_fireplace(&chain[1], &mut bottom, &FP));

        let row = top.new_row(1);
        assert_eq!(&row[3..7], &[300.0; 4]);
        assert_eq!(row[2], 20.0);
        assert_eq!(row[7], 20.0);
        // ghost row and old buffer untouched
        assert!(top.new_row(0).iter().all(|&t| t == 20.0));
        assert!(top.old.iter().all(|&t| t == 20.0));
        assert!(bottom.new.iter().all(|&t| t == 20.0));
    }
}
