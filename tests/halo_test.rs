use std::sync::Barrier;
use std::thread;

use heatmap_rust::implementations::distributed::{HaloLinks, LocalSlice, Partition};

const UNTOUCHED: f64 = -1.0;

/// Owned row k of rank r holds r * 100 + k in every column; ghosts hold -1.
fn labelled_slice(partition: &Partition) -> LocalSlice {
    let mut slice = LocalSlice::new(partition, UNTOUCHED);
    for k in slice.first_owned()..=slice.last_owned() {
        slice.old_row_mut(k).fill((partition.rank * 100 + k) as f64);
    }
    slice
}

/// One exchange on every worker of the chain, run concurrently. The grid is
/// square, so rows are `workers * rows_per_worker` values long.
fn exchange_once(workers: usize, rows_per_worker: usize) -> Vec<LocalSlice> {
    let chain = Partition::chain(workers * rows_per_worker, workers);
    let mut slices: Vec<LocalSlice> = chain.iter().map(labelled_slice).collect();

    thread::scope(|scope| {
        for (slice, links) in slices.iter_mut().zip(HaloLinks::chain(workers)) {
            scope.spawn(move || links.exchange(slice).unwrap());
        }
    });
    slices
}

#[test]
fn test_ghost_rows_mirror_neighbours() {
    let workers = 5;
    let slices = exchange_once(workers, 3);

    for (rank, slice) in slices.iter().enumerate() {
        let upper = slice.old_row(slice.upper_ghost());
        let lower = slice.old_row(slice.lower_ghost());

        if rank > 0 {
            let above = &slices[rank - 1];
            assert_eq!(upper, above.old_row(above.last_owned()), "rank {rank} upper ghost");
        } else {
            assert!(upper.iter().all(|&t| t == UNTOUCHED));
        }

        if rank + 1 < workers {
            let below = &slices[rank + 1];
            assert_eq!(lower, below.old_row(below.first_owned()), "rank {rank} lower ghost");
        } else {
            assert!(lower.iter().all(|&t| t == UNTOUCHED));
        }
    }
}

#[test]
fn test_owned_rows_are_not_modified() {
    let slices = exchange_once(3, 4);
    for (rank, slice) in slices.iter().enumerate() {
        for k in slice.first_owned()..=slice.last_owned() {
            assert!(
                slice.old_row(k).iter().all(|&t| t == (rank * 100 + k) as f64),
                "rank {rank} row {k}"
            );
        }
    }
}

#[test]
fn test_two_workers_swap_boundaries() {
    let slices = exchange_once(2, 1);
    // one owned row each: rank 0 row 1 = 1, rank 1 row 1 = 101
    assert!(slices[0].old_row(2).iter().all(|&t| t == 101.0));
    assert!(slices[1].old_row(0).iter().all(|&t| t == 1.0));
}

#[test]
fn test_repeated_exchanges_do_not_deadlock() {
    let workers = 6;
    let rounds = 200;
    let chain = Partition::chain(workers * 2, workers);
    let barrier = Barrier::new(workers);

    let finals: Vec<f64> = thread::scope(|scope| {
        let handles: Vec<_> = chain
            .iter()
            .zip(HaloLinks::chain(workers))
            .map(|(partition, links)| {
                let barrier = &barrier;
                scope.spawn(move || {
                    let mut slice = LocalSlice::new(partition, 0.0);
                    for round in 0..rounds {
                        let value = (partition.rank * rounds + round) as f64;
                        slice.old_row_mut(slice.first_owned()).fill(value);
                        slice.old_row_mut(slice.last_owned()).fill(value);
                        links.exchange(&mut slice).unwrap();
                        barrier.wait();

                        if partition.has_upper() {
                            let expected = ((partition.rank - 1) * rounds + round) as f64;
                            assert_eq!(slice.old_row(slice.upper_ghost())[0], expected);
                        }
                        if partition.has_lower() {
                            let expected = ((partition.rank + 1) * rounds + round) as f64;
                            assert_eq!(slice.old_row(slice.lower_ghost())[0], expected);
                        }
                        barrier.wait();
                    }
                    slice.old_row(slice.first_owned())[0]
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(finals.len(), workers);
    assert_eq!(finals[workers - 1], ((workers - 1) * rounds + rounds - 1) as f64);
}
