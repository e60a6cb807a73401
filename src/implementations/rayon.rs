use rayon::prelude::*;

use crate::config::RunConfig;
use crate::error::Result;
use crate::grid::Grid;
use super::single::initial_grid;

// Destination rows are disjoint, so each one can be written by a separate
// thread without locking. Per-cell arithmetic is the same as the serial sweep.
pub fn rayon_parallel(a: &mut Grid, b: &mut Grid, steps: usize) {
    let n = a.size;

    let mut src = &mut a.data[..];
    let mut dst = &mut b.data[..];

    for _step in 0..steps {
        let interior_dst = &mut dst[n..(n - 1) * n];

        interior_dst
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(r, dst_row)| {
                // r counts from the first interior row
                let i = r + 1;

                for j in 1..n - 1 {
                    let idx = i * n + j;
                    dst_row[j] = 0.25 * (src[idx + n] + src[idx - n] + src[idx + 1] + src[idx - 1]);
                }
            });

        std::mem::swap(&mut src, &mut dst);
    }

    if steps % 2 != 0 {
        a.data.copy_from_slice(&b.data);
    }
}

/// Same result as [`super::single::reference_solve`], rows in parallel.
pub fn reference_solve_parallel(config: &RunConfig) -> Result<Grid> {
    config.validate_grid()?;
    let mut a = initial_grid(config);
    let mut b = a.clone();
    rayon_parallel(&mut a, &mut b, config.iterations);
    Ok(a)
}
