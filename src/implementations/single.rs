use std::mem;

use crate::config::RunConfig;
use crate::error::Result;
use crate::grid::Grid;

/// Ambient field with the fireplace (if any) written into row 0.
pub fn initial_grid(config: &RunConfig) -> Grid {
    let mut grid = Grid::filled(config.grid_size, config.ambient);
    if let Some(fp) = config.fireplace() {
        grid.row_mut(0)[fp.start..fp.end].fill(fp.temperature);
    }
    grid
}

/// Whole-grid Jacobi sweeps. `a` holds the input and, afterwards, the
/// result. Both grids must start out identical: edge cells are never
/// rewritten, so each buffer keeps its own copy of them.
pub fn jacobi_step(a: &mut Grid, b: &mut Grid, steps: usize) {
    let n = a.size;

    for _ in 0..steps {
        for i in 1..n - 1 {
            for j in 1..n - 1 {
                let idx = i * n + j;
                b.data[idx] = 0.25
                    * (a.data[(i + 1) * n + j]
                        + a.data[(i - 1) * n + j]
                        + a.data[i * n + (j + 1)]
                        + a.data[i * n + (j - 1)]);
            }
        }

        mem::swap(&mut a.data, &mut b.data);
    }
}

/// Single-process solution, used as the correctness oracle.
pub fn reference_solve(config: &RunConfig) -> Result<Grid> {
    config.validate_grid()?;
    let mut a = initial_grid(config);
    let mut b = a.clone();
    jacobi_step(&mut a, &mut b, config.iterations);
    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fireplace_lands_in_row_zero() {
        let grid = initial_grid(&RunConfig::new(10, 2, 1));
        assert_eq!(&grid.row(0)[3..7], &[300.0; 4]);
        assert_eq!(grid.get(0, 2), 20.0);
        assert_eq!(grid.get(1, 5), 20.0);
    }

    #[test]
    fn one_sweep_heats_the_row_below() {
        let grid = reference_solve(&RunConfig::new(10, 2, 1)).unwrap();
        assert_eq!(grid.get(1, 4), 0.25 * (300.0 + 20.0 + 20.0 + 20.0));
        assert_eq!(grid.get(0, 4), 300.0);
        assert_eq!(grid.get(2, 4), 20.0);
    }
}
