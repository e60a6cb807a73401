use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const N: usize = 1000; // default grid width and height
pub const AMBIENT: f64 = 20.0; // initial temperature of every cell
pub const FIREPLACE_START: usize = 300; // first heated column of row 0
pub const FIREPLACE_END: usize = 700; // one past the last heated column
pub const FIREPLACE_TEMP: f64 = 300.0;

/// Square temperature field stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub size: usize,
    pub data: Vec<f64>,
}

impl Default for Grid {
    fn default() -> Self {
        Grid::filled(N, AMBIENT)
    }
}

impl Grid {
    pub fn filled(size: usize, value: f64) -> Self {
        Grid {
            size,
            data: vec![value; size * size],
        }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.size + j] = value;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.size..(i + 1) * self.size]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.size..(i + 1) * self.size]
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, f64> {
        self.data.chunks(self.size)
    }

    /// Largest absolute cell difference, `None` when the sizes differ.
    pub fn max_abs_diff(&self, other: &Grid) -> Option<f64> {
        if self.size != other.size {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }

    /// Raw dump: every cell as a little-endian f64, row-major, no header.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for value in &self.data {
            writer.write_all(&value.to_le_bytes())?;
        }
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_contiguous() {
        let mut grid = Grid::filled(4, 0.0);
        grid.set(2, 3, 7.0);
        assert_eq!(grid.row(2), &[0.0, 0.0, 0.0, 7.0]);
        assert_eq!(grid.rows().count(), 4);
    }

    #[test]
    fn max_abs_diff_rejects_mismatched_sizes() {
        let a = Grid::filled(3, 1.0);
        let mut b = Grid::filled(3, 1.0);
        b.set(1, 1, 1.5);
        assert_eq!(a.max_abs_diff(&b), Some(0.5));
        assert_eq!(a.max_abs_diff(&Grid::filled(4, 1.0)), None);
    }

    #[test]
    fn raw_dump_has_eight_bytes_per_cell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.bin");
        let grid = Grid::filled(5, AMBIENT);
        grid.save_to_file(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 5 * 5 * 8);
        assert_eq!(f64::from_le_bytes(bytes[0..8].try_into().unwrap()), AMBIENT);
    }
}
