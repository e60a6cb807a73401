use super::partition::Partition;

/// A worker's double-buffered block of rows, ghosts included.
#[derive(Debug, Clone)]
pub struct LocalSlice {
    pub width: usize,
    pub rows: usize,
    /// Read by the kernel and the halo exchange.
    pub old: Vec<f64>,
    /// Written by the kernel and the boundary source.
    pub new: Vec<f64>,
}

impl LocalSlice {
    pub fn new(partition: &Partition, ambient: f64) -> Self {
        let rows = partition.local_rows();
        let width = partition.width;
        LocalSlice {
            width,
            rows,
            old: vec![ambient; rows * width],
            new: vec![ambient; rows * width],
        }
    }

    pub fn copy_new_to_old(&mut self) {
        self.old.copy_from_slice(&self.new);
    }

    pub fn old_row(&self, i: usize) -> &[f64] {
        &self.old[i * self.width..(i + 1) * self.width]
    }

    pub fn old_row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.old[i * self.width..(i + 1) * self.width]
    }

    pub fn new_row(&self, i: usize) -> &[f64] {
        &self.new[i * self.width..(i + 1) * self.width]
    }

    pub fn new_row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.new[i * self.width..(i + 1) * self.width]
    }

    pub fn upper_ghost(&self) -> usize {
        0
    }

    pub fn lower_ghost(&self) -> usize {
        self.rows - 1
    }

    pub fn first_owned(&self) -> usize {
        1
    }

    pub fn last_owned(&self) -> usize {
        self.rows - 2
    }
}
