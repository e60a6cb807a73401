use std::ops::Range;

/// One worker's place in the row-block chain.
///
/// Every slice is laid out the same way: local row 0 is the upper ghost,
/// rows `1..=block` are owned, and row `block + 1` is the lower ghost. A
/// chain end simply never has its outer ghost written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub rank: usize,
    pub workers: usize,
    pub width: usize,
    /// Owned rows per worker.
    pub block: usize,
}

impl Partition {
    /// Caller guarantees `width % workers == 0` and `rank < workers`.
    pub fn new(width: usize, workers: usize, rank: usize) -> Self {
        debug_assert!(workers >= 2 && width % workers == 0 && rank < workers);
        Partition {
            rank,
            workers,
            width,
            block: width / workers,
        }
    }

    /// All partitions of the chain, in rank order.
    pub fn chain(width: usize, workers: usize) -> Vec<Partition> {
        (0..workers)
            .map(|rank| Partition::new(width, workers, rank))
            .collect()
    }

    /// Slice height including both ghost rows.
    pub fn local_rows(&self) -> usize {
        self.block + 2
    }

    pub fn has_upper(&self) -> bool {
        self.rank > 0
    }

    pub fn has_lower(&self) -> bool {
        self.rank + 1 < self.workers
    }

    /// Global row index of local row 1.
    pub fn global_offset(&self) -> usize {
        self.rank * self.block
    }

    pub fn owned_global_rows(&self) -> Range<usize> {
        self.global_offset()..self.global_offset() + self.block
    }

    /// Local rows the kernel may write. The worker owning global row 0
    /// skips it, and the worker owning global row N-1 skips that one.
    pub fn update_rows(&self) -> Range<usize> {
        let first = if self.has_upper() { 1 } else { 2 };
        let last = if self.has_lower() {
            self.local_rows() - 1
        } else {
            self.local_rows() - 2
        };
        first..last.max(first)
    }

    /// Local row holding global row `global`, if this worker owns it.
    pub fn local_row_of(&self, global: usize) -> Option<usize> {
        self.owned_global_rows()
            .contains(&global)
            .then(|| global - self.global_offset() + 1)
    }
}
