use std::ops::Range;

use super::slice::LocalSlice;

/// Four-neighbour average over `rows` of the slice, columns `1..width-1`.
///
/// Reads `old`, writes `new`. The caller picks `rows` so that ghost rows
/// and the global top and bottom edges are never written.
pub fn relax(slice: &mut LocalSlice, rows: Range<usize>) {
    let w = slice.width;
    let src = &slice.old;
    let dst = &mut slice.new;

    for i in rows {
        for j in 1..w - 1 {
            let idx = i * w + j;
            dst[idx] = 0.25 * (src[idx + w] + src[idx - w] + src[idx + 1] + src[idx - 1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::implementations::distributed::partition::Partition;

    #[test]
    fn averages_the_four_neighbours() {
        let mut slice = LocalSlice::new(&Partition::new(5, 5, 2), 0.0);
        // 3 rows x 5 columns
        slice.old_row_mut(0)[2] = 4.0;
        slice.old_row_mut(2)[2] = 8.0;
        slice.old_row_mut(1)[1] = 2.0;
        slice.old_row_mut(1)[3] = 6.0;

        relax(&mut slice, 1..2);

        assert_eq!(slice.new_row(1)[2], 5.0);
        assert_eq!(slice.new_row(1)[1], 0.0);
        assert_eq!(slice.new_row(1)[3], 0.0);
    }

    #[test]
    fn edge_columns_and_other_rows_are_untouched() {
        let mut slice = LocalSlice::new(&Partition::new(6, 2, 0), 1.0);
        slice.old.fill(9.0);

        relax(&mut slice, 2..4);

        for i in 0..slice.rows {
            let row = slice.new_row(i);
            assert_eq!(row[0], 1.0);
            assert_eq!(row[5], 1.0);
            let expected = if (2..4).contains(&i) { 9.0 } else { 1.0 };
            assert!(row[1..5].iter().all(|&t| t == expected), "row {i}");
        }
    }
}
