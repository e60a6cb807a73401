//! Plain-text PNM (P3) output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::grid::Grid;
use crate::palette::{Color, MAX_INTENSITY, colorize};

/// Header, then one `RR GG BB ` triple per cell, one line per grid row.
pub fn write_pnm<W: Write>(mut out: W, grid: &Grid) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", grid.size, grid.size)?;
    writeln!(out, "{}", MAX_INTENSITY)?;

    let colors = colorize(grid);
    for row in colors.chunks(grid.size) {
        for color in row {
            let [r, g, b] = Color::rgb(*color);
            write!(out, "{:02} {:02} {:02} ", r, g, b)?;
        }
        writeln!(out)?;
    }
    out.flush()
}

pub fn write_heatmap(path: impl AsRef<Path>, grid: &Grid) -> io::Result<()> {
    write_pnm(BufWriter::new(File::create(path)?), grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_rows() {
        let mut grid = Grid::filled(2, 20.0);
        grid.set(0, 1, 300.0);
        grid.set(1, 0, 45.0);

        let mut buf = Vec::new();
        write_pnm(&mut buf, &grid).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "P3\n2 2\n15\n00 00 00 15 00 00 \n00 00 10 00 00 00 \n"
        );
    }

    #[test]
    fn writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatmap.pnm");
        write_heatmap(&path, &Grid::filled(4, 20.0)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3 + 4);
        assert_eq!(lines[1], "4 4");
        assert_eq!(lines[3].split_whitespace().count(), 12);
    }
}
