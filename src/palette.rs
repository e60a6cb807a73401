//! Temperature to colour buckets for the PNM output.

use rayon::prelude::*;

use crate::grid::Grid;

/// Largest channel value of every colour.
pub const MAX_INTENSITY: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Brown,
    DarkTeal,
    Blue,
    LightBlue,
    Green,
    LightGreen,
    Yellow,
    Orange,
    Red,
}

impl Color {
    /// Bucket upper bounds are inclusive. Anything above 250 (and NaN) is red.
    pub fn from_temperature(t: f64) -> Self {
        if t <= 20.0 {
            Color::Black
        } else if t <= 30.0 {
            Color::Brown
        } else if t <= 40.0 {
            Color::DarkTeal
        } else if t <= 50.0 {
            Color::Blue
        } else if t <= 60.0 {
            Color::LightBlue
        } else if t <= 80.0 {
            Color::Green
        } else if t <= 120.0 {
            Color::LightGreen
        } else if t <= 180.0 {
            Color::Yellow
        } else if t <= 250.0 {
            Color::Orange
        } else {
            Color::Red
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            Color::Black => [0, 0, 0],
            Color::Brown => [3, 3, 0],
            Color::DarkTeal => [0, 5, 5],
            Color::Blue => [0, 0, 10],
            Color::LightBlue => [0, 5, 10],
            Color::Green => [5, 10, 0],
            Color::LightGreen => [0, 13, 0],
            Color::Yellow => [15, 10, 0],
            Color::Orange => [15, 5, 0],
            Color::Red => [15, 0, 0],
        }
    }
}

/// Bucket every cell, row-major.
pub fn colorize(grid: &Grid) -> Vec<Color> {
    grid.data
        .par_iter()
        .map(|&t| Color::from_temperature(t))
        .collect()
}
