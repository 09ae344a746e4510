use crate::config::Config;

/// Rectangular simulation domain with periodic neighbour lookup.
#[derive(Debug, Clone, Copy)]
pub struct Grid {
    pub rows: usize, // Number of points in the y direction
    pub cols: usize, // Number of points in the x direction
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid { rows, cols }
    }

    pub fn from_config(config: &Config) -> Self {
        Grid::new(config.rows, config.cols)
    }

    // Toroidal indexing: stepping off one edge re-enters from the opposite
    // edge, so neighbour lookups never go out of bounds.
    pub fn row_above(&self, i: usize) -> usize {
        (i + self.rows - 1) % self.rows
    }

    pub fn row_below(&self, i: usize) -> usize {
        (i + 1) % self.rows
    }

    pub fn col_left(&self, j: usize) -> usize {
        (j + self.cols - 1) % self.cols
    }

    pub fn col_right(&self, j: usize) -> usize {
        (j + 1) % self.cols
    }
}

/// The two capacitor plates: fixed-potential row segments that act as the
/// Dirichlet boundary condition of the simulation.
#[derive(Debug, Clone, Copy)]
pub struct PlateGeometry {
    /// Row held at +V0.
    pub positive_row: usize,
    /// Row held at -V0.
    pub negative_row: usize,
    /// Plate columns, half-open range.
    pub col_start: usize,
    pub col_end: usize,
    pub potential: f64,
}

impl PlateGeometry {
    pub fn from_config(config: &Config) -> Self {
        PlateGeometry {
            positive_row: config.rows / 2 - config.plate_separation / 2,
            negative_row: config.rows / 2 + config.plate_separation / 2,
            col_start: config.plate_margin,
            col_end: config.cols - config.plate_margin,
            potential: config.plate_potential,
        }
    }
}
