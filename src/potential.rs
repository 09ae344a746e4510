use crate::grid::{Grid, PlateGeometry};
use ndarray::Array2;

/// Electrostatic potential at each grid point.
pub struct PotentialField {
    pub v: Array2<f64>,
}

impl PotentialField {
    pub fn new(grid: &Grid) -> Self {
        PotentialField {
            v: Array2::zeros((grid.rows, grid.cols)),
        }
    }

    /// Clamp the plate rows to their fixed potentials. Applied at
    /// initialisation and again after every relaxation sweep, otherwise the
    /// plate potential would diffuse away.
    pub fn stamp_plates(&mut self, plates: &PlateGeometry) {
        for j in plates.col_start..plates.col_end {
            self.v[[plates.positive_row, j]] = plates.potential;
            self.v[[plates.negative_row, j]] = -plates.potential;
        }
    }

    /// E = -grad(V), with centred differences in the interior and one-sided
    /// differences on the edges. No wrap-around here: the gradient uses open
    /// boundary semantics even though the solver is periodic.
    pub fn electric_field(&self) -> ElectricField {
        let (rows, cols) = self.v.dim();
        let mut ey = Array2::<f64>::zeros((rows, cols));
        let mut ex = Array2::<f64>::zeros((rows, cols));

        for i in 0..rows {
            for j in 0..cols {
                let dv_di = if rows < 2 {
                    0.0
                } else if i == 0 {
                    self.v[[1, j]] - self.v[[0, j]]
                } else if i == rows - 1 {
                    self.v[[rows - 1, j]] - self.v[[rows - 2, j]]
                } else {
                    (self.v[[i + 1, j]] - self.v[[i - 1, j]]) / 2.0
                };

                let dv_dj = if cols < 2 {
                    0.0
                } else if j == 0 {
                    self.v[[i, 1]] - self.v[[i, 0]]
                } else if j == cols - 1 {
                    self.v[[i, cols - 1]] - self.v[[i, cols - 2]]
                } else {
                    (self.v[[i, j + 1]] - self.v[[i, j - 1]]) / 2.0
                };

                ey[[i, j]] = -dv_di;
                ex[[i, j]] = -dv_dj;
            }
        }

        ElectricField { ey, ex }
    }
}

/// Electric field components on the same grid as the potential. `ey` points
/// along increasing row index, `ex` along increasing column index.
pub struct ElectricField {
    pub ey: Array2<f64>,
    pub ex: Array2<f64>,
}

impl ElectricField {
    pub fn max_magnitude(&self) -> f64 {
        self.ex
            .iter()
            .zip(self.ey.iter())
            .map(|(&x, &y)| (x * x + y * y).sqrt())
            .fold(0.0, f64::max)
    }
}
