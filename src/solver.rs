use crate::grid::{Grid, PlateGeometry};
use crate::potential::PotentialField;
use ndarray::Array2;

// 9-point stencil weights. They sum to one (4 * 0.2 + 4 * 0.05), so a
// uniform field is a fixed point of the sweep.
const ORTHO_WEIGHT: f64 = 0.2;
const DIAG_WEIGHT: f64 = 0.05;

/// Jacobi relaxation of the Laplace equation on a periodic grid with the
/// plate rows held fixed. Runs a fixed sweep budget; there is no convergence
/// check and no early exit.
pub struct RelaxationSolver {
    grid: Grid,
    plates: PlateGeometry,
    field: PotentialField,
    scratch: Array2<f64>,
    iterations: usize,
    report_period: usize,
    current_sweep: usize,
}

impl RelaxationSolver {
    pub fn new(grid: Grid, plates: PlateGeometry, iterations: usize, report_period: usize) -> Self {
        let mut field = PotentialField::new(&grid);
        field.stamp_plates(&plates);
        let scratch = Array2::zeros((grid.rows, grid.cols));

        Self {
            grid,
            plates,
            field,
            scratch,
            iterations,
            report_period,
            current_sweep: 0,
        }
    }

    pub fn field(&self) -> &PotentialField {
        &self.field
    }

    pub fn into_field(self) -> PotentialField {
        self.field
    }

    pub fn is_finished(&self) -> bool {
        self.current_sweep >= self.iterations
    }

    /// One sweep. The whole new field is computed from the previous sweep's
    /// values before any cell is replaced (synchronous update, two buffers
    /// swapped at the end), then the plates are re-stamped.
    pub fn sweep(&mut self) {
        let grid = self.grid;
        let v = &self.field.v;
        let new_v = &mut self.scratch;

        for i in 0..grid.rows {
            let up = grid.row_above(i);
            let down = grid.row_below(i);
            for j in 0..grid.cols {
                let left = grid.col_left(j);
                let right = grid.col_right(j);

                let orthogonal = v[[up, j]] + v[[down, j]] + v[[i, left]] + v[[i, right]];
                let diagonal =
                    v[[up, left]] + v[[up, right]] + v[[down, left]] + v[[down, right]];

                new_v[[i, j]] = ORTHO_WEIGHT * orthogonal + DIAG_WEIGHT * diagonal;
            }
        }

        std::mem::swap(&mut self.field.v, &mut self.scratch);
        self.field.stamp_plates(&self.plates);
        self.current_sweep += 1;
    }

    pub fn run(&mut self) {
        println!("Starting relaxation...");
        println!("Grid: {}x{}", self.grid.rows, self.grid.cols);
        println!("Sweeps: {}", self.iterations);

        while !self.is_finished() {
            self.sweep();

            if self.current_sweep % self.report_period == 0 {
                println!("Sweep {}/{}", self.current_sweep, self.iterations);
            }
        }

        println!("Relaxation complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use approx::assert_abs_diff_eq;

    // A zero-width plate band, so nothing is held fixed.
    fn no_plates() -> PlateGeometry {
        PlateGeometry {
            positive_row: 0,
            negative_row: 0,
            col_start: 0,
            col_end: 0,
            potential: 0.0,
        }
    }

    #[test]
    fn stencil_weights_are_normalised() {
        assert_abs_diff_eq!(4.0 * ORTHO_WEIGHT + 4.0 * DIAG_WEIGHT, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn uniform_field_is_a_fixed_point() {
        let mut solver = RelaxationSolver::new(Grid::new(5, 7), no_plates(), 1, 1);
        solver.field.v.fill(3.25);

        solver.sweep();

        for &v in solver.field().v.iter() {
            assert_abs_diff_eq!(v, 3.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_iterations_leaves_the_stamped_field_untouched() {
        let config = Config::default();
        let grid = Grid::from_config(&config);
        let plates = PlateGeometry::from_config(&config);

        let mut solver = RelaxationSolver::new(grid, plates, 0, config.report_period);
        solver.run();

        let mut expected = PotentialField::new(&grid);
        expected.stamp_plates(&plates);
        assert_eq!(solver.field().v, expected.v);
    }

    #[test]
    fn plate_rows_hold_their_potential_after_every_sweep() {
        let config = Config::default();
        let grid = Grid::from_config(&config);
        let plates = PlateGeometry::from_config(&config);
        let mut solver = RelaxationSolver::new(grid, plates, 25, config.report_period);

        for _ in 0..25 {
            solver.sweep();
            for j in plates.col_start..plates.col_end {
                assert_eq!(solver.field().v[[plates.positive_row, j]], 1.0);
                assert_eq!(solver.field().v[[plates.negative_row, j]], -1.0);
            }
        }
    }

    #[test]
    fn single_cell_spreads_with_toroidal_wrap() {
        // One unit charge in the corner of a 3x3 grid. After one sweep the
        // orthogonal neighbours (wrapping across both edges) each hold 0.2,
        // the diagonal neighbours 0.05, and the corner itself 0.
        let mut solver = RelaxationSolver::new(Grid::new(3, 3), no_plates(), 1, 1);
        solver.field.v[[0, 0]] = 1.0;

        solver.sweep();

        let v = &solver.field().v;
        assert_abs_diff_eq!(v[[0, 0]], 0.0, epsilon = 1e-15);
        for &(i, j) in &[(1, 0), (2, 0), (0, 1), (0, 2)] {
            assert_abs_diff_eq!(v[[i, j]], ORTHO_WEIGHT, epsilon = 1e-15);
        }
        for &(i, j) in &[(1, 1), (1, 2), (2, 1), (2, 2)] {
            assert_abs_diff_eq!(v[[i, j]], DIAG_WEIGHT, epsilon = 1e-15);
        }
    }

    #[test]
    fn identical_runs_produce_identical_fields() {
        let config = Config {
            rows: 21,
            cols: 21,
            plate_margin: 7,
            iterations: 40,
            ..Config::default()
        };
        let grid = Grid::from_config(&config);
        let plates = PlateGeometry::from_config(&config);

        let mut first = RelaxationSolver::new(grid, plates, config.iterations, config.report_period);
        let mut second = RelaxationSolver::new(grid, plates, config.iterations, config.report_period);
        first.run();
        second.run();

        assert_eq!(first.field().v, second.field().v);
    }

    #[test]
    fn relaxation_pulls_interior_cells_toward_the_plates() {
        let config = Config::default();
        let grid = Grid::from_config(&config);
        let plates = PlateGeometry::from_config(&config);
        let mut solver = RelaxationSolver::new(grid, plates, 100, config.report_period);
        solver.run();

        // Midway between the plates the field is pulled positive above the
        // midline's negative plate side and negative below the positive side.
        let between = (plates.positive_row + plates.negative_row) / 2;
        let above = solver.field().v[[plates.positive_row - 1, 20]];
        let below = solver.field().v[[plates.negative_row + 1, 20]];
        assert!(above > 0.0);
        assert!(below < 0.0);
        // The midline sits symmetrically between +V0 and -V0.
        assert_abs_diff_eq!(solver.field().v[[between, 20]], 0.0, epsilon = 1e-9);
    }
}
