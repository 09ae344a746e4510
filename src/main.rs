mod config;
mod grid;
mod potential;
mod solver;
mod visualisation;

use anyhow::Result;
use config::Config;
use grid::{Grid, PlateGeometry};
use solver::RelaxationSolver;
use std::path::Path;
use visualisation::FieldVisualiser;

fn main() -> Result<()> {
    // Optional config file as the first argument; otherwise the built-in
    // parallel-plate defaults run.
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(&path)?,
        None => {
            let config = Config::default();
            config.validate()?;
            config
        }
    };
    config.print_summary();

    let grid = Grid::from_config(&config);
    let plates = PlateGeometry::from_config(&config);

    let mut solver = RelaxationSolver::new(grid, plates, config.iterations, config.report_period);
    solver.run();

    let field = solver.into_field();
    let electric = field.electric_field();

    let visualiser = FieldVisualiser::new(config.image_width, config.image_height);
    visualiser.plot(
        &field.v,
        &electric,
        config.tick_count,
        Path::new(&config.output_path),
    )?;

    Ok(())
}
