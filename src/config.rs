use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fs;

/// Simulation configuration. All geometry is in grid units.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub iterations: usize,
    /// Gridpoints between the parallel plates.
    pub plate_separation: usize,
    /// Distance of each plate end from the domain edge, in columns.
    pub plate_margin: usize,
    /// Absolute potential of each plate; one plate sits at +V0, the other at -V0.
    pub plate_potential: f64,
    /// Number of tick labels on each plot axis.
    pub tick_count: usize,
    pub report_period: usize,
    pub output_path: String,
    pub image_width: u32,
    pub image_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 41,
            cols: 41,
            iterations: 1000,
            plate_separation: 5,
            plate_margin: 17,
            plate_potential: 1.0,
            tick_count: 3,
            report_period: 100,
            output_path: "potential.png".to_string(),
            image_width: 900,
            image_height: 800,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. Missing fields take the defaults.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse TOML config: {}", e))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration parameters. Zero iterations is allowed:
    /// the output is then just the stamped initial field.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(anyhow!(
                "Grid dimensions must be positive (rows={}, cols={})",
                self.rows,
                self.cols
            ));
        }
        if self.plate_separation == 0 || self.plate_separation >= self.rows {
            return Err(anyhow!(
                "plate_separation must be between 1 and rows-1, got {}",
                self.plate_separation
            ));
        }
        if 2 * self.plate_margin >= self.cols {
            return Err(anyhow!(
                "plate_margin {} leaves no plate columns on a {}-column grid",
                self.plate_margin,
                self.cols
            ));
        }
        if !self.plate_potential.is_finite() {
            return Err(anyhow!(
                "plate_potential must be finite, got {}",
                self.plate_potential
            ));
        }
        if self.tick_count < 2 {
            return Err(anyhow!("tick_count must be at least 2, got {}", self.tick_count));
        }
        if self.report_period == 0 {
            return Err(anyhow!("report_period must be positive"));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(anyhow!(
                "Image dimensions must be positive (width={}, height={})",
                self.image_width,
                self.image_height
            ));
        }
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        println!("=== Simulation Configuration ===");
        println!("Grid: {}x{}", self.rows, self.cols);
        println!("Sweeps: {}", self.iterations);
        println!(
            "Plates: separation {}, margin {}, potential +/-{}",
            self.plate_separation, self.plate_margin, self.plate_potential
        );
        println!(
            "Output: {} ({}x{} px, {} ticks per axis)",
            self.output_path, self.image_width, self.image_height, self.tick_count
        );
        println!("================================");
    }
}
