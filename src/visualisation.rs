use crate::potential::ElectricField;
use anyhow::Result;
use colorgrad::Gradient;
use ndarray::Array2;
use plotters::prelude::*;
use std::path::Path;

const COLORBAR_WIDTH: i32 = 90;

/// Renders the potential as a heatmap with the electric field overlaid as
/// arrows, plus axis labels, a title and a colorbar.
pub struct FieldVisualiser {
    width: u32,
    height: u32,
    // Store as a boxed trait object
    gradient: Box<dyn Gradient>,
}

impl FieldVisualiser {
    pub fn new(width: u32, height: u32) -> Self {
        // Diverging red-blue scale, sampled reversed so the low end is blue.
        let gradient = Box::new(colorgrad::preset::rd_bu());

        Self {
            width,
            height,
            gradient,
        }
    }

    pub fn plot(
        &self,
        potential: &Array2<f64>,
        field: &ElectricField,
        tick_count: usize,
        path: &Path,
    ) -> Result<()> {
        let (rows, cols) = potential.dim();

        // The colour scale spans the data's actual min/max. It is not forced
        // symmetric, so the visual midpoint only coincides with V = 0 when
        // the extremes happen to balance.
        let mut v_min = f64::INFINITY;
        let mut v_max = f64::NEG_INFINITY;
        for &v in potential.iter() {
            v_min = v_min.min(v);
            v_max = v_max.max(v);
        }

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let (plot_area, bar_area) =
            root.split_horizontally(self.width as i32 - COLORBAR_WIDTH);

        let mut chart = ChartBuilder::on(&plot_area)
            .caption("V(x,y) and E(x,y)", ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(40)
            .build_cartesian_2d(-0.5..cols as f64 - 0.5, -0.5..rows as f64 - 0.5)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("x")
            .y_desc("y")
            .x_labels(tick_count)
            .y_labels(tick_count)
            .draw()?;

        // Heatmap, one cell per grid point. The chart's y axis increases
        // upward, so larger row indices are drawn higher.
        for i in 0..rows {
            for j in 0..cols {
                let color = self.value_to_color(potential[[i, j]], v_min, v_max);
                chart.draw_series(std::iter::once(Rectangle::new(
                    [
                        (j as f64 - 0.5, i as f64 - 0.5),
                        (j as f64 + 0.5, i as f64 + 0.5),
                    ],
                    color.filled(),
                )))?;
            }
        }

        // Field arrows at every grid point, scaled so the strongest arrow
        // spans roughly 40% of a cell.
        let max_mag = field.max_magnitude();
        if max_mag > 0.0 {
            let scale = 0.4 / max_mag;
            for i in 0..rows {
                for j in 0..cols {
                    let dx = field.ex[[i, j]] * scale;
                    let dy = field.ey[[i, j]] * scale;
                    let len = (dx * dx + dy * dy).sqrt();
                    if len < 1e-9 {
                        continue;
                    }

                    let (x0, y0) = (j as f64, i as f64);
                    let (x1, y1) = (x0 + dx, y0 + dy);
                    chart.draw_series(std::iter::once(PathElement::new(
                        vec![(x0, y0), (x1, y1)],
                        BLACK.stroke_width(1),
                    )))?;

                    let ux = dx / len;
                    let uy = dy / len;
                    let head = len * 0.35;
                    let (px, py) = (-uy, ux);
                    let left = (x1 - ux * head + px * head * 0.5, y1 - uy * head + py * head * 0.5);
                    let right = (x1 - ux * head - px * head * 0.5, y1 - uy * head - py * head * 0.5);
                    chart.draw_series(std::iter::once(Polygon::new(
                        vec![(x1, y1), left, right],
                        BLACK.filled(),
                    )))?;
                }
            }
        }

        self.draw_colorbar(&bar_area, v_min, v_max)?;

        root.present()?;
        println!("Saved figure: {}", path.display());
        Ok(())
    }

    fn draw_colorbar(
        &self,
        area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        v_min: f64,
        v_max: f64,
    ) -> Result<()> {
        let (_, height) = area.dim_in_pixel();
        let top = 60;
        let bottom = height as i32 - 50;
        if bottom <= top {
            return Ok(());
        }
        let (x0, x1) = (8, 32);

        for y in top..bottom {
            let t = (bottom - y) as f64 / (bottom - top) as f64;
            let value = v_min + t * (v_max - v_min);
            let color = self.value_to_color(value, v_min, v_max);
            area.draw(&Rectangle::new([(x0, y), (x1, y + 1)], color.filled()))?;
        }

        area.draw(&Text::new(
            "V".to_string(),
            (x0 + 6, top - 30),
            ("sans-serif", 22),
        ))?;
        area.draw(&Text::new(
            format!("{:.2}", v_max),
            (x1 + 4, top - 7),
            ("sans-serif", 15),
        ))?;
        area.draw(&Text::new(
            format!("{:.2}", v_min),
            (x1 + 4, bottom - 7),
            ("sans-serif", 15),
        ))?;

        Ok(())
    }

    fn value_to_color(&self, value: f64, min_val: f64, max_val: f64) -> RGBColor {
        let normalized = if max_val > min_val {
            (value - min_val) / (max_val - min_val)
        } else {
            0.5
        };
        let normalized = normalized.clamp(0.0, 1.0);
        let color_rgba = self.gradient.at(1.0 - normalized as f32).to_rgba8();
        RGBColor(color_rgba[0], color_rgba[1], color_rgba[2])
    }
}
