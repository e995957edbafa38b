use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use super::{font, render_error, Draw};
use crate::colormap::ColorMap;
use crate::config::PlotConfig;
use crate::error::Result;
use crate::figure::{equal_aspect_ranges, Layout, PixelRect, SpatialFigure};
use crate::mesh::Mesh;

const TICK_LENGTH: i32 = 4;
const TICK_COUNT: usize = 7;

/// Time-averaged field drawn as flat-shaded triangles with a colour bar
pub struct SpatialPlot<'a> {
    pub mesh: &'a Mesh,
    pub figure: &'a SpatialFigure,
    pub cmap: &'a ColorMap,
    pub config: &'a PlotConfig,
}

impl Draw for SpatialPlot<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(render_error)?;
        let dim = root.dim_in_pixel();

        let rect = self.figure.axes_rect(dim);
        let axes = root
            .clone()
            .shrink((rect.x, rect.y), (rect.width, rect.height));
        let (x_range, y_range) = equal_aspect_ranges(&self.figure.bbox, (rect.width, rect.height));

        // no label areas and no mesh: the axes stay hidden
        let mut chart = ChartBuilder::on(&axes)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_error)?;

        let mesh = self.mesh;
        chart
            .draw_series(
                mesh.triangles()
                    .iter()
                    .zip(&self.figure.face_values)
                    .map(|(tri, &v)| {
                        Polygon::new(mesh.vertices(tri).to_vec(), self.cmap.color(v).filled())
                    }),
            )
            .map_err(render_error)?;
        chart
            .draw_series(mesh.triangles().iter().map(|tri| {
                let [a, b, c] = mesh.vertices(tri);
                PathElement::new(vec![a, b, c, a], BLACK.stroke_width(1))
            }))
            .map_err(render_error)?;

        self.draw_colorbar(root, self.figure.colorbar_rect(dim))
    }
}

impl SpatialPlot<'_> {
    fn draw_colorbar<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        bar: PixelRect,
    ) -> Result<()> {
        let (x0, y0) = (bar.x as i32, bar.y as i32);
        let (x1, y1) = (bar.right() as i32, bar.bottom() as i32);
        let tick_font = font(self.config, self.config.font_size);
        let label_font = font(self.config, self.config.label_font_size);

        match self.figure.layout {
            Layout::Vertical => {
                let length = (y1 - y0).max(1);
                for py in y0..y1 {
                    let t = 1.0 - (py - y0) as f64 / length as f64;
                    root.draw(&Rectangle::new(
                        [(x0, py), (x1, py + 1)],
                        self.cmap.interpolate(t).filled(),
                    ))
                    .map_err(render_error)?;
                }

                // extend-max arrow on top
                let tip = (x0 + x1) / 2;
                let ext = length / 20;
                root.draw(&Polygon::new(
                    vec![(x0, y0), (x1, y0), (tip, y0 - ext)],
                    self.cmap.over().filled(),
                ))
                .map_err(render_error)?;
                root.draw(&PathElement::new(
                    vec![(x0, y1), (x0, y0), (tip, y0 - ext), (x1, y0), (x1, y1), (x0, y1)],
                    BLACK.stroke_width(1),
                ))
                .map_err(render_error)?;

                let style = TextStyle::from(tick_font).pos(Pos::new(HPos::Left, VPos::Center));
                for (t, label) in self.ticks() {
                    let py = y1 - (t * length as f64).round() as i32;
                    root.draw(&PathElement::new(
                        vec![(x1, py), (x1 + TICK_LENGTH, py)],
                        BLACK.stroke_width(1),
                    ))
                    .map_err(render_error)?;
                    root.draw(&Text::new(label, (x1 + 2 * TICK_LENGTH, py), style.clone()))
                        .map_err(render_error)?;
                }

                let style = TextStyle::from(label_font.transform(FontTransform::Rotate90))
                    .pos(Pos::new(HPos::Center, VPos::Top));
                root.draw(&Text::new(
                    self.figure.label.as_str(),
                    (x1 + 60, (y0 + y1) / 2),
                    style,
                ))
                .map_err(render_error)?;
            }
            Layout::Horizontal => {
                let length = (x1 - x0).max(1);
                for px in x0..x1 {
                    let t = (px - x0) as f64 / length as f64;
                    root.draw(&Rectangle::new(
                        [(px, y0), (px + 1, y1)],
                        self.cmap.interpolate(t).filled(),
                    ))
                    .map_err(render_error)?;
                }

                // extend-max arrow on the right
                let mid = (y0 + y1) / 2;
                let ext = length / 20;
                root.draw(&Polygon::new(
                    vec![(x1, y0), (x1, y1), (x1 + ext, mid)],
                    self.cmap.over().filled(),
                ))
                .map_err(render_error)?;
                root.draw(&PathElement::new(
                    vec![(x0, y0), (x1, y0), (x1 + ext, mid), (x1, y1), (x0, y1), (x0, y0)],
                    BLACK.stroke_width(1),
                ))
                .map_err(render_error)?;

                let style = TextStyle::from(tick_font).pos(Pos::new(HPos::Center, VPos::Top));
                for (t, label) in self.ticks() {
                    let px = x0 + (t * length as f64).round() as i32;
                    root.draw(&PathElement::new(
                        vec![(px, y1), (px, y1 + TICK_LENGTH)],
                        BLACK.stroke_width(1),
                    ))
                    .map_err(render_error)?;
                    root.draw(&Text::new(label, (px, y1 + 2 * TICK_LENGTH), style.clone()))
                        .map_err(render_error)?;
                }

                let style = TextStyle::from(label_font).pos(Pos::new(HPos::Center, VPos::Top));
                root.draw(&Text::new(
                    self.figure.label.as_str(),
                    ((x0 + x1) / 2, y1 + 8 * TICK_LENGTH),
                    style,
                ))
                .map_err(render_error)?;
            }
        }
        Ok(())
    }

    /// Evenly spaced ticks as (position on the bar, label)
    fn ticks(&self) -> Vec<(f64, String)> {
        let (vmin, vmax) = (self.cmap.vmin(), self.cmap.vmax());
        (0..TICK_COUNT)
            .map(|i| {
                let t = i as f64 / (TICK_COUNT - 1) as f64;
                (t, format!("{:.2}", vmin + t * (vmax - vmin)))
            })
            .collect()
    }
}
