use std::ops::Range;

use chrono::NaiveDateTime;
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{font, render_error, Draw};
use crate::config::{DEFAULT_DATE_FORMAT, PlotConfig};
use crate::error::Result;
use crate::figure::{month_ticks, TimeSeriesFigure};

const LINE_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);

/// Domain-averaged value against time
pub struct TimeSeriesPlot<'a> {
    pub figure: &'a TimeSeriesFigure,
    pub config: &'a PlotConfig,
}

impl Draw for TimeSeriesPlot<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(render_error)?;

        let range = self.figure.time_range();
        let ticks = month_ticks(&range, self.config.month_interval);
        let x_axis = MonthAxis {
            range,
            ticks,
            date_format: self.config.date_format.clone(),
        };
        let labels = x_axis.clone();

        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(x_axis, self.figure.value_range())
            .map_err(render_error)?;

        let format_date = |t: &NaiveDateTime| labels.format_ext(t);
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Date")
            .y_desc(self.figure.y_label.as_str())
            .axis_desc_style(font(self.config, self.config.label_font_size))
            .label_style(font(self.config, self.config.font_size))
            .x_label_formatter(&format_date)
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(LineSeries::new(
                self.figure.points.iter().copied(),
                LINE_COLOR.stroke_width(2),
            ))
            .map_err(render_error)?;
        chart
            .draw_series(
                self.figure
                    .points
                    .iter()
                    .map(|&p| Circle::new(p, 4, LINE_COLOR.filled())),
            )
            .map_err(render_error)?;

        Ok(())
    }
}

/// Date axis whose ticks are fixed month starts
#[derive(Debug, Clone)]
struct MonthAxis {
    range: Range<NaiveDateTime>,
    ticks: Vec<NaiveDateTime>,
    date_format: String,
}

impl Ranged for MonthAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = NaiveDateTime;

    fn map(&self, value: &NaiveDateTime, limit: (i32, i32)) -> i32 {
        let span = (self.range.end - self.range.start).num_seconds().max(1) as f64;
        let offset = (*value - self.range.start).num_seconds() as f64;
        limit.0 + ((limit.1 - limit.0) as f64 * offset / span).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<NaiveDateTime> {
        let max = hint.max_num_points().max(1);
        let stride = self.ticks.len().div_ceil(max).max(1);
        self.ticks.iter().step_by(stride).copied().collect()
    }

    fn range(&self) -> Range<NaiveDateTime> {
        self.range.clone()
    }
}

impl ValueFormatter<NaiveDateTime> for MonthAxis {
    fn format(value: &NaiveDateTime) -> String {
        value.format(DEFAULT_DATE_FORMAT).to_string()
    }

    fn format_ext(&self, value: &NaiveDateTime) -> String {
        value.format(&self.date_format).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::tests::render_svg;
    use crate::series::tests::constant_node_series;
    use chrono::NaiveDate;

    fn month(m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2009, m, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn renders_axis_labels_and_month_ticks() {
        let config = PlotConfig::default();
        // 2009-01-01 through early June
        let series = constant_node_series(160, 4, 1.0);
        let figure = TimeSeriesFigure::prepare(&series).unwrap();
        let plot = TimeSeriesPlot {
            figure: &figure,
            config: &config,
        };

        let svg = render_svg(&plot, (config.width, config.height));
        assert!(svg.contains("Date"));
        assert!(svg.contains("Groundwater storage (m)"));
        assert!(svg.contains("01/09"));
        assert!(svg.contains("03/09"));
        assert!(svg.contains("05/09"));
        assert!(!svg.contains("02/09"));
    }

    #[test]
    fn configured_date_format_reaches_the_tick_labels() {
        let config = PlotConfig {
            date_format: "%b %Y".to_string(),
            ..PlotConfig::default()
        };
        let series = constant_node_series(160, 4, 1.0);
        let figure = TimeSeriesFigure::prepare(&series).unwrap();
        let plot = TimeSeriesPlot {
            figure: &figure,
            config: &config,
        };

        let svg = render_svg(&plot, (config.width, config.height));
        assert!(svg.contains("Mar 2009"));
        assert!(!svg.contains("03/09"));
    }

    #[test]
    fn month_axis_formats_with_its_own_pattern() {
        let axis = MonthAxis {
            range: month(1)..month(6),
            ticks: vec![month(1), month(3), month(5)],
            date_format: "%Y-%m".to_string(),
        };
        assert_eq!(axis.format_ext(&month(3)), "2009-03");
        assert_eq!(MonthAxis::format(&month(3)), "03/09");
    }

    #[test]
    fn month_axis_thins_ticks_to_the_hint() {
        let ticks: Vec<_> = (1..=12).map(month).collect();
        let axis = MonthAxis {
            range: month(1)..month(12),
            ticks: ticks.clone(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        };
        assert_eq!(axis.key_points(20usize), ticks);
        assert_eq!(
            axis.key_points(4usize),
            vec![month(1), month(4), month(7), month(10)]
        );
    }

    #[test]
    fn month_axis_maps_ends_to_limits() {
        let axis = MonthAxis {
            range: month(1)..month(5),
            ticks: Vec::new(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        };
        assert_eq!(axis.map(&month(1), (100, 500)), 100);
        assert_eq!(axis.map(&month(5), (100, 500)), 500);
    }
}
