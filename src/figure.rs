//! Everything about the two charts that can be decided without a drawing
//! backend: which layout to use, what colour each triangle gets, where the
//! axes and colour bar sit in pixel space, and where the date ticks fall.

use std::ops::Range;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::config::PlotConfig;
use crate::error::Result;
use crate::mesh::{BoundingBox, Mesh};
use crate::series::{FieldLocation, OutputSeries};

/// Colour bar placement, chosen from the domain's aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Tall domain, colour bar on the right
    Vertical,
    /// Wide domain, colour bar below
    Horizontal,
}

impl Layout {
    /// NaN ratios (single-point domains) fall through to `Horizontal`.
    pub fn select(aspect_ratio: f64, threshold: f64) -> Layout {
        if aspect_ratio < threshold {
            Layout::Vertical
        } else {
            Layout::Horizontal
        }
    }

    /// Axes and colour bar as `[left, bottom, width, height]` figure fractions
    pub fn fractions(&self) -> ([f64; 4], [f64; 4]) {
        match self {
            Layout::Vertical => ([0.0, 0.0, 0.8, 1.0], [0.8, 0.2, 0.025, 0.6]),
            Layout::Horizontal => ([0.0, 0.2, 1.0, 0.8], [0.2, 0.15, 0.6, 0.04]),
        }
    }
}

/// Pixel rectangle with the origin at the top left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Converts a bottom-left-origin figure fraction to pixels
    pub fn from_fraction(frac: [f64; 4], figure: (u32, u32)) -> Self {
        let (fw, fh) = (figure.0 as f64, figure.1 as f64);
        let [left, bottom, width, height] = frac;
        PixelRect {
            x: (left * fw).round() as u32,
            y: ((1.0 - bottom - height) * fh).round() as u32,
            width: (width * fw).round() as u32,
            height: (height * fh).round() as u32,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpatialFigure {
    pub aspect_ratio: f64,
    pub layout: Layout,
    pub bbox: BoundingBox,
    /// One colour value per triangle
    pub face_values: Vec<f64>,
    pub label: String,
}

impl SpatialFigure {
    pub fn prepare(mesh: &Mesh, series: &OutputSeries, config: &PlotConfig) -> Result<Self> {
        series.check_against(mesh)?;
        let average = series.time_average()?;

        let face_values = match series.location() {
            FieldLocation::Element => average.to_vec(),
            FieldLocation::Node => mesh
                .triangles()
                .iter()
                .map(|tri| tri.iter().map(|&n| average[n]).sum::<f64>() / 3.0)
                .collect(),
        };

        let aspect_ratio = mesh.aspect_ratio();
        Ok(SpatialFigure {
            aspect_ratio,
            layout: Layout::select(aspect_ratio, config.aspect_threshold),
            bbox: mesh.bounding_box(),
            face_values,
            label: format!("{}({})", series.name(), series.unit()),
        })
    }

    pub fn axes_rect(&self, figure: (u32, u32)) -> PixelRect {
        PixelRect::from_fraction(self.layout.fractions().0, figure)
    }

    pub fn colorbar_rect(&self, figure: (u32, u32)) -> PixelRect {
        PixelRect::from_fraction(self.layout.fractions().1, figure)
    }
}

/// Widens the bounding box so one data unit spans the same number of pixels
/// on both axes, keeping the domain centred.
pub fn equal_aspect_ranges(bbox: &BoundingBox, area: (u32, u32)) -> (Range<f64>, Range<f64>) {
    let (pw, ph) = (area.0.max(1) as f64, area.1.max(1) as f64);
    let mut width = bbox.width();
    let mut height = bbox.height();
    if width <= 0.0 && height <= 0.0 {
        width = 1.0;
        height = 1.0;
    }

    // data units per pixel
    let scale = (width / pw).max(height / ph);
    let half_w = scale * pw / 2.0;
    let half_h = scale * ph / 2.0;
    let cx = (bbox.min_x + bbox.max_x) / 2.0;
    let cy = (bbox.min_y + bbox.max_y) / 2.0;

    ((cx - half_w)..(cx + half_w), (cy - half_h)..(cy + half_h))
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesFigure {
    pub points: Vec<(NaiveDateTime, f64)>,
    pub y_label: String,
}

impl TimeSeriesFigure {
    pub fn prepare(series: &OutputSeries) -> Result<Self> {
        let average = series.spatial_average()?;
        Ok(TimeSeriesFigure {
            points: series
                .times()
                .iter()
                .copied()
                .zip(average.iter().copied())
                .collect(),
            y_label: format!("{} ({})", series.name(), series.unit()),
        })
    }

    pub fn time_range(&self) -> Range<NaiveDateTime> {
        let first = self.points.iter().map(|p| p.0).min();
        let last = self.points.iter().map(|p| p.0).max();
        match (first, last) {
            (Some(a), Some(b)) if a < b => a..b,
            (Some(a), _) => (a - chrono::Duration::days(1))..(a + chrono::Duration::days(1)),
            _ => {
                let epoch = DateTime::<Utc>::UNIX_EPOCH.naive_utc();
                epoch..epoch + chrono::Duration::days(1)
            }
        }
    }

    pub fn value_range(&self) -> Range<f64> {
        padded_range(self.points.iter().map(|p| p.1))
    }
}

/// Min..max of the finite values with 5% headroom on each side
pub fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        let pad = if lo == 0.0 { 0.5 } else { lo.abs() * 0.5 };
        return (lo - pad)..(hi + pad);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

/// First-of-month ticks inside `range`, on months where
/// `(month - 1) % interval == 0`.
pub fn month_ticks(range: &Range<NaiveDateTime>, interval: u32) -> Vec<NaiveDateTime> {
    let interval = interval.max(1);
    let mut ticks = Vec::new();
    let (mut year, mut month) = (range.start.year(), range.start.month());

    loop {
        let Some(tick) = NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        else {
            break;
        };
        if tick > range.end {
            break;
        }
        if tick >= range.start && (month - 1) % interval == 0 {
            ticks.push(tick);
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::tests::unit_square;
    use crate::series::tests::{constant_node_series, daily};
    use approx::assert_relative_eq;
    use ndarray::array;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn layout_threshold_is_not_strict() {
        assert_eq!(Layout::select(1.0, 1.33), Layout::Vertical);
        assert_eq!(Layout::select(1.3299, 1.33), Layout::Vertical);
        assert_eq!(Layout::select(1.33, 1.33), Layout::Horizontal);
        assert_eq!(Layout::select(4.0, 1.33), Layout::Horizontal);
        assert_eq!(Layout::select(f64::INFINITY, 1.33), Layout::Horizontal);
        assert_eq!(Layout::select(f64::NAN, 1.33), Layout::Horizontal);
    }

    #[test]
    fn layout_follows_mesh_shape() {
        let config = PlotConfig::default();
        let wide = Mesh::new(vec![0.0, 4.0, 4.0], vec![0.0, 0.0, 3.0], vec![[0, 1, 2]]).unwrap();
        let series = constant_node_series(1, 3, 0.5);
        let figure = SpatialFigure::prepare(&wide, &series, &config).unwrap();
        assert_relative_eq!(figure.aspect_ratio, 4.0 / 3.0);
        assert_eq!(figure.layout, Layout::Horizontal);

        let tall = Mesh::new(vec![0.0, 3.0, 3.0], vec![0.0, 0.0, 4.0], vec![[0, 1, 2]]).unwrap();
        let figure = SpatialFigure::prepare(&tall, &series, &config).unwrap();
        assert_eq!(figure.layout, Layout::Vertical);
    }

    #[test]
    fn unit_square_scenario() {
        let mesh = unit_square();
        let series = constant_node_series(3, 4, 1.0);
        let config = PlotConfig::default();

        let spatial = SpatialFigure::prepare(&mesh, &series, &config).unwrap();
        assert_relative_eq!(spatial.aspect_ratio, 1.0);
        assert_eq!(spatial.layout, Layout::Vertical);
        assert_eq!(spatial.face_values.len(), 2);
        spatial.face_values.iter().for_each(|&v| assert_relative_eq!(v, 1.0));
        assert_eq!(spatial.label, "Groundwater storage(m)");

        let temporal = TimeSeriesFigure::prepare(&series).unwrap();
        assert_eq!(temporal.points.len(), 3);
        temporal.points.iter().for_each(|p| assert_relative_eq!(p.1, 1.0));
        assert_eq!(temporal.y_label, "Groundwater storage (m)");
    }

    #[test]
    fn node_values_are_flat_shaded_per_triangle() {
        let mesh = unit_square();
        let series = OutputSeries::new(
            daily(2),
            array![[0.0, 3.0, 6.0, 9.0], [0.0, 3.0, 6.0, 9.0]],
            "gw",
            "m",
            FieldLocation::Node,
        )
        .unwrap();
        let figure = SpatialFigure::prepare(&mesh, &series, &PlotConfig::default()).unwrap();
        assert_relative_eq!(figure.face_values[0], 3.0);
        assert_relative_eq!(figure.face_values[1], 5.0);
    }

    #[test]
    fn element_values_colour_their_triangle() {
        let mesh = unit_square();
        let series = OutputSeries::new(
            daily(2),
            array![[0.2, 1.0], [0.4, 3.0]],
            "Groundwater storage",
            "m",
            FieldLocation::Element,
        )
        .unwrap();
        let figure = SpatialFigure::prepare(&mesh, &series, &PlotConfig::default()).unwrap();
        assert_relative_eq!(figure.face_values[0], 0.3);
        assert_relative_eq!(figure.face_values[1], 2.0);
    }

    #[test]
    fn mismatched_series_does_not_prepare() {
        let mesh = unit_square();
        let series = constant_node_series(3, 3, 1.0);
        assert!(SpatialFigure::prepare(&mesh, &series, &PlotConfig::default()).is_err());
    }

    #[test]
    fn fractions_map_to_top_left_pixels() {
        let figure = (800, 600);
        let axes = PixelRect::from_fraction(Layout::Horizontal.fractions().0, figure);
        assert_eq!(
            axes,
            PixelRect {
                x: 0,
                y: 0,
                width: 800,
                height: 480
            }
        );
        let bar = PixelRect::from_fraction(Layout::Horizontal.fractions().1, figure);
        assert_eq!((bar.x, bar.y, bar.width, bar.height), (160, 486, 480, 24));

        let bar = PixelRect::from_fraction(Layout::Vertical.fractions().1, figure);
        assert_eq!((bar.x, bar.y, bar.width, bar.height), (640, 120, 20, 360));
        assert_eq!(bar.right(), 660);
        assert_eq!(bar.bottom(), 480);
    }

    #[test]
    fn equal_aspect_keeps_unit_scale() {
        let bbox = BoundingBox {
            min_x: 0.0,
            max_x: 2.0,
            min_y: 0.0,
            max_y: 1.0,
        };
        let (xr, yr) = equal_aspect_ranges(&bbox, (400, 400));
        assert_relative_eq!(xr.end - xr.start, 2.0);
        assert_relative_eq!(yr.end - yr.start, 2.0);
        assert_relative_eq!((yr.start + yr.end) / 2.0, 0.5);

        let (xr, yr) = equal_aspect_ranges(&bbox, (800, 200));
        assert_relative_eq!((xr.end - xr.start) / 800.0, (yr.end - yr.start) / 200.0);
        assert!(xr.start <= 0.0 && xr.end >= 2.0);
        assert!(yr.start <= 0.0 && yr.end >= 1.0);
    }

    #[test]
    fn month_ticks_every_other_month() {
        let range = date(2009, 1, 15)..date(2009, 12, 31);
        let ticks = month_ticks(&range, 2);
        let months: Vec<u32> = ticks.iter().map(|t| t.month()).collect();
        assert_eq!(months, vec![3, 5, 7, 9, 11]);
        assert!(ticks.iter().all(|t| t.day() == 1));
    }

    #[test]
    fn month_ticks_cross_year_boundary() {
        let range = date(2008, 10, 1)..date(2009, 4, 1);
        let ticks = month_ticks(&range, 2);
        assert_eq!(
            ticks,
            vec![date(2008, 11, 1), date(2009, 1, 1), date(2009, 3, 1)]
        );
    }

    #[test]
    fn padded_range_handles_constants() {
        let range = padded_range([1.0, 1.0, 1.0].into_iter());
        assert_relative_eq!(range.start, 0.5);
        assert_relative_eq!(range.end, 1.5);

        let range = padded_range([0.0, 10.0].into_iter());
        assert_relative_eq!(range.start, -0.5);
        assert_relative_eq!(range.end, 10.5);

        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
    }

    #[test]
    fn single_timestep_gets_a_day_either_side() {
        let series = constant_node_series(1, 4, 1.0);
        let figure = TimeSeriesFigure::prepare(&series).unwrap();
        let range = figure.time_range();
        assert_eq!(range.end - range.start, chrono::Duration::days(2));
    }

    #[test]
    fn empty_series_spans_the_first_epoch_day() {
        let figure = TimeSeriesFigure {
            points: Vec::new(),
            y_label: String::new(),
        };
        let range = figure.time_range();
        assert_eq!(range.start, date(1970, 1, 1));
        assert_eq!(range.end, date(1970, 1, 2));
    }
}
