//! Continuous colour mapping for the spatial chart.
//!
//! Values are normalised against a fixed `[vmin, vmax]` scale and looked up
//! in a diverging palette. Out-of-range values take the end colours, which
//! is what the colour bar's "extend" arrows advertise.

use plotters::style::RGBColor;

use crate::config::PlotConfig;

/// ColorBrewer RdBu, red (low) to blue (high)
const RDBU: [[u8; 3]; 11] = [
    [0x67, 0x00, 0x1f],
    [0xb2, 0x18, 0x2b],
    [0xd6, 0x60, 0x4d],
    [0xf4, 0xa5, 0x82],
    [0xfd, 0xdb, 0xc7],
    [0xf7, 0xf7, 0xf7],
    [0xd1, 0xe5, 0xf0],
    [0x92, 0xc5, 0xde],
    [0x43, 0x93, 0xc3],
    [0x21, 0x66, 0xac],
    [0x05, 0x30, 0x61],
];

/// Sequential fallback for unknown palette names
const GREYS: [[u8; 3]; 2] = [[0xff, 0xff, 0xff], [0x00, 0x00, 0x00]];

#[derive(Debug, Clone)]
pub struct ColorMap {
    stops: &'static [[u8; 3]],
    vmin: f64,
    vmax: f64,
}

impl ColorMap {
    pub fn new(palette: &str, vmin: f64, vmax: f64) -> Self {
        let stops: &'static [[u8; 3]] = match palette.to_lowercase().as_str() {
            "rdbu" => &RDBU,
            "rdbu_r" => &RDBU_R,
            _ => {
                eprintln!("warning: unknown palette '{}', using greys", palette);
                &GREYS
            }
        };
        ColorMap { stops, vmin, vmax }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        Self::new(&config.palette, config.vmin, config.vmax)
    }

    pub fn vmin(&self) -> f64 {
        self.vmin
    }

    pub fn vmax(&self) -> f64 {
        self.vmax
    }

    /// Position of `value` on the scale, clamped to [0, 1]
    pub fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 0.0;
        }
        ((value - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0)
    }

    pub fn color(&self, value: f64) -> RGBColor {
        self.interpolate(self.normalize(value))
    }

    /// Colour used for values above `vmax`
    pub fn over(&self) -> RGBColor {
        self.interpolate(1.0)
    }

    pub fn interpolate(&self, t: f64) -> RGBColor {
        let n = self.stops.len();
        let pos = t.clamp(0.0, 1.0) * (n - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = (lo + 1).min(n - 1);
        let frac = pos - lo as f64;

        let mix = |c: usize| {
            (self.stops[lo][c] as f64 * (1.0 - frac) + self.stops[hi][c] as f64 * frac).round()
                as u8
        };
        RGBColor(mix(0), mix(1), mix(2))
    }
}

const RDBU_R: [[u8; 3]; 11] = {
    let mut out = RDBU;
    let mut i = 0;
    while i < 11 {
        out[i] = RDBU[10 - i];
        i += 1;
    }
    out
};
