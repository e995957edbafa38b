use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

use crate::error::PlotError;
use crate::series::FieldLocation;

pub const DEFAULT_DATE_FORMAT: &str = "%m/%y";

// Plot appearance, overridable from a YAML file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Width/height ratio below which the colour bar goes on the right
    pub aspect_threshold: f64,
    pub vmin: f64,
    pub vmax: f64,
    pub palette: String,
    pub month_interval: u32,
    pub date_format: String,
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    pub label_font_size: u32,
    pub font_family: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            aspect_threshold: 1.33,
            vmin: 0.0,
            vmax: 1.5,
            palette: "RdBu".to_string(),
            month_interval: 2,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            width: 800,
            height: 600,
            font_size: 14,
            label_font_size: 18,
            font_family: "sans-serif".to_string(),
        }
    }
}

impl PlotConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(PlotConfig::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse config: {:?}", path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: PlotConfig = serde_yaml::from_str(content)?;
        if !(config.vmax > config.vmin) {
            anyhow::bail!(
                "vmax ({}) must be greater than vmin ({})",
                config.vmax,
                config.vmin
            );
        }
        if config.month_interval == 0 {
            anyhow::bail!("month_interval must be at least 1");
        }
        Ok(config)
    }
}

// Output format for rendered figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

// Display name, unit and location of a simulator output variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub location: FieldLocation,
}

const VARIABLES: &[VariableInfo] = &[
    VariableInfo::element("surf", "Surface water", "m"),
    VariableInfo::element("unsat", "Unsaturated storage", "m"),
    VariableInfo::element("gw", "Groundwater storage", "m"),
    VariableInfo::element("snow", "Snow water equivalent", "m"),
    VariableInfo::element("is", "Interception storage", "m"),
    VariableInfo::element("infil", "Infiltration", "m/s"),
    VariableInfo::element("rechg", "Recharge", "m/s"),
    VariableInfo::element("ec", "Canopy evaporation", "m/s"),
    VariableInfo::element("ett", "Transpiration", "m/s"),
    VariableInfo::element("edir", "Soil evaporation", "m/s"),
];

impl VariableInfo {
    const fn element(key: &'static str, name: &'static str, unit: &'static str) -> Self {
        VariableInfo {
            key,
            name,
            unit,
            location: FieldLocation::Element,
        }
    }

    pub fn lookup(key: &str) -> Result<VariableInfo, PlotError> {
        VARIABLES
            .iter()
            .find(|v| v.key == key)
            .copied()
            .ok_or_else(|| PlotError::UnknownVariable(key.to_string()))
    }
}
