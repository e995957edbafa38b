use chrono::NaiveDateTime;
use clap::ValueEnum;
use ndarray::{Array1, Array2, Axis};

use crate::error::{PlotError, Result};
use crate::mesh::Mesh;

// Where the values of a field live on the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldLocation {
    Node,
    Element,
}

impl FieldLocation {
    pub fn count(&self, mesh: &Mesh) -> usize {
        match self {
            FieldLocation::Node => mesh.node_count(),
            FieldLocation::Element => mesh.triangle_count(),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            FieldLocation::Node => "nodes",
            FieldLocation::Element => "elements",
        }
    }
}

/// Time series of a scalar field, `values[[timestep, location]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSeries {
    times: Vec<NaiveDateTime>,
    values: Array2<f64>,
    name: String,
    unit: String,
    location: FieldLocation,
}

impl OutputSeries {
    pub fn new(
        times: Vec<NaiveDateTime>,
        values: Array2<f64>,
        name: impl Into<String>,
        unit: impl Into<String>,
        location: FieldLocation,
    ) -> Result<Self> {
        if times.len() != values.nrows() {
            return Err(PlotError::ShapeMismatch {
                what: "timestamps",
                expected: values.nrows(),
                found: times.len(),
            });
        }
        Ok(OutputSeries {
            times,
            values,
            name: name.into(),
            unit: unit.into(),
            location,
        })
    }

    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn location(&self) -> FieldLocation {
        self.location
    }

    pub fn timestep_count(&self) -> usize {
        self.values.nrows()
    }

    /// Fails when the series was written for a different mesh.
    pub fn check_against(&self, mesh: &Mesh) -> Result<()> {
        let expected = self.location.count(mesh);
        if self.values.ncols() != expected {
            return Err(PlotError::ShapeMismatch {
                what: self.location.describe(),
                expected,
                found: self.values.ncols(),
            });
        }
        Ok(())
    }

    /// Mean over all timesteps, one value per node or element.
    pub fn time_average(&self) -> Result<Array1<f64>> {
        self.values
            .mean_axis(Axis(0))
            .filter(|avg| !avg.is_empty())
            .ok_or_else(|| PlotError::EmptySeries(self.name.clone()))
    }

    /// Mean over all nodes or elements, one value per timestep.
    pub fn spatial_average(&self) -> Result<Array1<f64>> {
        self.values
            .mean_axis(Axis(1))
            .filter(|avg| !avg.is_empty())
            .ok_or_else(|| PlotError::EmptySeries(self.name.clone()))
    }
}
