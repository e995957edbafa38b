use crate::error::{PlotError, Result};

/// Triangulated 2D domain: node coordinates plus triangle connectivity
/// (0-based node indices).
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    x: Vec<f64>,
    y: Vec<f64>,
    triangles: Vec<[usize; 3]>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

impl Mesh {
    pub fn new(x: Vec<f64>, y: Vec<f64>, triangles: Vec<[usize; 3]>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(PlotError::InvalidMesh(format!(
                "{} x coordinates but {} y coordinates",
                x.len(),
                y.len()
            )));
        }

        let node_count = x.len();
        for (i, tri) in triangles.iter().enumerate() {
            if let Some(&bad) = tri.iter().find(|&&n| n >= node_count) {
                return Err(PlotError::InvalidMesh(format!(
                    "triangle {} references node {} but the mesh has {} nodes",
                    i, bad, node_count
                )));
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return Err(PlotError::InvalidMesh(format!(
                    "triangle {} has repeated node indices {:?}",
                    i, tri
                )));
            }
        }

        Ok(Mesh { x, y, triangles })
    }

    pub fn node_count(&self) -> usize {
        self.x.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[cfg(test)]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[cfg(test)]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn vertices(&self, tri: &[usize; 3]) -> [(f64, f64); 3] {
        tri.map(|n| (self.x[n], self.y[n]))
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let (min_x, max_x) = min_max(&self.x);
        let (min_y, max_y) = min_max(&self.y);
        BoundingBox {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Bounding-box width over height. Infinite for a flat domain, NaN for a
    /// single point.
    pub fn aspect_ratio(&self) -> f64 {
        let bbox = self.bounding_box();
        bbox.width() / bbox.height()
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
