use std::path::Path;

use crate::error::{PlotError, Result};
use crate::mesh::Mesh;

// Line cursor over a simulator input file, skipping blanks and comments
struct LineReader<'a> {
    path: &'a Path,
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    lno: usize,
}

impl<'a> LineReader<'a> {
    fn new(path: &'a Path, content: &'a str) -> Self {
        LineReader {
            path,
            lines: content.lines().enumerate(),
            lno: 0,
        }
    }

    fn next_line(&mut self) -> Result<&'a str> {
        for (i, line) in self.lines.by_ref() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            self.lno = i + 1;
            return Ok(trimmed);
        }
        Err(self.error("unexpected end of file"))
    }

    fn error(&self, message: impl Into<String>) -> PlotError {
        PlotError::Parse {
            path: self.path.to_path_buf(),
            line: self.lno,
            message: message.into(),
        }
    }

    /// Reads a `KEYWORD value` line
    fn keyword(&mut self, keyword: &str) -> Result<usize> {
        let line = self.next_line()?;
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some(keyword) {
            return Err(self.error(format!("expected keyword {}", keyword)));
        }
        tokens
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| self.error(format!("missing or invalid value for {}", keyword)))
    }

    /// Reads a row of `count` fields whose first field is the 1-based `index`
    fn row(&mut self, index: usize, count: usize, what: &str) -> Result<Vec<&'a str>> {
        let line = self.next_line()?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < count {
            return Err(self.error(format!(
                "{} {} has {} fields, expected {}",
                what,
                index,
                tokens.len(),
                count
            )));
        }
        if tokens[0].parse::<usize>().ok() != Some(index) {
            return Err(self.error(format!("expected {} index {}", what, index)));
        }
        Ok(tokens)
    }
}

/// Parses a `.mesh` file: an element block (`NUMELE`) of 1-based node
/// triplets and neighbours, then a node block (`NUMNODE`) of coordinates and
/// elevations.
pub fn parse_mesh(path: &Path, content: &str) -> Result<Mesh> {
    let mut reader = LineReader::new(path, content);

    let nelem = reader.keyword("NUMELE")?;
    reader.next_line()?; // header
    let mut triangles = Vec::with_capacity(nelem);
    for i in 1..=nelem {
        let tokens = reader.row(i, 7, "element")?;
        let mut tri = [0usize; 3];
        for (k, token) in tokens[1..4].iter().enumerate() {
            let node: usize = token
                .parse()
                .map_err(|_| reader.error(format!("invalid node index '{}'", token)))?;
            if node == 0 {
                return Err(reader.error("node indices are 1-based"));
            }
            tri[k] = node - 1;
        }
        triangles.push(tri);
    }

    let nnode = reader.keyword("NUMNODE")?;
    reader.next_line()?; // header
    let mut x = Vec::with_capacity(nnode);
    let mut y = Vec::with_capacity(nnode);
    for i in 1..=nnode {
        let tokens = reader.row(i, 5, "node")?;
        let coord = |token: &str| {
            token
                .parse::<f64>()
                .map_err(|_| reader.error(format!("invalid coordinate '{}'", token)))
        };
        x.push(coord(tokens[1])?);
        y.push(coord(tokens[2])?);
    }

    Mesh::new(x, y, triangles)
}

pub fn read_mesh(path: &Path) -> Result<Mesh> {
    let content = std::fs::read_to_string(path)?;
    parse_mesh(path, &content)
}
