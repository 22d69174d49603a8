//! Tile grid storage and text loading.
//!
//! A [`Grid`] is a row-major array of cell markers read from whitespace-delimited text.
//! Each marker is kept verbatim; cells whose marker is a non-zero integer are walls,
//! everything else is floor.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};

/// Rectangular grid of cell markers with precomputed wall flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    markers: Vec<String>,
    walls: Vec<bool>,
}

impl Grid {
    /// Build a grid from rows of markers, rejecting rows whose length differs from the first.
    ///
    /// Each row counts as one input line, so the `line` of a ragged-row error is the 1-based row index.
    pub fn from_rows<R, S>(rows: R) -> Result<Self>
    where
        R: IntoIterator<Item = Vec<S>>,
        S: Into<String>,
    {
        let mut builder = GridBuilder::default();
        for (i, row) in rows.into_iter().enumerate() {
            builder.push_row(i + 1, row.into_iter().map(Into::into).collect())?;
        }
        Ok(builder.finish())
    }

    /// Parse a grid from text. Blank lines are skipped and do not produce rows.
    pub fn parse(text: &str) -> Result<Self> {
        let mut builder = GridBuilder::default();
        for (i, line) in text.lines().enumerate() {
            builder.push_line(i + 1, line)?;
        }
        Ok(builder.finish())
    }

    /// Read a grid from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut builder = GridBuilder::default();
        for (i, line) in reader.lines().enumerate() {
            builder.push_line(i + 1, &line?)?;
        }
        Ok(builder.finish())
    }

    /// Load a grid from a file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Original marker token at `(x, y)`, or `None` outside the grid.
    pub fn marker(&self, x: usize, y: usize) -> Option<&str> {
        self.index(x, y).map(|i| self.markers[i].as_str())
    }

    /// Whether `(x, y)` is a wall. Cells outside the grid are reported as walls.
    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        self.index(x, y).is_none_or(|i| self.walls[i])
    }

    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|w| **w).count()
    }

    pub fn floor_count(&self) -> usize {
        self.walls.len() - self.wall_count()
    }

    /// Iterate `(x, y, is_wall)` in scan order: rows top to bottom, ascending x within a row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let w = self.width;
        self.walls
            .iter()
            .enumerate()
            .map(move |(i, wall)| (i % w, i / w, *wall))
    }
}

#[derive(Default)]
struct GridBuilder {
    width: Option<usize>,
    height: usize,
    markers: Vec<String>,
    walls: Vec<bool>,
}

impl GridBuilder {
    fn push_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        let row: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
        self.push_row(line_no, row)
    }

    fn push_row(&mut self, line_no: usize, row: Vec<String>) -> Result<()> {
        let expected = *self.width.get_or_insert(row.len());
        if row.len() != expected {
            return Err(Error::RaggedRow {
                line: line_no,
                expected,
                found: row.len(),
            });
        }
        self.walls.extend(row.iter().map(|m| is_wall_marker(m)));
        self.markers.extend(row);
        self.height += 1;
        Ok(())
    }

    fn finish(self) -> Grid {
        let width = self.width.unwrap_or(0);
        if self.height == 0 || width == 0 {
            warn!("Map contains no cells.");
            return Grid::default();
        }
        Grid {
            width,
            height: self.height,
            markers: self.markers,
            walls: self.walls,
        }
    }
}

/// Classify a marker token: `true` iff it is an integer literal with a non-zero value.
///
/// Accepts an optional sign, ASCII digits `0-9` and single `_` separators between digits.
/// Other Unicode decimal digits (e.g. `٣`) are not digits here, so such tokens are floor.
/// Magnitude is unbounded, so very long digit strings still classify correctly.
pub fn is_wall_marker(token: &str) -> bool {
    let token = token.trim();
    let digits = token
        .strip_prefix(['+', '-'])
        .unwrap_or(token)
        .as_bytes();

    if digits.is_empty() || digits[0] == b'_' || digits[digits.len() - 1] == b'_' {
        return false;
    }

    let mut nonzero = false;
    let mut prev_underscore = false;
    for &b in digits {
        match b {
            b'0'..=b'9' => {
                nonzero |= b != b'0';
                prev_underscore = false;
            }
            b'_' if !prev_underscore => prev_underscore = true,
            _ => return false,
        }
    }
    nonzero
}
