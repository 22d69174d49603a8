//! Density regions and per-cell probability resolution.
//!
//! A [`DensityTable`] is an ordered list of inclusive rectangles, each with a placement
//! probability, plus a default for cells outside every rectangle. Lookups return the
//! density of the first containing region in list order.
//!
//! [`DensityRaster`] bakes a table into one value per cell for grids where the region
//! count makes repeated scans noticeable.
use tracing::warn;

use crate::error::{Error, Result};
use crate::grid::Grid;

/// Source of per-cell placement probabilities.
pub trait DensitySource {
    fn density_at(&self, x: usize, y: usize) -> f64;
}

/// Axis-aligned inclusive rectangle with an associated placement probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityRegion {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub density: f64,
}

impl DensityRegion {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, density: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            density,
        }
    }

    /// Inclusive containment test: `x1 <= x <= x2 && y1 <= y <= y2`.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        let (x, y) = (x as i64, y as i64);
        (self.x1 as i64) <= x
            && x <= self.x2 as i64
            && (self.y1 as i64) <= y
            && y <= self.y2 as i64
    }

    fn validate(&self, index: usize) -> Result<()> {
        if self.x1 > self.x2 || self.y1 > self.y2 {
            return Err(Error::InvalidRegion {
                index,
                x1: self.x1,
                y1: self.y1,
                x2: self.x2,
                y2: self.y2,
            });
        }
        check_probability(&format!("region {index}"), self.density)
    }
}

/// Ordered region list with a fallback density.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DensityTable {
    regions: Vec<DensityRegion>,
    default_density: f64,
}

impl DensityTable {
    /// Create a table, rejecting inverted rectangles and densities outside `[0, 1]`.
    pub fn try_new(regions: Vec<DensityRegion>, default_density: f64) -> Result<Self> {
        check_probability("default density", default_density)?;
        for (i, r) in regions.iter().enumerate() {
            r.validate(i)?;
        }
        Ok(Self {
            regions,
            default_density,
        })
    }

    /// Create a table without validation.
    ///
    /// Densities are used as given: values `>= 1` always place, values `<= 0` never do.
    pub fn new_unchecked(regions: Vec<DensityRegion>, default_density: f64) -> Self {
        let out_of_range = regions
            .iter()
            .map(|r| r.density)
            .chain(std::iter::once(default_density))
            .filter(|d| !(0.0..=1.0).contains(d))
            .count();
        if out_of_range > 0 {
            warn!(
                "Density table has {} value(s) outside [0, 1]; using them unclamped.",
                out_of_range
            );
        }
        Self {
            regions,
            default_density,
        }
    }

    /// A table with no regions, so every cell resolves to `default_density`.
    pub fn uniform(default_density: f64) -> Result<Self> {
        Self::try_new(Vec::new(), default_density)
    }

    pub fn regions(&self) -> &[DensityRegion] {
        &self.regions
    }

    pub fn default_density(&self) -> f64 {
        self.default_density
    }

    /// Density of the first region containing `(x, y)`, or the default.
    pub fn density_for_cell(&self, x: usize, y: usize) -> f64 {
        self.regions
            .iter()
            .find(|r| r.contains(x, y))
            .map_or(self.default_density, |r| r.density)
    }
}

impl DensitySource for DensityTable {
    #[inline]
    fn density_at(&self, x: usize, y: usize) -> f64 {
        self.density_for_cell(x, y)
    }
}

/// Per-cell density cache over a `width x height` area.
#[derive(Clone, Debug)]
pub struct DensityRaster {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>,
    fallback: f64,
}

impl DensityRaster {
    /// Resolve every cell of the area once.
    pub fn bake(table: &DensityTable, width: usize, height: usize) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(table.density_for_cell(x, y));
            }
        }
        Self {
            width,
            height,
            data,
            fallback: table.default_density(),
        }
    }

    /// Get the value at `(x, y)`, returning the table default outside the baked area.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        if x >= self.width || y >= self.height {
            return self.fallback;
        }
        self.data[y * self.width + x]
    }
}

impl DensitySource for DensityRaster {
    #[inline]
    fn density_at(&self, x: usize, y: usize) -> f64 {
        self.get(x, y)
    }
}

/// Expected number of placements over the floor cells of `grid`.
///
/// Each density is clamped to `[0, 1]`, which is its actual acceptance probability.
pub fn expected_placements(grid: &Grid, source: &dyn DensitySource) -> f64 {
    grid.cells()
        .filter(|(_, _, wall)| !wall)
        .map(|(x, y, _)| source.density_at(x, y).clamp(0.0, 1.0))
        .sum()
}

fn check_probability(context: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidDensity {
            context: context.to_owned(),
            value,
        })
    }
}
