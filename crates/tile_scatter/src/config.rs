//! Serializable region tables.
//!
//! [`ScatterConfig`] is the on-disk form of a [`DensityTable`] plus an optional seed.
//! With the `ron` feature it can be read from RON:
//!
//! ```ron
//! (
//!     default_density: 0.0,
//!     seed: Some(42),
//!     regions: [
//!         (x1: 5, y1: 1, x2: 7, y2: 7, density: 0.09524),
//!         (x1: 9, y1: 3, x2: 21, y2: 5, density: 0.05128),
//!     ],
//! )
//! ```
//!
//! Regions are a sequence, and their order is the lookup precedence.
use serde::{Deserialize, Serialize};

use crate::density::{DensityRegion, DensityTable};
use crate::error::Result;

/// One region entry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionDef {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub density: f64,
}

impl From<&RegionDef> for DensityRegion {
    fn from(def: &RegionDef) -> Self {
        DensityRegion::new(def.x1, def.y1, def.x2, def.y2, def.density)
    }
}

impl From<&DensityRegion> for RegionDef {
    fn from(region: &DensityRegion) -> Self {
        Self {
            x1: region.x1,
            y1: region.y1,
            x2: region.x2,
            y2: region.y2,
            density: region.density,
        }
    }
}

/// Region table and run settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScatterConfig {
    #[serde(default)]
    pub default_density: f64,
    #[serde(default)]
    pub regions: Vec<RegionDef>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ScatterConfig {
    /// Build a validated [`DensityTable`].
    pub fn to_table(&self) -> Result<DensityTable> {
        DensityTable::try_new(
            self.regions.iter().map(DensityRegion::from).collect(),
            self.default_density,
        )
    }

    pub fn from_table(table: &DensityTable, seed: Option<u64>) -> Self {
        Self {
            default_density: table.default_density(),
            regions: table.regions().iter().map(RegionDef::from).collect(),
            seed,
        }
    }
}

#[cfg(feature = "ron")]
mod ron_io {
    use std::path::Path;

    use tracing::debug;

    use super::ScatterConfig;
    use crate::error::{Error, Result};

    impl ScatterConfig {
        /// Parse a config from RON text.
        pub fn from_ron_str(text: &str) -> Result<Self> {
            ron::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))
        }

        /// Read a config from a RON file.
        pub fn load(path: impl AsRef<Path>) -> Result<Self> {
            let path = path.as_ref();
            let text = std::fs::read_to_string(path)?;
            let config = Self::from_ron_str(&text).map_err(|e| match e {
                Error::InvalidConfig(msg) => {
                    Error::InvalidConfig(format!("{}: {msg}", path.display()))
                }
                other => other,
            })?;
            debug!(
                "Loaded {} regions from {}.",
                config.regions.len(),
                path.display()
            );
            Ok(config)
        }

        /// Serialize to pretty RON.
        pub fn to_ron_string(&self) -> Result<String> {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| Error::Other(e.to_string()))
        }
    }
}
