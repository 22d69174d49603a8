use std::time::Duration;

use criterion::{Criterion, Throughput};
use tile_scatter::prelude::*;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Square grid with a wall border and a wall on every seventh cell of the interior.
pub fn walled_grid(side: usize) -> Grid {
    let rows = (0..side).map(|y| {
        (0..side)
            .map(|x| {
                let border = x == 0 || y == 0 || x + 1 == side || y + 1 == side;
                if border || (x * 31 + y * 17) % 7 == 0 {
                    "1"
                } else {
                    "0"
                }
            })
            .collect::<Vec<_>>()
    });
    Grid::from_rows(rows).expect("uniform rows")
}

/// `count` overlapping regions tiled diagonally across a `side x side` grid.
pub fn region_table(side: usize, count: usize) -> DensityTable {
    let side = side as i32;
    let regions = (0..count as i32)
        .map(|i| {
            let x1 = (i * 7) % side;
            let y1 = (i * 11) % side;
            DensityRegion::new(
                x1,
                y1,
                (x1 + 9).min(side - 1),
                (y1 + 5).min(side - 1),
                0.05 + (i % 10) as f64 * 0.05,
            )
        })
        .collect();
    DensityTable::try_new(regions, 0.02).expect("valid table")
}
