//! Placement pipeline: scan a grid, resolve densities, and draw one Bernoulli trial per floor cell.
pub mod events;
pub mod runner;
pub mod stream;
