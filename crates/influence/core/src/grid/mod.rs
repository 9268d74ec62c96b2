//! Grid primitives shared by the field and the agents.
//!
//! Cells are integer tile coordinates relative to the grid origin, world points
//! are continuous positions. The [`GridOracle`] trait is the seam through which
//! the host supplies coordinate transforms, bounds and obstacle status.
mod buffer;
mod cell;
mod geometry;
mod oracle;

pub use buffer::CellGrid;
pub use cell::{Cell, Direction};
pub use geometry::{GridGeometry, WorldPoint};
pub use oracle::{GridDimensions, GridOracle};
