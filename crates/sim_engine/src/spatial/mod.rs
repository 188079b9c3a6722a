//! Spatial grid data structures
//!
//! Maps discretized 3D positions to at most one game object per cell.
//! Three interchangeable variants trade lookup cost against how strictly
//! a cell keeps its occupant:
//!
//! - [`PackedKeyIndex`]: flat map, metadata folded into the key
//! - [`LinearIndex`]: list scan, exact coordinates
//! - [`TreeIndex`]: nested maps, first writer wins

mod grid;
mod index;
mod linear;
mod packed;
mod tree;

pub use grid::{Grid, IndexKind};
pub use index::{GridEntry, SpatialIndex};
pub use linear::LinearIndex;
pub use packed::{pack_key, PackedKeyIndex};
pub use tree::TreeIndex;
