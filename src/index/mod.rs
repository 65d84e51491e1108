//! Bulk-loaded, read-only spatial indexes.
//!
//! [`PackedTree`] is a sort-tile-recursive R-tree generic over its bounds
//! type. Two instantiations are provided: [`StrTree`] over 2D
//! [`Envelope`]s and [`SirTree`] over 1D [`Interval`]s.

mod node;
mod packed_tree;

use std::fmt;

use crate::geometry::{Envelope, Interval};

pub use node::ItemBoundable;
pub use packed_tree::{PackedTree, PackedTreeBuilder};

/// Default maximum number of children per tree node.
pub const DEFAULT_NODE_CAPACITY: usize = 10;

/// Ability to test overlap with another bounds value.
pub trait Intersectable<Rhs = Self> {
    fn intersects(&self, other: &Rhs) -> bool;
}

/// Ability to grow to cover another bounds value.
pub trait Expandable<Rhs = Self> {
    fn expand_to_include(&mut self, other: &Rhs);
}

/// A bounding shape usable as a packed tree key.
pub trait Bounds: Intersectable + Expandable + Clone + fmt::Debug {
    /// Number of axes the packing algorithm tiles along.
    const AXES: usize;

    /// Centre of the bounds along `axis` (`0..AXES`).
    fn centre(&self, axis: usize) -> f64;
}

impl Intersectable for Envelope {
    fn intersects(&self, other: &Self) -> bool {
        Envelope::intersects(self, other)
    }
}

impl Expandable for Envelope {
    fn expand_to_include(&mut self, other: &Self) {
        Envelope::expand_to_include(self, other);
    }
}

impl Bounds for Envelope {
    const AXES: usize = 2;

    fn centre(&self, axis: usize) -> f64 {
        if axis == 0 {
            (self.min_x + self.max_x) / 2.0
        } else {
            (self.min_y + self.max_y) / 2.0
        }
    }
}

impl Intersectable for Interval {
    fn intersects(&self, other: &Self) -> bool {
        Interval::intersects(self, other)
    }
}

impl Expandable for Interval {
    fn expand_to_include(&mut self, other: &Self) {
        Interval::expand_to_include(self, other);
    }
}

impl Bounds for Interval {
    const AXES: usize = 1;

    fn centre(&self, _axis: usize) -> f64 {
        Interval::centre(self)
    }
}

/// Collecting phase of a 2D sort-tile-recursive tree.
pub type StrTreeBuilder<T> = PackedTreeBuilder<Envelope, T>;

/// Queryable 2D sort-tile-recursive tree.
pub type StrTree<T> = PackedTree<Envelope, T>;

/// Collecting phase of a 1D sort-interval-recursive tree.
pub type SirTreeBuilder<T> = PackedTreeBuilder<Interval, T>;

/// Queryable 1D sort-interval-recursive tree.
pub type SirTree<T> = PackedTree<Interval, T>;

impl<T> SirTree<T> {
    /// Returns items whose interval overlaps `[min, max]`.
    #[must_use]
    pub fn query_range(&self, min: f64, max: f64) -> Vec<&T> {
        self.query(&Interval::new(min, max))
    }
}
