use super::Bounds;

/// A leaf entry: an item together with its bounds.
#[derive(Debug, Clone)]
pub struct ItemBoundable<B, T> {
    bounds: B,
    item: T,
}

impl<B, T> ItemBoundable<B, T> {
    #[must_use]
    pub fn new(bounds: B, item: T) -> Self {
        Self { bounds, item }
    }

    #[must_use]
    pub fn bounds(&self) -> &B {
        &self.bounds
    }

    #[must_use]
    pub fn item(&self) -> &T {
        &self.item
    }
}

/// A child of a tree node.
#[derive(Debug, Clone)]
pub(crate) enum Boundable<B, T> {
    Node(TreeNode<B, T>),
    Item(ItemBoundable<B, T>),
}

impl<B: Bounds, T> Boundable<B, T> {
    pub(crate) fn bounds(&self) -> Option<&B> {
        match self {
            Self::Node(node) => node.cached_bounds(),
            Self::Item(item) => Some(item.bounds()),
        }
    }

    /// Centre along `axis`; boundables without bounds sort first.
    pub(crate) fn centre(&self, axis: usize) -> f64 {
        self.bounds().map_or(f64::NEG_INFINITY, |b| b.centre(axis))
    }
}

/// An interior node.
///
/// `level` is 0 for nodes whose children are items and grows towards the
/// root. Bounds are the union of the children's bounds, computed once when
/// first requested.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<B, T> {
    level: usize,
    pub(crate) children: Vec<Boundable<B, T>>,
    bounds: Option<B>,
}

impl<B: Bounds, T> TreeNode<B, T> {
    pub(crate) fn new(level: usize) -> Self {
        Self {
            level,
            children: Vec::new(),
            bounds: None,
        }
    }

    pub(crate) fn level(&self) -> usize {
        self.level
    }

    /// Appends a child. The node's bounds must not have been computed yet.
    pub(crate) fn add_child(&mut self, child: Boundable<B, T>) {
        debug_assert!(
            self.bounds.is_none(),
            "cannot add a child to a node whose bounds are already computed"
        );
        self.children.push(child);
    }

    /// Computes and caches the bounds, returning them.
    pub(crate) fn bounds(&mut self) -> Option<&B> {
        if self.bounds.is_none() {
            self.bounds = self.compute_bounds();
        }
        self.bounds.as_ref()
    }

    pub(crate) fn cached_bounds(&self) -> Option<&B> {
        self.bounds.as_ref()
    }

    fn compute_bounds(&self) -> Option<B> {
        let mut acc: Option<B> = None;
        for child in &self.children {
            let Some(b) = child.bounds() else {
                continue;
            };
            match acc.as_mut() {
                Some(a) => a.expand_to_include(b),
                None => acc = Some(b.clone()),
            }
        }
        acc
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
