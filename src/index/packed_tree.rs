use super::node::{Boundable, ItemBoundable, TreeNode};
use super::{Bounds, DEFAULT_NODE_CAPACITY};
use crate::error::IndexError;

/// Collecting phase of a packed tree.
///
/// Items are inserted here, then [`build`](Self::build) consumes the builder
/// and returns the read-only [`PackedTree`]. Because the builder is moved,
/// inserting into a built tree does not compile:
///
/// ```compile_fail
/// use topolis::geometry::Envelope;
/// use topolis::index::StrTreeBuilder;
///
/// let mut builder = StrTreeBuilder::new();
/// builder.insert(Envelope::new(0.0, 1.0, 0.0, 1.0), 1);
/// let tree = builder.build();
/// builder.insert(Envelope::new(2.0, 3.0, 2.0, 3.0), 2);
/// ```
///
/// ```
/// use topolis::geometry::Envelope;
/// use topolis::index::StrTreeBuilder;
///
/// let mut builder = StrTreeBuilder::new();
/// builder.insert(Envelope::new(0.0, 1.0, 0.0, 1.0), "a");
/// builder.insert(Envelope::new(5.0, 6.0, 5.0, 6.0), "b");
/// let tree = builder.build();
/// assert_eq!(tree.query(&Envelope::new(0.5, 0.5, 0.5, 0.5)), vec![&"a"]);
/// ```
#[derive(Debug, Clone)]
pub struct PackedTreeBuilder<B, T> {
    node_capacity: usize,
    items: Vec<ItemBoundable<B, T>>,
}

impl<B: Bounds, T> Default for PackedTreeBuilder<B, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Bounds, T> PackedTreeBuilder<B, T> {
    /// Creates a builder with [`DEFAULT_NODE_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            node_capacity: DEFAULT_NODE_CAPACITY,
            items: Vec::new(),
        }
    }

    /// Creates a builder with a custom node capacity.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidNodeCapacity`] if `node_capacity <= 1`.
    pub fn with_node_capacity(node_capacity: usize) -> Result<Self, IndexError> {
        if node_capacity <= 1 {
            return Err(IndexError::InvalidNodeCapacity(node_capacity));
        }
        Ok(Self {
            node_capacity,
            items: Vec::new(),
        })
    }

    #[must_use]
    pub fn node_capacity(&self) -> usize {
        self.node_capacity
    }

    /// Number of items inserted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds an item with its bounds.
    pub fn insert(&mut self, bounds: B, item: T) {
        self.items.push(ItemBoundable::new(bounds, item));
    }

    /// Packs the collected items into a tree.
    ///
    /// With no items the root is an empty level-0 node. Otherwise items are
    /// grouped into parents of at most `node_capacity` children, level by
    /// level, until a single root remains. Identical input order and
    /// capacity give an identical tree.
    #[must_use]
    pub fn build(self) -> PackedTree<B, T> {
        let item_count = self.items.len();
        let root = if self.items.is_empty() {
            TreeNode::new(0)
        } else {
            let leaves = self.items.into_iter().map(Boundable::Item).collect();
            create_higher_levels(leaves, 0, self.node_capacity)
        };
        tracing::trace!(
            items = item_count,
            root_level = root.level(),
            capacity = self.node_capacity,
            "packed tree built"
        );
        PackedTree {
            node_capacity: self.node_capacity,
            root,
        }
    }
}

/// Repeatedly groups a level into parents until one node remains.
fn create_higher_levels<B: Bounds, T>(
    mut boundables: Vec<Boundable<B, T>>,
    mut level: usize,
    capacity: usize,
) -> TreeNode<B, T> {
    loop {
        let mut parents = create_parent_nodes(boundables, level, capacity, 0);
        if parents.len() == 1 {
            if let Some(root) = parents.pop() {
                return root;
            }
        }
        boundables = parents.into_iter().map(Boundable::Node).collect();
        level += 1;
    }
}

/// Sort-tile grouping along `axis`.
///
/// Before the last axis the children are sorted by centre and cut into
/// `ceil(sqrt(parent_count))` slices, each tiled along the next axis. On the
/// last axis they are sorted and packed sequentially.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn create_parent_nodes<B: Bounds, T>(
    mut children: Vec<Boundable<B, T>>,
    level: usize,
    capacity: usize,
    axis: usize,
) -> Vec<TreeNode<B, T>> {
    debug_assert!(!children.is_empty());
    children.sort_by(|a, b| a.centre(axis).total_cmp(&b.centre(axis)));

    if axis + 1 >= B::AXES {
        return pack_sequentially(children, level, capacity);
    }

    let min_parent_count = children.len().div_ceil(capacity);
    let slice_count = ((min_parent_count as f64).sqrt().ceil() as usize).max(1);
    let slice_capacity = children.len().div_ceil(slice_count);

    let mut parents = Vec::with_capacity(min_parent_count);
    let mut iter = children.into_iter().peekable();
    while iter.peek().is_some() {
        let slice: Vec<_> = iter.by_ref().take(slice_capacity).collect();
        parents.extend(create_parent_nodes(slice, level, capacity, axis + 1));
    }
    parents
}

fn pack_sequentially<B: Bounds, T>(
    children: Vec<Boundable<B, T>>,
    level: usize,
    capacity: usize,
) -> Vec<TreeNode<B, T>> {
    let mut parents: Vec<TreeNode<B, T>> = Vec::with_capacity(children.len().div_ceil(capacity));
    let mut current = TreeNode::new(level);
    for child in children {
        if current.children.len() == capacity {
            let mut full = std::mem::replace(&mut current, TreeNode::new(level));
            full.bounds();
            parents.push(full);
        }
        current.add_child(child);
    }
    current.bounds();
    parents.push(current);
    parents
}

/// Queryable phase of a packed tree.
///
/// The structure is fixed at build time; only removal, which prunes emptied
/// nodes, changes it afterwards. Node bounds are not shrunk on removal.
#[derive(Debug, Clone)]
pub struct PackedTree<B, T> {
    node_capacity: usize,
    root: TreeNode<B, T>,
}

impl<B: Bounds, T> PackedTree<B, T> {
    #[must_use]
    pub fn node_capacity(&self) -> usize {
        self.node_capacity
    }

    /// Bounds of everything in the tree, `None` when empty.
    #[must_use]
    pub fn root_bounds(&self) -> Option<&B> {
        self.root.cached_bounds()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of items in the tree.
    #[must_use]
    pub fn count(&self) -> usize {
        count_items(&self.root)
    }

    /// Number of node levels above the items; 0 for an empty tree.
    #[must_use]
    pub fn depth(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        node_depth(&self.root)
    }

    /// Returns every item whose bounds intersect `search`.
    #[must_use]
    pub fn query(&self, search: &B) -> Vec<&T> {
        let mut found = Vec::new();
        self.query_visit(search, |item| found.push(item));
        found
    }

    /// Calls `visitor` for every item whose bounds intersect `search`.
    pub fn query_visit<'a>(&'a self, search: &B, mut visitor: impl FnMut(&'a T)) {
        let Some(root_bounds) = self.root.cached_bounds() else {
            return;
        };
        if !root_bounds.intersects(search) {
            return;
        }
        visit_node(&self.root, search, &mut visitor);
    }

    /// Iterates every item in tree order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        let mut out = Vec::new();
        collect_items(&self.root, &mut out);
        out.into_iter()
    }

    /// Removes one occurrence of `item` stored under bounds intersecting `search`.
    ///
    /// Interior nodes left without children are pruned. Returns `true` if an
    /// item was removed.
    pub fn remove(&mut self, search: &B, item: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(root_bounds) = self.root.cached_bounds() else {
            return false;
        };
        if !root_bounds.intersects(search) {
            return false;
        }
        remove_from(&mut self.root, search, item)
    }
}

fn visit_node<'a, B: Bounds, T>(
    node: &'a TreeNode<B, T>,
    search: &B,
    visitor: &mut impl FnMut(&'a T),
) {
    for child in &node.children {
        match child {
            Boundable::Node(inner) => {
                if inner.cached_bounds().is_some_and(|b| b.intersects(search)) {
                    visit_node(inner, search, visitor);
                }
            }
            Boundable::Item(entry) => {
                if entry.bounds().intersects(search) {
                    visitor(entry.item());
                }
            }
        }
    }
}

fn remove_from<B: Bounds, T: PartialEq>(node: &mut TreeNode<B, T>, search: &B, item: &T) -> bool {
    let position = node
        .children
        .iter()
        .position(|child| matches!(child, Boundable::Item(entry) if entry.item() == item));
    if let Some(pos) = position {
        node.children.remove(pos);
        return true;
    }

    for i in 0..node.children.len() {
        let Boundable::Node(child) = &mut node.children[i] else {
            continue;
        };
        if !child.cached_bounds().is_some_and(|b| b.intersects(search)) {
            continue;
        }
        if remove_from(child, search, item) {
            if child.is_empty() {
                node.children.remove(i);
            }
            return true;
        }
    }
    false
}

fn count_items<B, T>(node: &TreeNode<B, T>) -> usize {
    node.children
        .iter()
        .map(|child| match child {
            Boundable::Node(inner) => count_items(inner),
            Boundable::Item(_) => 1,
        })
        .sum()
}

fn node_depth<B, T>(node: &TreeNode<B, T>) -> usize {
    let max_child_depth = node
        .children
        .iter()
        .filter_map(|child| match child {
            Boundable::Node(inner) => Some(node_depth(inner)),
            Boundable::Item(_) => None,
        })
        .max()
        .unwrap_or(0);
    max_child_depth + 1
}

fn collect_items<'a, B, T>(node: &'a TreeNode<B, T>, out: &mut Vec<&'a T>) {
    for child in &node.children {
        match child {
            Boundable::Node(inner) => collect_items(inner, out),
            Boundable::Item(entry) => out.push(entry.item()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Envelope, Interval};
    use crate::index::{SirTreeBuilder, StrTreeBuilder};

    fn grid_builder(n: usize, capacity: usize) -> StrTreeBuilder<usize> {
        let mut builder = StrTreeBuilder::with_node_capacity(capacity).unwrap();
        for i in 0..n {
            for j in 0..n {
                let x = i as f64 * 10.0;
                let y = j as f64 * 10.0;
                builder.insert(Envelope::new(x, x + 1.0, y, y + 1.0), i * n + j);
            }
        }
        builder
    }

    #[test]
    fn capacity_must_exceed_one() {
        assert!(matches!(
            StrTreeBuilder::<u32>::with_node_capacity(1),
            Err(IndexError::InvalidNodeCapacity(1))
        ));
        assert!(StrTreeBuilder::<u32>::with_node_capacity(2).is_ok());
    }

    #[test]
    fn empty_tree() {
        let tree = StrTreeBuilder::<u32>::new().build();
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.count(), 0);
        assert!(tree.query(&Envelope::new(0.0, 1.0, 0.0, 1.0)).is_empty());
        assert!(tree.root_bounds().is_none());
    }

    #[test]
    fn query_window_finds_exact_items() {
        let tree = grid_builder(10, 4).build();
        assert_eq!(tree.count(), 100);
        let mut found: Vec<usize> = tree
            .query(&Envelope::new(5.0, 25.0, 5.0, 15.0))
            .into_iter()
            .copied()
            .collect();
        found.sort_unstable();
        // x in {10, 20} → i in {1, 2}; y in {10} → j = 1.
        assert_eq!(found, vec![11, 21]);
    }

    #[test]
    fn query_point() {
        let tree = grid_builder(5, 3).build();
        let found = tree.query(&Envelope::new(40.5, 40.5, 0.5, 0.5));
        assert_eq!(found, vec![&20]);
    }

    #[test]
    fn depth_grows_logarithmically() {
        let tree = grid_builder(10, 10).build();
        // 100 items at capacity 10: 4 slices of 25 give 12 leaf parents,
        // which pack into 2 level-1 nodes under the root.
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.root.level(), 2);
        let single = grid_builder(1, 10).build();
        assert_eq!(single.depth(), 1);
    }

    #[test]
    fn nodes_respect_capacity() {
        fn check<B: Bounds, T>(node: &TreeNode<B, T>, capacity: usize) {
            assert!(node.children.len() <= capacity);
            for child in &node.children {
                if let Boundable::Node(inner) = child {
                    assert_eq!(inner.level() + 1, node.level());
                    check(inner, capacity);
                }
            }
        }
        let tree = grid_builder(13, 4).build();
        check(&tree.root, 4);
    }

    #[test]
    fn query_visit_matches_query() {
        let tree = grid_builder(6, 3).build();
        let search = Envelope::new(0.0, 30.0, 0.0, 30.0);
        let mut visited = Vec::new();
        tree.query_visit(&search, |item| visited.push(*item));
        assert_eq!(visited.len(), tree.query(&search).len());
        assert_eq!(visited.len(), 16);
    }

    #[test]
    fn remove_prunes_empty_nodes() {
        let mut tree = grid_builder(3, 2).build();
        let env = Envelope::new(0.0, 1.0, 0.0, 1.0);
        assert!(tree.remove(&env, &0));
        assert!(!tree.remove(&env, &0));
        assert_eq!(tree.count(), 8);
        assert!(tree.query(&env).is_empty());
        for id in 1..9 {
            let (i, j) = (id / 3, id % 3);
            let x = i as f64 * 10.0;
            let y = j as f64 * 10.0;
            assert!(tree.remove(&Envelope::new(x, x + 1.0, y, y + 1.0), &id));
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn remove_outside_bounds_is_noop() {
        let mut tree = grid_builder(2, 2).build();
        assert!(!tree.remove(&Envelope::new(100.0, 101.0, 100.0, 101.0), &0));
        assert_eq!(tree.count(), 4);
    }

    #[test]
    fn identical_input_gives_identical_order() {
        let a: Vec<usize> = grid_builder(7, 3).build().items().copied().collect();
        let b: Vec<usize> = grid_builder(7, 3).build().items().copied().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn interval_tree_queries() {
        let mut builder = SirTreeBuilder::new();
        for i in 0..50 {
            let start = f64::from(i) * 2.0;
            builder.insert(Interval::new(start, start + 1.0), i);
        }
        let tree = builder.build();
        let mut found: Vec<i32> = tree.query_range(10.5, 14.0).into_iter().copied().collect();
        found.sort_unstable();
        assert_eq!(found, vec![5, 6, 7]);
        assert_eq!(tree.count(), 50);
        assert!(tree.depth() >= 2);
    }
}
