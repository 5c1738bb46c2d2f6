//! Module provide ordered index implemented by [RbTree] type.
//!
//! RbTree is implemented using [red-black][wiki-rbt] tree, with parent
//! back-references.
//!
//! - Each entry in RbTree instance correspond to a {Key, Value} pair,
//!   both are `i32`.
//! - CRUD operations, via insert(), get(), remove() api.
//! - insert() rebalance the tree bottom-up, by recoloring and rotation.
//! - remove() splice out the node, colors are left as they are.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Nodes are held in an arena owned by the tree, links are indices into
//! the arena. Slots released by remove() are reused by later inserts.
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use log::{debug, trace};

use std::cmp::Ordering;

use crate::{
    node::{Node, NodeId},
    Error, Result,
};

/// Value returned by [RbTree::get] and [RbTree::remove] for missing keys.
///
/// `-1` is also a legal value, use [RbTree::try_get] and
/// [RbTree::try_remove] when a miss must be told apart from a stored `-1`.
pub const NOT_FOUND: i32 = -1;

/// RbTree manage a single instance of in-memory index using
/// [red-black][rbt] tree.
///
/// [rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
#[derive(Clone, Default)]
pub struct RbTree {
    root: Option<NodeId>,
    nodes: Vec<Node>,  // arena, owns every node in the tree.
    free: Vec<NodeId>, // released slots in `nodes`.
    n_count: usize,    // number of entries in the tree.
}

impl Extend<(i32, i32)> for RbTree {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        iter.into_iter().for_each(|(key, value)| self.insert(key, value));
    }
}

impl FromIterator<(i32, i32)> for RbTree {
    fn from_iter<I>(iter: I) -> RbTree
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut index = RbTree::new();
        index.extend(iter);
        index
    }
}

impl RbTree {
    /// Create an empty instance of RbTree.
    pub fn new() -> RbTree {
        RbTree {
            root: None,
            nodes: Vec::default(),
            free: Vec::default(),
            n_count: Default::default(),
        }
    }

    /// Create an empty instance of RbTree, with room for `capacity`
    /// entries before the arena has to grow.
    pub fn with_capacity(capacity: usize) -> RbTree {
        RbTree {
            nodes: Vec::with_capacity(capacity),
            ..RbTree::new()
        }
    }
}

/// Maintenance API.
impl RbTree {
    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return the number of edges on the longest path from root to a
    /// leaf. Empty tree has a height of -1, a single entry 0.
    pub fn height(&self) -> isize {
        let mut height = -1;

        let mut stack: Vec<(NodeId, isize)> = self.root.map(|id| (id, 0)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let nref = &self.nodes[id];
            stack.extend(nref.left.map(|id| (id, depth + 1)));
            stack.extend(nref.right.map(|id| (id, depth + 1)));
        }

        height
    }

    /// Validate tree with following rules:
    ///
    /// * Parent back-reference of every node point to its parent.
    /// * Make sure keys are in sorted order.
    /// * Root node is black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Number of reachable nodes matches with len().
    ///
    /// Color rules are guaranteed only for trees built by insertion,
    /// use [validate_order][RbTree::validate_order] after removals.
    pub fn validate(&self) -> Result<()> {
        self.do_validate(true /*colors*/)
    }

    /// Validate the rules that hold even after removal: parent links,
    /// sort order and count. Colors are not checked.
    pub fn validate_order(&self) -> Result<()> {
        self.do_validate(false /*colors*/)
    }

    #[allow(dead_code)]
    #[cfg(test)]
    pub fn pretty_print(&self) {
        self.print_node(self.root, "".to_string())
    }
}

/// CRUD API.
impl RbTree {
    /// Set value for key. If there is an existing entry for key,
    /// overwrite the old value with new value, the shape of the tree
    /// is left untouched.
    pub fn insert(&mut self, key: i32, value: i32) {
        let mut parent = match self.root {
            Some(root) => root,
            None => {
                let mut node = Node::new(key, value);
                node.set_black();
                self.root = Some(self.alloc(node));
                return;
            }
        };

        loop {
            let nref = &mut self.nodes[parent];
            let next = match key.cmp(&nref.key) {
                Ordering::Less => nref.left,
                Ordering::Greater => nref.right,
                Ordering::Equal => {
                    nref.set_value(value);
                    return;
                }
            };
            match next {
                Some(next) => parent = next,
                None => break,
            }
        }

        let mut node = Node::new(key, value);
        node.parent = Some(parent);
        let id = self.alloc(node);
        if key < self.nodes[parent].key {
            self.nodes[parent].left = Some(id);
        } else {
            self.nodes[parent].right = Some(id);
        }

        self.insert_fixup(id);
    }

    /// Get the value for key, return [NOT_FOUND] if key is missing.
    pub fn get(&self, key: i32) -> i32 {
        match self.search(key) {
            Some(id) => self.nodes[id].value,
            None => NOT_FOUND,
        }
    }

    /// Get the value for key, return [Error::KeyNotFound] if key is
    /// missing.
    pub fn try_get(&self, key: i32) -> Result<i32> {
        match self.search(key) {
            Some(id) => Ok(self.nodes[id].value),
            None => err_at!(KeyNotFound, msg: "get missing key {}", key),
        }
    }

    /// Check whether key is present in this index.
    pub fn contains_key(&self, key: i32) -> bool {
        self.search(key).is_some()
    }

    /// Remove key from this instance and return its value. If key is
    /// not present return [NOT_FOUND], and the index is left as is.
    pub fn remove(&mut self, key: i32) -> i32 {
        match self.search(key) {
            Some(id) => {
                let value = self.nodes[id].value;
                self.delete_node(id);
                value
            }
            None => NOT_FOUND,
        }
    }

    /// Remove key from this instance and return its value. If key is
    /// not present return [Error::KeyNotFound].
    pub fn try_remove(&mut self, key: i32) -> Result<i32> {
        match self.search(key) {
            Some(id) => {
                let value = self.nodes[id].value;
                self.delete_node(id);
                Ok(value)
            }
            None => err_at!(KeyNotFound, msg: "remove missing key {}", key),
        }
    }
}

impl RbTree {
    fn search(&self, key: i32) -> Option<NodeId> {
        let mut node = self.root;
        while let Some(id) = node {
            let nref = &self.nodes[id];
            node = match nref.key.cmp(&key) {
                Ordering::Less => nref.right,
                Ordering::Greater => nref.left,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.n_count += 1;
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        self.nodes[id].detach();
        self.free.push(id);
        self.n_count -= 1;
    }

    #[inline]
    fn red_parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].parent.filter(|id| self.nodes[*id].is_red())
    }

    // Point the slot that holds `old`, in `parent` or the root, to `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(id) if self.nodes[id].left == Some(old) => self.nodes[id].left = new,
            Some(id) => self.nodes[id].right = new,
        }
    }

    fn leftmost(&self, mut node: NodeId) -> NodeId {
        while let Some(left) = self.nodes[node].left {
            node = left;
        }
        node
    }

    // Next node in key order, None if node holds the largest key.
    fn find_successor(&self, node: NodeId) -> Option<NodeId> {
        if let Some(right) = self.nodes[node].right {
            return Some(self.leftmost(right));
        }

        let (mut node, mut parent) = (node, self.nodes[node].parent);
        while let Some(id) = parent {
            if self.nodes[id].left == Some(node) {
                break;
            }
            node = id;
            parent = self.nodes[id].parent;
        }
        parent
    }
}

//--------- insert fixup and rotation routines ----------------

impl RbTree {
    fn insert_fixup(&mut self, mut node: NodeId) {
        while let Some(parent) = self.red_parent(node) {
            // red root is possible only after removals.
            let grand = match self.nodes[parent].parent {
                Some(grand) => grand,
                None => break,
            };

            if self.nodes[grand].left == Some(parent) {
                let uncle = self.nodes[grand].right;
                if let Some(uncle) = uncle.filter(|id| self.nodes[*id].is_red()) {
                    self.nodes[parent].set_black();
                    self.nodes[uncle].set_black();
                    self.nodes[grand].set_red();
                    node = grand;
                    continue;
                }

                let top = if self.nodes[parent].right == Some(node) {
                    self.rotate_left(parent);
                    node
                } else {
                    parent
                };
                self.nodes[top].set_black();
                self.nodes[grand].set_red();
                self.rotate_right(grand);
            } else {
                let uncle = self.nodes[grand].left;
                if let Some(uncle) = uncle.filter(|id| self.nodes[*id].is_red()) {
                    self.nodes[parent].set_black();
                    self.nodes[uncle].set_black();
                    self.nodes[grand].set_red();
                    node = grand;
                    continue;
                }

                let top = if self.nodes[parent].left == Some(node) {
                    self.rotate_right(parent);
                    node
                } else {
                    parent
                };
                self.nodes[top].set_black();
                self.nodes[grand].set_red();
                self.rotate_left(grand);
            }
            break;
        }

        if let Some(root) = self.root {
            self.nodes[root].set_black();
        }
    }

    //              (p)                       (p)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //          left      x              node      xr
    //                   / \             /  \
    //                 xl   xr        left   xl
    //
    fn rotate_left(&mut self, node: NodeId) {
        let x = match self.nodes[node].right {
            Some(x) => x,
            None => panic!("rotate_left(): no right child ? Call the programmer"),
        };
        trace!("rotate_left key:{} up key:{}", self.nodes[node].key, self.nodes[x].key);

        let xl = self.nodes[x].left;
        self.nodes[node].right = xl;
        if let Some(xl) = xl {
            self.nodes[xl].parent = Some(node);
        }

        let parent = self.nodes[node].parent;
        self.nodes[x].parent = parent;
        self.replace_child(parent, node, Some(x));

        self.nodes[x].left = Some(node);
        self.nodes[node].parent = Some(x);
    }

    //              (p)                       (p)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //           x      right             xl      node
    //          / \                               / \
    //        xl   xr                           xr  right
    //
    fn rotate_right(&mut self, node: NodeId) {
        let x = match self.nodes[node].left {
            Some(x) => x,
            None => panic!("rotate_right(): no left child ? Call the programmer"),
        };
        trace!("rotate_right key:{} up key:{}", self.nodes[node].key, self.nodes[x].key);

        let xr = self.nodes[x].right;
        self.nodes[node].left = xr;
        if let Some(xr) = xr {
            self.nodes[xr].parent = Some(node);
        }

        let parent = self.nodes[node].parent;
        self.nodes[x].parent = parent;
        self.replace_child(parent, node, Some(x));

        self.nodes[x].right = Some(node);
        self.nodes[node].parent = Some(x);
    }
}

//--------- removal routines ----------------

impl RbTree {
    // Colors are not repaired, black-height may differ across paths
    // once a black node is spliced out.
    fn delete_node(&mut self, node: NodeId) {
        let nref = &self.nodes[node];
        let node = if nref.left.is_some() && nref.right.is_some() {
            let succ = match self.find_successor(node) {
                Some(succ) => succ,
                None => panic!("delete_node(): fatal logic, call the programmer"),
            };
            let (key, value) = (self.nodes[succ].key, self.nodes[succ].value);
            debug!("delete key:{} replaced by successor key:{}", self.nodes[node].key, key);

            let nref = &mut self.nodes[node];
            nref.key = key;
            nref.set_value(value);
            succ
        } else {
            node
        };

        // node has at most one child from here on.
        let child = self.nodes[node].only_child();
        let parent = self.nodes[node].parent;
        if self.nodes[node].is_leaf() {
            debug!("delete leaf key:{}", self.nodes[node].key);
        }
        if let Some(child) = child {
            debug!("delete key:{} splice child key:{}", self.nodes[node].key, self.nodes[child].key);
            self.nodes[child].parent = parent;
        }
        self.replace_child(parent, node, child);

        self.release(node);
    }
}

//--------- validation routines ----------------

impl RbTree {
    fn do_validate(&self, colors: bool) -> Result<()> {
        if let Some(root) = self.root {
            let rref = &self.nodes[root];
            if rref.parent.is_some() {
                return err_at!(Fatal, msg: "root key:{} has a parent", rref.key);
            }
            if colors && !rref.is_black() {
                return err_at!(Fatal, msg: "root node must be black");
            }
        }

        let bounds = (None, None);
        let (n_count, _) = self.validate_tree(self.root, None, false, bounds, colors, 0)?;
        if n_count != self.n_count {
            return err_at!(Fatal, msg: "mismatch in count {} != {}", n_count, self.n_count);
        }
        if self.nodes.len() != self.n_count + self.free.len() {
            let (n, f) = (self.nodes.len(), self.free.len());
            return err_at!(Fatal, msg: "arena slots {} != {} + {}", n, self.n_count, f);
        }
        Ok(())
    }

    // Return (n_count, n_blacks) for the sub-tree under `node`.
    fn validate_tree(
        &self,
        node: Option<NodeId>,
        parent: Option<NodeId>,
        fromred: bool,
        (low, high): (Option<i32>, Option<i32>),
        colors: bool,
        depth: usize,
    ) -> Result<(usize, usize)> {
        let id = match node {
            Some(id) => id,
            None => return Ok((0, 0)),
        };
        let nref = &self.nodes[id];

        if depth > self.n_count {
            return err_at!(Fatal, msg: "tree exceeds max_depth {}", depth);
        }
        if nref.parent != parent {
            let (key, p) = (nref.key, nref.parent);
            return err_at!(Fatal, msg: "key:{} parent {:?} != {:?}", key, p, parent);
        }
        if low.map_or(false, |low| nref.key <= low) || high.map_or(false, |high| nref.key >= high) {
            return err_at!(Fatal, msg: "sort key:{} low:{:?} high:{:?}", nref.key, low, high);
        }

        let red = nref.is_red();
        if colors && fromred && red {
            return err_at!(Fatal, msg: "consecutive reds at key:{}", nref.key);
        }

        let (left, right) = (nref.left, nref.right);
        let lbounds = (low, Some(nref.key));
        let (lcount, lblacks) = self.validate_tree(left, node, red, lbounds, colors, depth + 1)?;
        let rbounds = (Some(nref.key), high);
        let (rcount, rblacks) = self.validate_tree(right, node, red, rbounds, colors, depth + 1)?;
        if colors && lblacks != rblacks {
            return err_at!(Fatal, msg: "unbalanced blacks l:{}, r:{}", lblacks, rblacks);
        }

        let n_blacks = if red { lblacks } else { lblacks + 1 };
        Ok((lcount + rcount + 1, n_blacks))
    }

    #[allow(dead_code)]
    #[cfg(test)]
    fn print_node(&self, node: Option<NodeId>, prefix: String) {
        if let Some(id) = node {
            let nref = &self.nodes[id];
            println!("{}{}:{} {:?}", prefix, nref.key, nref.value, nref.color);
            let prefix = prefix + "  ";
            self.print_node(nref.left, prefix.clone());
            self.print_node(nref.right, prefix);
        }
    }
}

#[cfg(test)]
#[path = "rbtree_test.rs"]
mod rbtree_test;
