/// Index into the arena of nodes owned by [RbTree][crate::RbTree].
pub type NodeId = usize;

/// Color tag of a node. Fresh nodes are red.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl Default for Color {
    fn default() -> Color {
        Color::Red
    }
}

// Node corresponds to a single entry in RbTree instance.
#[derive(Clone, Debug)]
pub struct Node {
    pub key: i32,
    pub value: i32,
    pub color: Color,
    pub left: Option<NodeId>,   // owns: left child
    pub right: Option<NodeId>,  // owns: right child
    pub parent: Option<NodeId>, // back-reference, none for root
}

impl Node {
    pub fn new(key: i32, value: i32) -> Node {
        Node {
            key,
            value,
            color: Color::default(),
            left: None,
            right: None,
            parent: None,
        }
    }

    #[inline]
    pub fn set_value(&mut self, value: i32) {
        self.value = value
    }

    #[inline]
    pub fn set_red(&mut self) {
        self.color = Color::Red
    }

    #[inline]
    pub fn set_black(&mut self) {
        self.color = Color::Black
    }

    /// Drop all links, the slot is no longer part of the tree.
    pub fn detach(&mut self) {
        self.left = None;
        self.right = None;
        self.parent = None;
    }
}

impl Node {
    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Return the only child, if node has exactly one.
    pub fn only_child(&self) -> Option<NodeId> {
        match (self.left, self.right) {
            (Some(child), None) | (None, Some(child)) => Some(child),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
