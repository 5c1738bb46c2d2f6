//! Package implement an ordered index over integer keys.
//!
//! [RbTree] maps `i32` keys to `i32` values using a
//! [red-black tree][wiki-rbt]. Nodes carry a parent back-reference and the
//! tree is rebalanced bottom-up after every insertion, so lookup and
//! insertion are `O(log n)`.
//!
//! - CRUD operations, via insert(), get(), remove() api.
//! - Missing keys are reported with the [NOT_FOUND] sentinel, `-1`. Use
//!   try_get() and try_remove() to tell a stored `-1` apart from a miss.
//! - Removal splices nodes out without recoloring, hence red-black
//!   balance is guaranteed only for trees built by insertion.
//! - Uses ownership model and borrow semantics to ensure safety.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Constructing a new [RbTree] instance and CRUD operations:
//!
//! ```
//! use rbidx::{RbTree, NOT_FOUND};
//!
//! let mut index = RbTree::new();
//! assert_eq!(index.len(), 0);
//! assert_eq!(index.is_empty(), true);
//!
//! index.insert(10, 100);
//! index.insert(20, 200);
//! index.insert(30, 300);
//!
//! assert_eq!(index.len(), 3);
//! assert_eq!(index.height(), 1);
//!
//! assert_eq!(index.get(10), 100);
//! assert_eq!(index.get(40), NOT_FOUND);
//!
//! let old_value = index.remove(20);
//! assert_eq!(old_value, 200);
//! assert_eq!(index.get(20), NOT_FOUND);
//! ```
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// ```ignore
// use crate::Error;
// err_at!(KeyNotFound, msg: "missing key {}", key);
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
}

mod node;
mod rbtree;

pub use rbtree::{RbTree, NOT_FOUND};

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    Fatal(String, String),
    KeyNotFound(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            KeyNotFound(p, msg) => write!(f, "{} KeyNotFound: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
