//! # Cartesian tree of free memory segments
//!
//! Keeps free segments ("frames") in a tree that is a max-heap on segment
//! length and a search tree on segment address at the same time. The largest
//! free segment is therefore always at the root, while an in-order walk still
//! yields the segments sorted by address.
//!
//! ## Features
//!
//! - **Insertion**: [`FrameTree::add`] places a frame and relocates whatever
//!   part of the tree it displaces, so both orderings hold for the whole tree
//!   after every call.
//! - **Traversal**: [`FrameTree::traverse_pre`] and [`FrameTree::traverse_post`]
//!   walk the tree iteratively on a [`Stack`] and stop at the first visitor
//!   error.
//! - **Overlap**: [`classify`] tells whether two segments are disjoint, touch
//!   or overlap, e.g. to find segments that can be coalesced.
//!
//! ## no_std Support
//!
//! The crate only needs `alloc`. Enable the `std` feature to get
//! `std::error::Error` implementations for its error types.
//!
//! ## Example
//!
//! ```
//! use ctree::{Frame, FrameTree};
//!
//! let mut tree = FrameTree::new();
//!
//! for (address, length) in [(0, 100), (500, 300), (1000, 80), (1500, 200)] {
//!     tree.add(Frame::new(address, length));
//! }
//!
//! assert_eq!(tree.largest(), Some(&Frame::new(500, 300)));
//! assert_eq!(tree.to_string(), "[500,300] [0,100] [1500,200] [1000,80]");
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod frame;
mod invariants;
pub mod overlap;
mod stack;
mod traversal;
mod tree;

pub use frame::Frame;
pub use invariants::InvariantViolation;
pub use overlap::{classify, Position};
pub use stack::{Stack, StackError, STACK_BLOCK_SIZE};
pub use traversal::TraversalError;
pub use tree::{FrameId, FrameNode, FrameTree, SharedFrameTree};
