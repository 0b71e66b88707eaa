use core::fmt;

use crate::overlap::{classify, Position};

/// A contiguous segment of free memory.
///
/// Frames are plain values. Once handed to [`crate::FrameTree::add`] the tree
/// owns the node that carries it and only the tree may relink it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    address: i32,
    length: i32,
}

impl Frame {
    pub const fn new(address: i32, length: i32) -> Self {
        debug_assert!(length >= 0);
        Frame { address, length }
    }

    #[inline(always)]
    pub const fn address(&self) -> i32 {
        self.address
    }

    #[inline(always)]
    pub const fn length(&self) -> i32 {
        self.length
    }

    /// One past the last address of the segment.
    ///
    /// Widened to `i64` since `address + length` may not fit in an `i32`.
    #[inline(always)]
    pub const fn end(&self) -> i64 {
        self.address as i64 + self.length as i64
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Where `other` lies relative to this frame.
    pub fn position(&self, other: &Frame) -> Position {
        classify(self, other)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.address, self.length)
    }
}
