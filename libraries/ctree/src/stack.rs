use alloc::vec::Vec;
use core::fmt;

/// Number of slots the stack grows by whenever it runs full.
pub const STACK_BLOCK_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// Popped or peeked with nothing on the stack.
    Empty,
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackError::Empty => write!(f, "illegal operation: stack is empty"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StackError {}

/// A last-in-first-out stack used to walk the tree without recursion.
///
/// Storage is reserved in blocks of [`STACK_BLOCK_SIZE`] slots, so a walk over
/// a shallow tree never reallocates.
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Stack {
            items: Vec::with_capacity(STACK_BLOCK_SIZE),
        }
    }

    /// Creates a stack with `item` already on top.
    pub fn new_with(item: T) -> Self {
        let mut stack = Self::new();
        stack.push(item);
        stack
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            self.items.reserve_exact(STACK_BLOCK_SIZE);
        }

        self.items.push(item);
    }

    pub fn pop(&mut self) -> Result<T, StackError> {
        self.items.pop().ok_or(StackError::Empty)
    }

    pub fn peek(&self) -> Result<&T, StackError> {
        self.items.last().ok_or(StackError::Empty)
    }

    /// Number of items currently on the stack.
    pub fn depth(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
