//! Depth-first walks over a [`FrameTree`].
//!
//! Both orders keep their pending nodes on a [`Stack`] instead of the call
//! stack, so walking a degenerate (chain shaped) tree costs heap, not stack.

use alloc::vec::Vec;
use core::{convert::Infallible, fmt};

use crate::{Frame, FrameId, FrameTree, Stack, StackError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalError<E> {
    /// The walk's own stack misbehaved. Never expected in practice.
    Stack(StackError),
    /// The visitor failed. Carries its error unchanged.
    Visitor(E),
}

impl<E> From<StackError> for TraversalError<E> {
    fn from(e: StackError) -> Self {
        TraversalError::Stack(e)
    }
}

impl<E: fmt::Display> fmt::Display for TraversalError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalError::Stack(e) => write!(f, "stack error: {e}"),
            TraversalError::Visitor(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug + fmt::Display> std::error::Error for TraversalError<E> {}

impl FrameTree {
    /// Visits every frame, each node before its left subtree and its left
    /// subtree before its right one.
    ///
    /// Stops at the first visitor error and returns it as
    /// [`TraversalError::Visitor`].
    pub fn traverse_pre<E, F>(&self, mut visit: F) -> Result<(), TraversalError<E>>
    where
        F: FnMut(&Frame) -> Result<(), E>,
    {
        match self.root() {
            Some(root) => self.walk_pre(root, |id| visit(self.get(id).frame())),
            None => Ok(()),
        }
    }

    /// Visits every frame, the left subtree first, then the right subtree,
    /// then the node itself.
    ///
    /// Stops at the first visitor error and returns it as
    /// [`TraversalError::Visitor`].
    pub fn traverse_post<E, F>(&self, mut visit: F) -> Result<(), TraversalError<E>>
    where
        F: FnMut(&Frame) -> Result<(), E>,
    {
        match self.root() {
            Some(root) => self.walk_post(root, |id| visit(self.get(id).frame())),
            None => Ok(()),
        }
    }

    pub fn pre_order(&self) -> Vec<Frame> {
        let mut frames = Vec::with_capacity(self.frames());

        if let Err(e) = self.traverse_pre(|frame| {
            frames.push(*frame);
            Ok::<(), Infallible>(())
        }) {
            unreachable!("pre-order walk failed: {e}");
        }

        frames
    }

    pub fn post_order(&self) -> Vec<Frame> {
        let mut frames = Vec::with_capacity(self.frames());

        if let Err(e) = self.traverse_post(|frame| {
            frames.push(*frame);
            Ok::<(), Infallible>(())
        }) {
            unreachable!("post-order walk failed: {e}");
        }

        frames
    }

    pub(crate) fn walk_pre<E, F>(&self, root: FrameId, mut visit: F) -> Result<(), TraversalError<E>>
    where
        F: FnMut(FrameId) -> Result<(), E>,
    {
        let mut stack = Stack::new_with(root);

        while !stack.is_empty() {
            let current = stack.pop()?;

            visit(current).map_err(TraversalError::Visitor)?;

            let node = self.get(current);

            // right goes in first so that the left subtree is walked first
            if let Some(right) = node.right() {
                stack.push(right);
            }

            if let Some(left) = node.left() {
                stack.push(left);
            }
        }

        Ok(())
    }

    /// A node stays on the stack until its children are done. It is visited
    /// once it is a leaf or the node visited last is one of its children.
    pub(crate) fn walk_post<E, F>(&self, root: FrameId, mut visit: F) -> Result<(), TraversalError<E>>
    where
        F: FnMut(FrameId) -> Result<(), E>,
    {
        let mut stack = Stack::new_with(root);
        let mut last: Option<FrameId> = None;

        while !stack.is_empty() {
            let current = *stack.peek()?;
            let node = self.get(current);

            let children_done = node.is_leaf()
                || matches!(last, Some(done) if node.left() == Some(done) || node.right() == Some(done));

            if children_done {
                stack.pop()?;
                visit(current).map_err(TraversalError::Visitor)?;
                last = Some(current);
                continue;
            }

            if let Some(right) = node.right() {
                stack.push(right);
            }

            if let Some(left) = node.left() {
                stack.push(left);
            }
        }

        Ok(())
    }
}
