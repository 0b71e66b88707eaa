use alloc::{sync::Arc, vec::Vec};
use core::{convert::Infallible, fmt};

use hermit_sync::SpinMutex;
use log::{debug, trace};

use crate::Frame;

/// Handle of a frame stored in a [`FrameTree`].
///
/// Only meaningful for the tree that returned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(usize);

impl FrameId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameNode {
    frame: Frame,
    left: Option<FrameId>,
    right: Option<FrameId>,
}

impl FrameNode {
    fn new(frame: Frame) -> Self {
        FrameNode {
            frame,
            left: None,
            right: None,
        }
    }

    #[inline(always)]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    #[inline(always)]
    pub fn left(&self) -> Option<FrameId> {
        self.left
    }

    #[inline(always)]
    pub fn right(&self) -> Option<FrameId> {
        self.right
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    /// The side of `anchor` that `frame` belongs to. Equal addresses go left.
    fn of(frame: &Frame, anchor: &Frame) -> Side {
        match frame.address() <= anchor.address() {
            true => Side::Left,
            false => Side::Right,
        }
    }
}

/// A subtree waiting to be re-inserted beneath `anchor`.
///
/// `pending` holds the detached nodes in reverse post-order, so popping yields
/// them children first.
struct Relocation {
    anchor: FrameId,
    pending: Vec<FrameId>,
}

pub type SharedFrameTree = Arc<SpinMutex<FrameTree>>;

/// Cartesian tree of free memory segments.
///
/// Ordered as a max-heap on length and as a search tree on address:
///
/// 1. a node is never shorter than any of its children, so the root always
///    holds the largest segment;
/// 2. every address in the left subtree of a node is `<=` the node's address,
///    every address in its right subtree is `>` it.
///
/// Nodes live in an arena and reference their children by [`FrameId`]. Frames
/// are never removed, so the arena length is the frame count.
#[derive(Debug, Clone, Default)]
pub struct FrameTree {
    nodes: Vec<FrameNode>,
    root: Option<FrameId>,
}

impl FrameTree {
    pub const fn new() -> Self {
        FrameTree {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Creates a tree holding a single segment of `length` at address 0.
    pub fn with_length(length: i32) -> Self {
        let mut tree = Self::new();
        tree.add(Frame::new(0, length));
        tree
    }

    /// Wraps the tree for callers that need to share it between threads.
    ///
    /// The tree does no locking of its own; every `add` and every walk has to
    /// happen under the returned lock.
    pub fn into_shared(self) -> SharedFrameTree {
        Arc::new(SpinMutex::new(self))
    }

    /// Number of frames added so far.
    pub fn frames(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<FrameId> {
        self.root
    }

    pub fn node(&self, id: FrameId) -> Option<&FrameNode> {
        self.nodes.get(id.0)
    }

    /// The largest free segment, which is always at the root.
    pub fn largest(&self) -> Option<&Frame> {
        self.root.map(|root| self.get(root).frame())
    }

    /// Inserts `frame` and restores both orderings.
    ///
    /// Equal lengths descend below the existing node and equal addresses go
    /// left, so the resulting shape is fully determined by insertion order.
    ///
    /// The caller must not add segments that overlap or share an address
    /// with a segment already in the tree.
    pub fn add(&mut self, frame: Frame) -> FrameId {
        let id = FrameId(self.nodes.len());
        self.nodes.push(FrameNode::new(frame));

        trace!("Adding frame {frame}");

        match self.root {
            None => self.root = Some(id),
            Some(root) if frame.length() >= self.get(root).frame().length() => {
                self.replace_root(root, id)
            }
            Some(root) => self.insert_below(root, id),
        }

        id
    }

    #[inline(always)]
    pub(crate) fn get(&self, id: FrameId) -> &FrameNode {
        &self.nodes[id.0]
    }

    fn child(&self, id: FrameId, side: Side) -> Option<FrameId> {
        match side {
            Side::Left => self.get(id).left,
            Side::Right => self.get(id).right,
        }
    }

    fn set_child(&mut self, id: FrameId, side: Side, child: Option<FrameId>) {
        let node = &mut self.nodes[id.0];

        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    /// Puts `id` on top of the whole tree.
    ///
    /// The former tree hangs off the side its root's address falls on. Nodes
    /// whose address lands on the other side of the new root are split off
    /// along the search path and hung on the opposite side, so a former tree
    /// lying entirely on one side is attached untouched.
    fn replace_root(&mut self, old_root: FrameId, id: FrameId) {
        let frame = *self.get(id).frame();
        let (left, right) = self.split(old_root, frame.address());

        trace!(
            "{frame} replaces {} as root",
            self.get(old_root).frame()
        );

        if left.is_some() && right.is_some() {
            debug!("Former tree straddles {frame}, split on address");
        }

        self.set_child(id, Side::Left, left);
        self.set_child(id, Side::Right, right);
        self.root = Some(id);
    }

    /// Splits the subtree at `subtree` into the nodes with address `<= key`
    /// and those with address `> key`, keeping both orderings in each half.
    fn split(&mut self, subtree: FrameId, key: i32) -> (Option<FrameId>, Option<FrameId>) {
        let mut left = None;
        let mut right = None;
        // Last node appended to each half: the left half grows through right
        // links, the right half through left links.
        let mut left_tail: Option<FrameId> = None;
        let mut right_tail: Option<FrameId> = None;

        let mut current = Some(subtree);

        while let Some(id) = current {
            if self.get(id).frame().address() <= key {
                match left_tail {
                    None => left = Some(id),
                    Some(tail) => self.set_child(tail, Side::Right, Some(id)),
                }
                left_tail = Some(id);
                current = self.get(id).right;
            } else {
                match right_tail {
                    None => right = Some(id),
                    Some(tail) => self.set_child(tail, Side::Left, Some(id)),
                }
                right_tail = Some(id);
                current = self.get(id).left;
            }
        }

        if let Some(tail) = left_tail {
            self.set_child(tail, Side::Right, None);
        }

        if let Some(tail) = right_tail {
            self.set_child(tail, Side::Left, None);
        }

        (left, right)
    }

    /// Inserts `id` into the subtree at `anchor`, relocating whatever subtree
    /// it displaces. `anchor` must be at least as long as `id`.
    ///
    /// Relocations are kept on an explicit job stack. A relocation triggered
    /// while re-inserting runs to completion before its outer one resumes.
    fn insert_below(&mut self, anchor: FrameId, id: FrameId) {
        let mut jobs: Vec<Relocation> = Vec::new();

        if let Some(displaced) = self.descend_and_attach(anchor, id) {
            jobs.push(self.detach(id, displaced));
        }

        while let Some(job) = jobs.last_mut() {
            let anchor = job.anchor;

            let Some(next) = job.pending.pop() else {
                jobs.pop();
                continue;
            };

            if let Some(displaced) = self.descend_and_attach(anchor, next) {
                jobs.push(self.detach(next, displaced));
            }
        }
    }

    /// Walks down from `anchor` while `id` is not longer than the current
    /// node, steering by address, then links `id` into the slot it stopped at.
    ///
    /// Returns the node that previously occupied the slot, if `id` stopped
    /// because it is longer than that node.
    fn descend_and_attach(&mut self, anchor: FrameId, id: FrameId) -> Option<FrameId> {
        let frame = *self.get(id).frame();
        let mut parent = anchor;

        debug_assert!(frame.length() <= self.get(anchor).frame().length());

        loop {
            let side = Side::of(&frame, self.get(parent).frame());

            match self.child(parent, side) {
                Some(child) if frame.length() <= self.get(child).frame().length() => {
                    parent = child;
                }
                displaced => {
                    self.set_child(parent, side, Some(id));
                    return displaced;
                }
            }
        }
    }

    /// Unlinks every node below and including `subtree` and schedules them
    /// for re-insertion beneath `anchor`.
    fn detach(&mut self, anchor: FrameId, subtree: FrameId) -> Relocation {
        let mut order = Vec::new();

        let walked = self.walk_post(subtree, |id| {
            order.push(id);
            Ok::<(), Infallible>(())
        });

        if let Err(e) = walked {
            unreachable!("walking a detached subtree failed: {e}");
        }

        for id in order.iter() {
            let node = &mut self.nodes[id.0];
            node.left = None;
            node.right = None;
        }

        debug!(
            "Relocating {} frame(s) rooted at {} below {}",
            order.len(),
            self.get(subtree).frame(),
            self.get(anchor).frame()
        );

        order.reverse();

        Relocation {
            anchor,
            pending: order,
        }
    }
}

impl fmt::Display for FrameTree {
    /// Frames in pre-order, separated by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        self.traverse_pre(|frame| {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{frame}")
        })
        .map_err(|_| fmt::Error)
    }
}
