use core::fmt;

use crate::{Frame, FrameId, FrameTree, Stack};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// `child` is longer than its `parent`.
    HeapOrder { parent: Frame, child: Frame },
    /// `descendant` sits on the wrong side of `ancestor` by address.
    AddressOrder { ancestor: Frame, descendant: Frame },
    /// The number of frames reachable from the root disagrees with the count.
    CountMismatch { expected: usize, reachable: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::HeapOrder { parent, child } => {
                write!(f, "child {child} is longer than its parent {parent}")
            }
            InvariantViolation::AddressOrder {
                ancestor,
                descendant,
            } => write!(f, "{descendant} is on the wrong side of {ancestor}"),
            InvariantViolation::CountMismatch {
                expected,
                reachable,
            } => write!(f, "{reachable} frame(s) reachable, expected {expected}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvariantViolation {}

/// A node still to be checked, with the tightest address bounds its
/// ancestors impose: strictly above `lower`, at most `upper`.
struct Pending {
    id: FrameId,
    lower: Option<Frame>,
    upper: Option<Frame>,
}

impl FrameTree {
    /// Checks both orderings over the whole tree, and that every added frame
    /// is reachable from the root exactly once.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let expected = self.frames();

        let Some(root) = self.root() else {
            return match expected {
                0 => Ok(()),
                _ => Err(InvariantViolation::CountMismatch {
                    expected,
                    reachable: 0,
                }),
            };
        };

        let mut stack = Stack::new_with(Pending {
            id: root,
            lower: None,
            upper: None,
        });
        let mut reachable = 0;

        while let Ok(pending) = stack.pop() {
            reachable += 1;

            // a node reached twice means the links form a cycle or a DAG
            if reachable > expected {
                return Err(InvariantViolation::CountMismatch {
                    expected,
                    reachable,
                });
            }

            let node = self.get(pending.id);
            let frame = *node.frame();

            if let Some(lower) = pending.lower {
                if frame.address() <= lower.address() {
                    return Err(InvariantViolation::AddressOrder {
                        ancestor: lower,
                        descendant: frame,
                    });
                }
            }

            if let Some(upper) = pending.upper {
                if frame.address() > upper.address() {
                    return Err(InvariantViolation::AddressOrder {
                        ancestor: upper,
                        descendant: frame,
                    });
                }
            }

            let children = [
                (node.left(), pending.lower, Some(frame)),
                (node.right(), Some(frame), pending.upper),
            ];

            for (child, lower, upper) in children {
                let Some(child) = child else {
                    continue;
                };

                let child_frame = *self.get(child).frame();

                if child_frame.length() > frame.length() {
                    return Err(InvariantViolation::HeapOrder {
                        parent: frame,
                        child: child_frame,
                    });
                }

                stack.push(Pending {
                    id: child,
                    lower,
                    upper,
                });
            }
        }

        match reachable == expected {
            true => Ok(()),
            false => Err(InvariantViolation::CountMismatch {
                expected,
                reachable,
            }),
        }
    }

    /// Performs check of internal invariants of the tree
    ///
    /// # Panics
    /// Panics if invariants are not held
    pub fn sanity_check(&self) {
        if let Err(violation) = self.check_invariants() {
            panic!("frame tree invariant broken: {violation}\n{self}");
        }
    }
}
