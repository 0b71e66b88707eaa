use crate::Frame;

/// Position of one segment relative to a base segment.
///
/// The five outcomes partition every pair of segments: exactly one of them
/// holds for any `(base, other)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// `other` starts strictly after the end of `base`.
    Right,
    /// `other` ends strictly before the start of `base`.
    Left,
    /// `other` starts exactly where `base` ends.
    TouchRight,
    /// `other` ends exactly where `base` starts.
    TouchLeft,
    /// The segments share at least one address, containment included.
    Overlaps,
}

impl Position {
    /// Whether the two segments are adjacent and can be merged into one.
    pub fn is_touching(self) -> bool {
        matches!(self, Position::TouchLeft | Position::TouchRight)
    }

    pub fn is_disjoint(self) -> bool {
        self != Position::Overlaps
    }
}

/// Classifies `other` relative to `base`.
///
/// Not symmetric: `classify(a, b) == Right` implies `classify(b, a) == Left`,
/// and likewise for the touching cases.
pub fn classify(base: &Frame, other: &Frame) -> Position {
    let start = base.address() as i64;
    let end = base.end();
    let other_start = other.address() as i64;
    let other_end = other.end();

    match () {
        _ if other_start > end => Position::Right,
        _ if other_end < start => Position::Left,
        _ if other_start == end => Position::TouchRight,
        _ if other_end == start => Position::TouchLeft,
        _ => Position::Overlaps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn frame(address: i32, length: i32) -> Frame {
        Frame::new(address, length)
    }

    #[test]
    fn test_right() {
        assert_eq!(classify(&frame(10, 40), &frame(80, 50)), Position::Right);
    }

    #[test]
    fn test_touch_right() {
        assert_eq!(
            classify(&frame(10, 40), &frame(50, 50)),
            Position::TouchRight
        );
    }

    #[test]
    fn test_left() {
        assert_eq!(classify(&frame(100, 40), &frame(10, 20)), Position::Left);
    }

    #[test]
    fn test_touch_left() {
        assert_eq!(
            classify(&frame(100, 40), &frame(80, 20)),
            Position::TouchLeft
        );
    }

    #[test]
    fn test_overlaps_left() {
        assert_eq!(
            classify(&frame(100, 40), &frame(80, 40)),
            Position::Overlaps
        );
    }

    #[test]
    fn test_overlaps_right() {
        assert_eq!(
            classify(&frame(100, 40), &frame(120, 40)),
            Position::Overlaps
        );
    }

    #[test]
    fn test_overlaps_fully() {
        // other contains base
        assert_eq!(
            classify(&frame(100, 100), &frame(40, 120)),
            Position::Overlaps
        );
        // base contains other
        assert_eq!(
            classify(&frame(40, 120), &frame(100, 10)),
            Position::Overlaps
        );
    }

    #[test]
    fn test_touching_is_disjoint() {
        assert!(Position::TouchLeft.is_touching());
        assert!(Position::TouchRight.is_disjoint());
        assert!(!Position::Right.is_touching());
        assert!(!Position::Overlaps.is_disjoint());
    }

    #[test]
    fn test_same_segment_overlaps() {
        assert_eq!(classify(&frame(7, 9), &frame(7, 9)), Position::Overlaps);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let base = frame(i32::MAX - 1, i32::MAX);
        let other = frame(i32::MIN, 1);

        assert_eq!(classify(&base, &other), Position::Left);
        assert_eq!(classify(&other, &base), Position::Right);
    }

    #[test]
    fn test_mirror_relation() {
        let cases = [
            (frame(0, 10), frame(20, 5)),
            (frame(0, 10), frame(10, 5)),
            (frame(30, 10), frame(0, 5)),
            (frame(30, 10), frame(25, 5)),
        ];

        for (a, b) in cases {
            let mirrored = match classify(&a, &b) {
                Position::Right => Position::Left,
                Position::Left => Position::Right,
                Position::TouchRight => Position::TouchLeft,
                Position::TouchLeft => Position::TouchRight,
                Position::Overlaps => Position::Overlaps,
            };

            assert_eq!(classify(&b, &a), mirrored, "{a} vs {b}");
        }
    }

    #[test]
    fn test_exactly_one_outcome() {
        for base_start in -3..4 {
            for base_len in 0..4 {
                for other_start in -8..9 {
                    for other_len in 0..4 {
                        let base = frame(base_start, base_len);
                        let other = frame(other_start, other_len);

                        let b = (base.address() as i64, base.end());
                        let o = (other.address() as i64, other.end());

                        let holds = [
                            o.0 > b.1,
                            o.1 < b.0,
                            o.0 == b.1,
                            o.1 == b.0,
                        ];

                        let expected = match holds.iter().position(|h| *h) {
                            Some(0) => Position::Right,
                            Some(1) => Position::Left,
                            Some(2) => Position::TouchRight,
                            Some(3) => Position::TouchLeft,
                            _ => Position::Overlaps,
                        };

                        assert_eq!(classify(&base, &other), expected, "{base} vs {other}");
                    }
                }
            }
        }
    }
}
