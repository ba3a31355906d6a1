//! Circular index arithmetic so every navigation path wraps the same way.

/// Which way a circular step moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the previous slot, wrapping from 0 to `len - 1`.
    Backward,
    /// Toward the next slot, wrapping from `len - 1` to 0.
    Forward,
}

/// Step `current` one slot in `direction` within a ring of `len` slots.
///
/// `current` is re-normalized against `len` first, so a value left over from a
/// longer ring still lands in range. An empty ring always yields 0.
#[must_use]
pub fn cycle_index(current: usize, len: usize, direction: Direction) -> usize {
    if len == 0 {
        return 0;
    }
    let current = current % len;
    match direction {
        // `current < len <= usize::MAX`, so neither arm can overflow.
        Direction::Forward => {
            if current == len - 1 {
                0
            } else {
                current + 1
            }
        }
        Direction::Backward => {
            if current == 0 {
                len - 1
            } else {
                current - 1
            }
        }
    }
}

/// `(current + 1) mod len`.
#[must_use]
pub fn next_index(current: usize, len: usize) -> usize {
    cycle_index(current, len, Direction::Forward)
}

/// `(current + len - 1) mod len`.
#[must_use]
pub fn prev_index(current: usize, len: usize) -> usize {
    cycle_index(current, len, Direction::Backward)
}
