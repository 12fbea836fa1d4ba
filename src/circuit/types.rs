//! Core types for circuit representation.

use std::fmt;

/// A unique identifier for a node in the circuit.
///
/// Ids are allocated by the [`Circuit`](super::Circuit) starting at 1 and
/// are never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A unique identifier for a wire in the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId(pub u64);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}", self.0)
    }
}

/// A unique identifier for a dipole (two-terminal component) in the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DipoleId(pub u64);

impl fmt::Display for DipoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

/// A point on the editing canvas. Opaque to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    pub fn distance_squared(&self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Position> for [f64; 2] {
    fn from(p: Position) -> Self {
        [p.x, p.y]
    }
}

/// Counter handing out monotonically increasing ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub(crate) const FIRST: u64 = 1;
    /// Exclusive upper bound on ids: the largest integer range a JSON number
    /// holds exactly in every consumer.
    pub(crate) const LIMIT: u64 = 1 << 53;

    pub(crate) fn new() -> Self {
        Self { next: Self::FIRST }
    }

    pub(crate) fn starting_at(next: u64) -> Self {
        Self {
            next: next.clamp(Self::FIRST, Self::LIMIT),
        }
    }

    /// Peek at the id the next allocation will return.
    pub(crate) fn peek(&self) -> u64 {
        self.next
    }

    pub(crate) fn allocate(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    /// Make sure an externally supplied id is never handed out again.
    ///
    /// Returns `false` and leaves the counter alone for ids at or above
    /// [`IdAllocator::LIMIT`].
    pub(crate) fn reserve(&mut self, id: u64) -> bool {
        if id >= Self::LIMIT {
            return false;
        }
        if id >= self.next {
            self.next = id + 1;
        }
        true
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(), 1);
        assert_eq!(ids.allocate(), 2);
        assert!(ids.reserve(10));
        assert_eq!(ids.peek(), 11);
        assert!(ids.reserve(4));
        assert_eq!(ids.allocate(), 11);
    }

    #[test]
    fn test_allocator_rejects_ids_out_of_range() {
        let mut ids = IdAllocator::new();
        assert!(!ids.reserve(u64::MAX));
        assert!(!ids.reserve(IdAllocator::LIMIT));
        assert_eq!(ids.peek(), 1);
        assert!(ids.reserve(IdAllocator::LIMIT - 1));
        assert_eq!(ids.peek(), IdAllocator::LIMIT);

        assert_eq!(IdAllocator::starting_at(u64::MAX).peek(), IdAllocator::LIMIT);
        assert_eq!(IdAllocator::starting_at(0).peek(), IdAllocator::FIRST);
    }

    #[test]
    fn test_display() {
        assert_eq!(NodeId(3).to_string(), "N3");
        assert_eq!(WireId(1).to_string(), "W1");
        assert_eq!(DipoleId(7).to_string(), "D7");
    }
}
