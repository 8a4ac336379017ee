// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/handle.rs
//
// Resize handles and the edges each one moves.

use std::fmt;

use super::geometry::{PointerPos, ViewportRect};
use crate::constant::HANDLE_HIT_SIZE;

/// One of the eight compass grab points on the crop rectangle border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// Which rectangle edges follow the pointer for a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl ResizeHandle {
    /// All handles. Corners come first so they win hit tests over edges.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NorthWest,
        ResizeHandle::NorthEast,
        ResizeHandle::SouthEast,
        ResizeHandle::SouthWest,
        ResizeHandle::North,
        ResizeHandle::East,
        ResizeHandle::South,
        ResizeHandle::West,
    ];

    pub fn edges(self) -> Edges {
        let (north, east, south, west) = match self {
            ResizeHandle::North => (true, false, false, false),
            ResizeHandle::NorthEast => (true, true, false, false),
            ResizeHandle::East => (false, true, false, false),
            ResizeHandle::SouthEast => (false, true, true, false),
            ResizeHandle::South => (false, false, true, false),
            ResizeHandle::SouthWest => (false, false, true, true),
            ResizeHandle::West => (false, false, false, true),
            ResizeHandle::NorthWest => (true, false, false, true),
        };
        Edges {
            north,
            east,
            south,
            west,
        }
    }

    /// Compass abbreviation (`n`, `ne`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeHandle::North => "n",
            ResizeHandle::NorthEast => "ne",
            ResizeHandle::East => "e",
            ResizeHandle::SouthEast => "se",
            ResizeHandle::South => "s",
            ResizeHandle::SouthWest => "sw",
            ResizeHandle::West => "w",
            ResizeHandle::NorthWest => "nw",
        }
    }

    /// Centre of the handle on `rect`'s border.
    pub fn anchor_point(self, rect: &ViewportRect) -> PointerPos {
        let edges = self.edges();
        let x = if edges.west {
            rect.x
        } else if edges.east {
            rect.right()
        } else {
            rect.x + rect.width / 2.0
        };
        let y = if edges.north {
            rect.y
        } else if edges.south {
            rect.bottom()
        } else {
            rect.y + rect.height / 2.0
        };
        PointerPos::new(x, y)
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a pointer-down at some position grabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Handle(ResizeHandle),
    Body,
    Outside,
}

/// Decide what `point` grabs on `rect`. Handles take precedence over the
/// body so the border remains resizable.
pub fn hit_test(rect: &ViewportRect, point: PointerPos) -> PointerTarget {
    for handle in ResizeHandle::ALL {
        if point_in_handle(point, handle.anchor_point(rect)) {
            return PointerTarget::Handle(handle);
        }
    }

    if rect.contains(point) {
        return PointerTarget::Body;
    }

    PointerTarget::Outside
}

fn point_in_handle(point: PointerPos, handle_center: PointerPos) -> bool {
    let half = HANDLE_HIT_SIZE / 2.0;
    point.x >= handle_center.x - half
        && point.x <= handle_center.x + half
        && point.y >= handle_center.y - half
        && point.y <= handle_center.y + half
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_handle_moves_at_least_one_edge_and_never_opposites() {
        for handle in ResizeHandle::ALL {
            let e = handle.edges();
            assert!(e.north || e.east || e.south || e.west, "{handle}");
            assert!(!(e.north && e.south), "{handle}");
            assert!(!(e.east && e.west), "{handle}");
        }
    }

    #[test]
    fn hit_test_prefers_handles_over_body() {
        let rect = ViewportRect::new(100.0, 100.0, 200.0, 200.0);
        assert_eq!(
            hit_test(&rect, PointerPos::new(101.0, 99.0)),
            PointerTarget::Handle(ResizeHandle::NorthWest)
        );
        assert_eq!(
            hit_test(&rect, PointerPos::new(200.0, 300.0)),
            PointerTarget::Handle(ResizeHandle::South)
        );
        assert_eq!(
            hit_test(&rect, PointerPos::new(300.0, 200.0)),
            PointerTarget::Handle(ResizeHandle::East)
        );
        assert_eq!(hit_test(&rect, PointerPos::new(180.0, 170.0)), PointerTarget::Body);
        assert_eq!(hit_test(&rect, PointerPos::new(10.0, 10.0)), PointerTarget::Outside);
    }
}
