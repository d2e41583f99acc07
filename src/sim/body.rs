//! Rigid bodies
//!
//! Every body is an axis-aligned rectangle described by its center and size.
//! Screen convention: +x right, +y down, so negative y velocity moves up.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identifier of a body inside one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub(crate) u32);

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Parameters for `Engine::create_body`
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub label: String,
    pub position: Vec2,
    pub size: Vec2,
    /// Static bodies ignore gravity and integration; they only move when
    /// translated or repositioned
    pub is_static: bool,
}

impl BodyDesc {
    pub fn rectangle(label: impl Into<String>, position: Vec2, size: Vec2) -> Self {
        Self {
            label: label.into(),
            position,
            size,
            is_static: false,
        }
    }

    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A simulated rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyHandle,
    pub label: String,
    /// Center position
    pub position: Vec2,
    /// Displacement per base step (see `consts::BASE_DELTA_MS`)
    pub velocity: Vec2,
    pub size: Vec2,
    pub is_static: bool,
}

impl Body {
    pub(crate) fn from_desc(id: BodyHandle, desc: BodyDesc) -> Self {
        Self {
            id,
            label: desc.label,
            position: desc.position,
            velocity: Vec2::ZERO,
            size: desc.size,
            is_static: desc.is_static,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_center() {
        let b = Bounds::from_center(Vec2::new(200.0, 100.0), Vec2::new(50.0, 300.0));
        assert_eq!(b.min, Vec2::new(175.0, -50.0));
        assert_eq!(b.max, Vec2::new(225.0, 250.0));
        assert_eq!(b.width(), 50.0);
        assert_eq!(b.height(), 300.0);
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Bounds::from_center(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Bounds::from_center(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let inside = Bounds::from_center(Vec2::new(9.0, 3.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }
}
