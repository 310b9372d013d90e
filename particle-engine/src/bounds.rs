// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Geometric region oracles
//!
//! A [`Region`] classifies a point as inside or outside and reports the
//! boundary normal used for reflection. Rectangles use a Cohen–Sutherland
//! style 4-bit outcode; circles compare distance against radius. The
//! [`InverseRegion`] adapter flips any oracle so "stay outside this obstacle"
//! and "stay inside this area" are expressed with the same stage types.

use crate::float_cmp::{approx_ge, approx_le};
use glam::{vec2, Vec2};

/// Which side of a region's boundary a point is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    /// The point is inside the region (boundary included)
    Inside,
    /// The point is outside the region
    Outside,
}

impl RegionState {
    /// The opposite classification
    pub fn opposite(self) -> Self {
        match self {
            RegionState::Inside => RegionState::Outside,
            RegionState::Outside => RegionState::Inside,
        }
    }
}

/// Result of classifying a point against a region
///
/// The normal always points toward the region's interior, so a velocity
/// reflected about it is pushed back inside. For interior points of a
/// rectangle the normal is zero (there is no meaningful boundary direction).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Inside/outside state of the queried point
    pub state: RegionState,
    /// Unit normal pointing toward the region's interior
    pub normal: Vec2,
}

impl Classification {
    /// An interior classification with no boundary direction
    pub fn inside() -> Self {
        Classification {
            state: RegionState::Inside,
            normal: Vec2::ZERO,
        }
    }

    /// An exterior classification with the given inward normal
    pub fn outside(normal: Vec2) -> Self {
        Classification {
            state: RegionState::Outside,
            normal,
        }
    }

    /// Swap inside/outside and negate the normal
    pub fn opposite(self) -> Self {
        Classification {
            state: self.state.opposite(),
            normal: -self.normal,
        }
    }
}

/// Oracle classifying points against a bounded region of the plane
pub trait Region {
    /// Classify `point`, returning its state and the inward boundary normal
    fn classify(&self, point: Vec2) -> Classification;

    /// Wrap this region so inside and outside swap
    ///
    /// Turns a containment region into an obstacle: the wrapped oracle
    /// reports [`RegionState::Outside`] for points the original contained,
    /// with the normal negated to push away from the obstacle.
    fn inverted(self) -> InverseRegion<Self>
    where
        Self: Sized,
    {
        InverseRegion { inner: self }
    }
}

// Cohen-Sutherland outcode bits.
const NORTH: u8 = 0b1000;
const SOUTH: u8 = 0b0100;
const EAST: u8 = 0b0010;
const WEST: u8 = 0b0001;

/// Axis-aligned bounding box with `min`/`max` corners
///
/// # Examples
///
/// ```
/// use glam::vec2;
/// use particle_engine::bounds::Aabb;
///
/// let aabb = Aabb::from_corners(vec2(0.0, 0.0), vec2(8.0, 6.0));
/// assert_eq!(aabb.center(), vec2(4.0, 3.0));
/// assert!(aabb.contains(vec2(8.0, 6.0))); // boundary belongs to the box
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Bottom-left corner
    pub min: Vec2,
    /// Top-right corner
    pub max: Vec2,
}

impl Aabb {
    /// Create a box from its bottom-left and top-right corners
    ///
    /// # Panics
    ///
    /// Panics if the corners are not finite or `min` exceeds `max` on
    /// either axis.
    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        assert!(
            min.is_finite() && max.is_finite(),
            "Aabb corners must be finite"
        );
        assert!(
            min.x <= max.x && min.y <= max.y,
            "Aabb min corner must not exceed max corner"
        );
        Aabb { min, max }
    }

    /// Create a box from its center point and full size
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Aabb::from_corners(center - size / 2.0, center + size / 2.0)
    }

    /// Center point of the box
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Horizontal extent
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Vertical extent
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Whether the point lies inside the box (boundary included, tolerant)
    pub fn contains(&self, point: Vec2) -> bool {
        approx_ge(point.x, self.min.x)
            && approx_le(point.x, self.max.x)
            && approx_ge(point.y, self.min.y)
            && approx_le(point.y, self.max.y)
    }

    // 4-bit region code for a point relative to the box. Zero means inside.
    fn outcode(&self, point: Vec2) -> u8 {
        let mut code = 0;
        if !approx_le(point.y, self.max.y) {
            code |= NORTH;
        }
        if !approx_ge(point.y, self.min.y) {
            code |= SOUTH;
        }
        if !approx_le(point.x, self.max.x) {
            code |= EAST;
        }
        if !approx_ge(point.x, self.min.x) {
            code |= WEST;
        }
        code
    }
}

/// Rectangular containment region
///
/// Side normals point straight toward the interior; for the four corner
/// sectors the normal is the unit direction from the box corner toward the
/// center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectRegion {
    aabb: Aabb,
}

impl RectRegion {
    /// Create a rectangular region over the given box
    pub fn new(aabb: Aabb) -> Self {
        RectRegion { aabb }
    }

    /// The underlying box
    pub fn aabb(&self) -> Aabb {
        self.aabb
    }

    fn corner_normal(&self, corner: Vec2) -> Vec2 {
        (self.aabb.center() - corner).normalize_or_zero()
    }
}

impl Region for RectRegion {
    fn classify(&self, point: Vec2) -> Classification {
        let aabb = &self.aabb;
        match self.aabb.outcode(point) {
            0 => Classification::inside(),
            code if code == NORTH => Classification::outside(vec2(0.0, -1.0)),
            code if code == SOUTH => Classification::outside(vec2(0.0, 1.0)),
            code if code == EAST => Classification::outside(vec2(-1.0, 0.0)),
            code if code == WEST => Classification::outside(vec2(1.0, 0.0)),
            code if code == NORTH | EAST => {
                Classification::outside(self.corner_normal(vec2(aabb.max.x, aabb.max.y)))
            }
            code if code == NORTH | WEST => {
                Classification::outside(self.corner_normal(vec2(aabb.min.x, aabb.max.y)))
            }
            code if code == SOUTH | EAST => {
                Classification::outside(self.corner_normal(vec2(aabb.max.x, aabb.min.y)))
            }
            code if code == SOUTH | WEST => {
                Classification::outside(self.corner_normal(vec2(aabb.min.x, aabb.min.y)))
            }
            code => unreachable!("contradictory outcode {code:#06b}"),
        }
    }
}

/// Circular containment region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleRegion {
    center: Vec2,
    radius: f32,
}

impl CircleRegion {
    /// Create a circle with the given center and radius
    ///
    /// # Panics
    ///
    /// Panics if the radius is non-positive or not finite.
    pub fn new(center: Vec2, radius: f32) -> Self {
        assert!(
            radius > 0.0 && radius.is_finite(),
            "Circle radius must be positive and finite"
        );
        CircleRegion { center, radius }
    }
}

impl Region for CircleRegion {
    fn classify(&self, point: Vec2) -> Classification {
        // Points within tolerance of the rim count as inside, so float drift
        // along the boundary cannot flip the classification back and forth.
        let distance = (point - self.center).length();
        let normal = (self.center - point).normalize_or_zero();
        if approx_le(distance, self.radius) {
            Classification {
                state: RegionState::Inside,
                normal,
            }
        } else {
            Classification::outside(normal)
        }
    }
}

/// Adapter swapping a region's inside and outside
///
/// Built with [`Region::inverted`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseRegion<R> {
    inner: R,
}

impl<R: Region> Region for InverseRegion<R> {
    fn classify(&self, point: Vec2) -> Classification {
        self.inner.classify(point).opposite()
    }
}
