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
//! Per-particle mutable state
//!
//! A [`ParticleRecord`] is the unit of data every evolution stage mutates in
//! place: position, velocity, and color. Lifetime counters are deliberately
//! not part of the record: they belong to the lifetime controller stage so
//! that many particles can age through one shared countdown.

use glam::Vec2;

/// 8-bit RGBA color
///
/// # Examples
///
/// ```
/// use particle_engine::Rgba;
///
/// let color = Rgba::new(255, 128, 0);
/// assert_eq!(color.a, 255);
/// assert_eq!(Rgba::WHITE, Rgba::new(255, 255, 255));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Rgba {
    /// Opaque white
    pub const WHITE: Rgba = Rgba::new(255, 255, 255);
    /// Opaque black
    pub const BLACK: Rgba = Rgba::new(0, 0, 0);
    /// Opaque red
    pub const RED: Rgba = Rgba::new(255, 0, 0);
    /// Opaque green
    pub const GREEN: Rgba = Rgba::new(0, 255, 0);
    /// Opaque blue
    pub const BLUE: Rgba = Rgba::new(0, 0, 255);
    /// Opaque magenta
    pub const MAGENTA: Rgba = Rgba::new(255, 0, 255);

    /// Create an opaque color from its red, green and blue channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }

    /// Create a color with an explicit alpha channel
    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

/// Mutable state of one particle
///
/// Owned exclusively by one [`Particle`](crate::Particle); evolution stages
/// receive it by mutable reference and rewrite it in place every tick.
///
/// # Examples
///
/// ```
/// use glam::vec2;
/// use particle_engine::{ParticleRecord, Rgba};
///
/// let record = ParticleRecord::new(vec2(1.0, 2.0), vec2(3.0, 4.0), Rgba::RED);
/// assert_eq!(record.speed(), 5.0); // 3-4-5 triangle
/// assert!(record.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRecord {
    /// Position in world coordinates
    pub position: Vec2,
    /// Velocity in world units per frame
    pub velocity: Vec2,
    /// Current draw color
    pub color: Rgba,
}

impl ParticleRecord {
    /// Create a record with the given position, velocity, and color
    pub fn new(position: Vec2, velocity: Vec2, color: Rgba) -> Self {
        ParticleRecord {
            position,
            velocity,
            color,
        }
    }

    /// Speed magnitude (length of the velocity vector)
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Check that position and velocity are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

impl Default for ParticleRecord {
    fn default() -> Self {
        ParticleRecord::new(Vec2::ZERO, Vec2::ZERO, Rgba::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn test_record_creation() {
        let record = ParticleRecord::new(vec2(1.0, 2.0), vec2(0.5, -0.5), Rgba::GREEN);
        assert_eq!(record.position, vec2(1.0, 2.0));
        assert_eq!(record.velocity, vec2(0.5, -0.5));
        assert_eq!(record.color, Rgba::GREEN);
    }

    #[test]
    fn test_record_speed() {
        let record = ParticleRecord::new(Vec2::ZERO, vec2(3.0, 4.0), Rgba::WHITE);
        assert_eq!(record.speed(), 5.0);
    }

    #[test]
    fn test_record_validation() {
        let valid = ParticleRecord::default();
        assert!(valid.is_valid());

        let nan = ParticleRecord::new(vec2(f32::NAN, 0.0), Vec2::ZERO, Rgba::WHITE);
        assert!(!nan.is_valid());

        let infinite = ParticleRecord::new(Vec2::ZERO, vec2(f32::INFINITY, 0.0), Rgba::WHITE);
        assert!(!infinite.is_valid());
    }

    #[test]
    fn test_record_default() {
        let record = ParticleRecord::default();
        assert_eq!(record.position, Vec2::ZERO);
        assert_eq!(record.velocity, Vec2::ZERO);
        assert_eq!(record.color, Rgba::WHITE);
    }

    #[test]
    fn test_color_constants() {
        assert_eq!(Rgba::MAGENTA, Rgba::with_alpha(255, 0, 255, 255));
        assert_eq!(Rgba::default(), Rgba::WHITE);
    }
}
