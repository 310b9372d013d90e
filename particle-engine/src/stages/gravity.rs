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
//! Constant-acceleration stage

use glam::Vec2;

use crate::error::EvolutionError;
use crate::record::ParticleRecord;
use crate::stage::EvolutionStage;

/// Stateless stage adding a constant acceleration to the velocity each tick
///
/// With the fixed unit timestep, the acceleration is expressed directly in
/// velocity units per frame.
///
/// # Examples
///
/// ```
/// use glam::vec2;
/// use particle_engine::stages::GravityStage;
/// use particle_engine::StageHandle;
///
/// let gravity = StageHandle::owned(GravityStage::new(vec2(0.0, -0.098)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityStage {
    acceleration: Vec2,
}

impl GravityStage {
    /// Create a gravity stage with the given per-frame acceleration
    ///
    /// # Panics
    ///
    /// Panics if the acceleration is not finite.
    pub fn new(acceleration: Vec2) -> Self {
        assert!(acceleration.is_finite(), "Acceleration must be finite");
        GravityStage { acceleration }
    }

    /// The configured per-frame acceleration
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }
}

impl EvolutionStage for GravityStage {
    fn invoke(&mut self, record: &mut ParticleRecord) -> Result<(), EvolutionError> {
        record.velocity += self.acceleration;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn test_gravity_accumulates() {
        let mut stage = GravityStage::new(vec2(0.0, -0.5));
        let mut record = ParticleRecord::default();
        stage.invoke(&mut record).unwrap();
        stage.invoke(&mut record).unwrap();
        assert_eq!(record.velocity, vec2(0.0, -1.0));
    }

    #[test]
    #[should_panic(expected = "Acceleration must be finite")]
    fn test_nan_acceleration_panics() {
        GravityStage::new(vec2(f32::NAN, 0.0));
    }
}
