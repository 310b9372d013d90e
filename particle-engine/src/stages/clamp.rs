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
//! Position-clamping stage

use crate::bounds::Aabb;
use crate::error::EvolutionError;
use crate::record::ParticleRecord;
use crate::stage::EvolutionStage;

/// Stateless stage clamping the position into an axis-aligned box
///
/// Unlike [`BounceStage`](crate::stages::BounceStage) this does not touch the
/// velocity; a particle pushing against the boundary slides along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampStage {
    aabb: Aabb,
}

impl ClampStage {
    /// Create a clamp stage over the given box
    pub fn new(aabb: Aabb) -> Self {
        ClampStage { aabb }
    }
}

impl EvolutionStage for ClampStage {
    fn invoke(&mut self, record: &mut ParticleRecord) -> Result<(), EvolutionError> {
        record.position = record.position.clamp(self.aabb.min, self.aabb.max);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Rgba;
    use glam::{vec2, Vec2};

    #[test]
    fn test_clamp_pulls_into_box() {
        let mut stage = ClampStage::new(Aabb::from_corners(vec2(0.0, 0.0), vec2(10.0, 10.0)));
        let mut record = ParticleRecord::new(vec2(15.0, -3.0), Vec2::ZERO, Rgba::WHITE);
        stage.invoke(&mut record).unwrap();
        assert_eq!(record.position, vec2(10.0, 0.0));
    }

    #[test]
    fn test_clamp_leaves_interior_alone() {
        let mut stage = ClampStage::new(Aabb::from_corners(vec2(0.0, 0.0), vec2(10.0, 10.0)));
        let mut record = ParticleRecord::new(vec2(4.0, 6.0), Vec2::ZERO, Rgba::WHITE);
        stage.invoke(&mut record).unwrap();
        assert_eq!(record.position, vec2(4.0, 6.0));
    }
}
