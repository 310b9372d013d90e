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
//! Boundary-crossing reflection stage

use crate::bounds::{Region, RegionState};
use crate::error::EvolutionError;
use crate::record::ParticleRecord;
use crate::stage::EvolutionStage;

/// Stage reflecting the velocity when the particle crosses its region's boundary
///
/// Each invoke classifies the particle's position. Reflection fires only on a
/// crossing (previously inside, now outside), not while the particle merely
/// sits outside, so a particle spawned outside the region drifts in
/// unaffected. The reflected velocity preserves the speed magnitude:
/// `velocity = |velocity| * reflect(normalize(velocity), normal)`.
///
/// The previous classification is per-particle state, so each particle owns
/// its own `BounceStage`; sharing one across particles would conflate their
/// crossing histories.
///
/// # Examples
///
/// ```
/// use glam::vec2;
/// use particle_engine::bounds::{Aabb, RectRegion, Region};
/// use particle_engine::stages::BounceStage;
///
/// // Stay inside the box...
/// let contain = BounceStage::new(RectRegion::new(Aabb::from_corners(
///     vec2(0.0, 0.0),
///     vec2(800.0, 600.0),
/// )));
/// // ...or stay out of a circular obstacle, with the same stage type.
/// use particle_engine::bounds::CircleRegion;
/// let avoid = BounceStage::new(CircleRegion::new(vec2(400.0, 300.0), 50.0).inverted());
/// ```
pub struct BounceStage<R: Region> {
    region: R,
    previous: Option<RegionState>,
}

impl<R: Region> BounceStage<R> {
    /// Create a bounce stage over the given region
    pub fn new(region: R) -> Self {
        BounceStage {
            region,
            previous: None,
        }
    }
}

impl<R: Region + Send> EvolutionStage for BounceStage<R> {
    fn invoke(&mut self, record: &mut ParticleRecord) -> Result<(), EvolutionError> {
        let classification = self.region.classify(record.position);

        // A crossing, not merely "currently outside": the first invoke only
        // records the initial classification.
        if self.previous == Some(RegionState::Inside)
            && classification.state == RegionState::Outside
        {
            let speed = record.speed();
            if speed > 0.0 {
                let direction = (record.velocity / speed).reflect(classification.normal);
                record.velocity = direction * speed;
            }
        }

        self.previous = Some(classification.state);
        Ok(())
    }
}
