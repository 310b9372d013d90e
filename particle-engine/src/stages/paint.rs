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
//! Region-membership recolor stage

use crate::bounds::{Region, RegionState};
use crate::error::EvolutionError;
use crate::record::{ParticleRecord, Rgba};
use crate::stage::EvolutionStage;

/// Stateless stage recoloring the particle by where it sits
///
/// Reads the position a previous stage may just have rewritten, which makes
/// pipeline order observable: `[clamp, paint]` paints every particle as
/// inside, `[paint, clamp]` paints escapees before they are pulled back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintStage<R: Region> {
    region: R,
    inside: Rgba,
    outside: Rgba,
}

impl<R: Region> PaintStage<R> {
    /// Create a paint stage with the two membership colors
    pub fn new(region: R, inside: Rgba, outside: Rgba) -> Self {
        PaintStage {
            region,
            inside,
            outside,
        }
    }
}

impl<R: Region + Send> EvolutionStage for PaintStage<R> {
    fn invoke(&mut self, record: &mut ParticleRecord) -> Result<(), EvolutionError> {
        record.color = match self.region.classify(record.position).state {
            RegionState::Inside => self.inside,
            RegionState::Outside => self.outside,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::{Aabb, RectRegion};
    use glam::{vec2, Vec2};

    #[test]
    fn test_paint_by_membership() {
        let region = RectRegion::new(Aabb::from_corners(vec2(0.0, 0.0), vec2(10.0, 10.0)));
        let mut stage = PaintStage::new(region, Rgba::GREEN, Rgba::RED);

        let mut record = ParticleRecord::new(vec2(5.0, 5.0), Vec2::ZERO, Rgba::WHITE);
        stage.invoke(&mut record).unwrap();
        assert_eq!(record.color, Rgba::GREEN);

        record.position = vec2(20.0, 5.0);
        stage.invoke(&mut record).unwrap();
        assert_eq!(record.color, Rgba::RED);
    }
}
