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
//! Bounded effect: particles bouncing inside a rectangle

use std::f32::consts::TAU;

use glam::{vec2, Vec2};

use crate::bounds::{Aabb, RectRegion};
use crate::engine::Engine;
use crate::particle::Particle;
use crate::record::{ParticleRecord, Rgba};
use crate::stage::StageHandle;
use crate::stages::BounceStage;

/// Build an engine of `count` white particles bouncing inside `bounds`
///
/// All particles launch from `origin` with uniformly random directions at the
/// same speed, a circular burst. Each particle owns its own bounce stage:
/// crossing state is per-particle and must not be shared.
pub fn bounded_engine(count: usize, origin: Vec2, speed: f32, bounds: Aabb) -> Engine {
    let mut engine = Engine::new();
    for _ in 0..count {
        let angle = engine.random_range(0.0, TAU);
        let record = ParticleRecord::new(
            origin,
            vec2(angle.cos(), angle.sin()) * speed,
            Rgba::WHITE,
        );
        let stage = StageHandle::owned(BounceStage::new(RectRegion::new(bounds)));
        engine.spawn(Particle::from_stage(record, stage));
    }
    engine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CollectSink;

    #[test]
    fn test_bounded_engine_layout() {
        let bounds = Aabb::from_corners(vec2(0.0, 0.0), vec2(800.0, 600.0));
        let mut engine = bounded_engine(50, vec2(400.0, 300.0), 1.0, bounds);
        assert_eq!(engine.particle_count(), 50);

        for particle in (0..50).filter_map(|i| engine.particle(i)) {
            assert_eq!(particle.record().position, vec2(400.0, 300.0));
            assert!((particle.record().speed() - 1.0).abs() < 1e-4);
        }

        // A few frames keep everyone stepping without error.
        for _ in 0..10 {
            engine.step().unwrap();
        }
        let mut sink = CollectSink::default();
        engine.draw(&mut sink);
        assert_eq!(sink.points.len(), 50);
    }
}
