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
//! Engine-level properties
//!
//! Pure Euler integration, boundary reflection through the whole step path,
//! batch drawing, error handling, and sequential/parallel equivalence.

use glam::{vec2, Vec2};
use particle_engine::bounds::{Aabb, RectRegion};
use particle_engine::engine::CollectSink;
use particle_engine::stages::{BounceStage, GravityStage};
use particle_engine::{
    AgeSegments, Engine, EvolutionError, EvolutionPipeline, EvolutionStage, LifetimeController,
    Particle, ParticleRecord, Rgba, StageHandle, TickScope,
};

#[test]
fn pure_integration_is_linear() {
    // With no stages, position after N steps is exactly initial + N * velocity.
    let initial = vec2(3.0, -2.0);
    let velocity = vec2(0.25, 1.5);
    let mut engine = Engine::with_seed(1);
    engine.spawn(Particle::new(
        ParticleRecord::new(initial, velocity, Rgba::WHITE),
        EvolutionPipeline::new(),
    ));

    let steps = 7;
    for _ in 0..steps {
        engine.step().unwrap();
    }
    let record = engine.particle(0).unwrap().record();
    assert_eq!(record.position, initial + velocity * steps as f32);
    assert_eq!(record.velocity, velocity);
}

#[test]
fn crossing_right_edge_reflects_velocity() {
    let bounds = Aabb::from_corners(vec2(0.0, 0.0), vec2(10.0, 10.0));
    let mut engine = Engine::with_seed(1);
    engine.spawn(Particle::from_stage(
        ParticleRecord::new(vec2(8.5, 5.0), vec2(1.0, 0.0), Rgba::WHITE),
        StageHandle::owned(BounceStage::new(RectRegion::new(bounds))),
    ));

    engine.step().unwrap(); // x = 9.5, inside
    assert_eq!(engine.particle(0).unwrap().record().velocity, vec2(1.0, 0.0));

    engine.step().unwrap(); // x = 10.5, crossed: reflect
    let record = engine.particle(0).unwrap().record();
    assert_eq!(record.velocity, vec2(-1.0, 0.0));
    assert!((record.speed() - 1.0).abs() < 1e-5);

    engine.step().unwrap(); // heading back in
    assert_eq!(engine.particle(0).unwrap().record().position, vec2(9.5, 5.0));
}

#[test]
fn draw_submits_one_batch_with_every_particle() {
    let mut engine = Engine::with_seed(1);
    let colors = [Rgba::RED, Rgba::GREEN, Rgba::BLUE];
    for (i, color) in colors.iter().enumerate() {
        engine.spawn(Particle::new(
            ParticleRecord::new(vec2(i as f32, 0.0), Vec2::ZERO, *color),
            EvolutionPipeline::new(),
        ));
    }

    let mut sink = CollectSink::default();
    engine.draw(&mut sink);

    assert_eq!(sink.submissions, 1);
    assert_eq!(sink.points.len(), 3);
    for (i, color) in colors.iter().enumerate() {
        assert_eq!(sink.points[i].position, vec2(i as f32, 0.0));
        assert_eq!(sink.points[i].color, *color);
    }
}

#[test]
fn failing_particle_aborts_frame_and_caller_recovers() {
    let mut engine = Engine::with_seed(1);
    engine.warn_on_failure = false;

    engine.spawn(Particle::new(
        ParticleRecord::new(Vec2::ZERO, vec2(1.0, 0.0), Rgba::WHITE),
        EvolutionPipeline::new(),
    ));

    // Controller whose table only covers [0, 0.5]: fails at age 0.6.
    let mut broken = LifetimeController::new(10)
        .with_life(AgeSegments::builder().until(0.5, |_, _| {}).build());
    for _ in 0..6 {
        broken.tick(TickScope::Global);
    }
    engine.spawn(Particle::from_stage(
        ParticleRecord::default(),
        StageHandle::owned(broken),
    ));

    let error = engine.step().unwrap_err();
    assert!(matches!(
        error,
        EvolutionError::IncompleteLifetimeSpecification { .. }
    ));
    // The healthy particle stepped before the frame aborted.
    assert_eq!(engine.particle(0).unwrap().record().position, vec2(1.0, 0.0));

    // Caller decides: drop the misconfigured particle and carry on.
    engine.remove(1);
    engine.step().unwrap();
    assert_eq!(engine.particle(0).unwrap().record().position, vec2(2.0, 0.0));
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_step_matches_sequential() {
    let bounds = Aabb::from_corners(vec2(0.0, 0.0), vec2(50.0, 50.0));

    let build = || {
        let mut engine = Engine::with_seed(77);
        for i in 0..64 {
            let angle = i as f32 * 0.1;
            let record = ParticleRecord::new(
                vec2(25.0, 25.0),
                vec2(angle.cos(), angle.sin()) * 1.5,
                Rgba::WHITE,
            );
            let mut pipeline = EvolutionPipeline::new();
            pipeline.add_stage(StageHandle::owned(GravityStage::new(vec2(0.0, -0.01))));
            pipeline.add_stage(StageHandle::owned(BounceStage::new(RectRegion::new(
                bounds,
            ))));
            engine.spawn(Particle::new(record, pipeline));
        }
        engine
    };

    let mut sequential = build();
    let mut parallel = build();
    for _ in 0..100 {
        sequential.step().unwrap();
        parallel.step_parallel().unwrap();
    }

    for i in 0..64 {
        assert_eq!(
            sequential.particle(i).unwrap().record(),
            parallel.particle(i).unwrap().record(),
            "particle {i} diverged between sequential and parallel stepping"
        );
    }
}

#[test]
fn shared_controller_drives_team_colors_in_lockstep() {
    // One controller, three particles: every record shows the same phase
    // color after any number of frames.
    let controller = particle_engine::share(
        LifetimeController::new(9)
            .on_birth(|record| record.color = Rgba::WHITE)
            .with_life(
                AgeSegments::builder()
                    .until(0.5, |record, _| record.color = Rgba::RED)
                    .until(1.0, |record, _| record.color = Rgba::BLUE)
                    .build(),
            ),
    );

    let mut engine = Engine::with_seed(2);
    engine.register_shared_stage(&controller);
    for _ in 0..3 {
        engine.spawn(Particle::from_stage(
            ParticleRecord::default(),
            StageHandle::shared(&controller),
        ));
    }

    for _ in 0..5 {
        engine.step().unwrap();
        let first = engine.particle(0).unwrap().record().color;
        for i in 1..3 {
            assert_eq!(engine.particle(i).unwrap().record().color, first);
        }
    }
}
