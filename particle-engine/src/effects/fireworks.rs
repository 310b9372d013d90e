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
//! Fireworks effect
//!
//! Each team of particles shares one lifetime controller, so the whole team
//! ages in lockstep: born white at the team origin with a uniformly random
//! launch direction, red and accelerating as children, green as adults, blue
//! and decelerating as elders, then magenta at death, where the team
//! respawns from a freshly randomized origin and the cycle repeats forever.

use std::f32::consts::TAU;
use std::sync::{Arc, Mutex};

use glam::{vec2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bounds::Aabb;
use crate::engine::Engine;
use crate::lifetime::{Afterlife, AgeSegments, LifetimeController};
use crate::particle::Particle;
use crate::record::{ParticleRecord, Rgba};
use crate::stage::{share, StageHandle};

/// Configuration for one fireworks team
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireworkConfig {
    /// Frames in a full life cycle
    pub lifetime: i32,
    /// Initial launch origin
    pub origin: Vec2,
    /// Launch speed in units per frame
    pub speed: f32,
    /// Per-tick velocity multiplier while a child (children are restless)
    pub grow: f32,
    /// Per-tick velocity multiplier while an elder (elders slow down)
    pub fade: f32,
    /// Age fraction ending the child phase
    pub child_end: f32,
    /// Age fraction ending the adult phase
    pub adult_end: f32,
    /// Area the team relights from after dying
    pub respawn_area: Aabb,
}

impl Default for FireworkConfig {
    fn default() -> Self {
        FireworkConfig {
            lifetime: 400,
            origin: vec2(400.0, 300.0),
            speed: 0.5,
            grow: 1.0003,
            fade: 0.9997,
            child_end: 0.3,
            adult_end: 0.6,
            respawn_area: Aabb::from_corners(vec2(100.0, 100.0), vec2(700.0, 500.0)),
        }
    }
}

/// Build a team's lifetime controller
///
/// The controller owns the given RNG stream, so teams sharing an engine stay
/// statistically independent. The death action relocates the team origin the
/// birth action launches from; both closures share it behind a mutex.
pub fn firework_controller(config: FireworkConfig, mut rng: StdRng) -> LifetimeController {
    let origin = Arc::new(Mutex::new(config.origin));
    let birth_origin = Arc::clone(&origin);
    let mut death_rng = StdRng::seed_from_u64(rng.gen());
    let FireworkConfig {
        lifetime,
        speed,
        grow,
        fade,
        child_end,
        adult_end,
        respawn_area,
        ..
    } = config;

    LifetimeController::new(lifetime)
        .on_birth(move |record| {
            let angle = rng.gen_range(0.0..TAU);
            record.position = *birth_origin.lock().expect("fireworks origin mutex poisoned");
            record.velocity = vec2(angle.cos(), angle.sin()) * speed;
            record.color = Rgba::WHITE;
        })
        .with_life(
            AgeSegments::builder()
                .until(child_end, move |record, _age| {
                    record.color = Rgba::RED;
                    record.velocity *= grow;
                })
                .until(adult_end, |record, _age| {
                    record.color = Rgba::GREEN;
                })
                .until(1.0, move |record, _age| {
                    record.color = Rgba::BLUE;
                    record.velocity *= fade;
                })
                .build(),
        )
        .on_death(move |record| {
            record.color = Rgba::MAGENTA;
            record.velocity = Vec2::ZERO;
            let next = vec2(
                death_rng.gen_range(respawn_area.min.x..respawn_area.max.x),
                death_rng.gen_range(respawn_area.min.y..respawn_area.max.y),
            );
            *origin.lock().expect("fireworks origin mutex poisoned") = next;
            Afterlife::Respawn
        })
}

/// Build the four-team fireworks engine
///
/// One main team at `center` plus three offset teams with their own growth,
/// decay, and phase-boundary constants, `team_size` particles each. Every
/// team's controller is shared by its particles and registered with the
/// engine for its once-per-frame tick.
pub fn fireworks_engine(lifetime: i32, center: Vec2, speed: f32, team_size: usize) -> Engine {
    let mut engine = Engine::new();
    let base = FireworkConfig {
        lifetime,
        origin: center,
        speed,
        ..Default::default()
    };
    let teams = [
        base,
        FireworkConfig { fade: 0.9998, ..base },
        FireworkConfig {
            origin: center + vec2(1.0, 1.0),
            grow: 1.0006,
            child_end: 0.2,
            adult_end: 0.24,
            ..base
        },
        FireworkConfig {
            origin: center - vec2(1.0, 1.0),
            speed: speed * 1.1,
            grow: 1.003,
            fade: 0.9992,
            child_end: 0.04,
            adult_end: 0.5,
            ..base
        },
    ];

    for config in teams {
        let controller = firework_controller(config, engine.fork_rng());
        let shared = share(controller);
        engine.register_shared_stage(&shared);
        for _ in 0..team_size {
            engine.spawn(Particle::from_stage(
                ParticleRecord::default(),
                StageHandle::shared(&shared),
            ));
        }
    }
    engine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{EvolutionStage, TickScope};

    #[test]
    fn test_birth_launches_from_origin_at_speed() {
        let config = FireworkConfig {
            lifetime: 10,
            origin: vec2(50.0, 60.0),
            speed: 2.0,
            ..Default::default()
        };
        let mut controller = firework_controller(config, StdRng::seed_from_u64(3));
        let mut record = ParticleRecord::default();

        controller.invoke(&mut record).unwrap();
        assert_eq!(record.position, vec2(50.0, 60.0));
        assert!((record.speed() - 2.0).abs() < 1e-4);
        assert_eq!(record.color, Rgba::WHITE);
    }

    #[test]
    fn test_phase_colors_over_life() {
        let config = FireworkConfig {
            lifetime: 10,
            ..Default::default()
        };
        let mut controller = firework_controller(config, StdRng::seed_from_u64(3));
        let mut record = ParticleRecord::default();

        controller.invoke(&mut record).unwrap(); // birth
        for _ in 0..2 {
            controller.tick(TickScope::Global);
        }
        controller.invoke(&mut record).unwrap(); // age 0.2: child
        assert_eq!(record.color, Rgba::RED);

        for _ in 0..3 {
            controller.tick(TickScope::Global);
        }
        controller.invoke(&mut record).unwrap(); // age 0.5: adult
        assert_eq!(record.color, Rgba::GREEN);

        for _ in 0..4 {
            controller.tick(TickScope::Global);
        }
        controller.invoke(&mut record).unwrap(); // age 0.9: elder
        assert_eq!(record.color, Rgba::BLUE);
    }

    #[test]
    fn test_death_recycles_team() {
        let config = FireworkConfig {
            lifetime: 3,
            origin: vec2(0.0, 0.0),
            ..Default::default()
        };
        let mut controller = firework_controller(config, StdRng::seed_from_u64(9));
        let mut record = ParticleRecord::default();

        for _ in 0..3 {
            controller.invoke(&mut record).unwrap();
            controller.tick(TickScope::Global);
        }
        controller.invoke(&mut record).unwrap(); // death
        assert_eq!(record.color, Rgba::MAGENTA);
        assert_eq!(record.velocity, Vec2::ZERO);
        assert_eq!(controller.remaining(), controller.total_lifetime());

        controller.invoke(&mut record).unwrap(); // reborn at the new origin
        assert_eq!(record.color, Rgba::WHITE);
        let area = FireworkConfig::default().respawn_area;
        assert!(area.contains(record.position));
    }

    #[test]
    fn test_fireworks_engine_team_layout() {
        let engine = fireworks_engine(100, vec2(400.0, 300.0), 0.5, 25);
        assert_eq!(engine.particle_count(), 4 * 25);
        assert_eq!(engine.shared_stage_count(), 4);
    }
}
