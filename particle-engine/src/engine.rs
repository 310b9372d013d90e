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
//! Engine: frame-driven particle collection
//!
//! The engine owns the particles, the shared lifetime controllers, and one
//! pseudo-random source per instance (per-particle seeds correlate badly at
//! high particle counts). An external frame loop calls [`Engine::step`] then
//! [`Engine::draw`] once per rendered frame; nothing here suspends or blocks.
//!
//! # Shared-stage ticking
//!
//! One frame gives every distinct registered shared stage exactly one
//! [`TickScope::Global`] tick, after all particles have been stepped, so
//! every particle reads the pre-tick age for that frame, no matter how many
//! of them reference the same controller.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::EvolutionError;
use crate::particle::{Particle, PointVertex};
use crate::record::Rgba;
use crate::stage::{lock_shared, SharedStage, TickScope};

/// Sink receiving the frame's draw batch
///
/// Implementors render an ordered batch of points. Submission is assumed to
/// always succeed; the engine makes exactly one call per frame to keep
/// per-particle draw-call overhead off the hot path.
pub trait DrawSink {
    /// Render a batch of points
    fn submit(&mut self, batch: &[PointVertex]);
}

/// Sink collecting every submitted vertex, for tests and headless demos
#[derive(Debug, Default)]
pub struct CollectSink {
    /// All vertices received so far
    pub points: Vec<PointVertex>,
    /// Number of `submit` calls received
    pub submissions: usize,
}

impl DrawSink for CollectSink {
    fn submit(&mut self, batch: &[PointVertex]) {
        self.submissions += 1;
        self.points.extend_from_slice(batch);
    }
}

/// Owner of a particle collection, advanced once per rendered frame
///
/// # Examples
///
/// ```
/// use glam::vec2;
/// use particle_engine::engine::CollectSink;
/// use particle_engine::{Engine, Particle, ParticleRecord, Rgba};
///
/// let mut engine = Engine::with_seed(42);
/// let record = ParticleRecord::new(vec2(0.0, 0.0), vec2(1.0, 0.0), Rgba::WHITE);
/// engine.spawn(Particle::new(record, Default::default()));
///
/// engine.step().unwrap();
/// let mut sink = CollectSink::default();
/// engine.draw(&mut sink);
/// assert_eq!(sink.points.len(), 1);
/// assert_eq!(sink.points[0].position, vec2(1.0, 0.0));
/// ```
pub struct Engine {
    particles: Vec<Particle>,
    shared_stages: Vec<SharedStage>,
    rng: StdRng,
    scratch: Vec<PointVertex>,
    /// Whether to log a warning when a particle's update fails
    pub warn_on_failure: bool,
}

impl Engine {
    /// Create an engine seeded from OS entropy
    pub fn new() -> Self {
        Engine::from_rng(StdRng::from_entropy())
    }

    /// Create an engine with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Engine::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        debug!("engine created");
        Engine {
            particles: Vec::new(),
            shared_stages: Vec::new(),
            rng,
            scratch: Vec::new(),
            warn_on_failure: true,
        }
    }

    /// Add a particle, returning its index
    pub fn spawn(&mut self, particle: Particle) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    /// Remove and return the particle at `index`
    ///
    /// Swap-removes: the last particle takes the vacated slot. Point batches
    /// are order-insensitive, so draw output is unaffected.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Particle {
        self.particles.swap_remove(index)
    }

    /// Number of particles in the collection
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// The particle at `index`, if any
    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Mutable access to the particle at `index`, if any
    pub fn particle_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    /// Register a shared stage for its once-per-frame global tick
    ///
    /// Registering the same handle (same allocation) again is a no-op, so a
    /// controller referenced by many particles still ages once per frame.
    pub fn register_shared_stage(&mut self, stage: &SharedStage) {
        if self.shared_stages.iter().any(|s| Arc::ptr_eq(s, stage)) {
            return;
        }
        self.shared_stages.push(Arc::clone(stage));
    }

    /// Number of distinct registered shared stages
    pub fn shared_stage_count(&self) -> usize {
        self.shared_stages.len()
    }

    /// Uniform random real in `[lo, hi)` from the engine's random source
    pub fn random_range(&mut self, lo: f32, hi: f32) -> f32 {
        self.rng.gen_range(lo..hi)
    }

    /// Uniform random opaque color from the engine's random source
    pub fn random_color(&mut self) -> Rgba {
        Rgba::new(self.rng.gen(), self.rng.gen(), self.rng.gen())
    }

    /// Derive an independent random stream from the engine's source
    ///
    /// Used to hand controllers and effects their own generator while keeping
    /// one seed per engine instance.
    pub fn fork_rng(&mut self) -> StdRng {
        StdRng::seed_from_u64(self.rng.gen())
    }

    /// Advance the whole collection one frame
    ///
    /// Steps every particle (integration, pipeline invoke, per-particle tick,
    /// global tick for privately owned stages), then gives each distinct
    /// shared stage its single global tick. On a configuration error the
    /// frame aborts at the offending particle; earlier particles keep their
    /// updates, and the caller decides whether to keep or [`remove`](Self::remove)
    /// the particle.
    pub fn step(&mut self) -> Result<(), EvolutionError> {
        for (index, particle) in self.particles.iter_mut().enumerate() {
            if let Err(error) = particle.step() {
                if self.warn_on_failure {
                    warn!(index, %error, "particle update aborted");
                }
                return Err(error);
            }
            particle.tick_global();
        }
        self.tick_shared();
        Ok(())
    }

    /// Parallel twin of [`step`](Self::step)
    ///
    /// Per-particle work fans out across the Rayon pool; invokes on a shared
    /// stage serialize on its mutex. The shared global tick still runs
    /// sequentially after the join, so every particle has read the frame's
    /// pre-tick state; that tick is the single designated synchronization
    /// point.
    #[cfg(feature = "parallel")]
    pub fn step_parallel(&mut self) -> Result<(), EvolutionError> {
        use rayon::prelude::*;

        let warn_on_failure = self.warn_on_failure;
        self.particles
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(index, particle)| {
                particle.step().map_err(|error| {
                    if warn_on_failure {
                        warn!(index, %error, "particle update aborted");
                    }
                    error
                })?;
                particle.tick_global();
                Ok(())
            })?;
        self.tick_shared();
        Ok(())
    }

    /// Parallel twin of [`step`](Self::step) (sequential fallback when the
    /// `parallel` feature is disabled)
    #[cfg(not(feature = "parallel"))]
    pub fn step_parallel(&mut self) -> Result<(), EvolutionError> {
        self.step()
    }

    fn tick_shared(&mut self) {
        for stage in &self.shared_stages {
            lock_shared(stage).tick(TickScope::Global);
        }
    }

    /// Collect every particle's vertices and submit them as one batch
    pub fn draw<S: DrawSink>(&mut self, sink: &mut S) {
        self.scratch.clear();
        for particle in &self.particles {
            particle.draw(&mut self.scratch);
        }
        sink.submit(&self.scratch);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
