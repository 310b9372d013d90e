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
//! Particle: record + pipeline + draw adapter
//!
//! A particle couples its mutable [`ParticleRecord`] with the evolution
//! pipeline that rewrites it every frame and a stateless draw adapter that
//! turns it into vertices. Motion is explicit Euler with a fixed unit
//! timestep (one frame); stages observe the post-motion state.

use glam::Vec2;

use crate::error::EvolutionError;
use crate::pipeline::EvolutionPipeline;
use crate::record::{ParticleRecord, Rgba};
use crate::stage::{StageHandle, TickScope};

/// One drawable point: position and color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointVertex {
    /// Position in world coordinates
    pub position: Vec2,
    /// Vertex color
    pub color: Rgba,
}

/// Stateless function turning a record into draw vertices
///
/// A plain `fn` pointer: adapters carry no state, so they are trivially
/// shared by value across any number of particles.
pub type DrawAdapter = fn(&ParticleRecord, &mut Vec<PointVertex>);

/// Stock adapter emitting one point at the particle's position, in its color
pub fn point_sprite(record: &ParticleRecord, out: &mut Vec<PointVertex>) {
    out.push(PointVertex {
        position: record.position,
        color: record.color,
    });
}

/// A simulated particle
///
/// # Examples
///
/// ```
/// use glam::vec2;
/// use particle_engine::{Particle, ParticleRecord, Rgba};
///
/// let record = ParticleRecord::new(vec2(0.0, 0.0), vec2(1.0, 2.0), Rgba::WHITE);
/// let mut particle = Particle::new(record, Default::default());
/// particle.step().unwrap();
/// assert_eq!(particle.record().position, vec2(1.0, 2.0));
/// ```
pub struct Particle {
    record: ParticleRecord,
    pipeline: EvolutionPipeline,
    adapter: DrawAdapter,
}

impl Particle {
    /// Create a particle with the stock point-sprite adapter
    pub fn new(record: ParticleRecord, pipeline: EvolutionPipeline) -> Self {
        Particle::with_adapter(record, pipeline, point_sprite)
    }

    /// Create a particle with a custom draw adapter
    pub fn with_adapter(
        record: ParticleRecord,
        pipeline: EvolutionPipeline,
        adapter: DrawAdapter,
    ) -> Self {
        Particle {
            record,
            pipeline,
            adapter,
        }
    }

    /// Create a particle whose pipeline holds a single stage
    pub fn from_stage(record: ParticleRecord, stage: StageHandle) -> Self {
        Particle::new(record, EvolutionPipeline::with_stage(stage))
    }

    /// The particle's current state
    pub fn record(&self) -> &ParticleRecord {
        &self.record
    }

    /// Mutable access to the particle's state
    pub fn record_mut(&mut self) -> &mut ParticleRecord {
        &mut self.record
    }

    /// The particle's evolution pipeline
    pub fn pipeline(&self) -> &EvolutionPipeline {
        &self.pipeline
    }

    /// Mutable access to the pipeline, for reconfiguration between frames
    pub fn pipeline_mut(&mut self) -> &mut EvolutionPipeline {
        &mut self.pipeline
    }

    /// Advance one frame
    ///
    /// Integrates `position += velocity` (explicit Euler, unit timestep),
    /// feeds the post-motion record through the pipeline, then runs the
    /// per-particle tick for stages this particle owns exclusively.
    pub fn step(&mut self) -> Result<(), EvolutionError> {
        self.record.position += self.record.velocity;
        self.pipeline.invoke(&mut self.record)?;
        self.pipeline.tick(TickScope::PerParticle);
        Ok(())
    }

    /// Forward the frame's global tick to privately owned stages
    ///
    /// Shared stages ignore this path; the engine ticks those directly,
    /// exactly once per frame.
    pub fn tick_global(&mut self) {
        self.pipeline.tick(TickScope::Global);
    }

    /// Emit this particle's vertices through its draw adapter
    pub fn draw(&self, out: &mut Vec<PointVertex>) {
        (self.adapter)(&self.record, out)
    }
}
