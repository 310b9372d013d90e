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
//! Evolution pipeline
//!
//! An ordered, dynamically configurable sequence of type-erased stages.
//! Insertion order is execution order, and order is semantically meaningful:
//! stage N+1 observes the record as stage N left it, because all stages share
//! one record mutated in place.
//!
//! Structural mutation (`insert_stage` / `remove_stage`) during a running
//! step is a caller error; pipelines are reconfigured between frames.

use crate::error::EvolutionError;
use crate::record::ParticleRecord;
use crate::stage::{StageHandle, TickScope};

/// Ordered sequence of evolution stages applied to one record per tick
///
/// # Examples
///
/// ```
/// use glam::vec2;
/// use particle_engine::stages::GravityStage;
/// use particle_engine::{EvolutionPipeline, FnStage, ParticleRecord, StageHandle};
///
/// let mut pipeline = EvolutionPipeline::new();
/// pipeline.add_stage(StageHandle::owned(GravityStage::new(vec2(0.0, -0.1))));
/// pipeline.add_stage(StageHandle::owned(FnStage::new(|r| r.velocity *= 0.99)));
///
/// let mut record = ParticleRecord::default();
/// pipeline.invoke(&mut record).unwrap();
/// assert_eq!(pipeline.len(), 2);
/// ```
pub struct EvolutionPipeline {
    stages: Vec<StageHandle>,
}

impl EvolutionPipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        EvolutionPipeline { stages: Vec::new() }
    }

    /// Create a pipeline holding a single stage
    pub fn with_stage(stage: StageHandle) -> Self {
        EvolutionPipeline {
            stages: vec![stage],
        }
    }

    /// Append a stage; it runs after every stage added before it
    pub fn add_stage(&mut self, stage: StageHandle) {
        self.stages.push(stage);
    }

    /// Insert a stage at `position`, shifting later stages back
    ///
    /// # Panics
    ///
    /// Panics if `position > len()` (caller error).
    pub fn insert_stage(&mut self, position: usize, stage: StageHandle) {
        self.stages.insert(position, stage);
    }

    /// Remove and return the stage at `position`
    ///
    /// The relative order of the remaining stages is preserved, so an
    /// `insert_stage(i, s)` followed by `remove_stage(i)` restores the prior
    /// sequence exactly.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len()` (caller error).
    pub fn remove_stage(&mut self, position: usize) -> StageHandle {
        self.stages.remove(position)
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages (invoke is a no-op)
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Feed the record through every stage in insertion order
    ///
    /// Stops at the first stage error; the record keeps the mutations of the
    /// stages that already ran.
    pub fn invoke(&mut self, record: &mut ParticleRecord) -> Result<(), EvolutionError> {
        for stage in &mut self.stages {
            stage.invoke(record)?;
        }
        Ok(())
    }

    /// Forward a tick to every stage
    ///
    /// Tick order is insertion order, though stages are expected not to
    /// interact during ticks, only during invokes.
    pub fn tick(&mut self, scope: TickScope) {
        for stage in &mut self.stages {
            stage.tick(scope);
        }
    }
}

impl Default for EvolutionPipeline {
    fn default() -> Self {
        Self::new()
    }
}
