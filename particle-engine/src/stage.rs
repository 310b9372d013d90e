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
//! Evolution stages and ownership handles
//!
//! A stage is one unit of per-tick particle behavior. Heterogeneous stage
//! types share pipelines through [`StageHandle`], the one place the engine
//! uses dynamic dispatch: stage sets are assembled per effect at
//! configuration time, not at compile time.
//!
//! Ownership is an explicit tag, decided once at construction:
//!
//! - [`StageHandle::Owned`]: the stage belongs to exactly one pipeline and
//!   advances with that particle.
//! - [`StageHandle::Shared`]: one reference-counted stage referenced by many
//!   particles that must age in lockstep (for example a whole team driven by
//!   one lifetime controller).
//!
//! # Tick scoping
//!
//! The engine forwards a [`TickScope::Global`] tick through every particle
//! once per frame. An `Owned` handle passes it on, so private stateful
//! stages advance exactly once. A `Shared` handle swallows it (otherwise a
//! stage referenced by N particles would age N times per frame) and is
//! instead ticked once by the engine through its own registered handle.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::EvolutionError;
use crate::record::ParticleRecord;

/// Scope of a `tick` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickScope {
    /// Once per simulation frame, regardless of how many particles reference
    /// the stage. Reserved for time advancement.
    Global,
    /// Once per owning particle per frame, for stage-local bookkeeping.
    PerParticle,
}

/// One unit of per-tick particle behavior
///
/// `invoke` must be safe to call every tick for every particle holding the
/// stage. Whether a stage is stateless or stateful is an explicit property of
/// the implementation: stateless stages simply keep the default no-op
/// [`tick`](EvolutionStage::tick).
pub trait EvolutionStage: Send {
    /// Mutate the record in place
    fn invoke(&mut self, record: &mut ParticleRecord) -> Result<(), EvolutionError>;

    /// Advance internal state for the given scope
    ///
    /// The default is a no-op, which is the correct behavior for stateless
    /// stages.
    fn tick(&mut self, _scope: TickScope) {}
}

/// Reference-counted handle to a stage shared by many particles
pub type SharedStage = Arc<Mutex<dyn EvolutionStage>>;

/// Wrap a stage for sharing across particles
///
/// The returned handle can be cloned into any number of pipelines via
/// [`StageHandle::shared`] and must be registered with the engine (see
/// [`Engine::register_shared_stage`](crate::Engine::register_shared_stage))
/// to receive its once-per-frame global tick.
pub fn share<S: EvolutionStage + 'static>(stage: S) -> SharedStage {
    Arc::new(Mutex::new(stage))
}

pub(crate) fn lock_shared(stage: &SharedStage) -> MutexGuard<'_, dyn EvolutionStage + 'static> {
    stage.lock().expect("shared stage mutex poisoned")
}

/// Type-erased stage with an explicit ownership tag
pub enum StageHandle {
    /// Stage owned exclusively by one pipeline
    Owned(Box<dyn EvolutionStage>),
    /// Stage shared with other pipelines, aged in lockstep
    Shared(SharedStage),
}

impl StageHandle {
    /// Take exclusive ownership of a stage
    pub fn owned<S: EvolutionStage + 'static>(stage: S) -> Self {
        StageHandle::Owned(Box::new(stage))
    }

    /// Hold another reference to a shared stage
    pub fn shared(stage: &SharedStage) -> Self {
        StageHandle::Shared(Arc::clone(stage))
    }

    /// Whether this handle shares its stage with other pipelines
    pub fn is_shared(&self) -> bool {
        matches!(self, StageHandle::Shared(_))
    }

    /// Invoke the underlying stage on the record
    pub fn invoke(&mut self, record: &mut ParticleRecord) -> Result<(), EvolutionError> {
        match self {
            StageHandle::Owned(stage) => stage.invoke(record),
            StageHandle::Shared(stage) => lock_shared(stage).invoke(record),
        }
    }

    /// Forward a tick to the underlying stage
    ///
    /// Shared handles swallow [`TickScope::Global`]: global time advancement
    /// of shared state happens exactly once per frame through the engine's
    /// own handle, not once per referencing particle.
    pub fn tick(&mut self, scope: TickScope) {
        match self {
            StageHandle::Owned(stage) => stage.tick(scope),
            StageHandle::Shared(stage) => {
                if scope == TickScope::PerParticle {
                    lock_shared(stage).tick(scope);
                }
            }
        }
    }
}

/// Stateless stage built from a closure
///
/// The closure runs on every invoke; ticks are no-ops. This is the cheapest
/// way to drop ad-hoc behavior into a pipeline.
///
/// # Examples
///
/// ```
/// use particle_engine::{FnStage, StageHandle};
///
/// let fade = FnStage::new(|record| record.velocity *= 0.99);
/// let handle = StageHandle::owned(fade);
/// assert!(!handle.is_shared());
/// ```
pub struct FnStage<F: FnMut(&mut ParticleRecord) + Send> {
    action: F,
}

impl<F: FnMut(&mut ParticleRecord) + Send> FnStage<F> {
    /// Wrap the closure as a stateless stage
    pub fn new(action: F) -> Self {
        FnStage { action }
    }
}

impl<F: FnMut(&mut ParticleRecord) + Send> EvolutionStage for FnStage<F> {
    fn invoke(&mut self, record: &mut ParticleRecord) -> Result<(), EvolutionError> {
        (self.action)(record);
        Ok(())
    }
}
