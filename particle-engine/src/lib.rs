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
//! # Particle Engine
//!
//! A particle evolution engine where per-frame behavior (motion, lifetime,
//! boundary collision, visual appearance) is assembled from independently
//! swappable stages, combined into dynamic pipelines, and stepped in bulk.
//!
//! ## Features
//!
//! - **Stage Pipelines**: type-erased, runtime-configurable sequences of
//!   per-tick behaviors, each observing the previous stage's output
//! - **Shared Lifetime Controllers**: whole teams of particles aging in
//!   lockstep through one reference-counted birth/age/death state machine
//! - **Bounds Oracles**: rectangle/circle containment with an inverse
//!   adapter, so obstacles reuse the containment stages
//! - **Batch Drawing**: one draw-sink submission per frame, whatever the
//!   particle count
//! - **Parallelism**: optional Rayon-powered stepping behind the `parallel`
//!   feature
//!
//! ## Example
//!
//! ```rust
//! use glam::vec2;
//! use particle_engine::stages::GravityStage;
//! use particle_engine::{Engine, Particle, ParticleRecord, Rgba, StageHandle};
//!
//! let mut engine = Engine::with_seed(7);
//! let record = ParticleRecord::new(vec2(0.0, 100.0), vec2(1.0, 0.0), Rgba::WHITE);
//! let stage = StageHandle::owned(GravityStage::new(vec2(0.0, -0.05)));
//! engine.spawn(Particle::from_stage(record, stage));
//!
//! engine.step().expect("a gravity pipeline cannot fail");
//! assert_eq!(engine.particle_count(), 1);
//! ```

#![warn(missing_docs)]

/// Geometric region oracles for boundary classification
pub mod bounds;

/// Preassembled effects (fireworks, bounded burst)
pub mod effects;

/// Frame-driven engine owning the particle collection
pub mod engine;

/// Error types for particle evolution
pub mod error;

/// Tolerant floating-point comparisons
pub mod float_cmp;

/// Birth/age/death lifetime state machine
pub mod lifetime;

/// Particle: record, pipeline, and draw adapter
pub mod particle;

/// Ordered type-erased stage sequences
pub mod pipeline;

/// Per-particle mutable state
pub mod record;

/// Evolution stages and ownership handles
pub mod stage;

/// Stock evolution stages
pub mod stages;

pub use engine::{CollectSink, DrawSink, Engine};
pub use error::EvolutionError;
pub use lifetime::{Afterlife, AgeSegments, LifetimeController};
pub use particle::{point_sprite, DrawAdapter, Particle, PointVertex};
pub use pipeline::EvolutionPipeline;
pub use record::{ParticleRecord, Rgba};
pub use stage::{share, EvolutionStage, FnStage, SharedStage, StageHandle, TickScope};
