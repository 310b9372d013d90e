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
//! Stock evolution stages
//!
//! Small reusable stages for common particle behaviors:
//!
//! - [`GravityStage`]: constant acceleration
//! - [`BounceStage`]: reflect velocity on a boundary crossing
//! - [`ClampStage`]: keep the position inside a box
//! - [`PaintStage`]: recolor by region membership
//!
//! Pipelines compose these with effect-specific stages; order matters, since
//! each stage sees the record as the previous one left it.

mod bounce;
mod clamp;
mod gravity;
mod paint;

pub use bounce::BounceStage;
pub use clamp::ClampStage;
pub use gravity::GravityStage;
pub use paint::PaintStage;
