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
//! Preassembled effects
//!
//! Ready-to-run engines composed from the crate's stages:
//!
//! - [`fireworks_engine`]: teams of recycling particles aging in lockstep
//!   through one shared lifetime controller per team
//! - [`bounded_engine`]: particles bouncing inside a rectangle, each with
//!   its own crossing state

mod bounded;
mod fireworks;

pub use bounded::bounded_engine;
pub use fireworks::{firework_controller, fireworks_engine, FireworkConfig};
