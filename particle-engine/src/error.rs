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
//! Error types for particle evolution
//!
//! The engine has exactly one fallible condition: a lifetime controller whose
//! age-segment table fails to cover an age it is asked about. That is a
//! configuration bug, not a runtime data issue, so it propagates immediately
//! through every `invoke` path and is never suppressed.

use thiserror::Error;

/// Errors surfaced while evolving a particle
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EvolutionError {
    /// The age-segment table does not cover the full `[0, 1)` range
    ///
    /// Raised at `invoke` time when a lifetime controller finds no segment
    /// whose threshold covers the particle's current age fraction. The update
    /// of the affected particle is aborted; the caller decides whether to
    /// keep or drop the particle.
    #[error("incomplete lifetime specification: no age segment covers age {age}")]
    IncompleteLifetimeSpecification {
        /// Age fraction in `[0, 1)` that no segment covered
        age: f32,
    },
}
