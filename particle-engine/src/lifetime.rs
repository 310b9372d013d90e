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
//! Lifetime state machine
//!
//! A [`LifetimeController`] is a stateful evolution stage driving a particle
//! through birth, age-segmented life, and death. Its countdown advances only
//! on [`TickScope::Global`] ticks, so one controller can be shared by a whole
//! team of particles that age in lockstep: share it with
//! [`share`](crate::share) and register it with the engine.
//!
//! The countdown `remaining` lives in `[-1, total]`:
//!
//! - `remaining == total`: about to fire the birth action (exactly once per
//!   cycle; no segment action runs on the birth tick)
//! - `0 < remaining < total`: alive; the segment covering the current age
//!   fraction runs each invoke
//! - `remaining == 0`: about to fire the death action, which decides via
//!   [`Afterlife`] whether the cycle restarts
//! - `remaining < 0`: lifetime tracking disabled; nothing ever fires
//!
//! The age fraction passed to segment actions is `1 - remaining / total`,
//! always in `[0, 1)`.

use crate::error::EvolutionError;
use crate::float_cmp::approx_le;
use crate::record::ParticleRecord;
use crate::stage::{EvolutionStage, TickScope};

/// Action fired once when a life cycle begins
pub type BirthAction = Box<dyn FnMut(&mut ParticleRecord) + Send>;

/// Action fired while alive; the second argument is the age fraction in `[0, 1)`
pub type AgeAction = Box<dyn FnMut(&mut ParticleRecord, f32) + Send>;

/// Action fired once when the countdown reaches zero
pub type DeathAction = Box<dyn FnMut(&mut ParticleRecord) -> Afterlife + Send>;

/// Decision returned by a death action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Afterlife {
    /// Stay dead; the controller goes inert on the next global tick
    Rest,
    /// Restart the cycle: the countdown resets to the total lifetime and the
    /// next invoke fires the birth action again
    Respawn,
}

/// Ordered age-segment table
///
/// Segments are keyed by their upper age threshold, ascending. For an age
/// query the first threshold `>=` the age wins: boundaries are
/// exclusive-below, inclusive-at-threshold (with the crate's fixed float
/// tolerance). An age no segment covers is a configuration error.
///
/// # Examples
///
/// ```
/// use particle_engine::{AgeSegments, Rgba};
///
/// let segments = AgeSegments::builder()
///     .until(0.5, |record, _age| record.color = Rgba::RED)
///     .until(1.0, |record, _age| record.color = Rgba::BLUE)
///     .build();
/// assert_eq!(segments.len(), 2);
/// ```
pub struct AgeSegments {
    segments: Vec<(f32, AgeAction)>,
}

impl AgeSegments {
    /// Start building a segment table
    pub fn builder() -> AgeSegmentsBuilder {
        AgeSegmentsBuilder {
            segments: Vec::new(),
        }
    }

    /// A single segment covering the whole life with one action
    pub fn uniform(action: impl FnMut(&mut ParticleRecord, f32) + Send + 'static) -> Self {
        AgeSegments::builder().until(1.0, action).build()
    }

    /// Number of segments in the table
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the table has no segments (every lookup fails)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Run the segment covering `age`
    pub fn run(&mut self, record: &mut ParticleRecord, age: f32) -> Result<(), EvolutionError> {
        match self
            .segments
            .iter_mut()
            .find(|(threshold, _)| approx_le(age, *threshold))
        {
            Some((_, action)) => {
                action(record, age);
                Ok(())
            }
            None => Err(EvolutionError::IncompleteLifetimeSpecification { age }),
        }
    }
}

/// Builder collecting `(threshold, action)` pairs in ascending order
pub struct AgeSegmentsBuilder {
    segments: Vec<(f32, AgeAction)>,
}

impl AgeSegmentsBuilder {
    /// Register `action` for ages up to and including `threshold`
    ///
    /// # Panics
    ///
    /// Panics if the threshold is outside `(0, 1]` or not greater than the
    /// previously registered one.
    pub fn until(
        mut self,
        threshold: f32,
        action: impl FnMut(&mut ParticleRecord, f32) + Send + 'static,
    ) -> Self {
        assert!(
            threshold > 0.0 && threshold <= 1.0 && threshold.is_finite(),
            "Age segment threshold must be in (0, 1]"
        );
        if let Some((last, _)) = self.segments.last() {
            assert!(
                threshold > *last,
                "Age segment thresholds must be strictly ascending"
            );
        }
        self.segments.push((threshold, Box::new(action)));
        self
    }

    /// Finish the table
    pub fn build(self) -> AgeSegments {
        AgeSegments {
            segments: self.segments,
        }
    }
}

/// Stateful stage managing a birth/age/death cycle
///
/// # Examples
///
/// ```
/// use particle_engine::{
///     Afterlife, AgeSegments, EvolutionStage, LifetimeController, ParticleRecord, Rgba,
///     TickScope,
/// };
///
/// let mut controller = LifetimeController::new(10)
///     .on_birth(|record| record.color = Rgba::WHITE)
///     .with_life(AgeSegments::uniform(|record, _age| record.color = Rgba::RED))
///     .on_death(|record| {
///         record.color = Rgba::MAGENTA;
///         Afterlife::Respawn
///     });
///
/// let mut record = ParticleRecord::default();
/// controller.invoke(&mut record).unwrap(); // fires birth
/// controller.tick(TickScope::Global);
/// assert_eq!(controller.remaining(), 9);
/// ```
pub struct LifetimeController {
    total: i32,
    remaining: i32,
    birth: BirthAction,
    life: AgeSegments,
    death: DeathAction,
}

impl LifetimeController {
    /// Create a controller counting down from `total_lifetime` frames
    ///
    /// All actions default to no-ops (the death action rests); configure them
    /// with [`on_birth`](Self::on_birth), [`with_life`](Self::with_life) and
    /// [`on_death`](Self::on_death).
    ///
    /// # Panics
    ///
    /// Panics if `total_lifetime` is not positive.
    pub fn new(total_lifetime: i32) -> Self {
        assert!(total_lifetime > 0, "Lifetime must be positive");
        LifetimeController {
            total: total_lifetime,
            remaining: total_lifetime,
            birth: Box::new(|_| {}),
            life: AgeSegments::uniform(|_, _| {}),
            death: Box::new(|_| Afterlife::Rest),
        }
    }

    /// Controller with lifetime tracking disabled
    ///
    /// Never fires any action and never transitions; global ticks are
    /// ignored.
    pub fn immortal() -> Self {
        LifetimeController {
            total: -1,
            remaining: -1,
            birth: Box::new(|_| {}),
            life: AgeSegments::uniform(|_, _| {}),
            death: Box::new(|_| Afterlife::Rest),
        }
    }

    /// Set the action fired when a cycle begins
    pub fn on_birth(mut self, action: impl FnMut(&mut ParticleRecord) + Send + 'static) -> Self {
        self.birth = Box::new(action);
        self
    }

    /// Set the age-segment table driving the life phase
    pub fn with_life(mut self, segments: AgeSegments) -> Self {
        self.life = segments;
        self
    }

    /// Set the action fired when the countdown reaches zero
    pub fn on_death(
        mut self,
        action: impl FnMut(&mut ParticleRecord) -> Afterlife + Send + 'static,
    ) -> Self {
        self.death = Box::new(action);
        self
    }

    /// Whether the countdown is still running (`remaining >= 0`)
    pub fn is_alive(&self) -> bool {
        self.remaining >= 0
    }

    /// Frames left in the current cycle (`-1` once inert)
    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    /// Configured cycle length in frames
    pub fn total_lifetime(&self) -> i32 {
        self.total
    }

    /// Normalized position within the lifetime: `1 - remaining / total`, in `[0, 1)`
    pub fn age_fraction(&self) -> f32 {
        if self.total <= 0 {
            0.0
        } else {
            1.0 - self.remaining as f32 / self.total as f32
        }
    }

    /// Reset the countdown to the full lifetime
    ///
    /// The next invoke fires the birth action again. Death actions request
    /// this by returning [`Afterlife::Respawn`]; callers recycling particles
    /// externally may also call it directly.
    pub fn respawn(&mut self) {
        self.remaining = self.total;
    }
}

impl EvolutionStage for LifetimeController {
    fn invoke(&mut self, record: &mut ParticleRecord) -> Result<(), EvolutionError> {
        if self.remaining < 0 {
            // Lifetime tracking disabled (immortal) or inert after death.
            Ok(())
        } else if self.remaining == self.total {
            (self.birth)(record);
            Ok(())
        } else if self.remaining > 0 {
            let age = self.age_fraction();
            self.life.run(record, age)
        } else {
            if (self.death)(record) == Afterlife::Respawn {
                self.respawn();
            }
            Ok(())
        }
    }

    fn tick(&mut self, scope: TickScope) {
        // Lifetime advances with global time, not with per-particle work.
        if scope == TickScope::Global && self.is_alive() {
            self.remaining -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Rgba;

    #[test]
    fn test_countdown_reaches_zero_after_total_ticks() {
        let mut controller = LifetimeController::new(5);
        for _ in 0..5 {
            controller.tick(TickScope::Global);
        }
        assert_eq!(controller.remaining(), 0);
        assert!(controller.is_alive());
    }

    #[test]
    fn test_per_particle_tick_does_not_age() {
        let mut controller = LifetimeController::new(5);
        controller.tick(TickScope::PerParticle);
        assert_eq!(controller.remaining(), 5);
    }

    #[test]
    fn test_birth_fires_only_at_full_countdown() {
        let mut controller = LifetimeController::new(4)
            .on_birth(|record| record.color = Rgba::WHITE)
            .with_life(AgeSegments::uniform(|record, _| record.color = Rgba::RED));
        let mut record = ParticleRecord::default();
        record.color = Rgba::BLACK;

        controller.invoke(&mut record).unwrap();
        assert_eq!(record.color, Rgba::WHITE); // birth, no segment action

        controller.tick(TickScope::Global);
        controller.invoke(&mut record).unwrap();
        assert_eq!(record.color, Rgba::RED); // now in the life phase
    }

    #[test]
    fn test_death_then_inert() {
        let counter = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let seen = std::sync::Arc::clone(&counter);
        let mut controller = LifetimeController::new(2).on_death(move |_record| {
            seen.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            Afterlife::Rest
        });
        let mut record = ParticleRecord::default();

        for _ in 0..2 {
            controller.invoke(&mut record).unwrap();
            controller.tick(TickScope::Global);
        }
        assert_eq!(controller.remaining(), 0);

        controller.invoke(&mut record).unwrap(); // death fires
        controller.tick(TickScope::Global); // countdown floors at -1
        assert_eq!(controller.remaining(), -1);
        assert!(!controller.is_alive());

        controller.invoke(&mut record).unwrap(); // inert, nothing fires
        controller.tick(TickScope::Global);
        assert_eq!(controller.remaining(), -1);

        assert_eq!(counter.load(std::sync::atomic::Ordering::Relaxed), 1);
    }

    #[test]
    fn test_respawn_restarts_birth_cycle() {
        let mut controller = LifetimeController::new(3)
            .on_birth(|record| record.color = Rgba::GREEN)
            .on_death(|record| {
                record.color = Rgba::MAGENTA;
                Afterlife::Respawn
            });
        let mut record = ParticleRecord::default();
        record.color = Rgba::BLACK;

        for _ in 0..3 {
            controller.invoke(&mut record).unwrap();
            controller.tick(TickScope::Global);
        }
        assert_eq!(controller.remaining(), 0);

        controller.invoke(&mut record).unwrap(); // death, requests respawn
        assert_eq!(record.color, Rgba::MAGENTA);
        assert_eq!(controller.remaining(), 3);

        controller.invoke(&mut record).unwrap(); // reborn
        assert_eq!(record.color, Rgba::GREEN);
    }

    #[test]
    fn test_manual_respawn() {
        let mut controller = LifetimeController::new(7);
        for _ in 0..4 {
            controller.tick(TickScope::Global);
        }
        assert_eq!(controller.remaining(), 3);
        controller.respawn();
        assert_eq!(controller.remaining(), 7);
    }

    #[test]
    fn test_immortal_never_transitions() {
        let mut controller = LifetimeController::immortal();
        let mut record = ParticleRecord::default();
        for _ in 0..10 {
            controller.tick(TickScope::Global);
            controller.invoke(&mut record).unwrap();
        }
        assert_eq!(controller.remaining(), -1);
        assert!(!controller.is_alive());
        assert_eq!(record, ParticleRecord::default());
    }

    #[test]
    fn test_age_fraction_range() {
        let mut controller = LifetimeController::new(10);
        assert_eq!(controller.age_fraction(), 0.0);
        for _ in 0..4 {
            controller.tick(TickScope::Global);
        }
        assert!((controller.age_fraction() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_missing_segment_is_configuration_error() {
        let mut segments = AgeSegments::builder()
            .until(0.5, |_, _| {})
            .build();
        let mut record = ParticleRecord::default();
        assert!(segments.run(&mut record, 0.25).is_ok());
        assert_eq!(
            segments.run(&mut record, 0.75),
            Err(EvolutionError::IncompleteLifetimeSpecification { age: 0.75 })
        );
    }

    #[test]
    fn test_segment_threshold_is_inclusive() {
        let mut segments = AgeSegments::builder()
            .until(0.3, |record, _| record.color = Rgba::RED)
            .until(0.6, |record, _| record.color = Rgba::GREEN)
            .until(1.0, |record, _| record.color = Rgba::BLUE)
            .build();
        let mut record = ParticleRecord::default();

        segments.run(&mut record, 0.3).unwrap();
        assert_eq!(record.color, Rgba::RED); // inclusive at its own threshold

        segments.run(&mut record, 0.6).unwrap();
        assert_eq!(record.color, Rgba::GREEN);

        segments.run(&mut record, 0.9).unwrap();
        assert_eq!(record.color, Rgba::BLUE);
    }

    #[test]
    #[should_panic(expected = "strictly ascending")]
    fn test_builder_rejects_unordered_thresholds() {
        AgeSegments::builder()
            .until(0.6, |_, _| {})
            .until(0.3, |_, _| {});
    }

    #[test]
    #[should_panic(expected = "must be in (0, 1]")]
    fn test_builder_rejects_out_of_range_threshold() {
        AgeSegments::builder().until(1.5, |_, _| {});
    }

    #[test]
    #[should_panic(expected = "Lifetime must be positive")]
    fn test_zero_lifetime_panics() {
        LifetimeController::new(0);
    }
}
