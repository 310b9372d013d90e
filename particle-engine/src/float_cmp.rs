//! Tolerant floating-point comparisons
//!
//! Boundary classification and age-fraction lookups compare floats that have
//! drifted through repeated accumulation. Exact `==` would let a particle
//! oscillate between inside and outside on consecutive frames; every such
//! comparison in the crate goes through the fixed-epsilon helpers here.

/// Fixed comparison tolerance (five decimal digits)
///
/// Not configurable per call: one tolerance keeps classification and
/// segment-lookup decisions consistent across the whole engine.
pub const EPSILON: f32 = 1e-5;

/// Tolerant equality: `|a - b| < EPSILON`
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Tolerant `a <= b`
pub fn approx_le(a: f32, b: f32) -> bool {
    a < b || approx_eq(a, b)
}

/// Tolerant `a >= b`
pub fn approx_ge(a: f32, b: f32) -> bool {
    a > b || approx_eq(a, b)
}
