// Time-based brightness curve for one trail point.
// Visual: a dot swells quickly over the first 30% of its life,
// then eases back to nothing over the remaining 70%.

use crate::types::TouchPoint;
use std::f32::consts::FRAC_PI_2;

/// Share of the lifetime spent rising.
pub const ATTACK_SHARE: f32 = 0.3;

/// Ease-out sine: 0 -> 0, 1 -> 1, steep start, flat finish.
#[inline]
pub fn out_sine(n: f32) -> f32 {
    (n * FRAC_PI_2).sin()
}

#[inline]
fn attack(age: f32, max_age: f32) -> f32 {
    out_sine(age / (max_age * ATTACK_SHARE))
}

#[inline]
fn release(age: f32, max_age: f32) -> f32 {
    let attack_len = max_age * ATTACK_SHARE;
    out_sine(1.0 - (age - attack_len) / (max_age * (1.0 - ATTACK_SHARE)))
}

/// Envelope value in [0,1] for a point of `age` frames.
/// A zero lifetime has no envelope at all (such points never get drawn).
pub fn envelope(age: u32, max_age: u32) -> f32 {
    if max_age == 0 {
        return 0.0;
    }
    let (age, max_age) = (age as f32, max_age as f32);
    let v = if age < max_age * ATTACK_SHARE {
        attack(age, max_age)
    } else {
        release(age, max_age)
    };
    v.clamp(0.0, 1.0)
}

/// Final per-point intensity: envelope scaled by the gesture force.
#[inline]
pub fn intensity(point: &TouchPoint, max_age: u32) -> f32 {
    envelope(point.age, max_age) * point.force
}
