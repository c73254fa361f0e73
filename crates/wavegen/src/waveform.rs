//! Periodic waveforms and amplitude envelopes.
//!
//! Every periodic function here has a period of 2π, so `sq(t * 2 * pi * f)`
//! produces a square wave at `f` Hz. Envelopes are meant to be multiplied with
//! a signal.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Square wave: +1 for the first half of each period, -1 for the second.
pub fn square(t: f64) -> f64 {
    if t.rem_euclid(TAU) < PI {
        1.0
    } else {
        -1.0
    }
}

/// Triangle wave, shifted by a quarter period so that `triangle(0) == 0` on a
/// rising edge.
pub fn triangle(t: f64) -> f64 {
    let x = (t + FRAC_PI_2).rem_euclid(TAU);
    if x < PI {
        2.0 * x / PI - 1.0
    } else {
        3.0 - 2.0 * x / PI
    }
}

/// Rising sawtooth in [-1, 1), resetting at every multiple of 2π.
pub fn sawtooth(t: f64) -> f64 {
    let x = t.rem_euclid(TAU);
    // rem_euclid rounds up to TAU for tiny negative inputs
    if x >= TAU {
        -1.0
    } else {
        x / PI - 1.0
    }
}

/// Quadratic fade-in reaching 1 at `t == duration`.
pub fn fadein(t: f64, duration: f64) -> f64 {
    if t < 0.0 {
        return 0.0;
    }
    let x = t / duration;
    (x * x).min(1.0)
}

/// Quadratic envelope that is 0 at `t == duration` and grows as `t` moves
/// back towards 0. Zero after `duration`.
pub fn fadeout(t: f64, duration: f64) -> f64 {
    if t > duration {
        return 0.0;
    }
    let x = (t - duration) / duration;
    (x * x).min(1.0)
}
