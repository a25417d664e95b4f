//! Diurnal traffic model.

use std::f64::consts::TAU;

/// Time-of-day load multiplier for a UTC hour (0–23).
///
/// `0.85 + 0.35 * sin((hour - 14) * 2π / 24)`: a sine wave over the day
/// whose inflection sits at hour 14 UTC, oscillating the base rate between
/// 0.5 and 1.2. Pure function, no state.
pub fn diurnal_multiplier(hour: u32) -> f64 {
    0.85 + 0.35 * ((f64::from(hour) - 14.0) * (TAU / 24.0)).sin()
}
