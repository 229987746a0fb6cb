use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits. Used for every
/// pixel-space quantity so vehicle movement is bit-for-bit reproducible.
pub type Fixed64 = I32F32;

/// Simulated wall-clock time in milliseconds.
pub type Millis = u64;

/// Frame counter. One frame per `Simulation::advance` call.
pub type Frames = u64;

/// Convert an f64 to Fixed64, or `None` if it is NaN, infinite or out of
/// range. Use only for configuration, never in the frame loop.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Option<Fixed64> {
    Fixed64::checked_from_num(v)
}

/// Convert Fixed64 to f64. Use only for display.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// Move `from` one `step` toward `to`. Caller guarantees `|to - from| > step`.
#[inline]
pub(crate) fn step_toward(from: Fixed64, to: Fixed64, step: Fixed64) -> Fixed64 {
    if to > from { from + step } else { from - step }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_round_trip_exact_values() {
        assert_eq!(f64_to_fixed64(2.5).map(fixed64_to_f64), Some(2.5));
        assert_eq!(f64_to_fixed64(-32.0).map(fixed64_to_f64), Some(-32.0));
    }

    #[test]
    fn unrepresentable_floats_are_none() {
        for v in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 1e12, -1e12] {
            assert_eq!(f64_to_fixed64(v), None, "{v}");
        }
    }

    #[test]
    fn step_toward_moves_in_both_directions() {
        let two = Fixed64::from_num(2);
        assert_eq!(step_toward(Fixed64::ZERO, Fixed64::from_num(10), two), two);
        assert_eq!(
            step_toward(Fixed64::from_num(10), Fixed64::ZERO, two),
            Fixed64::from_num(8)
        );
    }

    #[test]
    fn fractional_speed_is_deterministic() {
        let speed = f64_to_fixed64(1.0 / 3.0).unwrap();
        let mut a = Fixed64::ZERO;
        let mut b = Fixed64::ZERO;
        for _ in 0..90 {
            a += speed;
            b += speed;
        }
        assert_eq!(a, b);
    }
}
