//! Small numeric conversion helpers shared by the blur planner.

/// Round a double to the nearest integer (round half away from zero).
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Floor a non-negative double to an unsigned integer (truncation toward zero).
#[inline]
pub fn ufloor(v: f64) -> u32 {
    v as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iround_half_away_from_zero() {
        assert_eq!(iround(1.5), 2);
        assert_eq!(iround(2.5), 3);
        assert_eq!(iround(-1.5), -2);
        assert_eq!(iround(0.49), 0);
        assert_eq!(iround(-0.49), 0);
    }

    #[test]
    fn test_ufloor_truncates() {
        assert_eq!(ufloor(4.999), 4);
        assert_eq!(ufloor(5.0), 5);
        assert_eq!(ufloor(0.0), 0);
    }
}
