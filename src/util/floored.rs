use num_traits::Float;

/// Division rounded towards negative infinity.
pub fn floor_div<T: Float>(l: T, r: T) -> T {
    (l / r).floor()
}

/// The remainder matching [floor_div]: the result has the sign of `r` (or is zero), and
/// `floor_div(l, r) * r + floor_rem(l, r) == l` up to rounding.
pub fn floor_rem<T: Float>(l: T, r: T) -> T {
    let x = l % r;
    if x != T::zero() && (x < T::zero()) != (r < T::zero()) {
        x + r
    } else {
        x
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_floor_div() {
        assert_eq!(floor_div(7.0, 2.0), 3.0);
        assert_eq!(floor_div(-7.0, 2.0), -4.0);
        assert_eq!(floor_div(7.0, -2.0), -4.0);
        assert_eq!(floor_div(123.0, 2.0), 61.0);
    }

    #[test]
    fn test_floor_rem() {
        assert_eq!(floor_rem(7.0, 2.0), 1.0);
        assert_eq!(floor_rem(-7.0, 2.0), 1.0);
        assert_eq!(floor_rem(7.0, -2.0), -1.0);
        assert_eq!(floor_rem(-7.0, -2.0), -1.0);
        assert_eq!(floor_rem(6.0, 3.0), 0.0);
        assert_eq!(floor_rem(123.0, 100.0), 23.0);
    }
}
