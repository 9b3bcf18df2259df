//! The single rounding-direction table used when a relation over a product is algebraically
//! inverted into a direct bound on one variable.
//!
//! Inverting `a * Z <= v` divides the right-hand side by `a`. For integer domains the division
//! must round so that no feasible value of `Z` is cut off and no infeasible value survives:
//! the direction depends only on which bound of `Z` the result lands on, *after* the relational
//! direction has been flipped for a negative multiplier. Deriving the direction anywhere else
//! risks the two concerns getting out of sync.

/// Which bound of the target variable a tightened relation lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundSide {
    /// The relation tightens the lower bound of the target.
    Lower,
    /// The relation tightens the upper bound of the target.
    Upper,
}

/// The direction in which an inexact division result must be rounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundDir {
    Up,
    Down,
}

/// The table: a lower bound may only move up, an upper bound may only move down.
pub fn round_dir(side: BoundSide) -> RoundDir {
    match side {
        BoundSide::Lower => RoundDir::Up,
        BoundSide::Upper => RoundDir::Down,
    }
}

/// The bound side targeted by `Z REL v` once the relation has been normalised to non-strict
/// form, accounting for a flip caused by a negative multiplier.
pub(crate) fn bound_side(tightens_upper: bool, negative_multiplier: bool) -> BoundSide {
    match (tightens_upper, negative_multiplier) {
        (true, false) | (false, true) => BoundSide::Upper,
        (false, false) | (true, true) => BoundSide::Lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::num_ext::NumExt;

    fn invert(v: i32, a: i32, tightens_upper: bool) -> (i32, BoundSide) {
        let side = bound_side(tightens_upper, a < 0);
        let bound = match round_dir(side) {
            RoundDir::Up => v.div_ceil(a),
            RoundDir::Down => v.div_floor(a),
        };
        (bound, side)
    }

    #[test]
    fn positive_multiplier_upper_bound_rounds_down() {
        // 2 * Z <= 7  =>  Z <= 3
        assert_eq!((3, BoundSide::Upper), invert(7, 2, true));
    }

    #[test]
    fn positive_multiplier_lower_bound_rounds_up() {
        // 2 * Z >= 7  =>  Z >= 4
        assert_eq!((4, BoundSide::Lower), invert(7, 2, false));
    }

    #[test]
    fn negative_multiplier_flips_the_bound_side() {
        // -2 * Z <= 7  =>  Z >= -3.5  =>  Z >= -3
        assert_eq!((-3, BoundSide::Lower), invert(7, -2, true));
        // -2 * Z >= 7  =>  Z <= -3.5  =>  Z <= -4
        assert_eq!((-4, BoundSide::Upper), invert(7, -2, false));
    }

    #[test]
    fn exact_division_is_unaffected_by_direction() {
        assert_eq!((3, BoundSide::Upper), invert(6, 2, true));
        assert_eq!((3, BoundSide::Lower), invert(6, 2, false));
        assert_eq!((-3, BoundSide::Lower), invert(6, -2, true));
    }
}
