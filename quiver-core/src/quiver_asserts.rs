pub(crate) const QUIVER_ASSERT_LEVEL_DEFINITION: u8 = QUIVER_ASSERT_SIMPLE;

pub(crate) const QUIVER_ASSERT_SIMPLE: u8 = 1;
pub(crate) const QUIVER_ASSERT_MODERATE: u8 = 2;
pub(crate) const QUIVER_ASSERT_ADVANCED: u8 = 3;

macro_rules! quiver_assert_simple {
    ($($arg:tt)*) => {
        if $crate::quiver_asserts::QUIVER_ASSERT_LEVEL_DEFINITION >= $crate::quiver_asserts::QUIVER_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

macro_rules! quiver_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::quiver_asserts::QUIVER_ASSERT_LEVEL_DEFINITION >= $crate::quiver_asserts::QUIVER_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

macro_rules! quiver_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::quiver_asserts::QUIVER_ASSERT_LEVEL_DEFINITION >= $crate::quiver_asserts::QUIVER_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

macro_rules! quiver_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::quiver_asserts::QUIVER_ASSERT_LEVEL_DEFINITION >= $crate::quiver_asserts::QUIVER_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

pub(crate) use quiver_assert_advanced;
pub(crate) use quiver_assert_eq_simple;
pub(crate) use quiver_assert_moderate;
pub(crate) use quiver_assert_simple;
