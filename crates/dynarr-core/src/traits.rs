//! Capability traits required of element types.

use std::convert::Infallible;

/// Copy construction that may fail.
///
/// Every `Clone` type gets this for free with `Error = Infallible`. Element
/// types whose copy can fail (a bounded resource, an instrumented test
/// fixture) implement it directly instead of `Clone`.
///
/// Implementations may also panic; containers treat a panic the same way as
/// an `Err` for the purpose of keeping their own state consistent.
pub trait TryClone: Sized {
    /// Failure raised by [`try_clone`](TryClone::try_clone).
    type Error;

    /// Build an independent copy of `self`.
    fn try_clone(&self) -> Result<Self, Self::Error>;
}

impl<T: Clone> TryClone for T {
    type Error = Infallible;

    #[inline]
    fn try_clone(&self) -> Result<Self, Infallible> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Budgeted {
        remaining: std::cell::Cell<u32>,
    }

    impl TryClone for Budgeted {
        type Error = &'static str;

        fn try_clone(&self) -> Result<Self, Self::Error> {
            let left = self.remaining.get();
            if left == 0 {
                return Err("clone budget exhausted");
            }
            self.remaining.set(left - 1);
            Ok(Budgeted {
                remaining: std::cell::Cell::new(left - 1),
            })
        }
    }

    #[test]
    fn clone_types_never_fail() {
        let s = String::from("dynarr");
        let Ok(copy) = s.try_clone();
        assert_eq!(copy, "dynarr");
    }

    #[test]
    fn custom_impl_can_fail() {
        let b = Budgeted {
            remaining: std::cell::Cell::new(1),
        };
        assert!(b.try_clone().is_ok());
        assert_eq!(b.try_clone().err(), Some("clone budget exhausted"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn blanket_impl_matches_clone(values in proptest::collection::vec(any::<i64>(), 0..32)) {
                let Ok(copy) = values.try_clone();
                prop_assert_eq!(copy, values);
            }
        }
    }
}
