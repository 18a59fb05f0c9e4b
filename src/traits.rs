// src/traits.rs
//! Compile-time type utilities.
//!
//! Type-level booleans with the usual combinators, a handful of type
//! predicates, and the marker traits the containers use as bounds. None of
//! this carries runtime state.

use core::any::{Any, TypeId};
use core::marker::PhantomData;

/// A boolean known at compile time.
pub trait TypeBool {
    const VALUE: bool;
}

/// Lifts a `const` boolean to a type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bool<const B: bool>;

impl<const B: bool> TypeBool for Bool<B> {
    const VALUE: bool = B;
}

pub type True = Bool<true>;
pub type False = Bool<false>;

/// Negation of `B`.
pub struct Not<B>(PhantomData<B>);

impl<B: TypeBool> TypeBool for Not<B> {
    const VALUE: bool = !B::VALUE;
}

/// `A && B`
pub struct And<A, B>(PhantomData<(A, B)>);

impl<A: TypeBool, B: TypeBool> TypeBool for And<A, B> {
    const VALUE: bool = A::VALUE && B::VALUE;
}

/// `A || B`
pub struct Or<A, B>(PhantomData<(A, B)>);

impl<A: TypeBool, B: TypeBool> TypeBool for Or<A, B> {
    const VALUE: bool = A::VALUE || B::VALUE;
}

/// Logical AND over a tuple of type-level booleans. The empty tuple is `true`.
pub struct Conjunction<L>(PhantomData<L>);

/// Logical OR over a tuple of type-level booleans. The empty tuple is `false`.
pub struct Disjunction<L>(PhantomData<L>);

impl TypeBool for Conjunction<()> {
    const VALUE: bool = true;
}

impl TypeBool for Disjunction<()> {
    const VALUE: bool = false;
}

macro_rules! impl_fold {
    ($($name:ident),+) => {
        impl<$($name: TypeBool),+> TypeBool for Conjunction<($($name,)+)> {
            const VALUE: bool = true $(&& $name::VALUE)+;
        }

        impl<$($name: TypeBool),+> TypeBool for Disjunction<($($name,)+)> {
            const VALUE: bool = false $(|| $name::VALUE)+;
        }
    };
}

impl_fold!(A);
impl_fold!(A, B);
impl_fold!(A, B, C);
impl_fold!(A, B, C, D);
impl_fold!(A, B, C, D, E);
impl_fold!(A, B, C, D, E, F);

/// `true` when dropping a `T` runs no code.
pub const fn is_trivially_destructible<T>() -> bool {
    !core::mem::needs_drop::<T>()
}

/// `true` when `T` occupies no storage.
pub const fn is_zero_sized<T>() -> bool {
    core::mem::size_of::<T>() == 0
}

/// `true` when `T` and `U` are the same type.
pub fn is_same<T: ?Sized + 'static, U: ?Sized + 'static>() -> bool {
    TypeId::of::<T>() == TypeId::of::<U>()
}

/// Types an [`AnyValue`](crate::AnyValue) can hold: owned and cloneable.
pub trait Storable: Any + Clone {}

impl<T: Any + Clone> Storable for T {}

/// Types whose values can be exchanged in place.
///
/// Every sized type qualifies and the exchange never panics, so there is no
/// separate non-panicking variant.
pub trait Swappable: Sized {
    fn swap_with(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }
}

impl<T> Swappable for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use static_assertions::{assert_impl_all, assert_not_impl_any, const_assert};

    struct NotClone;

    assert_impl_all!(String: Storable, Swappable);
    assert_impl_all!(u8: Storable);
    assert_not_impl_any!(NotClone: Storable);

    const_assert!(<Conjunction<()> as TypeBool>::VALUE);
    const_assert!(!<Disjunction<()> as TypeBool>::VALUE);
    const_assert!(<Disjunction<(False, False, True)> as TypeBool>::VALUE);
    const_assert!(!<Conjunction<(True, False, True)> as TypeBool>::VALUE);
    const_assert!(<Not<False> as TypeBool>::VALUE);
    const_assert!(is_trivially_destructible::<u32>());
    const_assert!(!is_trivially_destructible::<String>());

    #[test]
    fn binary_combinators() {
        assert!(<And<True, True> as TypeBool>::VALUE);
        assert!(!<And<True, False> as TypeBool>::VALUE);
        assert!(<Or<False, True> as TypeBool>::VALUE);
        assert!(!<Or<False, False> as TypeBool>::VALUE);
        assert!(<Conjunction<(True, True, True, True, True, True)> as TypeBool>::VALUE);
    }

    #[test]
    fn predicates() {
        assert!(is_same::<u32, u32>());
        assert!(!is_same::<u32, i32>());
        assert!(is_same::<str, str>());
        assert!(is_zero_sized::<()>());
        assert!(!is_zero_sized::<u8>());
    }

    #[test]
    fn swap_with_exchanges_values() {
        let mut a = String::from("left");
        let mut b = String::from("right");
        a.swap_with(&mut b);
        assert_eq!(a, "right");
        assert_eq!(b, "left");
    }
}
