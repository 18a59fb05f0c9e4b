//! Address utility.
//!
//! Yields the address of a place without going through any user-visible
//! conversion of the value, so it works for every type including unsized ones.
//! The slot helpers do the same for storage that may not hold a live value yet.

use core::mem::MaybeUninit;
use core::ptr;

/// Address of `value`.
#[inline]
pub fn address_of<T: ?Sized>(value: &T) -> *const T {
    ptr::addr_of!(*value)
}

/// Mutable address of `value`.
#[inline]
pub fn address_of_mut<T: ?Sized>(value: &mut T) -> *mut T {
    ptr::addr_of_mut!(*value)
}

/// Address of the `T` embedded in `slot`, whether or not it is initialized.
///
/// The pointer is only valid to read through once a value has been written.
#[inline]
pub fn slot_ptr<T>(slot: &MaybeUninit<T>) -> *const T {
    slot.as_ptr()
}

/// Mutable address of the `T` embedded in `slot`, whether or not it is
/// initialized.
#[inline]
pub fn slot_ptr_mut<T>(slot: &mut MaybeUninit<T>) -> *mut T {
    slot.as_mut_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_matches_reference() {
        let value = 7u64;
        assert_eq!(address_of(&value), &value as *const u64);

        let slice: &[u8] = &[1, 2, 3];
        assert_eq!(address_of(slice) as *const u8, slice.as_ptr());
    }

    #[test]
    fn slot_address_is_stable_across_writes() {
        let mut slot = MaybeUninit::<String>::uninit();
        let before = slot_ptr(&slot);
        slot.write(String::from("hello"));
        assert_eq!(before, slot_ptr_mut(&mut slot) as *const String);
        // SAFETY: written just above.
        unsafe { slot.assume_init_drop() };
    }
}
