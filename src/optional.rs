use crate::addr;
use crate::error::BadOptionalAccess;
use crate::macros::trace;
use crate::traits::{is_trivially_destructible, Swappable};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::MaybeUninit;
use core::ops::{Deref, DerefMut};

/// Marker for "no value", comparable against any [`Optional`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nullopt;

pub const NULLOPT: Nullopt = Nullopt;

/// A possibly-absent value stored inline
///
/// `Optional<T>` keeps its value in a slot inside the wrapper itself, next to
/// a flag recording whether the slot currently holds a live `T`. The value
/// exists exactly while the optional is engaged: it is written into the slot
/// before the flag is raised, and the flag is lowered before the value is
/// dropped.
///
/// Assigning between two engaged optionals reuses the slot and assigns the
/// value in place, so the value keeps its address.
///
/// # Examples
///
/// ```
/// use sovran_values::Optional;
///
/// let mut o = Optional::<i32>::new();
/// assert!(!o.has_value());
///
/// o.emplace(|| 42);
/// assert_eq!(*o, 42);
///
/// o.reset();
/// assert!(!o.has_value());
/// ```
pub struct Optional<T> {
    slot: MaybeUninit<T>,
    engaged: bool,
}

impl<T> Optional<T> {
    /// Creates a disengaged optional.
    pub const fn new() -> Self {
        Self {
            slot: MaybeUninit::uninit(),
            engaged: false,
        }
    }

    /// Creates an engaged optional holding `value`.
    pub const fn some(value: T) -> Self {
        Self {
            slot: MaybeUninit::new(value),
            engaged: true,
        }
    }

    /// Creates an engaged optional whose value is built by `make`.
    pub fn in_place(make: impl FnOnce() -> T) -> Self {
        Self::some(make())
    }

    /// Creates an engaged optional holding a `T` collected from `items`.
    pub fn from_list<U>(items: impl IntoIterator<Item = U>) -> Self
    where
        T: FromIterator<U>,
    {
        Self::some(items.into_iter().collect())
    }

    pub fn has_value(&self) -> bool {
        self.engaged
    }

    pub fn is_some(&self) -> bool {
        self.engaged
    }

    pub fn is_none(&self) -> bool {
        !self.engaged
    }

    /// Address of the value slot. Only valid to read through while engaged.
    pub fn as_ptr(&self) -> *const T {
        addr::slot_ptr(&self.slot)
    }

    /// Mutable address of the value slot. Only valid to read through while
    /// engaged.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        addr::slot_ptr_mut(&mut self.slot)
    }

    /// Reference to the value without checking for one.
    ///
    /// # Safety
    ///
    /// The optional must be engaged.
    pub unsafe fn get_unchecked(&self) -> &T {
        debug_assert!(self.engaged, "get_unchecked on a disengaged Optional");
        // SAFETY: the caller guarantees the slot holds a live value.
        unsafe { self.slot.assume_init_ref() }
    }

    /// Mutable reference to the value without checking for one.
    ///
    /// # Safety
    ///
    /// The optional must be engaged.
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut T {
        debug_assert!(self.engaged, "get_unchecked_mut on a disengaged Optional");
        // SAFETY: the caller guarantees the slot holds a live value.
        unsafe { self.slot.assume_init_mut() }
    }

    /// Reference to the value.
    ///
    /// # Errors
    ///
    /// Returns [`BadOptionalAccess`] if the optional is disengaged.
    pub fn value(&self) -> Result<&T, BadOptionalAccess> {
        self.as_option().ok_or(BadOptionalAccess)
    }

    /// Mutable reference to the value.
    ///
    /// # Errors
    ///
    /// Returns [`BadOptionalAccess`] if the optional is disengaged.
    pub fn value_mut(&mut self) -> Result<&mut T, BadOptionalAccess> {
        self.as_option_mut().ok_or(BadOptionalAccess)
    }

    /// Moves the value out, consuming the optional.
    ///
    /// # Errors
    ///
    /// Returns [`BadOptionalAccess`] if the optional is disengaged.
    pub fn into_value(self) -> Result<T, BadOptionalAccess> {
        let mut this = self;
        this.take_value().ok_or(BadOptionalAccess)
    }

    /// Copy of the value, or `fallback` converted to `T` when disengaged.
    ///
    /// ```
    /// use sovran_values::Optional;
    ///
    /// let name = Optional::<String>::new();
    /// assert_eq!(name.value_or("anonymous"), "anonymous");
    /// ```
    pub fn value_or<U: Into<T>>(&self, fallback: U) -> T
    where
        T: Clone,
    {
        match self.as_option() {
            Some(value) => value.clone(),
            None => fallback.into(),
        }
    }

    /// The value, or `fallback` converted to `T` when disengaged.
    pub fn into_value_or<U: Into<T>>(self, fallback: U) -> T {
        let mut this = self;
        match this.take_value() {
            Some(value) => value,
            None => fallback.into(),
        }
    }

    pub fn as_option(&self) -> Option<&T> {
        if self.engaged {
            // SAFETY: engaged, so the slot holds a live value.
            Some(unsafe { self.slot.assume_init_ref() })
        } else {
            None
        }
    }

    pub fn as_option_mut(&mut self) -> Option<&mut T> {
        if self.engaged {
            // SAFETY: engaged, so the slot holds a live value.
            Some(unsafe { self.slot.assume_init_mut() })
        } else {
            None
        }
    }

    /// Moves the value into a new optional, leaving this one disengaged.
    pub fn take(&mut self) -> Self {
        match self.take_value() {
            Some(value) => Self::some(value),
            None => Self::new(),
        }
    }

    fn take_value(&mut self) -> Option<T> {
        if !self.engaged {
            return None;
        }
        self.engaged = false;
        // SAFETY: the slot held a live value and the flag is already down, so
        // nothing else will read or drop it.
        Some(unsafe { self.slot.assume_init_read() })
    }

    // Only called while disengaged.
    fn engage(&mut self, value: T) -> &mut T {
        debug_assert!(!self.engaged);
        let value = self.slot.write(value);
        self.engaged = true;
        value
    }

    /// Replaces the contents with `source`.
    ///
    /// | `self`     | `source`   | effect                               |
    /// |------------|------------|--------------------------------------|
    /// | disengaged | disengaged | nothing                              |
    /// | engaged    | disengaged | value dropped, `self` disengaged     |
    /// | disengaged | engaged    | value moved into the slot            |
    /// | engaged    | engaged    | value assigned in place              |
    pub fn assign(&mut self, source: Optional<T>) {
        let mut source = source;
        match (self.engaged, source.take_value()) {
            (false, None) => {}
            (true, None) => self.reset(),
            (false, Some(value)) => {
                self.engage(value);
            }
            (true, Some(value)) => {
                // SAFETY: engaged.
                *unsafe { self.get_unchecked_mut() } = value;
            }
        }
    }

    /// Stores `value`, assigning in place if a value is already held.
    pub fn set(&mut self, value: T) {
        match self.as_option_mut() {
            Some(current) => *current = value,
            None => {
                self.engage(value);
            }
        }
    }

    /// Drops any held value. Same as [`reset`](Self::reset).
    pub fn set_none(&mut self) {
        self.reset();
    }

    /// Drops any held value, then stores the one built by `make`.
    ///
    /// The old value is gone before `make` runs: if `make` panics the
    /// optional is left disengaged.
    pub fn emplace(&mut self, make: impl FnOnce() -> T) -> &mut T {
        self.reset();
        trace!("emplacing `{}`", core::any::type_name::<T>());
        self.engage(make())
    }

    /// Like [`emplace`](Self::emplace), collecting the new value from `items`.
    pub fn emplace_list<U>(&mut self, items: impl IntoIterator<Item = U>) -> &mut T
    where
        T: FromIterator<U>,
    {
        self.emplace(|| items.into_iter().collect())
    }

    /// Drops the held value, if any, leaving the optional disengaged.
    pub fn reset(&mut self) {
        if !self.engaged {
            return;
        }
        self.engaged = false;
        if !is_trivially_destructible::<T>() {
            trace!("dropping `{}`", core::any::type_name::<T>());
            // SAFETY: the slot held a live value; the flag is down, so this is
            // the only drop it gets.
            unsafe { self.slot.assume_init_drop() };
        }
    }

    /// Exchanges contents with `other`.
    ///
    /// Two engaged values are swapped in place. When only one side is
    /// engaged its value moves across and the engagement flags trade places.
    pub fn swap(&mut self, other: &mut Optional<T>) {
        match (self.engaged, other.engaged) {
            (false, false) => {}
            (true, true) => {
                // SAFETY: both engaged.
                let (ours, theirs) = unsafe { (self.get_unchecked_mut(), other.get_unchecked_mut()) };
                ours.swap_with(theirs);
            }
            (true, false) => {
                if let Some(value) = self.take_value() {
                    other.engage(value);
                }
            }
            (false, true) => other.swap(self),
        }
    }

    /// `true` when engaged and the value equals `value`.
    pub fn eq_value(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_option().is_some_and(|held| held == value)
    }

    /// Orders against a bare value. A disengaged optional is less than any
    /// value.
    pub fn partial_cmp_value(&self, value: &T) -> Option<Ordering>
    where
        T: PartialOrd,
    {
        match self.as_option() {
            Some(held) => held.partial_cmp(value),
            None => Some(Ordering::Less),
        }
    }

    /// Total-order counterpart of [`partial_cmp_value`](Self::partial_cmp_value).
    pub fn cmp_value(&self, value: &T) -> Ordering
    where
        T: Ord,
    {
        match self.as_option() {
            Some(held) => held.cmp(value),
            None => Ordering::Less,
        }
    }

    /// `value == self`, with the bare value on the left.
    pub fn value_eq(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_option().is_some_and(|held| value == held)
    }

    /// Orders `value` against this optional. Any value is greater than a
    /// disengaged optional.
    pub fn value_partial_cmp(&self, value: &T) -> Option<Ordering>
    where
        T: PartialOrd,
    {
        match self.as_option() {
            Some(held) => value.partial_cmp(held),
            None => Some(Ordering::Greater),
        }
    }

    pub fn value_cmp(&self, value: &T) -> Ordering
    where
        T: Ord,
    {
        match self.as_option() {
            Some(held) => value.cmp(held),
            None => Ordering::Greater,
        }
    }
}

impl<T> Drop for Optional<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Optional<T> {
    fn clone(&self) -> Self {
        match self.as_option() {
            Some(value) => Self::some(value.clone()),
            None => Self::new(),
        }
    }

    /// Copy assignment. A panicking clone into a disengaged optional leaves it
    /// disengaged; between two engaged optionals the value's own
    /// `clone_from` runs in place.
    fn clone_from(&mut self, source: &Self) {
        match (self.engaged, source.as_option()) {
            (false, None) => {}
            (true, None) => self.reset(),
            (false, Some(value)) => {
                self.engage(value.clone());
            }
            (true, Some(value)) => {
                // SAFETY: engaged.
                unsafe { self.get_unchecked_mut() }.clone_from(value);
            }
        }
    }
}

/// Checked access: panics with "bad optional access" when disengaged.
impl<T> Deref for Optional<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self.value() {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> DerefMut for Optional<T> {
    fn deref_mut(&mut self) -> &mut T {
        match self.value_mut() {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::some(value),
            None => Self::new(),
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.into_value().ok()
    }
}

impl<T: PartialEq> PartialEq for Optional<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_option() == other.as_option()
    }
}

impl<T: Eq> Eq for Optional<T> {}

impl<T: PartialOrd> PartialOrd for Optional<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_option().partial_cmp(&other.as_option())
    }
}

impl<T: Ord> Ord for Optional<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_option().cmp(&other.as_option())
    }
}

impl<T> PartialEq<Nullopt> for Optional<T> {
    fn eq(&self, _: &Nullopt) -> bool {
        !self.engaged
    }
}

impl<T> PartialEq<Optional<T>> for Nullopt {
    fn eq(&self, other: &Optional<T>) -> bool {
        !other.engaged
    }
}

impl<T> PartialOrd<Nullopt> for Optional<T> {
    fn partial_cmp(&self, _: &Nullopt) -> Option<Ordering> {
        Some(if self.engaged {
            Ordering::Greater
        } else {
            Ordering::Equal
        })
    }
}

impl<T> PartialOrd<Optional<T>> for Nullopt {
    fn partial_cmp(&self, other: &Optional<T>) -> Option<Ordering> {
        Some(if other.engaged {
            Ordering::Less
        } else {
            Ordering::Equal
        })
    }
}

impl<T: Hash> Hash for Optional<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_option().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            Some(value) => f.debug_tuple("Optional").field(value).finish(),
            None => f.write_str("Nullopt"),
        }
    }
}

/// Builds an engaged optional holding `value`.
pub fn make_optional<T>(value: T) -> Optional<T> {
    Optional::some(value)
}

/// Builds an engaged optional holding the `T` produced by `make`.
pub fn make_optional_with<T>(make: impl FnOnce() -> T) -> Optional<T> {
    Optional::in_place(make)
}

/// Builds an engaged optional holding a `T` collected from `items`.
pub fn make_optional_list<T, U>(items: impl IntoIterator<Item = U>) -> Optional<T>
where
    T: FromIterator<U>,
{
    Optional::from_list(items)
}
