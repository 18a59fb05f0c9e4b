use crate::error::BadAnyCast;
use crate::macros::trace;
use crate::traits::Storable;
use alloc::boxed::Box;
use core::any::{type_name, Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

/// Runtime identity of the type held by an [`AnyValue`]
///
/// Two identities are equal exactly when they name the same type. The name is
/// carried along for diagnostics only and plays no part in comparisons.
#[derive(Clone, Copy)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

// Identity reported by an empty container. Uninhabited, so no value can ever
// be stored under it.
enum NoValue {}

impl ValueType {
    /// Identity of `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Identity reported when nothing is held
    pub fn none() -> Self {
        Self {
            id: TypeId::of::<NoValue>(),
            name: "<none>",
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_none(&self) -> bool {
        self.id == TypeId::of::<NoValue>()
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl Hash for ValueType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Heap object owning one value whose concrete type is erased at the
/// `AnyValue` interface.
trait Holder {
    fn value_type(&self) -> ValueType;

    /// Deep copy of the holder and its value.
    fn clone_box(&self) -> Box<dyn Holder>;

    /// The held value, not the holder.
    fn as_any(&self) -> &dyn Any;

    /// The held value, not the holder.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The holder itself, for recovering the value by move.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

struct Value<T> {
    value: T,
}

impl<T: Storable> Holder for Value<T> {
    fn value_type(&self) -> ValueType {
        ValueType::of::<T>()
    }

    fn clone_box(&self) -> Box<dyn Holder> {
        trace!("cloning held `{}`", type_name::<T>());
        Box::new(Value {
            value: self.value.clone(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        &self.value
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.value
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A type-erased container for a single cloneable value
///
/// `AnyValue` owns at most one value of any [`Storable`] type. The value lives
/// on the heap behind a holder that knows how to report its type and clone
/// itself, so cloning an `AnyValue` deep-copies whatever it holds.
///
/// Values come back out only by their exact type: there is no conversion and
/// no matching through trait objects.
///
/// # Examples
///
/// ```
/// use sovran_values::{AnyValue, BadAnyCast};
///
/// let mut value = AnyValue::from_value(5i32);
/// assert_eq!(value.cast::<i32>(), Ok(5));
///
/// *value.cast_mut::<i32>().unwrap() = 10;
/// assert_eq!(value.cast::<i32>(), Ok(10));
///
/// value.set("Meow");
/// assert_eq!(value.cast::<&str>(), Ok("Meow"));
/// assert!(matches!(value.cast::<i32>(), Err(BadAnyCast { .. })));
/// ```
#[derive(Default)]
pub struct AnyValue {
    holder: Option<Box<dyn Holder>>,
}

impl AnyValue {
    /// Creates an empty container. Nothing is allocated.
    pub const fn new() -> Self {
        Self { holder: None }
    }

    /// Creates a container holding `value`.
    ///
    /// Passing an `AnyValue` adopts it as-is instead of nesting one container
    /// inside another.
    pub fn from_value<T: Storable>(value: T) -> Self {
        let mut slot = Some(value);
        let adopted = (&mut slot as &mut dyn Any)
            .downcast_mut::<Option<AnyValue>>()
            .and_then(Option::take);
        if let Some(any) = adopted {
            return any;
        }
        match slot {
            Some(value) => Self::boxed(value),
            None => Self::new(),
        }
    }

    /// Creates a container whose value is built by `make`.
    ///
    /// ```
    /// use sovran_values::AnyValue;
    ///
    /// let value = AnyValue::in_place(|| (1, 2));
    /// assert_eq!(value.cast::<(i32, i32)>(), Ok((1, 2)));
    /// ```
    pub fn in_place<T: Storable>(make: impl FnOnce() -> T) -> Self {
        Self::boxed(make())
    }

    /// Creates a container holding a `T` collected from `items`.
    pub fn from_list<T, U>(items: impl IntoIterator<Item = U>) -> Self
    where
        T: Storable + FromIterator<U>,
    {
        Self::boxed(items.into_iter().collect::<T>())
    }

    fn boxed<T: Storable>(value: T) -> Self {
        trace!("allocating holder for `{}`", type_name::<T>());
        Self {
            holder: Some(Box::new(Value { value })),
        }
    }

    /// Moves the held value into a new container, leaving this one empty.
    pub fn take(&mut self) -> Self {
        Self {
            holder: self.holder.take(),
        }
    }

    /// Replaces the contents with a copy of `source`.
    ///
    /// The copy is made before anything is released, so if cloning panics
    /// `self` keeps its previous value.
    pub fn assign(&mut self, source: &AnyValue) {
        let mut staged = source.clone();
        self.swap(&mut staged);
    }

    /// Replaces the contents with those of `source`.
    pub fn assign_from(&mut self, source: AnyValue) {
        let mut staged = source;
        self.swap(&mut staged);
    }

    /// Replaces the contents with `value`.
    ///
    /// The new holder is allocated before the old one is released.
    pub fn set<T: Storable>(&mut self, value: T) {
        let mut staged = Self::from_value(value);
        self.swap(&mut staged);
    }

    /// Releases the current value, then stores the one built by `make`.
    ///
    /// The old value is gone before `make` runs: if `make` panics the
    /// container is left empty. Use [`set`](Self::set) when the previous value
    /// must survive a failed construction.
    pub fn emplace<T: Storable>(&mut self, make: impl FnOnce() -> T) -> &mut T {
        self.reset();
        trace!("emplacing `{}`", type_name::<T>());
        let holder = self.holder.insert(Box::new(Value { value: make() }));
        match holder.as_any_mut().downcast_mut::<T>() {
            Some(value) => value,
            None => unreachable!("holder was just built for `{}`", type_name::<T>()),
        }
    }

    /// Like [`emplace`](Self::emplace), collecting the new value from `items`.
    pub fn emplace_list<T, U>(&mut self, items: impl IntoIterator<Item = U>) -> &mut T
    where
        T: Storable + FromIterator<U>,
    {
        self.emplace(|| items.into_iter().collect::<T>())
    }

    /// Drops the held value, if any.
    pub fn reset(&mut self) {
        if let Some(holder) = self.holder.take() {
            trace!("releasing `{}`", holder.value_type());
            drop(holder);
        }
    }

    /// Exchanges contents with `other`. Only the holders move.
    pub fn swap(&mut self, other: &mut AnyValue) {
        core::mem::swap(&mut self.holder, &mut other.holder);
    }

    pub fn has_value(&self) -> bool {
        self.holder.is_some()
    }

    /// Identity of the held type, or [`ValueType::none`] when empty.
    pub fn value_type(&self) -> ValueType {
        self.holder
            .as_deref()
            .map_or_else(ValueType::none, Holder::value_type)
    }

    /// `true` when the held value is exactly a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value_type().id() == TypeId::of::<T>()
    }

    /// Reference to the held value if it is exactly a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let holder = self.holder.as_deref()?;
        if holder.value_type().id() != TypeId::of::<T>() {
            return None;
        }
        holder.as_any().downcast_ref::<T>()
    }

    /// Mutable reference to the held value if it is exactly a `T`.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        let holder = self.holder.as_deref_mut()?;
        if holder.value_type().id() != TypeId::of::<T>() {
            return None;
        }
        holder.as_any_mut().downcast_mut::<T>()
    }

    /// Copy of the held value.
    ///
    /// # Errors
    ///
    /// Returns [`BadAnyCast`] if the container is empty or holds another type.
    pub fn cast<T: Storable>(&self) -> Result<T, BadAnyCast> {
        self.cast_ref::<T>().cloned()
    }

    /// Reference to the held value.
    ///
    /// # Errors
    ///
    /// Returns [`BadAnyCast`] if the container is empty or holds another type.
    pub fn cast_ref<T: Any>(&self) -> Result<&T, BadAnyCast> {
        let found = self.value_type();
        self.downcast_ref::<T>()
            .ok_or_else(|| BadAnyCast::new(type_name::<T>(), found.name()))
    }

    /// Mutable reference to the held value.
    ///
    /// # Errors
    ///
    /// Returns [`BadAnyCast`] if the container is empty or holds another type.
    pub fn cast_mut<T: Any>(&mut self) -> Result<&mut T, BadAnyCast> {
        let found = self.value_type();
        self.downcast_mut::<T>()
            .ok_or_else(|| BadAnyCast::new(type_name::<T>(), found.name()))
    }

    /// Moves the held value out, consuming the container.
    ///
    /// # Errors
    ///
    /// Returns [`BadAnyCast`] if the container is empty or holds another type.
    /// The container is dropped either way; see
    /// [`try_into_value`](Self::try_into_value) to get it back on mismatch.
    pub fn into_value<T: Any>(self) -> Result<T, BadAnyCast> {
        self.try_into_value::<T>().map_err(|any| {
            BadAnyCast::new(type_name::<T>(), any.value_type().name())
        })
    }

    /// Moves the held value out, or hands the container back untouched if it
    /// does not hold a `T`.
    pub fn try_into_value<T: Any>(mut self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.holder.take().map(Holder::into_any) {
            Some(holder) => match holder.downcast::<Value<T>>() {
                Ok(value) => Ok(value.value),
                Err(_) => unreachable!("holder type was checked against `{}`", type_name::<T>()),
            },
            None => Err(self),
        }
    }
}

impl Clone for AnyValue {
    fn clone(&self) -> Self {
        Self {
            holder: self.holder.as_deref().map(Holder::clone_box),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValue")
            .field("type", &self.value_type())
            .finish()
    }
}

/// Reference to the value in `operand` if there is one and it is exactly a `T`.
///
/// Never fails loudly: a missing container, an empty one, or a type mismatch
/// all give `None`.
pub fn any_cast_ref<T: Any>(operand: Option<&AnyValue>) -> Option<&T> {
    operand?.downcast_ref::<T>()
}

/// Mutable counterpart of [`any_cast_ref`].
pub fn any_cast_mut<T: Any>(operand: Option<&mut AnyValue>) -> Option<&mut T> {
    operand?.downcast_mut::<T>()
}

/// Copy of the value in `operand`.
///
/// # Errors
///
/// Returns [`BadAnyCast`] if `operand` is empty or holds another type.
pub fn any_cast<T: Storable>(operand: &AnyValue) -> Result<T, BadAnyCast> {
    operand.cast::<T>()
}

/// Builds an `AnyValue` holding the `T` produced by `make`.
pub fn make_any<T: Storable>(make: impl FnOnce() -> T) -> AnyValue {
    AnyValue::in_place(make)
}

/// Builds an `AnyValue` holding a `T` collected from `items`.
pub fn make_any_list<T, U>(items: impl IntoIterator<Item = U>) -> AnyValue
where
    T: Storable + FromIterator<U>,
{
    AnyValue::from_list::<T, U>(items)
}
