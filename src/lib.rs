//! # sovran-values
//!
//! Value-semantic containers with manual storage management.
//!
//! `sovran-values` provides two small containers that own a value which may be
//! absent, and behave like plain values themselves: cloning copies the
//! contents, moving hands them over, and dropping releases them.
//!
//! ## Key Features
//!
//! - **`AnyValue`**: holds one value of any cloneable type behind a heap
//!   holder, clones it deeply, and hands it back only by its exact type
//! - **`Optional<T>`**: holds at most one `T` inline, with an explicit
//!   engaged flag and assignment that reuses the slot in place
//! - **Panic-aware**: assignment stages the new value before releasing the
//!   old one; `emplace` releases first and documents that it does
//! - **`no_std` ready**: only `alloc` is required when the `std` feature is off
//!
//! ## Usage Examples
//!
//! ### Type-erased values
//!
//! ```rust
//! use sovran_values::{any_cast, AnyValue, BadAnyCast};
//!
//! fn main() -> Result<(), BadAnyCast> {
//!     let mut value = AnyValue::from_value(5i32);
//!     assert_eq!(any_cast::<i32>(&value)?, 5);
//!
//!     // Modify the held value in place
//!     *value.cast_mut::<i32>()? = 10;
//!     assert_eq!(value.cast::<i32>()?, 10);
//!
//!     // Replace it with a value of a different type
//!     value.set("Meow");
//!     assert_eq!(value.cast::<&str>()?, "Meow");
//!
//!     // Clones are independent
//!     let copy = value.clone();
//!     value.reset();
//!     assert!(!value.has_value());
//!     assert_eq!(copy.cast::<&str>()?, "Meow");
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Optional values
//!
//! ```rust
//! use sovran_values::{BadOptionalAccess, Optional, NULLOPT};
//!
//! fn main() -> Result<(), BadOptionalAccess> {
//!     let mut o = Optional::<i32>::new();
//!     assert!(o == NULLOPT);
//!
//!     o.emplace(|| 42);
//!     assert_eq!(*o.value()?, 42);
//!     assert_eq!(o.value_or(0), 42);
//!
//!     o.reset();
//!     assert_eq!(o.value(), Err(BadOptionalAccess));
//!     assert_eq!(o.value_or(7), 7);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Error Handling
//!
//! ```rust
//! use sovran_values::{AnyValue, ErrorCategory, ValueError};
//!
//! let value = AnyValue::from_value(vec!["setting1", "setting2"]);
//!
//! match value.cast::<String>().map_err(ValueError::from) {
//!     Ok(s) => println!("Config: {}", s),
//!     Err(e) => {
//!         assert_eq!(e.category(), ErrorCategory::BadCast);
//!         println!("Config is not a String: {}", e);
//!     }
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod addr;
mod any_value;
mod error;
pub mod features;
mod macros;
mod optional;
pub mod traits;

#[cfg(test)]
mod any_tests;

pub use addr::{address_of, address_of_mut};
pub use any_value::{any_cast, any_cast_mut, any_cast_ref, make_any, make_any_list, AnyValue, ValueType};
pub use error::{BadAnyCast, BadOptionalAccess, ErrorCategory, ValueError};
pub use optional::{make_optional, make_optional_list, make_optional_with, Nullopt, Optional, NULLOPT};
pub use traits::{Storable, Swappable};

// Re-export core::any for convenience
pub use core::any::{Any, TypeId};
