//! Build-time feature flags.
//!
//! Each optional tier of the crate is selected by a Cargo feature. The flags
//! below report which tiers were compiled in; they carry no behavior of their
//! own.

/// `true` when the crate links `std` (the `std` feature)
pub const HAS_STD: bool = cfg!(feature = "std");

/// `true` when lifecycle tracing through `log` is compiled in (the `log` feature)
pub const HAS_LOG: bool = cfg!(feature = "log");

/// Snapshot of the compiled feature tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub std: bool,
    pub log: bool,
}

impl Features {
    /// The tiers this build of the crate was compiled with.
    pub const fn current() -> Self {
        Self {
            std: HAS_STD,
            log: HAS_LOG,
        }
    }

    /// `true` when `std::error::Error` is implemented for the error types.
    pub const fn has_std_errors(&self) -> bool {
        self.std
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_matches_cfg() {
        let features = Features::current();
        assert_eq!(features.std, cfg!(feature = "std"));
        assert_eq!(features.log, cfg!(feature = "log"));
        assert_eq!(features.has_std_errors(), cfg!(feature = "std"));
        assert_eq!(features, Features::default());
    }
}
