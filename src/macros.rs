/// Lifecycle tracing, routed to `log::trace!` when the `log` feature is on.
///
/// With the feature off the arguments are still type-checked but nothing is
/// formatted or emitted.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        {
            ::log::trace!(target: "sovran_values", $($arg)*);
        }
        #[cfg(not(feature = "log"))]
        {
            let _ = format_args!($($arg)*);
        }
    };
}

pub(crate) use trace;
