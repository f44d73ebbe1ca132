//! Logging shims.
//!
//! Library code is built both for the target (with `defmt`) and for host
//! tests (without a global logger), so log calls go through these macros.
//! Arguments are always borrowed so they count as used in both builds.
#![macro_use]
#![allow(unused_macros)]

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::debug!($s $(, $x)*);
            $( let _ = & $x; )*
        }
    };
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::info!($s $(, $x)*);
            $( let _ = & $x; )*
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::warn!($s $(, $x)*);
            $( let _ = & $x; )*
        }
    };
}
