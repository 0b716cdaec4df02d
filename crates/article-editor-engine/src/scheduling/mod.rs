//! Time handling for autosave and transient notices.
//!
//! Everything time-dependent goes through [`Clock`] so tests can drive it
//! with a [`ManualClock`] instead of sleeping.

pub mod clock;
pub mod debounce;

pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::{DEFAULT_AUTOSAVE_DELAY, Debouncer};
