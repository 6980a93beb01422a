//! Hardware Abstraction Layer
//!
//! The drivers get their I/O through `embedded-hal` and `embedded-io`;
//! the only thing those traits do not cover is a free-running millisecond
//! counter, which is defined here.

#[cfg(feature = "embedded")]
pub mod timer;

/// Free-running millisecond time source
///
/// The counter is allowed to wrap at `u32::MAX`; consumers must compare
/// timestamps with wrapping arithmetic.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u32;

    /// Milliseconds elapsed since `earlier`, tolerating one counter wrap
    fn elapsed_since(&self, earlier: u32) -> u32 {
        self.now_ms().wrapping_sub(earlier)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
