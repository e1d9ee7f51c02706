//! Monotonic millisecond time source

/// A free running millisecond counter. It may wrap around; elapsed time is
/// computed with wrapping arithmetic.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin
    fn millis(&mut self) -> u32;

    /// Milliseconds elapsed since `start`, a value previously returned by
    /// [`millis`](#tymethod.millis)
    fn elapsed_since(&mut self, start: u32) -> u32 {
        self.millis().wrapping_sub(start)
    }
}

impl<F> Clock for F where F: FnMut() -> u32
{
    fn millis(&mut self) -> u32 {
        self()
    }
}
