//! Where the runner hands control back to its host between replications.

/// A cooperative yield point.
///
/// The runner calls [`yield_now`](Self::yield_now) after every progress
/// report and whenever the configured yield interval has elapsed.  It never
/// yields inside a replication.
pub trait HostScheduler {
    fn yield_now(&mut self);
}

/// Default scheduler: gives the rest of the time slice back to the OS.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadYield;

impl HostScheduler for ThreadYield {
    #[inline]
    fn yield_now(&mut self) {
        std::thread::yield_now();
    }
}
