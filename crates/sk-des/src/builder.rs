//! Fluent builder for constructing a [`Simulator`].

use sk_core::validate::positive;
use sk_core::{SeededRandom, SimClock, SimTime};
use sk_queue::EventQueue;
use tracing::debug;

use crate::{Model, SimContext, SimResult, Simulator};

/// Fluent builder for [`Simulator<M>`].
///
/// # Required inputs
///
/// - `horizon` — simulated hours after which no event is processed
/// - `M: Model` — passed to [`build`][Self::build]
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                  |
/// |------------------------|------------------------------------------|
/// | `.period(h)`           | No period snapshots                      |
/// | `.seed(s)`             | `SeededRandom::from_entropy()`           |
/// | `.rng(r)`              | —  (overrides `.seed`)                   |
/// | `.queue_capacity(n)`   | Grows on demand                          |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(years_to_hours(15.0))
///     .period(HOURS_PER_YEAR)
///     .seed(42)
///     .build(model)?;
/// let output = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    horizon:        SimTime,
    period:         Option<SimTime>,
    seed:           Option<u64>,
    rng:            Option<SeededRandom>,
    queue_capacity: usize,
}

impl SimBuilder {
    pub fn new(horizon: SimTime) -> Self {
        Self {
            horizon,
            period:         None,
            seed:           None,
            rng:            None,
            queue_capacity: 0,
        }
    }

    /// Emit `Model::on_period_end` every `hours` of simulated time.
    pub fn period(mut self, hours: SimTime) -> Self {
        self.period = Some(hours);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use an existing random stream (e.g. one already advanced by a
    /// pre-generation step).
    pub fn rng(mut self, rng: SeededRandom) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Validate inputs, run [`Model::init`] at `t = 0` and return a
    /// ready-to-run [`Simulator`].
    pub fn build<M: Model>(self, mut model: M) -> SimResult<Simulator<M>> {
        let horizon = positive("horizon", self.horizon)?;
        let period = self.period.map(|p| positive("period", p)).transpose()?;

        let mut rng = match (self.rng, self.seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => SeededRandom::new(seed),
            (None, None) => {
                let rng = SeededRandom::from_entropy();
                debug!(seed = rng.seed(), "no seed supplied; seeded from clock");
                rng
            }
        };

        let mut queue = EventQueue::with_capacity(self.queue_capacity);
        let clock = SimClock::new();
        {
            let mut ctx = SimContext::new(clock.now(), horizon, &mut queue, &mut rng);
            model.init(&mut ctx);
        }

        Ok(Simulator {
            model,
            queue,
            rng,
            clock,
            horizon,
            period,
            periods_completed: 0,
            events_processed:  0,
            events_discarded:  0,
        })
    }
}
