//! `sk-queue` — the pending-event set of one replication.
//!
//! # Crate layout
//!
//! | Module          | Contents                                          |
//! |-----------------|---------------------------------------------------|
//! | [`event`]       | `SimEvent<K>` — time, insertion sequence, payload |
//! | [`event_queue`] | `EventQueue<K>` — binary min-heap on `(time, seq)`|
//!
//! # Ordering model
//!
//! ```text
//! key(e)  = (e.time, e.seq)
//! pop()   = event with the smallest key
//! seq     = insertion counter, assigned by the queue on push
//! ```
//!
//! Two events scheduled for the same instant therefore pop in the order they
//! were pushed.  Replications stay reproducible because that order is itself a
//! pure function of the seed.

pub mod event;
pub mod event_queue;

#[cfg(test)]
mod tests;

pub use event::SimEvent;
pub use event_queue::EventQueue;
