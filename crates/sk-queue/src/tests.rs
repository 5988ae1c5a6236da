//! Unit tests for sk-queue.

use sk_core::SeededRandom;

use crate::{EventQueue, SimEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Arrive(u32),
    Depart(u32),
}

// ── Basic operations ──────────────────────────────────────────────────────────

#[cfg(test)]
mod basics {
    use super::*;

    #[test]
    fn empty_queue() {
        let mut q: EventQueue<Kind> = EventQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert!(q.peek().is_none());
        assert!(q.pop().is_none());
        assert_eq!(q.next_time(), None);
    }

    #[test]
    fn pops_earliest_first() {
        let mut q = EventQueue::new();
        q.schedule_at(Kind::Arrive(1), 30.0);
        q.schedule_at(Kind::Arrive(2), 10.0);
        q.schedule_at(Kind::Arrive(3), 20.0);

        assert_eq!(q.peek().map(|e| e.kind), Some(Kind::Arrive(2)));
        let times: Vec<f64> = q.drain_sorted().into_iter().map(|e| e.time).collect();
        assert_eq!(times, vec![10.0, 20.0, 30.0]);
        assert!(q.is_empty());
    }

    #[test]
    fn schedule_after_offsets_from_now() {
        let mut q = EventQueue::new();
        q.schedule_after(Kind::Depart(0), 100.0, 2.5);
        let e = q.pop().unwrap();
        assert_eq!(e.time, 102.5);
        assert_eq!(e.kind, Kind::Depart(0));
    }

    #[test]
    fn clear_keeps_sequence_running() {
        let mut q = EventQueue::new();
        q.schedule_at(Kind::Arrive(0), 1.0);
        q.schedule_at(Kind::Arrive(1), 2.0);
        q.clear();
        assert!(q.is_empty());
        let seq = q.schedule_at(Kind::Arrive(2), 0.5);
        assert_eq!(seq, 2);
    }

    #[test]
    fn collect_from_events() {
        let q: EventQueue<Kind> = (0..5)
            .rev()
            .map(|i| SimEvent::new(i as f64, Kind::Arrive(i)))
            .collect();
        assert_eq!(q.len(), 5);
        assert_eq!(q.next_time(), Some(0.0));
    }
}

// ── Ordering guarantees ───────────────────────────────────────────────────────

#[cfg(test)]
mod ordering {
    use super::*;

    #[test]
    fn equal_times_pop_in_insertion_order() {
        let mut q = EventQueue::new();
        for i in 0..20 {
            q.schedule_at(Kind::Arrive(i), 5.0);
        }
        q.schedule_at(Kind::Depart(99), 1.0);

        let order: Vec<Kind> = q.drain_sorted().into_iter().map(|e| e.kind).collect();
        assert_eq!(order[0], Kind::Depart(99));
        let expected: Vec<Kind> = (0..20).map(Kind::Arrive).collect();
        assert_eq!(&order[1..], expected.as_slice());
    }

    #[test]
    fn sequence_numbers_are_assigned_on_push() {
        let mut q = EventQueue::new();
        let first = q.push(SimEvent::new(3.0, Kind::Arrive(0)));
        let second = q.push(SimEvent::new(3.0, Kind::Arrive(1)));
        assert_eq!((first, second), (0, 1));
        assert_eq!(q.pop().map(|e| e.seq()), Some(0));
    }

    #[test]
    fn heap_invariant_on_random_events() {
        let mut rng = SeededRandom::new(4242);
        let mut q = EventQueue::new();
        for i in 0..1_000 {
            // Coarse times so plenty of ties exercise the sequence tie-break.
            let t = (rng.next_f64() * 100.0).floor();
            q.schedule_at(Kind::Arrive(i), t);
            assert!(q.is_heap());
        }

        // Interleave pops and pushes.
        for i in 0..300 {
            q.pop();
            q.schedule_at(Kind::Depart(i), rng.next_range(0.0, 100.0));
            assert!(q.is_heap());
        }

        let drained = q.drain_sorted();
        assert_eq!(drained.len(), 1_000);
        for pair in drained.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.time < b.time || (a.time == b.time && a.seq() < b.seq()));
        }
    }
}
