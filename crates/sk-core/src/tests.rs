//! Unit tests for sk-core primitives.

#[cfg(test)]
mod ids {
    use crate::{DepotId, DroneId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = VehicleId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VehicleId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(DroneId(0) < DroneId(1));
        assert!(DepotId(100) > DepotId(99));
    }

    #[test]
    fn display_uses_entity_label() {
        assert_eq!(VehicleId(7).to_string(), "vehicle-7");
        assert_eq!(DepotId(0).to_string(), "depot-0");
    }
}

#[cfg(test)]
mod time {
    use crate::time::{days_to_hours, years_to_hours};
    use crate::{HOURS_PER_YEAR, SimClock};

    #[test]
    fn unit_conversions() {
        assert_eq!(days_to_hours(2.0), 48.0);
        assert_eq!(years_to_hours(1.0), 8760.0);
        assert_eq!(HOURS_PER_YEAR, 8760.0);
    }

    #[test]
    fn clock_advances() {
        let mut clock = SimClock::new();
        assert_eq!(clock.now(), 0.0);
        clock.advance_to(12.5);
        assert_eq!(clock.now(), 12.5);
        clock.advance_to(12.5);
        assert_eq!(clock.now(), 12.5);
    }

    #[test]
    fn period_index() {
        let mut clock = SimClock::new();
        clock.advance_to(HOURS_PER_YEAR * 2.5);
        assert_eq!(clock.period_index(HOURS_PER_YEAR), 2);
        assert_eq!(clock.period_index(0.0), 0);
    }

    #[test]
    fn clock_dhm() {
        let mut clock = SimClock::new();
        clock.advance_to(25.5);
        assert_eq!(clock.elapsed_dhm(), (1, 1, 30));
        assert_eq!(clock.to_string(), "t=25.50h (day 1 01:30)");
    }
}

#[cfg(test)]
mod rng {
    use rand::Rng;

    use crate::{SeededRandom, replication_seed};

    #[test]
    fn first_value_matches_lcg_constants() {
        let mut rng = SeededRandom::new(0);
        let expected = 1_013_904_223.0 / 4_294_967_296.0;
        assert_eq!(rng.next_f64(), expected);
    }

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SeededRandom::new(12345);
        let mut r2 = SeededRandom::new(12345);
        for _ in 0..10_000 {
            assert_eq!(r1.next_f64(), r2.next_f64());
        }
    }

    #[test]
    fn mixed_call_sequence_stays_in_lockstep() {
        let mut r1 = SeededRandom::new(99);
        let mut r2 = SeededRandom::new(99);
        for i in 0..2_000 {
            match i % 4 {
                0 => assert_eq!(r1.next_gaussian(5.0, 2.0), r2.next_gaussian(5.0, 2.0)),
                1 => assert_eq!(r1.next_exponential(0.5), r2.next_exponential(0.5)),
                2 => assert_eq!(r1.next_int(0, 10), r2.next_int(0, 10)),
                _ => assert_eq!(r1.next_bool(0.3), r2.next_bool(0.3)),
            }
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRandom::new(1);
        let mut b = SeededRandom::new(2);
        assert_ne!(a.next_f64(), b.next_f64());
    }

    #[test]
    fn seed_is_preserved() {
        let mut rng = SeededRandom::new(777);
        for _ in 0..10 {
            rng.next_f64();
        }
        assert_eq!(rng.seed(), 777);
    }

    #[test]
    fn next_in_unit_interval() {
        let mut rng = SeededRandom::new(42);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "got {v}");
        }
    }

    #[test]
    fn range_and_int_bounds() {
        let mut rng = SeededRandom::new(7);
        for _ in 0..10_000 {
            let v = rng.next_range(-3.0, 8.0);
            assert!((-3.0..8.0).contains(&v));
            let n = rng.next_int(5, 10);
            assert!((5..10).contains(&n));
        }
    }

    #[test]
    fn bool_extremes() {
        let mut rng = SeededRandom::new(0);
        for _ in 0..100 {
            assert!(!rng.next_bool(0.0));
            assert!(rng.next_bool(1.0));
        }
    }

    #[test]
    fn gaussian_shape() {
        let mut rng = SeededRandom::new(2024);
        let samples: Vec<f64> = (0..1_000).map(|_| rng.next_gaussian(100.0, 15.0)).collect();
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        assert!((mean - 100.0).abs() < 1.0, "mean {mean}");
        assert!((var.sqrt() - 15.0).abs() < 1.0, "std {}", var.sqrt());
    }

    #[test]
    fn exponential_mean() {
        let mut rng = SeededRandom::new(31337);
        let rate = 0.25;
        let samples: Vec<f64> = (0..1_000).map(|_| rng.next_exponential(rate)).collect();
        assert!(samples.iter().all(|&x| x >= 0.0));
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 1.0 / rate).abs() < 0.1 / rate, "mean {mean}");
    }

    #[test]
    fn rand_adaptors_share_the_stream() {
        let mut a = SeededRandom::new(5);
        let mut b = SeededRandom::new(5);
        let x: u32 = a.r#gen();
        let y = rand::RngCore::next_u32(&mut b);
        assert_eq!(x, y);
        let v = a.gen_range(0..100);
        assert!((0..100).contains(&v));
    }

    #[test]
    fn replication_seeds_are_append_only() {
        assert_eq!(replication_seed(100, 0), 100);
        assert_eq!(replication_seed(100, 7), 107);
        assert_eq!(replication_seed(u64::MAX, 1), 0);
    }
}

#[cfg(test)]
mod transition {
    use crate::{IllegalTransition, VehicleId};

    #[test]
    fn message_names_entity_state_and_action() {
        let err = IllegalTransition::new(VehicleId(2), "failed", "start loading");
        assert_eq!(err.to_string(), "vehicle-2: cannot start loading while failed");
    }
}

#[cfg(test)]
mod validate {
    use crate::ConfigError;
    use crate::validate::{count, in_range, non_negative, positive};

    #[test]
    fn accepts_valid_values() {
        assert_eq!(positive("rate", 0.5), Ok(0.5));
        assert_eq!(non_negative("rate", 0.0), Ok(0.0));
        assert_eq!(in_range("p", 1.0, 0.0, 1.0), Ok(1.0));
        assert_eq!(count("vehicles", 3), Ok(3));
    }

    #[test]
    fn rejects_degenerate_values() {
        assert!(matches!(positive("rate", 0.0), Err(ConfigError::NotPositive { .. })));
        assert!(matches!(non_negative("rate", -1.0), Err(ConfigError::Negative { .. })));
        assert!(matches!(positive("rate", f64::NAN), Err(ConfigError::NotFinite { .. })));
        assert!(matches!(in_range("p", 1.5, 0.0, 1.0), Err(ConfigError::OutOfRange { .. })));
        assert!(count("vehicles", 0).is_err());
    }
}
