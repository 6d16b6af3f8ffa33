//! Property tests for the reduction and merge invariants.

use perftrack::{reduce, Experiment, History, RunInfo};
use proptest::prelude::*;

fn experiment(avg: f64) -> Experiment {
    Experiment {
        info: RunInfo {
            date: "2026-08-30T00:00:00+00:00".to_string(),
            repeat: 3,
            number: 0,
        },
        best: avg,
        avg,
        worst: avg,
    }
}

proptest! {
    /// best <= average <= worst for any non-empty trial set and positive
    /// iteration count.
    #[test]
    fn reduction_preserves_ordering(
        trials in prop::collection::vec(0.0f64..1e6, 1..64),
        number in 1usize..10_000,
    ) {
        let stats = reduce(&trials, trials.len(), number).unwrap();
        let slack = 1e-9 * stats.worst.max(1.0);
        prop_assert!(stats.best.is_finite());
        prop_assert!(stats.worst.is_finite());
        prop_assert!(stats.best <= stats.average + slack);
        prop_assert!(stats.average <= stats.worst + slack);
        prop_assert!(stats.best >= 0.0);
    }

    /// Reducing the same input twice gives bit-identical output.
    #[test]
    fn reduction_is_deterministic(
        trials in prop::collection::vec(0.0f64..1e6, 1..64),
        number in 1usize..10_000,
    ) {
        let a = reduce(&trials, trials.len(), number).unwrap();
        let b = reduce(&trials, trials.len(), number).unwrap();
        prop_assert_eq!(a.best.to_bits(), b.best.to_bits());
        prop_assert_eq!(a.average.to_bits(), b.average.to_bits());
        prop_assert_eq!(a.worst.to_bits(), b.worst.to_bits());
    }

    /// After merging any stream of experiments, best/worst hold the stream's
    /// extrema and last holds the final element.
    #[test]
    fn merge_tracks_running_extrema(
        averages in prop::collection::vec(0.0f64..1e3, 1..32),
    ) {
        let mut history = History::in_memory();
        for &avg in &averages {
            history.merge("prop.case", experiment(avg));
        }

        let record = history.lookup("prop.case").unwrap();
        let min = averages.iter().copied().fold(f64::INFINITY, f64::min);
        let max = averages.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(record.best.avg, min);
        prop_assert_eq!(record.worst.avg, max);
        prop_assert_eq!(record.last.avg, *averages.last().unwrap());
    }
}
