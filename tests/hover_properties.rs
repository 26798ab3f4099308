//! Property tests for hover slicing
//!
//! Timestamps are generated as integers so midpoints are exact.

mod common;

use common::builders::{spectrogram, VariableBuilder};
use common::recording_target::{Call, RecordingTarget};
use proptest::prelude::*;
use tplot_rs::{
    set_option, Axis, HoverEvent, HoverIndexer, HoverOutcome, HoverSource, OptionValue,
    VariableStore,
};

/// Strictly increasing timestamps with even gaps
fn times_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1u32..50, 2..40).prop_map(|gaps| {
        let mut t = 0i64;
        gaps.iter()
            .map(|g| {
                t += i64::from(*g) * 2;
                t as f64
            })
            .collect()
    })
}

fn store_for(times: &[f64]) -> VariableStore {
    let rows = (0..times.len())
        .map(|i| vec![i as f64 + 1.0, i as f64 + 2.0])
        .collect();
    let mut store = VariableStore::new();
    VariableBuilder::new("spec")
        .rows(times, rows)
        .bins(&[5.0, 50.0])
        .store_in(&mut store);
    store
}

fn hover(store: &VariableStore, time: f64, name: &str) -> (HoverOutcome, RecordingTarget) {
    let mut indexer = HoverIndexer::new(RecordingTarget::new());
    let outcome = indexer.handle(store, &HoverEvent::new(time, name));
    (outcome, indexer.into_target())
}

fn selected(outcome: HoverOutcome) -> Option<usize> {
    match outcome {
        HoverOutcome::Updated { index, .. } => Some(index),
        HoverOutcome::Cleared => None,
    }
}

proptest! {
    #[test]
    fn test_exact_timestamp_selects_its_row(
        times in times_strategy(),
        pick in any::<prop::sample::Index>()
    ) {
        let store = store_for(&times);
        let k = pick.index(times.len());

        let (outcome, target) = hover(&store, times[k], "spec");

        prop_assert_eq!(selected(outcome), Some(k));
        let (xs, ys) = target.last_data().unwrap();
        prop_assert_eq!(xs, &[5.0, 50.0][..]);
        prop_assert_eq!(ys, store.get("spec").unwrap().values.row(k).unwrap());
    }

    #[test]
    fn test_between_samples_selects_closer(
        times in times_strategy(),
        pick in any::<prop::sample::Index>(),
        frac in 0.0f64..1.0
    ) {
        let store = store_for(&times);
        let k = pick.index(times.len() - 1);
        let (t0, t1) = (times[k], times[k + 1]);
        let mid = (t0 + t1) / 2.0;
        let t = t0 + frac * (t1 - t0);

        let expected = if t <= mid { k } else { k + 1 };
        let (outcome, _) = hover(&store, t, "spec");
        prop_assert_eq!(selected(outcome), Some(expected));

        // Exact midpoint resolves to the earlier sample
        let (outcome, _) = hover(&store, mid, "spec");
        prop_assert_eq!(selected(outcome), Some(k));
    }

    #[test]
    fn test_negative_values_force_linear_y(
        times in times_strategy(),
        pick in any::<prop::sample::Index>(),
        negative in -1e6f64..-1e-6
    ) {
        let k = pick.index(times.len());
        let rows = (0..times.len())
            .map(|i| if i == k { vec![1.0, negative] } else { vec![1.0, 2.0] })
            .collect();
        let mut store = VariableStore::new();
        VariableBuilder::new("spec")
            .rows(&times, rows)
            .bins(&[5.0, 50.0])
            .store_in(&mut store);
        set_option(&mut store, "spec", "ylog_interactive", OptionValue::Int(1)).unwrap();
        set_option(&mut store, "spec", "xlog_interactive", OptionValue::Int(1)).unwrap();

        let (outcome, target) = hover(&store, times[k], "spec");

        prop_assert_eq!(
            outcome,
            HoverOutcome::Updated { index: k, x_log: true, y_log: false }
        );
        prop_assert_eq!(target.last_log_mode(), Some((true, false)));
    }

    #[test]
    fn test_negative_bins_force_linear_x(
        times in times_strategy(),
        pick in any::<prop::sample::Index>(),
        negative in -1e6f64..-1e-6
    ) {
        let k = pick.index(times.len());
        let rows = vec![vec![1.0, 2.0]; times.len()];
        let bins = (0..times.len())
            .map(|i| if i == k { vec![negative, 50.0] } else { vec![5.0, 50.0] })
            .collect();
        let mut store = VariableStore::new();
        VariableBuilder::new("spec")
            .rows(&times, rows)
            .per_sample_bins(bins)
            .store_in(&mut store);
        set_option(&mut store, "spec", "xlog_interactive", OptionValue::Int(1)).unwrap();
        set_option(&mut store, "spec", "ylog_interactive", OptionValue::Int(1)).unwrap();

        let (outcome, target) = hover(&store, times[k], "spec");

        prop_assert_eq!(
            outcome,
            HoverOutcome::Updated { index: k, x_log: false, y_log: true }
        );
        prop_assert_eq!(target.last_log_mode(), Some((false, true)));
        let (xs, _) = target.last_data().unwrap();
        prop_assert_eq!(xs, &[negative, 50.0][..]);
    }

    #[test]
    fn test_non_spectrogram_always_clears(
        times in times_strategy(),
        time in -1e4f64..1e4
    ) {
        let mut store = VariableStore::new();
        let values: Vec<f64> = times.iter().map(|t| t * 0.5).collect();
        VariableBuilder::new("line").series(&times, &values).store_in(&mut store);

        let (outcome, target) = hover(&store, time, "line");
        prop_assert_eq!(outcome, HoverOutcome::Cleared);
        prop_assert!(target.is_cleared());

        let (outcome, target) = hover(&store, time, "not_stored");
        prop_assert_eq!(outcome, HoverOutcome::Cleared);
        prop_assert!(target.is_cleared());
    }
}

#[test]
fn test_source_drives_indexer_in_order() {
    let mut store = VariableStore::new();
    store.put(spectrogram("swe_spec", 4));
    set_option(&mut store, "swe_spec", "ztitle", OptionValue::Text("Flux".into())).unwrap();

    let mut target = RecordingTarget::new();
    let mut seen = Vec::new();
    {
        let mut source = HoverSource::new();
        source.register_listener(|_: &VariableStore, event: &HoverEvent| {
            seen.push(event.time);
        });
        source.register_listener(HoverIndexer::new(&mut target));
        source.change_hover_time(&store, 21.0, "swe_spec");
        source.change_hover_time(&store, 5.0, "n_e");
    }

    assert_eq!(seen, vec![21.0, 5.0]);
    assert_eq!(
        &target.calls[..5],
        &[
            Call::Label(Axis::X, "Flux bins".to_string()),
            Call::Label(Axis::Y, "Flux".to_string()),
            Call::LogMode(false, false),
            Call::Data(vec![10.0, 100.0, 1000.0], vec![2.0, 2.5, 3.0]),
            Call::LogMode(false, false),
        ]
    );
    assert!(target.is_cleared());
}

#[test]
fn test_empty_spectrogram_clears() {
    let mut store = VariableStore::new();
    store.put(spectrogram("empty", 0));

    let (outcome, target) = hover(&store, 0.0, "empty");
    assert_eq!(outcome, HoverOutcome::Cleared);
    assert!(target.is_cleared());
}
