use linemerge::datagen::{generate, DemoDataConfig};
use linemerge::session::{FrameCapture, Session};
use linemerge::types::{PartitionId, Series};

fn mean_by_hand(inputs: &[&Series]) -> Vec<f64> {
    let len = inputs[0].len();
    (0..len)
        .map(|i| inputs.iter().map(|s| s.samples[i]).sum::<f64>() / inputs.len() as f64)
        .collect()
}

#[test]
fn test_merged_series_matches_hand_computed_mean() {
    let cfg = DemoDataConfig {
        seed: Some(1234),
        ..Default::default()
    };
    let seed = generate(&cfg);
    let expected = mean_by_hand(&[&seed[2], &seed[5], &seed[7]]);

    let mut session = Session::new(seed, FrameCapture::default()).unwrap();
    let id = session.add_group("avg").unwrap();
    for label in ["#2", "#5", "#7"] {
        session
            .move_series(label, PartitionId::Individual, PartitionId::Group(id))
            .unwrap();
    }

    let frame = session.sink().frame();
    let merged = frame.datasets.iter().find(|s| s.label == "avg").unwrap();
    assert_eq!(
        merged.samples, expected,
        "pipeline mean disagrees with direct recomputation"
    );
}

#[test]
fn test_every_successful_event_renders_once() {
    let cfg = DemoDataConfig {
        seed: Some(9),
        series: 4,
        points: 6,
        ..Default::default()
    };
    let mut session = Session::new(generate(&cfg), FrameCapture::default()).unwrap();

    // Seeding renders once, at revision zero
    assert_eq!(session.revision(), 0);
    assert_eq!(session.sink().renders(), 1);

    let id = session.add_group("g").unwrap();
    session
        .move_series("#0", PartitionId::Individual, PartitionId::Group(id))
        .unwrap();
    session.set_series_active("#1", false).unwrap();
    session.set_group_active(id, false).unwrap();
    session
        .set_members_active(PartitionId::Individual, true)
        .unwrap();
    session.remove_group(id).unwrap();

    // Six events, one render each
    assert_eq!(session.revision(), 6);
    assert_eq!(session.sink().renders(), 7);
}

#[test]
fn test_replace_data_swaps_dataset_and_reset_follows_it() {
    let first = DemoDataConfig {
        seed: Some(1),
        series: 3,
        points: 4,
        ..Default::default()
    };
    let second = DemoDataConfig {
        seed: Some(2),
        series: 5,
        points: 8,
        ..Default::default()
    };
    let mut session = Session::new(generate(&first), FrameCapture::default()).unwrap();
    let id = session.add_group("g").unwrap();
    session
        .move_series("#0", PartitionId::Individual, PartitionId::Group(id))
        .unwrap();

    // Groups and flags do not survive a dataset swap
    session.replace_data(generate(&second)).unwrap();
    assert_eq!(session.store().len(), 5);
    assert!(session.store().groups().next().is_none());
    assert_eq!(session.sink().frame().labels.len(), 8);

    // Reset now returns to the replacement dataset, not the original
    let after_replace = session.sink().frame().clone();
    session.set_series_active("#0", false).unwrap();
    session.reset().unwrap();
    assert_eq!(session.sink().frame(), &after_replace);
}
