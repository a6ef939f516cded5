use std::fs;

use tempfile::TempDir;

use linemerge::plotting::{render_png, ChartStyle, ChartTheme};
use linemerge::session::{FrameCapture, Session};
use linemerge::types::{PartitionId, Rgb, Series};
use linemerge::StoreError;

fn series(label: &str, samples: &[f64]) -> Series {
    Series::new(label, samples.to_vec(), Rgb::palette(0))
}

fn seed() -> Vec<Series> {
    vec![
        series("#0", &[0.0, 2.0, 4.0]),
        series("#1", &[2.0, 4.0, 6.0]),
        series("#2", &[10.0, 10.0, 10.0]),
    ]
}

#[test]
fn test_full_workflow() {
    let mut session = Session::new(seed(), FrameCapture::default()).unwrap();

    // The initial frame shows every seeded series on its own
    {
        let frame = session.sink().frame();
        assert_eq!(frame.labels, vec![0, 1, 2]);
        assert_eq!(frame.datasets.len(), 3);
        assert_eq!(session.revision(), 0);
        assert_eq!(session.sink().renders(), 1);
    }

    // Group two series; the merged line replaces them in the display
    let id = session.add_group("pair").unwrap();
    session
        .move_series("#0", PartitionId::Individual, PartitionId::Group(id))
        .unwrap();
    session
        .move_series("#1", PartitionId::Individual, PartitionId::Group(id))
        .unwrap();
    {
        let frame = session.sink().frame();
        let labels: Vec<&str> = frame.datasets.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["#2", "pair"]);
        let merged = frame.datasets.iter().find(|s| s.label == "pair").unwrap();
        assert_eq!(merged.samples, vec![1.0, 3.0, 5.0]);
        assert_eq!(session.display_set().unwrap().len(), 2);
    }

    // Toggle one member off; the merge follows the remaining member
    session.set_series_active("#0", false).unwrap();
    {
        let frame = session.sink().frame();
        let merged = frame.datasets.iter().find(|s| s.label == "pair").unwrap();
        assert_eq!(merged.samples, vec![2.0, 4.0, 6.0]);
    }

    // Gate the whole group off without touching memberships
    session.set_group_active(id, false).unwrap();
    {
        let frame = session.sink().frame();
        let labels: Vec<&str> = frame.datasets.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["#2"]);
        assert_eq!(session.store().group(id).unwrap().len(), 2);
    }
    session.set_group_active(id, true).unwrap();

    // Render the current frame to a PNG
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chart.png");
    render_png(
        session.sink().frame(),
        &path,
        (320, 240),
        &ChartTheme::default(),
        &ChartStyle::bare(),
    )
    .unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);

    // Dissolve the group; members return individually with flags intact
    session.remove_group(id).unwrap();
    {
        let frame = session.sink().frame();
        let labels: Vec<&str> = frame.datasets.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["#1", "#2"]);
        assert!(!session.store().series("#0").unwrap().active);
    }

    // Reset restores the seeded state
    session.reset().unwrap();
    {
        let frame = session.sink().frame();
        assert_eq!(frame.datasets.len(), 3);
        assert!(session.store().series("#0").unwrap().active);
        assert!(session.store().groups().next().is_none());
    }
}

#[test]
fn test_error_handling() {
    let mut session = Session::new(seed(), FrameCapture::default()).unwrap();
    let id = session.add_group("pair").unwrap();
    session
        .move_series("#0", PartitionId::Individual, PartitionId::Group(id))
        .unwrap();

    let revision = session.revision();
    let renders = session.sink().renders();
    let frame = session.sink().frame().clone();

    // Unknown labels and stale partition claims are rejected
    assert_eq!(
        session.move_series("#9", PartitionId::Individual, PartitionId::Group(id)),
        Err(StoreError::UnknownSeries {
            label: "#9".into()
        }),
    );
    assert_eq!(
        session.move_series("#1", PartitionId::Group(id), PartitionId::Individual),
        Err(StoreError::NotFound {
            label: "#1".into(),
            partition: PartitionId::Group(id),
        }),
    );

    // Group names are unique after normalization, and never blank
    assert_eq!(
        session.add_group("  PAIR "),
        Err(StoreError::DuplicatePartitionName {
            name: "PAIR".into()
        }),
    );
    assert_eq!(
        session.add_group("   "),
        Err(StoreError::InvalidPartitionName {
            name: "   ".into()
        }),
    );

    // None of the failures rendered or changed anything
    assert_eq!(session.revision(), revision);
    assert_eq!(session.sink().renders(), renders);
    assert_eq!(session.sink().frame(), &frame);

    // Moving a shorter series into a populated group is refused
    let mixed = vec![series("short", &[1.0, 2.0]), series("long", &[1.0, 2.0, 3.0])];
    let mut session = Session::new(mixed, FrameCapture::default()).unwrap();
    let id = session.add_group("g").unwrap();
    session
        .move_series("long", PartitionId::Individual, PartitionId::Group(id))
        .unwrap();
    assert_eq!(
        session.move_series("short", PartitionId::Individual, PartitionId::Group(id)),
        Err(StoreError::LengthMismatch {
            label: "short".into(),
            expected: 3,
            actual: 2,
        }),
    );
}
