//! # Line Merge Visualization Library
//!
//! `linemerge` is a library for organizing line series into named groups and
//! visualizing the result. Series live in a store partitioned into an
//! individual pool and any number of groups; each active group is displayed
//! as the point-wise mean of its active members, next to the active
//! individual series.
//!
//! ## Features
//!
//! - Store series in an individual pool or named group partitions
//! - Merge a group's active members into one averaged series
//! - Toggle series and groups without losing group membership
//! - Render the display set with plotters, on screen or to PNG
//! - Deterministic demo data generation and JSON seed files
//!
//! ## Example
//!
//! ```
//! use linemerge::datagen::{generate, DemoDataConfig};
//! use linemerge::session::{FrameCapture, Session};
//! use linemerge::types::PartitionId;
//!
//! let config = DemoDataConfig {
//!     seed: Some(7),
//!     ..DemoDataConfig::default()
//! };
//! let mut session = Session::new(generate(&config), FrameCapture::default()).unwrap();
//!
//! // Group two series and display their mean alongside the rest.
//! let id = session.add_group("ab").unwrap();
//! session.move_series("#0", PartitionId::Individual, PartitionId::Group(id)).unwrap();
//! session.move_series("#1", PartitionId::Individual, PartitionId::Group(id)).unwrap();
//!
//! let frame = session.sink().frame();
//! assert!(frame.datasets.iter().any(|s| s.label == "ab"));
//! ```

pub mod app;
pub mod datagen;
pub mod error;
pub mod plotting;
pub mod session;
pub mod store;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use error::{StoreError, StoreResult};
pub use session::Session;
pub use store::{DisplaySet, SeriesStore};
pub use types::{ChartFrame, PartitionId, Series};
