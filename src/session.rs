//! # Session
//!
//! Owns a [`SeriesStore`] together with the rendering seam. Every successful
//! mutation triggers exactly one display-set recompute and one render call on
//! the sink; a failed mutation leaves the store, the revision counter, and
//! the sink untouched. Everything here is synchronous and single-threaded.

use log::debug;

use crate::error::StoreResult;
use crate::store::{DisplaySet, SeriesStore};
use crate::types::{ChartFrame, GroupId, PartitionId, Series};

/// Receives the render payload after every successful mutation.
///
/// Implementations hold whatever backend state they need; the session only
/// ever hands them a borrowed frame.
pub trait RenderSink {
    fn render(&mut self, frame: &ChartFrame);
}

/// A sink that keeps the most recent frame and counts render calls.
#[derive(Debug, Clone, Default)]
pub struct FrameCapture {
    frame: ChartFrame,
    renders: u64,
}

impl FrameCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest frame handed to the sink.
    pub fn frame(&self) -> &ChartFrame {
        &self.frame
    }

    /// Number of render calls so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }
}

impl RenderSink for FrameCapture {
    fn render(&mut self, frame: &ChartFrame) {
        self.frame = frame.clone();
        self.renders += 1;
    }
}

/// One open dataset: the store, the original seed, and the render sink.
///
/// The seed is kept so [`Session::reset`] can restore the exact starting
/// state after any amount of grouping and toggling.
pub struct Session<S: RenderSink> {
    store: SeriesStore,
    seed: Vec<Series>,
    sink: S,
    revision: u64,
}

impl<S: RenderSink> Session<S> {
    /// Seed a session and render the initial frame at revision zero.
    pub fn new(seed: Vec<Series>, sink: S) -> StoreResult<Self> {
        let store = SeriesStore::from_seed(seed.clone())?;
        let mut session = Self {
            store,
            seed,
            sink,
            revision: 0,
        };
        session.publish()?;
        Ok(session)
    }

    /// Read access to the store, for card lists and lookups.
    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// The sink, for reading back captured state.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Bumped once per successful mutation; drives render cache invalidation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current display set, without touching the sink.
    pub fn display_set(&self) -> StoreResult<DisplaySet> {
        self.store.display_set()
    }

    /// Create a group named `name`.
    pub fn add_group(&mut self, name: &str) -> StoreResult<GroupId> {
        let id = self.store.add_group(name)?;
        debug!("added group {id} {name:?}");
        self.commit()?;
        Ok(id)
    }

    /// Dissolve a group, returning its members to the individual partition.
    pub fn remove_group(&mut self, id: GroupId) -> StoreResult<()> {
        self.store.remove_group(id)?;
        debug!("removed group {id}");
        self.commit()
    }

    /// Apply a drag: move `label` from partition `from` to partition `to`.
    pub fn move_series(
        &mut self,
        label: &str,
        from: PartitionId,
        to: PartitionId,
    ) -> StoreResult<()> {
        self.store.move_series(label, from, to)?;
        debug!("moved {label:?} from {from} to {to}");
        self.commit()
    }

    /// Toggle one series.
    pub fn set_series_active(&mut self, label: &str, active: bool) -> StoreResult<()> {
        self.store.set_series_active(label, active)?;
        debug!("set {label:?} active={active}");
        self.commit()
    }

    /// Toggle a group's gate.
    pub fn set_group_active(&mut self, id: GroupId, active: bool) -> StoreResult<()> {
        self.store.set_group_active(id, active)?;
        debug!("set group {id} active={active}");
        self.commit()
    }

    /// Toggle every member of one partition at once, as a single event.
    pub fn set_members_active(&mut self, partition: PartitionId, active: bool) -> StoreResult<()> {
        self.store.set_members_active(partition, active)?;
        debug!("set members of {partition} active={active}");
        self.commit()
    }

    /// Swap in a new dataset; groups and flags go with the old one.
    pub fn replace_data(&mut self, seed: Vec<Series>) -> StoreResult<()> {
        let store = SeriesStore::from_seed(seed.clone())?;
        self.store = store;
        self.seed = seed;
        debug!("replaced dataset, {} series", self.store.len());
        self.commit()
    }

    /// Restore the original seed, discarding groups and flag changes.
    pub fn reset(&mut self) -> StoreResult<()> {
        self.store = SeriesStore::from_seed(self.seed.clone())?;
        debug!("reset to seed dataset");
        self.commit()
    }

    fn commit(&mut self) -> StoreResult<()> {
        self.revision += 1;
        self.publish()
    }

    fn publish(&mut self) -> StoreResult<()> {
        let frame = self.store.display_set()?.to_frame();
        self.sink.render(&frame);
        Ok(())
    }
}
