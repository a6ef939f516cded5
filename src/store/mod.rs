//! # Series Store
//!
//! Owns every series together with its partition assignment and derives the
//! display set: active individual series plus one merged series per active
//! group. All operations are synchronous and validate before they mutate, so
//! a returned error always leaves the store unchanged.

pub mod merge;

use std::collections::BTreeMap;

use crate::error::{StoreError, StoreResult};
use crate::types::{ChartFrame, GroupId, PartitionId, Rgb, Series, SeriesId};
use crate::utils::labels;

/// Display name of the reserved default partition.
pub const INDIVIDUAL_NAME: &str = "Individual";

#[derive(Debug, Clone)]
struct Slot {
    series: Series,
    partition: PartitionId,
}

/// A named partition whose active members are averaged into one series.
#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    normalized: String,
    active: bool,
    members: Vec<SeriesId>,
    color: Rgb,
}

impl Group {
    /// Display name as entered, minus outer whitespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Group gate; when false the group contributes nothing to the display set.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Member ids in drop order.
    pub fn members(&self) -> &[SeriesId] {
        &self.members
    }

    /// Stable display color of the merged series.
    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Holds all series and partitions of one dataset.
///
/// Series are addressed by label (the form drag-and-drop reports them in)
/// or by the [`SeriesId`] returned at insertion; groups by the [`GroupId`]
/// returned from [`SeriesStore::add_group`]. Group ids are never reused,
/// so an id held across a removal can only miss.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    slots: Vec<Slot>,
    groups: Vec<Option<Group>>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store seeded with `series`, all in the individual partition.
    pub fn from_seed(seed: Vec<Series>) -> StoreResult<Self> {
        let mut store = Self::new();
        for series in seed {
            store.insert_series(series)?;
        }
        Ok(store)
    }

    /// Number of series across all partitions.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Insert a new series into the individual partition.
    ///
    /// The label must not collide with an existing series label or group
    /// display name; both would claim the same key in the display set.
    pub fn insert_series(&mut self, series: Series) -> StoreResult<SeriesId> {
        let taken = self.slots.iter().any(|s| s.series.label == series.label)
            || self.live_groups().any(|(_, g)| g.name == series.label);
        if taken {
            return Err(StoreError::DuplicateSeriesLabel {
                label: series.label,
            });
        }
        let id = SeriesId::from_index(self.slots.len() as u32);
        self.slots.push(Slot {
            series,
            partition: PartitionId::Individual,
        });
        Ok(id)
    }

    /// Create an empty, active group named `name`.
    ///
    /// Uniqueness is decided on the whitespace/case-normalized form, and the
    /// reserved individual partition name is always taken. The group's
    /// display color is drawn from the palette at creation and never changes.
    pub fn add_group(&mut self, name: &str) -> StoreResult<GroupId> {
        let normalized = labels::normalize(name);
        if normalized.is_empty() {
            return Err(StoreError::InvalidPartitionName {
                name: name.to_string(),
            });
        }
        let display = name.trim().to_string();
        let taken = normalized == labels::normalize(INDIVIDUAL_NAME)
            || self.live_groups().any(|(_, g)| g.normalized == normalized)
            || self.slots.iter().any(|s| s.series.label == display);
        if taken {
            return Err(StoreError::DuplicatePartitionName { name: display });
        }
        let color = Rgb::palette(self.slots.len() + self.groups.len());
        let id = GroupId::from_index(self.groups.len() as u32);
        self.groups.push(Some(Group {
            name: display,
            normalized,
            active: true,
            members: Vec::new(),
            color,
        }));
        Ok(id)
    }

    /// Dissolve a group, returning its members to the individual partition
    /// with their active flags intact.
    pub fn remove_group(&mut self, id: GroupId) -> StoreResult<()> {
        let group = self
            .groups
            .get_mut(id.index() as usize)
            .and_then(Option::take)
            .ok_or(StoreError::UnknownGroup { id })?;
        for member in group.members {
            self.slots[member.index() as usize].partition = PartitionId::Individual;
        }
        Ok(())
    }

    /// Move the series `label` out of partition `from` into partition `to`.
    ///
    /// All checks run before any mutation: the series must currently be in
    /// `from`, a target group must exist, and moving into a non-empty group
    /// requires a matching sample count. `from == to` is a no-op.
    pub fn move_series(
        &mut self,
        label: &str,
        from: PartitionId,
        to: PartitionId,
    ) -> StoreResult<()> {
        let idx = self
            .slots
            .iter()
            .position(|s| s.series.label == label)
            .ok_or_else(|| StoreError::UnknownSeries {
                label: label.to_string(),
            })?;
        if self.slots[idx].partition != from {
            return Err(StoreError::NotFound {
                label: label.to_string(),
                partition: from,
            });
        }
        if from == to {
            return Ok(());
        }
        if let PartitionId::Group(gid) = to {
            let group = self.group(gid)?;
            if let Some(first) = group.members.first() {
                let expected = self.slots[first.index() as usize].series.len();
                let actual = self.slots[idx].series.len();
                if expected != actual {
                    return Err(StoreError::LengthMismatch {
                        label: label.to_string(),
                        expected,
                        actual,
                    });
                }
            }
        }

        let id = SeriesId::from_index(idx as u32);
        if let PartitionId::Group(gid) = from {
            self.group_mut(gid)?.members.retain(|m| *m != id);
        }
        if let PartitionId::Group(gid) = to {
            self.group_mut(gid)?.members.push(id);
        }
        self.slots[idx].partition = to;
        Ok(())
    }

    /// Set one series' active flag.
    pub fn set_series_active(&mut self, label: &str, active: bool) -> StoreResult<()> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.series.label == label)
            .ok_or_else(|| StoreError::UnknownSeries {
                label: label.to_string(),
            })?;
        slot.series.active = active;
        Ok(())
    }

    /// Set a group's gate without touching its members' flags.
    pub fn set_group_active(&mut self, id: GroupId, active: bool) -> StoreResult<()> {
        self.group_mut(id)?.active = active;
        Ok(())
    }

    /// Set the active flag of every member of `partition` at once.
    pub fn set_members_active(&mut self, partition: PartitionId, active: bool) -> StoreResult<()> {
        if let PartitionId::Group(id) = partition {
            self.group(id)?;
        }
        for slot in &mut self.slots {
            if slot.partition == partition {
                slot.series.active = active;
            }
        }
        Ok(())
    }

    /// Look up a series by label, wherever it lives.
    pub fn series(&self, label: &str) -> Option<&Series> {
        self.slots
            .iter()
            .find(|s| s.series.label == label)
            .map(|s| &s.series)
    }

    /// The partition a series currently belongs to.
    pub fn partition_of(&self, label: &str) -> Option<PartitionId> {
        self.slots
            .iter()
            .find(|s| s.series.label == label)
            .map(|s| s.partition)
    }

    /// Series in the individual partition, in insertion order.
    pub fn individual(&self) -> impl Iterator<Item = &Series> {
        self.slots
            .iter()
            .filter(|s| s.partition == PartitionId::Individual)
            .map(|s| &s.series)
    }

    /// Live groups in creation order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.live_groups()
    }

    /// Look up a live group.
    pub fn group(&self, id: GroupId) -> StoreResult<&Group> {
        self.groups
            .get(id.index() as usize)
            .and_then(Option::as_ref)
            .ok_or(StoreError::UnknownGroup { id })
    }

    /// Member series of a group, in member order.
    pub fn group_members(&self, id: GroupId) -> StoreResult<impl Iterator<Item = &Series>> {
        let group = self.group(id)?;
        Ok(group
            .members
            .iter()
            .map(|m| &self.slots[m.index() as usize].series))
    }

    /// Derive the display set from the current state.
    ///
    /// Active individual series appear as themselves. Each live group that is
    /// active and has at least one active member contributes the point-wise
    /// mean of its active members under the group's display name; gated or
    /// effectively empty groups contribute nothing, never a zero-filled
    /// series.
    pub fn display_set(&self) -> StoreResult<DisplaySet> {
        let mut set = DisplaySet::default();
        for slot in &self.slots {
            if slot.partition == PartitionId::Individual && slot.series.active {
                set.insert(slot.series.clone());
            }
        }
        for (_, group) in self.live_groups() {
            if !group.active {
                continue;
            }
            let active: Vec<&Series> = group
                .members
                .iter()
                .map(|id| &self.slots[id.index() as usize].series)
                .filter(|s| s.active)
                .collect();
            if active.is_empty() {
                continue;
            }
            set.insert(merge::merge(&active, &group.name, group.color)?);
        }
        Ok(set)
    }

    fn live_groups(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.groups
            .iter()
            .enumerate()
            .filter_map(|(i, g)| g.as_ref().map(|g| (GroupId::from_index(i as u32), g)))
    }

    fn group_mut(&mut self, id: GroupId) -> StoreResult<&mut Group> {
        self.groups
            .get_mut(id.index() as usize)
            .and_then(Option::as_mut)
            .ok_or(StoreError::UnknownGroup { id })
    }
}

/// The derived mapping from display label to series.
///
/// Iteration is in lexicographic label order, which makes render output and
/// test expectations deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplaySet {
    entries: BTreeMap<String, Series>,
}

impl DisplaySet {
    fn insert(&mut self, series: Series) {
        self.entries.insert(series.label.clone(), series);
    }

    pub fn get(&self, label: &str) -> Option<&Series> {
        self.entries.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the render payload: x labels `0..longest`, datasets in label order.
    pub fn to_frame(&self) -> ChartFrame {
        let longest = self.entries.values().map(Series::len).max().unwrap_or(0);
        ChartFrame {
            labels: (0..longest).collect(),
            datasets: self.entries.values().cloned().collect(),
        }
    }
}
