//! Offset-keyed index of materialized days.
//!
//! # Responsibility
//! - Map day offsets to records and derive dates from the anchor.
//!
//! # Invariants
//! - Keys always form one contiguous run `[min, max]`.
//! - Every record's date equals `date_for_offset(record.offset())`.
//! - Mutation is crate-private; only the window manager inserts or drains.

use crate::model::day::{DayOffset, DayRecord};
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

/// Ordered, contiguous map from day offset to record.
#[derive(Debug)]
pub struct OffsetIndex<C, E> {
    anchor: NaiveDate,
    days: BTreeMap<DayOffset, DayRecord<C, E>>,
}

impl<C, E> OffsetIndex<C, E> {
    pub fn new(anchor: NaiveDate) -> Self {
        Self {
            anchor,
            days: BTreeMap::new(),
        }
    }

    /// Date that defines offset 0.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Anchor plus `offset` days, or `None` outside the representable range.
    pub fn checked_date_for_offset(&self, offset: DayOffset) -> Option<NaiveDate> {
        checked_offset_date(self.anchor, offset)
    }

    /// Anchor plus `offset` days, saturating at the calendar bounds.
    pub fn date_for_offset(&self, offset: DayOffset) -> NaiveDate {
        offset_date(self.anchor, offset)
    }

    /// Inverse of `date_for_offset`.
    pub fn offset_for_date(&self, date: NaiveDate) -> DayOffset {
        date.signed_duration_since(self.anchor).num_days()
    }

    pub fn resolve(&self, offset: DayOffset) -> Option<&DayRecord<C, E>> {
        self.days.get(&offset)
    }

    pub fn contains(&self, offset: DayOffset) -> bool {
        self.days.contains_key(&offset)
    }

    pub fn min_offset(&self) -> Option<DayOffset> {
        self.days.keys().next().copied()
    }

    pub fn max_offset(&self) -> Option<DayOffset> {
        self.days.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Offsets in ascending order.
    pub fn offsets(&self) -> impl Iterator<Item = DayOffset> + '_ {
        self.days.keys().copied()
    }

    /// Records in ascending offset order (top to bottom).
    pub fn iter(&self) -> impl Iterator<Item = &DayRecord<C, E>> + '_ {
        self.days.values()
    }

    /// Re-anchors an empty index. Returns `false` when records are present.
    pub(crate) fn set_anchor(&mut self, anchor: NaiveDate) -> bool {
        if !self.days.is_empty() {
            return false;
        }
        self.anchor = anchor;
        true
    }

    /// Inserts a record only when it extends the run by exactly one day at
    /// either end (or starts an empty index). Otherwise hands it back.
    pub(crate) fn insert_contiguous(
        &mut self,
        record: DayRecord<C, E>,
    ) -> Result<(), DayRecord<C, E>> {
        let offset = record.offset();
        if self.checked_date_for_offset(offset) != Some(record.date()) {
            return Err(record);
        }

        let attaches = match (self.min_offset(), self.max_offset()) {
            (Some(min), Some(max)) => {
                min.checked_sub(1) == Some(offset) || max.checked_add(1) == Some(offset)
            }
            _ => true,
        };
        if !attaches {
            return Err(record);
        }

        self.days.insert(offset, record);
        Ok(())
    }

    /// Removes every record, in ascending offset order.
    pub(crate) fn drain(&mut self) -> Vec<DayRecord<C, E>> {
        std::mem::take(&mut self.days).into_values().collect()
    }
}

/// `anchor` plus `offset` whole days with Gregorian month/year carry.
pub fn checked_offset_date(anchor: NaiveDate, offset: DayOffset) -> Option<NaiveDate> {
    let days = Days::new(offset.unsigned_abs());
    if offset >= 0 {
        anchor.checked_add_days(days)
    } else {
        anchor.checked_sub_days(days)
    }
}

/// Saturating form of `checked_offset_date`.
pub fn offset_date(anchor: NaiveDate, offset: DayOffset) -> NaiveDate {
    checked_offset_date(anchor, offset).unwrap_or(if offset < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}
