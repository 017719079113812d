//! Day window manager.
//!
//! # Responsibility
//! - Own the contiguous window of materialized days and its anchor date.
//! - Extend the window at either edge behind a single-flight guard.
//! - Rebuild the window and release every record it drops.
//! - Run the per-day creation path (exists -> open/create -> bind editor).
//!
//! # Invariants
//! - After any completed operation the window is contiguous and holds one
//!   record per offset.
//! - At most one extension is in flight; overlapping requests are dropped.
//! - Only the plan holding the slot can complete it; replayed or foreign
//!   plans are released without touching the window.
//! - A rebuild bumps the generation; results planned against an older
//!   generation are released on arrival, never inserted.
//! - Records are inserted so that iteration is always ascending by offset.

use crate::daily_note::config::DailyNoteConfig;
use crate::daily_note::provider::{ContentProvider, CreationError, DayError, NoteLocation};
use crate::daily_note::template::{blank_note_content, render_template};
use crate::model::day::{DayOffset, DayRecord};
use crate::timeline::error::{ExtensionConflict, WindowError};
use crate::timeline::offset_index::{offset_date, OffsetIndex};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::ops::RangeInclusive;

/// Record type produced by a provider.
pub type ProviderRecord<P> =
    DayRecord<<P as ContentProvider>::Content, <P as ContentProvider>::Editor>;

/// Which edge of the window an extension grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionDirection {
    /// Older days, inserted above the current minimum.
    Backward,
    /// Newer days, appended after the current maximum.
    Forward,
}

impl ExtensionDirection {
    fn as_str(self) -> &'static str {
        match self {
            Self::Backward => "backward",
            Self::Forward => "forward",
        }
    }
}

/// An extension that passed the single-flight guard.
///
/// Hosts with asynchronous note I/O call `materialize` for each offset (in
/// any order, from any task on the UI loop) and hand the records back to
/// `complete_extension`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionPlan {
    id: u64,
    direction: ExtensionDirection,
    start: DayOffset,
    end: DayOffset,
    anchor: NaiveDate,
    generation: u64,
}

impl ExtensionPlan {
    pub fn direction(&self) -> ExtensionDirection {
        self.direction
    }

    /// Planned offsets, ascending.
    pub fn offsets(&self) -> RangeInclusive<DayOffset> {
        self.start..=self.end
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Identifier unique among plans issued by one manager.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// A day that materialized in a degraded state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFailure {
    pub offset: DayOffset,
    pub date: NaiveDate,
    pub error: DayError,
}

/// Result of a rebuild or an extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Offsets attached to the window, ascending.
    pub inserted: Vec<DayOffset>,
    /// Offsets whose records were released without being attached.
    pub discarded: Vec<DayOffset>,
    /// Attached records that are degraded.
    pub failures: Vec<DayFailure>,
}

impl MaterializeReport {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.discarded.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    plan_id: u64,
    generation: u64,
}

/// Owner of the offset window and its lifecycle.
pub struct DayWindowManager<P: ContentProvider> {
    provider: P,
    config: DailyNoteConfig,
    index: OffsetIndex<P::Content, P::Editor>,
    generation: u64,
    next_plan_id: u64,
    in_flight: Option<InFlight>,
}

impl<P: ContentProvider> DayWindowManager<P> {
    /// Creates an empty window anchored at `anchor`.
    pub fn new(provider: P, config: DailyNoteConfig, anchor: NaiveDate) -> Self {
        Self {
            provider,
            config,
            index: OffsetIndex::new(anchor),
            generation: 0,
            next_plan_id: 0,
            in_flight: None,
        }
    }

    pub fn window(&self) -> &OffsetIndex<P::Content, P::Editor> {
        &self.index
    }

    pub fn anchor(&self) -> NaiveDate {
        self.index.anchor()
    }

    pub fn config(&self) -> &DailyNoteConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns whether an extension has been planned but not completed.
    pub fn is_extending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Replaces the config used for subsequent materializations.
    ///
    /// Already materialized days keep their notes.
    pub fn update_config(&mut self, config: DailyNoteConfig) {
        self.config = config;
    }

    /// Rebuilds the window as `[min, max]` around the current anchor.
    pub fn initialize(
        &mut self,
        min: DayOffset,
        max: DayOffset,
    ) -> Result<MaterializeReport, WindowError> {
        let anchor = self.anchor();
        self.rebuild_at(anchor, min, max)
    }

    /// Moves the anchor to `anchor` and rebuilds the window as `[min, max]`.
    ///
    /// Every existing record is released first and any in-flight extension
    /// is invalidated.
    pub fn rebuild_at(
        &mut self,
        anchor: NaiveDate,
        min: DayOffset,
        max: DayOffset,
    ) -> Result<MaterializeReport, WindowError> {
        if min > max {
            return Err(WindowError::InvalidRange { min, max });
        }

        let released = self.release_all();
        self.generation += 1;
        self.in_flight = None;
        // Empty after release_all, so the anchor move always applies.
        self.index.set_anchor(anchor);

        let mut report = MaterializeReport::default();
        for offset in min..=max {
            let date = self.index.date_for_offset(offset);
            let record = self.build_record(offset, date);
            self.attach(record, &mut report);
        }

        info!(
            "event=window_rebuild module=timeline status=ok anchor={} min={} max={} released={} failures={} generation={}",
            anchor,
            min,
            max,
            released,
            report.failures.len(),
            self.generation
        );
        Ok(report)
    }

    /// Materializes `count` days before the current minimum.
    ///
    /// Dropped silently while another extension is in flight.
    pub fn extend_backward(&mut self, count: usize) -> MaterializeReport {
        self.extend(ExtensionDirection::Backward, count)
    }

    /// Materializes `count` days after the current maximum.
    ///
    /// Dropped silently while another extension is in flight.
    pub fn extend_forward(&mut self, count: usize) -> MaterializeReport {
        self.extend(ExtensionDirection::Forward, count)
    }

    /// Plans an extension and claims the single-flight slot.
    ///
    /// Returns `Ok(None)` when there is nothing to extend (empty window or
    /// zero count).
    ///
    /// # Errors
    /// - `ExtensionConflict` when another extension has not completed yet.
    pub fn begin_extension(
        &mut self,
        direction: ExtensionDirection,
        count: usize,
    ) -> Result<Option<ExtensionPlan>, ExtensionConflict> {
        if let Some(in_flight) = self.in_flight {
            return Err(ExtensionConflict {
                in_flight_generation: in_flight.generation,
            });
        }

        let count = DayOffset::try_from(count).unwrap_or(DayOffset::MAX);
        let (Some(min), Some(max)) = (self.index.min_offset(), self.index.max_offset()) else {
            return Ok(None);
        };
        if count == 0 {
            return Ok(None);
        }

        let (start, end) = match direction {
            ExtensionDirection::Backward => (min.saturating_sub(count), min.saturating_sub(1)),
            ExtensionDirection::Forward => (max.saturating_add(1), max.saturating_add(count)),
        };
        if start > end {
            return Ok(None);
        }

        self.next_plan_id += 1;
        let id = self.next_plan_id;
        self.in_flight = Some(InFlight {
            plan_id: id,
            generation: self.generation,
        });
        Ok(Some(ExtensionPlan {
            id,
            direction,
            start,
            end,
            anchor: self.anchor(),
            generation: self.generation,
        }))
    }

    /// Runs the per-day creation path for one planned offset.
    ///
    /// Does not touch the window.
    pub fn materialize(&self, plan: &ExtensionPlan, offset: DayOffset) -> ProviderRecord<P> {
        self.build_record(offset, offset_date(plan.anchor, offset))
    }

    /// Attaches the records produced for `plan` and releases the slot.
    ///
    /// A plan that does not hold the single-flight slot (stale generation,
    /// already completed, or replayed) has all its records released and
    /// reported as discarded. Records outside the plan or that no longer
    /// attach contiguously are discarded the same way.
    pub fn complete_extension(
        &mut self,
        plan: ExtensionPlan,
        mut records: Vec<ProviderRecord<P>>,
    ) -> MaterializeReport {
        let mut report = MaterializeReport::default();

        let holds_slot = self
            .in_flight
            .is_some_and(|in_flight| in_flight.plan_id == plan.id);
        if plan.generation != self.generation || !holds_slot {
            for record in records {
                report.discarded.push(record.offset());
                self.release(record);
            }
            let reason = if plan.generation != self.generation {
                "stale_generation"
            } else {
                "not_in_flight"
            };
            info!(
                "event=window_extend module=timeline status=skip reason={} direction={} plan_id={} planned_generation={} generation={} discarded={}",
                reason,
                plan.direction.as_str(),
                plan.id,
                plan.generation,
                self.generation,
                report.discarded.len()
            );
            return report;
        }
        self.in_flight = None;

        // Backward plans attach nearest-first so each record touches the run.
        match plan.direction {
            ExtensionDirection::Backward => {
                records.sort_by_key(|record| std::cmp::Reverse(record.offset()))
            }
            ExtensionDirection::Forward => records.sort_by_key(|record| record.offset()),
        }

        for record in records {
            if plan.offsets().contains(&record.offset()) {
                self.attach(record, &mut report);
            } else {
                report.discarded.push(record.offset());
                self.release(record);
            }
        }
        report.inserted.sort_unstable();
        report.failures.sort_by_key(|failure| failure.offset);

        info!(
            "event=window_extend module=timeline status=ok direction={} inserted={} discarded={} failures={} min={:?} max={:?}",
            plan.direction.as_str(),
            report.inserted.len(),
            report.discarded.len(),
            report.failures.len(),
            self.index.min_offset(),
            self.index.max_offset()
        );
        report
    }

    /// Releases every record and leaves the window empty.
    pub fn clear(&mut self) {
        let released = self.release_all();
        self.generation += 1;
        self.in_flight = None;
        info!(
            "event=window_clear module=timeline status=ok released={} generation={}",
            released, self.generation
        );
    }

    fn extend(&mut self, direction: ExtensionDirection, count: usize) -> MaterializeReport {
        let plan = match self.begin_extension(direction, count) {
            Ok(Some(plan)) => plan,
            Ok(None) => return MaterializeReport::default(),
            Err(conflict) => {
                debug!(
                    "event=window_extend module=timeline status=skip reason=in_flight direction={} generation={}",
                    direction.as_str(),
                    conflict.in_flight_generation
                );
                return MaterializeReport::default();
            }
        };

        let records = plan
            .offsets()
            .map(|offset| self.materialize(&plan, offset))
            .collect();
        self.complete_extension(plan, records)
    }

    fn attach(&mut self, record: ProviderRecord<P>, report: &mut MaterializeReport) {
        let offset = record.offset();
        let date = record.date();
        let failure = record.failure();
        match self.index.insert_contiguous(record) {
            Ok(()) => {
                report.inserted.push(offset);
                if let Some(error) = failure {
                    report.failures.push(DayFailure {
                        offset,
                        date,
                        error,
                    });
                }
            }
            Err(rejected) => {
                debug!(
                    "event=window_attach module=timeline status=skip reason=not_contiguous offset={}",
                    offset
                );
                report.discarded.push(offset);
                self.release(rejected);
            }
        }
    }

    fn build_record(&self, offset: DayOffset, date: NaiveDate) -> ProviderRecord<P> {
        let note = self.config.location(date);
        let content = match self.acquire_content(&note) {
            Ok(content) => content,
            Err(err) => {
                warn!(
                    "event=day_materialize module=timeline status=error error_code=content_unavailable offset={} date={} error={}",
                    offset, date, err
                );
                return DayRecord::content_unavailable(offset, date, err);
            }
        };

        match self.provider.bind_editor(&content) {
            Ok(editor) => DayRecord::ready(offset, date, content, editor),
            Err(err) => {
                warn!(
                    "event=day_materialize module=timeline status=error error_code=editor_unavailable offset={} date={} error={}",
                    offset, date, err
                );
                DayRecord::editor_unavailable(offset, date, content, err)
            }
        }
    }

    fn acquire_content(&self, note: &NoteLocation) -> Result<P::Content, CreationError> {
        if self.provider.exists(note)? {
            return self.provider.open(note);
        }
        let initial_content = self.initial_content(note.date);
        debug!(
            "event=note_create module=timeline status=start path={}",
            note.path
        );
        self.provider.create(note, initial_content.as_str())
    }

    fn initial_content(&self, date: NaiveDate) -> String {
        let Some(template_path) = self.config.template_path() else {
            return blank_note_content();
        };

        match self.provider.read_template(template_path) {
            Ok(Some(template)) => render_template(template.as_str(), date),
            Ok(None) => {
                warn!(
                    "event=template_load module=timeline status=error error_code=template_missing path={}",
                    template_path
                );
                blank_note_content()
            }
            Err(err) => {
                warn!(
                    "event=template_load module=timeline status=error error_code=template_unreadable path={} error={}",
                    template_path, err
                );
                blank_note_content()
            }
        }
    }

    fn release(&self, record: ProviderRecord<P>) {
        let (content, editor) = record.into_handles();
        self.provider.release(content, editor);
    }

    fn release_all(&mut self) -> usize {
        let drained = self.index.drain();
        let count = drained.len();
        for record in drained {
            self.release(record);
        }
        count
    }
}

impl<P: ContentProvider> Drop for DayWindowManager<P> {
    fn drop(&mut self) {
        self.release_all();
    }
}
