#![allow(dead_code)]

use chrono::NaiveDate;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use timeline_core::{
    ActiveDayChange, BindError, ContentProvider, CreationError, NoteLocation, NotificationSink,
};

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doc {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub path: String,
}

/// Observable state shared between a test and the provider it hands away.
#[derive(Default)]
pub struct ProviderState {
    pub notes: RefCell<BTreeMap<String, String>>,
    pub created: RefCell<Vec<String>>,
    pub released: RefCell<Vec<String>>,
    pub open_editors: Cell<usize>,
    pub fail_create: RefCell<BTreeSet<String>>,
    pub fail_bind: RefCell<BTreeSet<String>>,
}

impl ProviderState {
    pub fn note(&self, path: &str) -> Option<String> {
        self.notes.borrow().get(path).cloned()
    }

    pub fn created_count(&self) -> usize {
        self.created.borrow().len()
    }

    pub fn released_paths(&self) -> Vec<String> {
        self.released.borrow().clone()
    }
}

/// In-memory provider with scriptable per-path failures.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    state: Rc<ProviderState>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Rc<ProviderState> {
        Rc::clone(&self.state)
    }

    pub fn with_note(self, path: &str, content: &str) -> Self {
        self.state
            .notes
            .borrow_mut()
            .insert(path.to_string(), content.to_string());
        self
    }

    pub fn failing_create(self, path: &str) -> Self {
        self.state.fail_create.borrow_mut().insert(path.to_string());
        self
    }

    pub fn failing_bind(self, path: &str) -> Self {
        self.state.fail_bind.borrow_mut().insert(path.to_string());
        self
    }
}

impl ContentProvider for ScriptedProvider {
    type Content = Doc;
    type Editor = Editor;

    fn exists(&self, note: &NoteLocation) -> Result<bool, CreationError> {
        Ok(self.state.notes.borrow().contains_key(&note.path))
    }

    fn open(&self, note: &NoteLocation) -> Result<Doc, CreationError> {
        if self.state.notes.borrow().contains_key(&note.path) {
            Ok(Doc {
                path: note.path.clone(),
            })
        } else {
            Err(CreationError::Lookup {
                path: note.path.clone(),
                message: "missing".to_string(),
            })
        }
    }

    fn create(&self, note: &NoteLocation, initial_content: &str) -> Result<Doc, CreationError> {
        if self.state.fail_create.borrow().contains(&note.path) {
            return Err(CreationError::Write {
                path: note.path.clone(),
                message: "read-only vault".to_string(),
            });
        }
        self.state
            .notes
            .borrow_mut()
            .insert(note.path.clone(), initial_content.to_string());
        self.state.created.borrow_mut().push(note.path.clone());
        Ok(Doc {
            path: note.path.clone(),
        })
    }

    fn bind_editor(&self, content: &Doc) -> Result<Editor, BindError> {
        if self.state.fail_bind.borrow().contains(&content.path) {
            return Err(BindError {
                path: content.path.clone(),
                message: "leaf refused".to_string(),
            });
        }
        self.state.open_editors.set(self.state.open_editors.get() + 1);
        Ok(Editor {
            path: content.path.clone(),
        })
    }

    fn read_template(&self, path: &str) -> Result<Option<String>, CreationError> {
        Ok(self.state.notes.borrow().get(path).cloned())
    }

    fn release(&self, content: Option<Doc>, editor: Option<Editor>) {
        if editor.is_some() {
            self.state.open_editors.set(self.state.open_editors.get() - 1);
        }
        if let Some(doc) = content {
            self.state.released.borrow_mut().push(doc.path);
        }
    }
}

/// Sink that keeps everything it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub changes: Vec<ActiveDayChange>,
    pub notices: Vec<String>,
}

impl RecordingSink {
    pub fn last_change(&self) -> Option<ActiveDayChange> {
        self.changes.last().copied()
    }
}

impl NotificationSink for RecordingSink {
    fn active_day_changed(&mut self, change: &ActiveDayChange) {
        self.changes.push(*change);
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
