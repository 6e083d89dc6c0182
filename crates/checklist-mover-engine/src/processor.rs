//! File-level driver around [`reorder`](crate::reorder::reorder).
//!
//! Owns the persisted [`MoverState`] and the set of documents currently
//! being processed, so a change notification caused by our own write-back
//! is dropped instead of looping.

use relative_path::{RelativePath, RelativePathBuf};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::io::{self, IoError};
use crate::reorder::reorder;
use crate::state::{MoverState, Settings, StateError};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    State(#[from] StateError),
}

/// What happened to a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    /// The new text differed and was written back.
    pub written: bool,
    pub moved: usize,
    pub hidden: usize,
    pub restored: usize,
    /// The document was already being processed; nothing was read or written.
    pub skipped: bool,
}

/// Documents with a reorder pass in progress.
#[derive(Debug, Default)]
pub struct InFlight {
    documents: HashSet<RelativePathBuf>,
}

impl InFlight {
    /// Mark a document as in flight. Returns false if it already was.
    pub fn try_enter(&mut self, document: &RelativePath) -> bool {
        self.documents.insert(document.to_relative_path_buf())
    }

    pub fn leave(&mut self, document: &RelativePath) {
        self.documents.remove(document);
    }

    pub fn contains(&self, document: &RelativePath) -> bool {
        self.documents.contains(document)
    }
}

pub struct Processor {
    notes_root: PathBuf,
    state_path: PathBuf,
    state: MoverState,
    in_flight: InFlight,
}

impl Processor {
    pub fn new(notes_root: PathBuf, state_path: PathBuf, state: MoverState) -> Self {
        Self {
            notes_root,
            state_path,
            state,
            in_flight: InFlight::default(),
        }
    }

    /// Create a processor with state loaded from `state_path`.
    pub fn open(notes_root: PathBuf, state_path: PathBuf) -> Result<Self, ProcessError> {
        io::validate_notes_dir(&notes_root)?;
        let state = MoverState::load_from_path(&state_path)?;
        Ok(Self::new(notes_root, state_path, state))
    }

    pub fn notes_root(&self) -> &Path {
        &self.notes_root
    }

    pub fn state(&self) -> &MoverState {
        &self.state
    }

    pub fn settings(&self) -> Settings {
        self.state.settings
    }

    /// Change notification entry point.
    ///
    /// Non-markdown documents and documents already being processed are
    /// ignored. Errors are logged and swallowed so one bad document never
    /// stops later notifications.
    pub fn on_document_changed(&mut self, document: &RelativePath) -> Option<Report> {
        if !io::is_markdown(document) {
            log::debug!("ignoring change to non-markdown document {document}");
            return None;
        }
        if self.in_flight.contains(document) {
            log::debug!("ignoring change to {document}: already processing");
            return None;
        }

        match self.process_file(document) {
            Ok(report) => Some(report),
            Err(e) => {
                log::error!("failed to process {document}: {e}");
                None
            }
        }
    }

    /// Reorder one document under the current settings, writing it back only
    /// when the text changed.
    pub fn process_file(&mut self, document: &RelativePath) -> Result<Report, ProcessError> {
        let document = document.normalize();
        if !self.in_flight.try_enter(&document) {
            log::info!("skipping {document}: already being processed");
            return Ok(Report {
                skipped: true,
                ..Report::default()
            });
        }

        let result = self.reorder_document(&document);
        self.in_flight.leave(&document);
        result
    }

    /// Explicit "move completed items" command for one document.
    pub fn move_completed(&mut self, document: &RelativePath) -> Result<Report, ProcessError> {
        self.process_file(document)
    }

    /// Flip the hide setting, persist it, then reprocess `active` if given.
    /// Returns the new setting.
    pub fn toggle_hide(&mut self, active: Option<&RelativePath>) -> Result<bool, ProcessError> {
        let hide = !self.state.settings.hide_completed;
        self.set_hide_completed(hide)?;

        if let Some(document) = active {
            self.process_file(document)?;
        }
        Ok(hide)
    }

    pub fn set_hide_completed(&mut self, hide: bool) -> Result<(), ProcessError> {
        self.state.settings.hide_completed = hide;
        self.state.save_to_path(&self.state_path)?;
        log::info!("hide completed items: {hide}");
        Ok(())
    }

    fn reorder_document(&mut self, document: &RelativePath) -> Result<Report, ProcessError> {
        let content = io::read_file(document, &self.notes_root)?;
        let policy = self.state.policy();

        let result = reorder(&content, document.as_str(), policy, &mut self.state.hidden);

        let written = result.text != content;
        if written {
            io::write_file(document, &self.notes_root, &result.text)?;
            log::info!(
                "{document}: moved {}, hid {}, restored {}",
                result.moved,
                result.hidden,
                result.restored
            );
        }

        // The text is already written; a failed save keeps the entries in
        // memory for the next save to pick up.
        if let Err(e) = self.state.save_to_path(&self.state_path) {
            log::warn!("failed to save state: {e}");
        }

        Ok(Report {
            written,
            moved: result.moved,
            hidden: result.hidden,
            restored: result.restored,
            skipped: false,
        })
    }
}
