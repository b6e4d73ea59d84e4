//! Calibration file adapter.
//!
//! Implements [`CalibrationPort`] on a plain-text file (`states.max` by
//! default) using the record format in [`crate::calibration`].
//!
//! - `save` replaces the whole file; it never appends.
//! - `load` treats an absent or unreadable file as
//!   [`RecordError::Missing`].

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::CalibrationPort;
use crate::calibration::{format_record, parse_record};
use crate::error::RecordError;
use crate::flap::ReferenceSet;

pub struct StatesFile {
    path: PathBuf,
}

impl StatesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CalibrationPort for StatesFile {
    fn load(&self) -> Result<ReferenceSet, RecordError> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            warn!("StatesFile: cannot read {}: {}", self.path.display(), e);
            RecordError::Missing
        })?;
        info!(
            "StatesFile: {} has {} lines",
            self.path.display(),
            text.lines().count()
        );
        parse_record(&text)
    }

    fn save(&self, refs: &ReferenceSet) -> Result<(), RecordError> {
        fs::write(&self.path, format_record(refs)).map_err(|e| RecordError::Io(e.kind()))?;
        info!("StatesFile: wrote {}", self.path.display());
        Ok(())
    }
}
