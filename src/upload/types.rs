use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UploadId(Uuid);

impl UploadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// A file the user picked or dropped, before it becomes an upload record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub path: Option<PathBuf>,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let mime = super::descriptor::mime_for_name(&name).to_string();
        Self {
            name,
            size,
            mime,
            path: None,
        }
    }

    pub fn extension(&self) -> Option<&str> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            None
        } else {
            Some(ext)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UploadStatus {
    Uploading,
    Completed,
    Error(String),
}

impl UploadStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, UploadStatus::Uploading)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: UploadId,
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub status: UploadStatus,
    /// Percentage in `[0, 100]`.
    pub progress: f32,
}

impl UploadRecord {
    pub fn uploading(file: FileDescriptor) -> Self {
        Self {
            id: UploadId::new(),
            name: file.name,
            size: file.size,
            mime: file.mime,
            status: UploadStatus::Uploading,
            progress: 0.0,
        }
    }

    pub fn rejected(file: FileDescriptor, reason: String) -> Self {
        Self {
            status: UploadStatus::Error(reason),
            ..Self::uploading(file)
        }
    }

    /// Adds `increment` to the progress, capped at 100. Returns true when
    /// this call completed the record.
    pub fn advance(&mut self, increment: f32) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.progress = (self.progress + increment.max(0.0)).min(100.0);
        if self.progress >= 100.0 {
            self.status = UploadStatus::Completed;
            return true;
        }
        false
    }

    /// Deadline reached: completes the record whatever its progress.
    pub fn force_complete(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.progress = 100.0;
        self.status = UploadStatus::Completed;
    }
}
