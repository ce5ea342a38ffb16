use crate::upload::{FileDescriptor, UploadId};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User picked or dropped files.
    FilesSubmitted(Vec<FileDescriptor>),
    /// User clicked the remove button of an upload row.
    FileRemoved(UploadId),
    /// Upload timer fired for one record.
    UploadTick(UploadId),
    /// Upload deadline reached for one record.
    UploadTimedOut(UploadId),
    /// Dashboard ticker fired.
    DashboardTick,
    /// Drop notifications older than their time-to-live.
    ExpireNotifications(Instant),
    NotificationDismissed(u64),
    /// Report something that happened outside the store (e.g. unreadable path).
    Warn(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartUploadTimer(UploadId),
    CancelUploadTimer(UploadId),
}
