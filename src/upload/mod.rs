mod descriptor;
mod types;
mod validation;

pub use descriptor::{collect_folder, mime_for_name};
pub use types::{FileDescriptor, UploadId, UploadRecord, UploadStatus};
pub use validation::{validate, UploadRejection};
