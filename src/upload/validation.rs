use super::types::FileDescriptor;
use crate::config::UploadConfig;
use crate::utils::file_size::format_size;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("Unsupported file type{}", extension_suffix(.extension))]
    UnsupportedExtension { extension: Option<String> },

    #[error("File too large ({}, limit {})", size_label(.size), size_label(.limit))]
    TooLarge { size: u64, limit: u64 },
}

fn extension_suffix(extension: &Option<String>) -> String {
    extension
        .as_deref()
        .map(|ext| format!(" '.{}'", ext))
        .unwrap_or_default()
}

fn size_label(size: &u64) -> String {
    format_size(*size)
}

pub fn validate(file: &FileDescriptor, config: &UploadConfig) -> Result<(), UploadRejection> {
    if !config.validate {
        return Ok(());
    }

    match file.extension() {
        Some(ext) if config.accepts_extension(ext) => {}
        ext => {
            return Err(UploadRejection::UnsupportedExtension {
                extension: ext.map(str::to_string),
            })
        }
    }

    if file.size > config.max_file_bytes {
        return Err(UploadRejection::TooLarge {
            size: file.size,
            limit: config.max_file_bytes,
        });
    }

    Ok(())
}
