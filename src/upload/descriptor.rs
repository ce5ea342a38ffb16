use super::types::FileDescriptor;
use crate::config::UploadConfig;
use crate::error::{AppError, Result};
use ignore::Walk;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub fn mime_for_name(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("dcm") => "application/dicom",
        Some("nii") => "application/x-nifti",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

impl FileDescriptor {
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let mut file = FileDescriptor::new(name, metadata.len());
        file.path = Some(path.to_path_buf());
        Ok(file)
    }

    /// Native drops carry a path; web drops carry the bytes instead.
    pub fn from_dropped(dropped: &egui::DroppedFile) -> Result<Self> {
        if let Some(path) = &dropped.path {
            return Self::from_path(path);
        }
        let size = dropped.bytes.as_ref().map_or(0, |bytes| bytes.len() as u64);
        Ok(FileDescriptor::new(dropped.name.clone(), size))
    }
}

/// Files under `folder` (ignore files honoured) whose extension the upload
/// config accepts, in walk order.
pub fn collect_folder(folder: &Path, config: &UploadConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in Walk::new(folder) {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                let accepted = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| config.accepts_extension(ext));
                if accepted {
                    files.push(path.to_path_buf());
                } else {
                    debug!(path = %path.display(), "skipping file with unsupported extension");
                }
            }
            Err(e) => warn!("failed to walk {}: {}", folder.display(), e),
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for_name("scan.DCM"), "application/dicom");
        assert_eq!(mime_for_name("t1.nii"), "application/x-nifti");
        assert_eq!(mime_for_name("slice.jpeg"), "image/jpeg");
        assert_eq!(mime_for_name("notes"), "application/octet-stream");
    }

    #[test]
    fn from_path_reads_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.dcm");
        fs::write(&path, vec![0u8; 2048]).unwrap();

        let file = FileDescriptor::from_path(&path).unwrap();
        assert_eq!(file.name, "scan.dcm");
        assert_eq!(file.size, 2048);
        assert_eq!(file.mime, "application/dicom");
        assert_eq!(file.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileDescriptor::from_path(&dir.path().join("gone.dcm")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn collect_folder_keeps_accepted_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("series")).unwrap();
        fs::write(dir.path().join("series/img_001.dcm"), b"a").unwrap();
        fs::write(dir.path().join("series/img_002.DCM"), b"b").unwrap();
        fs::write(dir.path().join("report.pdf"), b"c").unwrap();

        let mut names: Vec<_> = collect_folder(dir.path(), &UploadConfig::default())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["img_001.dcm", "img_002.DCM"]);
    }
}
