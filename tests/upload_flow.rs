use neuroscan::config::AppConfig;
use neuroscan::store::{Action, Effect, NotificationKind, Store};
use neuroscan::upload::{FileDescriptor, UploadId, UploadStatus};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

fn store() -> Store<StdRng> {
    Store::with_rng(AppConfig::default(), StdRng::seed_from_u64(42))
}

fn started_ids(effects: &[Effect]) -> Vec<UploadId> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::StartUploadTimer(id) => Some(*id),
            _ => None,
        })
        .collect()
}

#[test]
fn submitted_scan_starts_uploading_at_zero() {
    let mut store = store();
    let effects = store.dispatch(Action::FilesSubmitted(vec![FileDescriptor::new(
        "scan.dcm", 4096,
    )]));

    let ids = started_ids(&effects);
    assert_eq!(ids.len(), 1);
    assert_eq!(store.uploads().len(), 1);

    let record = store.upload(ids[0]).unwrap();
    assert_eq!(record.name, "scan.dcm");
    assert_eq!(record.size, 4096);
    assert_eq!(record.mime, "application/dicom");
    assert_eq!(record.status, UploadStatus::Uploading);
    assert_eq!(record.progress, 0.0);

    let notes = store.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Success);
    assert_eq!(notes[0].message, "1 file(s) uploaded successfully");
}

#[test]
fn ticks_never_decrease_progress_and_deadline_completes() {
    let mut store = store();
    let effects = store.dispatch(Action::FilesSubmitted(vec![FileDescriptor::new(
        "scan.dcm", 10,
    )]));
    let id = started_ids(&effects)[0];

    let mut last = 0.0;
    for _ in 0..5 {
        store.dispatch(Action::UploadTick(id));
        let progress = store.upload(id).unwrap().progress;
        assert!(progress >= last);
        assert!(progress <= 100.0);
        last = progress;
    }

    store.dispatch(Action::UploadTimedOut(id));
    let record = store.upload(id).unwrap();
    assert_eq!(record.progress, 100.0);
    assert_eq!(record.status, UploadStatus::Completed);

    // Late ticks leave a completed record alone.
    assert!(store.dispatch(Action::UploadTick(id)).is_empty());
    assert_eq!(store.upload(id).unwrap().progress, 100.0);
}

#[test]
fn reaching_the_cap_early_cancels_the_timer() {
    let config = AppConfig {
        upload: neuroscan::config::UploadConfig {
            max_increment: 1_000.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut store = Store::with_rng(config, StdRng::seed_from_u64(3));
    let id = started_ids(&store.dispatch(Action::FilesSubmitted(vec![FileDescriptor::new(
        "a.png", 1,
    )])))[0];

    let mut effects = Vec::new();
    for _ in 0..10 {
        effects = store.dispatch(Action::UploadTick(id));
        if !effects.is_empty() {
            break;
        }
    }
    assert_eq!(effects, vec![Effect::CancelUploadTimer(id)]);
    assert_eq!(store.upload(id).unwrap().status, UploadStatus::Completed);
    assert_eq!(store.upload(id).unwrap().progress, 100.0);
}

#[test]
fn removing_a_record_drops_it_and_cancels_its_timer() {
    let mut store = store();
    let effects = store.dispatch(Action::FilesSubmitted(vec![
        FileDescriptor::new("a.dcm", 1),
        FileDescriptor::new("b.nii", 1),
    ]));
    let ids = started_ids(&effects);
    assert_eq!(ids.len(), 2);

    let effects = store.dispatch(Action::FileRemoved(ids[0]));
    assert_eq!(effects, vec![Effect::CancelUploadTimer(ids[0])]);
    assert_eq!(store.uploads().len(), 1);
    assert!(store.upload(ids[0]).is_none());

    // A tick or timeout that was already in flight is harmless.
    assert!(store.dispatch(Action::UploadTick(ids[0])).is_empty());
    assert!(store.dispatch(Action::UploadTimedOut(ids[0])).is_empty());
    assert_eq!(store.uploads().len(), 1);

    assert!(store.dispatch(Action::FileRemoved(ids[0])).is_empty());
}

#[test]
fn unsupported_and_oversized_files_become_error_records() {
    let mut store = store();
    let limit = store.config().upload.max_file_bytes;
    let effects = store.dispatch(Action::FilesSubmitted(vec![
        FileDescriptor::new("scan.dcm", 1),
        FileDescriptor::new("notes.txt", 1),
        FileDescriptor::new("huge.nii", limit + 1),
    ]));

    assert_eq!(started_ids(&effects).len(), 1);
    assert_eq!(store.uploads().len(), 3);

    let errors: Vec<_> = store
        .uploads()
        .iter()
        .filter_map(|record| match &record.status {
            UploadStatus::Error(reason) => Some(reason.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].starts_with("Unsupported file type"));
    assert!(errors[1].starts_with("File too large"));

    let note = store.notifications().last().unwrap();
    assert_eq!(note.kind, NotificationKind::Warning);
    assert_eq!(note.message, "1 file(s) uploaded, 2 rejected");
}

#[test]
fn empty_submission_is_ignored() {
    let mut store = store();
    assert!(store.dispatch(Action::FilesSubmitted(Vec::new())).is_empty());
    assert!(store.uploads().is_empty());
    assert!(store.notifications().is_empty());
}

#[test]
fn notifications_expire_and_can_be_dismissed() {
    let mut store = store();
    store.dispatch(Action::FilesSubmitted(vec![FileDescriptor::new("a.dcm", 1)]));
    store.dispatch(Action::Warn("disk unreadable".to_string()));
    assert_eq!(store.notifications().len(), 2);

    let first = store.notifications()[0].id;
    store.dispatch(Action::NotificationDismissed(first));
    assert_eq!(store.notifications().len(), 1);
    assert_eq!(store.notifications()[0].message, "disk unreadable");

    store.dispatch(Action::ExpireNotifications(Instant::now()));
    assert_eq!(store.notifications().len(), 1);

    let later = Instant::now() + Duration::from_secs(60);
    store.dispatch(Action::ExpireNotifications(later));
    assert!(store.notifications().is_empty());
}
