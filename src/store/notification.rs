use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub created: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created) >= ttl
    }
}

pub(crate) fn batch_summary(accepted: usize, rejected: usize) -> (NotificationKind, String) {
    if rejected == 0 {
        (
            NotificationKind::Success,
            format!("{} file(s) uploaded successfully", accepted),
        )
    } else if accepted == 0 {
        (NotificationKind::Warning, format!("{} file(s) rejected", rejected))
    } else {
        (
            NotificationKind::Warning,
            format!("{} file(s) uploaded, {} rejected", accepted, rejected),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_wording() {
        assert_eq!(
            batch_summary(2, 0),
            (
                NotificationKind::Success,
                "2 file(s) uploaded successfully".to_string()
            )
        );
        assert_eq!(batch_summary(0, 1).1, "1 file(s) rejected");
        assert_eq!(batch_summary(3, 1).1, "3 file(s) uploaded, 1 rejected");
    }

    #[test]
    fn expiry_is_inclusive_of_ttl() {
        let created = Instant::now();
        let note = Notification {
            id: 1,
            kind: NotificationKind::Success,
            message: String::new(),
            created,
        };
        let ttl = Duration::from_secs(4);
        assert!(!note.is_expired(created + Duration::from_secs(3), ttl));
        assert!(note.is_expired(created + ttl, ttl));
    }
}
