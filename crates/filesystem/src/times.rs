//! Timestamp lookup that never fails.
//!
//! Metadata collection walks whole libraries; a single file with an
//! unreadable or out-of-range timestamp must not abort it. Failures are
//! logged at error level and replaced with [`MIN_TIMESTAMP`].

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use tracing::error;

/// Sentinel returned when a timestamp cannot be determined.
pub const MIN_TIMESTAMP: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

/// Which timestamp to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampKind {
    Creation,
    LastWrite,
}

impl TimestampKind {
    fn label(&self) -> &'static str {
        match self {
            Self::Creation => "CreationTimeUtc",
            Self::LastWrite => "LastWriteTimeUtc",
        }
    }

    fn read(&self, metadata: &Metadata) -> io::Result<SystemTime> {
        match self {
            Self::Creation => metadata.created(),
            Self::LastWrite => metadata.modified(),
        }
    }
}

/// Convert to UTC, or `None` if the time is outside chrono's range.
fn to_utc(time: SystemTime) -> Option<DateTime<Utc>> {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            let secs = i64::try_from(after.as_secs()).ok()?;
            DateTime::from_timestamp(secs, after.subsec_nanos())
        }
        Err(e) => {
            let before = e.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            let epoch = DateTime::from_timestamp(0, 0)?;
            let offset = chrono::Duration::try_seconds(secs)?
                + chrono::Duration::nanoseconds(i64::from(before.subsec_nanos()));
            epoch.checked_sub_signed(offset)
        }
    }
}

/// Read a timestamp of `path` as UTC, degrading to [`MIN_TIMESTAMP`].
pub fn timestamp_utc(path: &Path, kind: TimestampKind) -> DateTime<Utc> {
    let time = match fs::metadata(path).and_then(|metadata| kind.read(&metadata)) {
        Ok(time) => time,
        Err(e) => {
            error!(
                path = %path.display(),
                error = %e,
                "Error determining {} for {}",
                kind.label(),
                path.display()
            );
            return MIN_TIMESTAMP;
        }
    };

    utc_or_sentinel(path, kind, time)
}

/// Convert a timestamp already read from `path`, degrading to
/// [`MIN_TIMESTAMP`] when it is outside chrono's range.
fn utc_or_sentinel(path: &Path, kind: TimestampKind, time: SystemTime) -> DateTime<Utc> {
    to_utc(time).unwrap_or_else(|| {
        error!(
            path = %path.display(),
            "{} for {} is out of range",
            kind.label(),
            path.display()
        );
        MIN_TIMESTAMP
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_last_write_time_of_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fresh.txt");
        fs::write(&path, "data").unwrap();

        let modified = timestamp_utc(&path, TimestampKind::LastWrite);
        let drift = (Utc::now() - modified).abs();
        assert!(drift < Duration::minutes(5), "unexpected drift {drift}");
    }

    #[test]
    fn test_to_utc_handles_pre_epoch() {
        let before = UNIX_EPOCH - std::time::Duration::from_millis(1500);
        let converted = to_utc(before).unwrap();
        assert_eq!(converted.timestamp_millis(), -1500);
        assert_eq!(to_utc(UNIX_EPOCH).unwrap().timestamp(), 0);
    }

    #[test]
    fn test_out_of_range_time_degrades_to_sentinel() {
        // Some hosts cannot represent this far a time at all.
        let Some(far) = UNIX_EPOCH.checked_add(std::time::Duration::from_secs(1 << 62)) else {
            return;
        };

        assert_eq!(to_utc(far), None);
        assert_eq!(
            utc_or_sentinel(Path::new("far.mkv"), TimestampKind::LastWrite, far),
            MIN_TIMESTAMP
        );
    }

    #[test]
    fn test_in_range_time_converts() {
        let time = UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000);
        let converted = utc_or_sentinel(Path::new("a.mkv"), TimestampKind::Creation, time);
        assert_eq!(converted.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_missing_file_degrades_to_sentinel() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        assert_eq!(timestamp_utc(&path, TimestampKind::LastWrite), MIN_TIMESTAMP);
        assert_eq!(timestamp_utc(&path, TimestampKind::Creation), MIN_TIMESTAMP);
    }

    #[test]
    fn test_creation_time_is_sentinel_or_recent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("created.txt");
        fs::write(&path, "data").unwrap();

        // Some filesystems do not record birth time at all.
        let created = timestamp_utc(&path, TimestampKind::Creation);
        assert!(created == MIN_TIMESTAMP || (Utc::now() - created).abs() < Duration::minutes(5));
    }
}
