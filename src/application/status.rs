//! Run status record
//!
//! In-process view of the orchestration state: whether a run is in flight
//! and how the last ones went. Threaded through the long-running loops by
//! value; the engine itself never sees it.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::{MirrorError, MirrorResult};

use super::sync::SyncReport;

/// Snapshot of orchestration state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStatus {
    pub in_flight: bool,
    pub last_sync: Option<DateTime<Local>>,
    pub last_publish: Option<DateTime<Local>>,
    pub last_error: Option<String>,
    pub last_summary: Option<String>,
}

impl RunStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a run as started. Rejects overlapping runs.
    pub fn begin(self) -> MirrorResult<Self> {
        if self.in_flight {
            return Err(MirrorError::Busy {
                holder: "in-process run".to_string(),
            });
        }
        Ok(Self {
            in_flight: true,
            ..self
        })
    }

    /// Record the outcome of a sync.
    pub fn finish_sync(self, result: Result<&SyncReport, &MirrorError>) -> Self {
        self.finish(result, false)
    }

    /// Record the outcome of a publish (sync plus external command).
    pub fn finish_publish(self, result: Result<&SyncReport, &MirrorError>) -> Self {
        self.finish(result, true)
    }

    fn finish(self, result: Result<&SyncReport, &MirrorError>, publish: bool) -> Self {
        let now = Local::now();
        match result {
            Ok(report) => Self {
                in_flight: false,
                last_sync: Some(now),
                last_publish: if publish { Some(now) } else { self.last_publish },
                last_error: None,
                last_summary: Some(report.summary()),
            },
            Err(err) => Self {
                in_flight: false,
                last_error: Some(err.to_string()),
                ..self
            },
        }
    }
}
