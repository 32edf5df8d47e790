//! Daily scheduler
//!
//! Triggers one job per day at a local time of day until stopped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveTime, TimeZone};
use serde::Serialize;

use crate::config::PublishConfig;
use crate::error::MirrorResult;

use super::publish::publish;
use super::status::RunStatus;
use super::sync::{run_sync, SyncOptions};

/// How often the loop checks the clock and the stop flag
const TICK: Duration = Duration::from_millis(200);

/// First occurrence of `at` strictly after `now`.
///
/// Local times skipped by a DST transition move to the next day that has them.
pub fn next_run_after<Tz: TimeZone>(now: &DateTime<Tz>, at: NaiveTime) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let mut date = now.date_naive();
    for _ in 0..3 {
        if let Some(candidate) = tz.from_local_datetime(&date.and_time(at)).earliest() {
            if candidate > *now {
                return Some(candidate);
            }
        }
        date = date.succ_opt()?;
    }
    None
}

/// Scheduler events for NDJSON output
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScheduleEvent {
    Scheduled { next_run: String },
    RunStarted,
    RunComplete { summary: String },
    Error { message: String },
    Shutdown,
}

impl ScheduleEvent {
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("schedule"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Options for the daily loop
#[derive(Debug, Clone)]
pub struct ScheduleOptions {
    pub sync: SyncOptions,
    pub at: NaiveTime,
    /// Publish after syncing when set
    pub publish: Option<PublishConfig>,
}

/// Daily scheduler use case
pub struct ScheduleUseCase {
    options: ScheduleOptions,
}

impl ScheduleUseCase {
    pub fn new(options: ScheduleOptions) -> Self {
        Self { options }
    }

    /// Block until `running` is cleared. Failed runs are reported and the
    /// loop waits for the next day.
    pub fn start<F>(&self, running: Arc<AtomicBool>, on_event: F) -> MirrorResult<RunStatus>
    where
        F: Fn(ScheduleEvent),
    {
        let mut status = RunStatus::new();

        'outer: while running.load(Ordering::SeqCst) {
            let Some(next) = next_run_after(&Local::now(), self.options.at) else {
                break;
            };
            on_event(ScheduleEvent::Scheduled {
                next_run: next.to_rfc3339(),
            });

            while Local::now() < next {
                if !running.load(Ordering::SeqCst) {
                    break 'outer;
                }
                std::thread::sleep(TICK);
            }

            status = self.run_once(status, &on_event);
        }

        on_event(ScheduleEvent::Shutdown);
        Ok(status)
    }

    fn run_once<F>(&self, status: RunStatus, on_event: &F) -> RunStatus
    where
        F: Fn(ScheduleEvent),
    {
        let status = match status.clone().begin() {
            Ok(started) => started,
            Err(err) => {
                on_event(ScheduleEvent::Error {
                    message: err.to_string(),
                });
                return status;
            }
        };
        on_event(ScheduleEvent::RunStarted);

        let result = match &self.options.publish {
            Some(config) => publish(&self.options.sync, config),
            None => run_sync(&self.options.sync),
        };
        let is_publish = self.options.publish.is_some();

        match result {
            Ok(outcome) => {
                on_event(ScheduleEvent::RunComplete {
                    summary: outcome.report.summary(),
                });
                if is_publish {
                    status.finish_publish(Ok(&outcome.report))
                } else {
                    status.finish_sync(Ok(&outcome.report))
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "scheduled run failed");
                on_event(ScheduleEvent::Error {
                    message: err.to_string(),
                });
                status.finish_sync(Err(&err))
            }
        }
    }
}
