//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `SyncUseCase` - One engine run (scan, plan, apply, persist manifest)
//! - `WatchUseCase` - Debounced re-runs on source changes
//! - `ScheduleUseCase` - One run per day at a fixed local time
//! - `publish` - Sync, then run the external publish command
//!
//! `RunStatus` carries in-flight and last-run state between runs.

pub mod publish;
pub mod schedule;
pub mod status;
pub mod sync;
pub mod watch;

pub use publish::{command_line, publish, run_publish_command};
pub use schedule::{next_run_after, ScheduleEvent, ScheduleOptions, ScheduleUseCase};
pub use status::RunStatus;
pub use sync::{
    run_sync, DanglingReference, Reconciler, SnapshotBuilder, SyncOptions, SyncOutcome,
    SyncReport, SyncUseCase,
};
pub use watch::{WatchEvent, WatchOptions, WatchUseCase, WatcherState, DEBOUNCE_MS};
