//! Domain Services
//!
//! Business rules of the mirror: which documents publish, how names are
//! normalized, how embeds are found and rewritten, and how a snapshot is
//! diffed against the manifest. Only the resolver touches disk, through the
//! `FileSystem` port.

pub mod embeds;
pub mod normalizer;
pub mod planner;
pub mod publishability;
pub mod resolver;
pub mod rewriter;

pub use embeds::{extract_references, Embed, EmbedKind};
pub use normalizer::{asset_link, base_name, dest_asset_path, normalize_file_name, DEST_IMAGE_DIR};
pub use planner::{IgnoredEntry, PlannedDelete, PlannedWrite, Planner, SyncPlan, WriteReason};
pub use publishability::{is_publishable, PUBLISH_KEYS};
pub use resolver::AssetResolver;
pub use rewriter::rewrite_body;
