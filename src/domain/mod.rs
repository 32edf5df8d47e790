//! Domain Layer
//!
//! The reconciliation rules of notemirror, free of concrete I/O.
//!
//! - `entities/` - Document/asset records, Snapshot, Manifest
//! - `value_objects/` - Safe paths, ignore patterns, content hashes
//! - `services/` - Filter, normalizer, embed scanner, resolver, planner
//! - `ports/` - Interfaces implemented by infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
