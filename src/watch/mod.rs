// src/watch/mod.rs

//! File watching.
//!
//! This module is responsible for:
//! - Expanding watch entries (files, directories, directory globs).
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//! - Forwarding change notifications into the control channel and rearming
//!   paths after their events have been handled.
//!
//! It does **not** know about build or run commands; it only turns
//! filesystem changes into control events.

pub mod paths;
pub mod watcher;

pub use paths::{expand_glob, is_glob};
pub use watcher::{spawn_watcher, WatchControl, WatchGuard};
