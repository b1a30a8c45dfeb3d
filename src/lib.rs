//! Gesture-driven swipe and rewind engine for a discovery deck.
//!
//! [`SwipeEngine`] turns drags and button presses into pass / like /
//! super-like decisions, keeps a bounded rewind history, and reports to a
//! [`DiscoverySource`](collaborator::DiscoverySource). It has no rendering
//! or I/O of its own; [`storage`] provides a file-backed source for the CLI.

pub mod collaborator;
pub mod config;
pub mod engine;
pub mod model;
pub mod storage;

pub use config::{Config, Thresholds};
pub use engine::{Commit, Release, RewindHistory, SwipeEngine, SwipeError, SyncStatus, Undone};
