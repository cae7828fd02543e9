//! Storage helpers for the service layer
//!
//! Small building blocks for whole-file JSON persistence: tolerant reads,
//! pretty-printed serialization and temp-file staging with rename-on-commit.

pub mod json_file;
