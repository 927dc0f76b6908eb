//! Shared domain types for Formcraft.
//!
//! This crate contains the core domain types used across the Formcraft
//! workspace: form schemas as produced by the language model, persisted
//! forms and submissions, the generation error taxonomy, and configuration.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod form;
pub mod generation;
pub mod schema;
pub mod submission;
