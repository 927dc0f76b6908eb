//! Business logic and repository trait definitions for Formcraft.
//!
//! This crate owns the form generation pipeline (prompt, model call,
//! extraction, validation) and defines the "ports" (repository and
//! text-generator traits) that the infrastructure layer implements. It
//! depends only on `formcraft-types` -- never on `formcraft-infra` or any
//! database/IO crate.

pub mod generation;
pub mod repository;
pub mod service;
