//! Infrastructure layer for Formcraft.
//!
//! Contains implementations of the ports defined in `formcraft-core`:
//! SQLite storage for forms and submissions, the Ollama text generator,
//! and configuration loading.

pub mod config;
pub mod ollama;
pub mod sqlite;
