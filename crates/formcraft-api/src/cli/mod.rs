//! CLI command definitions for the `formcraft` binary.
//!
//! Uses clap derive macros for argument parsing. Owner-scoped commands take
//! `--owner` (or `FORMCRAFT_OWNER`) in place of the web sign-in.

pub mod form;
pub mod status;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::state::ModelOverrides;

/// Generate forms from plain-language descriptions with a local model.
#[derive(Parser)]
#[command(name = "formcraft", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the `[model]` section of `config.toml`.
#[derive(Args, Debug, Default)]
pub struct ModelArgs {
    /// Text-generation endpoint URL.
    #[arg(long = "model-endpoint", env = "FORMCRAFT_MODEL_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Model name sent with each request.
    #[arg(long = "model", env = "FORMCRAFT_MODEL", global = true)]
    pub name: Option<String>,

    /// Seconds to wait for the model before giving up.
    #[arg(
        long = "model-timeout",
        env = "FORMCRAFT_MODEL_TIMEOUT",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: Option<u64>,
}

impl ModelArgs {
    pub fn overrides(&self) -> ModelOverrides {
        ModelOverrides {
            endpoint: self.endpoint.clone(),
            name: self.name.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Owner identity for owner-scoped commands.
#[derive(Args, Debug, Clone)]
pub struct OwnerArg {
    /// Owner id the forms belong to.
    #[arg(long, env = "FORMCRAFT_OWNER", default_value = "local")]
    pub owner: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a form from a description and save it.
    #[command(alias = "gen")]
    Generate {
        /// What the form should collect. Prompted for when omitted.
        description: Option<String>,

        #[command(flatten)]
        owner: OwnerArg,
    },

    /// List saved forms, newest first.
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        owner: OwnerArg,

        /// Only published forms.
        #[arg(long, conflicts_with = "drafts")]
        published: bool,

        /// Only unpublished forms.
        #[arg(long)]
        drafts: bool,

        /// Maximum number of forms to show.
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Show a form's fields and share link.
    Show {
        /// Form id.
        id: String,

        #[command(flatten)]
        owner: OwnerArg,
    },

    /// Publish a form so its share link accepts submissions.
    Publish {
        /// Form id.
        id: String,

        #[command(flatten)]
        owner: OwnerArg,
    },

    /// Take a form offline.
    Unpublish {
        /// Form id.
        id: String,

        #[command(flatten)]
        owner: OwnerArg,
    },

    /// List submissions for a form, newest first.
    Submissions {
        /// Form id.
        id: String,

        #[command(flatten)]
        owner: OwnerArg,

        /// Maximum number of submissions to show.
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Run extraction and validation over saved model output (no model call).
    Extract {
        /// File holding raw model output. Reads stdin when omitted.
        file: Option<PathBuf>,
    },

    /// System status dashboard.
    Status {
        #[command(flatten)]
        owner: OwnerArg,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
