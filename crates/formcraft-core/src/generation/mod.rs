//! Natural-language to form-schema generation.
//!
//! - `prompt`: builds the instruction sent to the model
//! - `client`: `TextGenerator` port for the text-generation endpoint
//! - `extractor`: recovers one JSON object from raw model output
//! - `validator`: checks the object against the accepted schema shapes
//! - `pipeline`: runs the stages in order and reports the first failure

pub mod client;
pub mod extractor;
pub mod pipeline;
pub mod prompt;
pub mod validator;
