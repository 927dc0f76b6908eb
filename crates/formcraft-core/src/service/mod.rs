//! Application services composing the pipeline and repositories.

pub mod form;
pub mod submission;

#[cfg(test)]
pub(crate) mod test_support;
