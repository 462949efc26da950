// Pipelines: the end-to-end flows the CLI commands run.

pub mod scan;

#[cfg(feature = "sqlite")]
pub mod import;
