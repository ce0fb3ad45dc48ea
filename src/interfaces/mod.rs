// Command-line collaborator feeding the pipeline
pub mod cli;
