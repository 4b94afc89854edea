pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git_ops;
pub mod publish;
pub mod rewrite;
pub mod ui;
pub mod validator;

pub use error::{RelverError, Result};
