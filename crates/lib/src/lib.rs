//! quire-lib: command-execution core for the quire static-content build tool
//!
//! This crate provides the pieces every `quire` command runs through:
//! - `CommandRunner`: per-invocation executor with the error boundary
//! - `ProjectContext`: lazily acquired, memoized handle to the project model
//! - `VcsRegistry`: symbolic lookup of pluggable version-control backends
//! - `AttributeStore`: mutable key/value attributes on items and layouts

pub mod attributes;
pub mod consts;
pub mod data_source;
pub mod entity;
pub mod error;
pub mod project;
pub mod runner;
pub mod vcs;

pub use error::{Error, Result, Severity};
