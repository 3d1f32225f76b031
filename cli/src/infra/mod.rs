//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the
//! cloud provider backends, and file-backed stores.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod aws;
pub mod command_runner;
pub mod config;
pub mod mock;
pub mod registry_store;
