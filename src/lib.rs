//! The garden landscape CLI client library.
//!
//! This crate provides the core functionality for targeting objects in a
//! multi-level cluster-management hierarchy: the target model, the flag
//! merge ("promotion") semantics, the persistence providers, the target
//! manager, and the completion resolver.
//!
//! # Modules
//!
//! - `actions`: Command logic behind the CLI subcommands
//! - `cli`: Argument dispatch
//! - `commands`: CLI command definitions
//! - `configuration`: Settings file with gardens and aliases
//! - `flags`: Transient target overrides and the promotion algorithm
//! - `landscape_api`: HTTP client for name lookups
//! - `lookup`: Name lookup service seam
//! - `manager`: Target mutation and resolution
//! - `provider`: Durable and flag-merging target providers
//! - `target`: The target value model

pub mod actions;
pub mod cli;
pub mod commands;
pub mod configuration;
pub mod error;
pub mod exit_codes;
pub mod flags;
pub mod format;
pub mod landscape_api;
pub mod lookup;
pub mod manager;
pub mod provider;
pub mod target;
