//! Transaction load generator components.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

/// Selectable networks and their RPC endpoints.
pub mod chains;

/// Environment configuration.
pub mod config;

/// Template construction, gas estimation and the send loop.
pub mod generator;

/// Random calldata payloads.
pub mod payload;

/// Interactive numbered menus.
pub mod prompt;

/// Provider capable of filling and sending transactions.
pub mod provider;

// silence clippy
use clap as _;
use dotenvy as _;
use tracing as _;
