// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gateway Admin Console - back office for the payment gateway
//!
//! Staff manage companies, countries, payment providers, channels and
//! company wallets, run the payment check/confirm handshake, and browse
//! payment history. Every screen is a thin layer over the backend REST API.
//!
//! ## Modules
//!
//! - `api` - Typed backend client (reqwest)
//! - `models` - Backend resource shapes
//! - `health` - Liveness probe behind the shell badge
//! - `views` - Resource views: state, validation and text rendering
//! - `router` - Console paths to views
//! - `shell` - Header, navigation and health badge around a view
//! - `cli` - Command line surface (clap)

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod models;
pub mod router;
pub mod shell;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;
