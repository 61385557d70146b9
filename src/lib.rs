//! Ignitia: an AI-assisted e-learning catalog backend.
//!
//! The library half carries everything testable: the domain schema, the
//! assessment quiz engine, the recommendation contract, storage and the
//! HTTP surface. The binary in `main.rs` only wires configuration and
//! serves the router.

pub mod analytics;
pub mod domain;
pub mod middleware;
pub mod services;
pub mod state;
pub mod storage;
pub mod web;
