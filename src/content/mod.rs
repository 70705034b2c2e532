//! Content lifecycle management for Copydesk.
//!
//! This module implements the review-and-scheduling pipeline for generated
//! content: validated lifecycle transitions on content items, the
//! recurring scheduler sweep that posts due items, and the services tying
//! generation providers and persistence together. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
