//! Vault Governance - plan tiers, seat capacity and membership rules for vaults.
//!
//! This crate implements the plan & seat governance engine that decides whether
//! a vault may hold N members under a given plan tier, together with the role
//! checks, invitation flow and HTTP surface that call into it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
