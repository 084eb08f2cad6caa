//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth types)
//! - `vault` - Plan catalog, capacity calculator, change guards, roles and invites

pub mod foundation;
pub mod vault;
