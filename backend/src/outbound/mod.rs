//! Outbound adapters implementing the domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-process repositories for tests and database-less runs.
//! - **credentials**: Argon2id password hashing.
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no business rules.

pub mod credentials;
pub mod memory;
pub mod persistence;
