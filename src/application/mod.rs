//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Routing, command dispatch and the transport entry point
//! - Errors: Domain-specific errors
//! - Messaging: Filtering, trigger rules, text cleaning, reply chunking

pub mod errors;
pub mod services;
pub mod messaging;
