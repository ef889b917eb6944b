//! Domain layer of the spy cat agency service.
//!
//! Holds the entity types, the capability traits the store and the breed
//! catalog implement, and the services that enforce the cat and mission
//! rules on top of them.

pub mod cat;
pub mod error;
pub mod mission;
pub mod types;

#[cfg(any(test, feature = "memory-store"))]
pub mod memory;
