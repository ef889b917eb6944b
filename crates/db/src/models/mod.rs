//! Row structs for the store tables.
//!
//! Each row derives `FromRow` and converts into its `spycat_core` entity.

pub mod cat;
pub mod mission;
