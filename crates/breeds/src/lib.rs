//! Client for the external breed catalog.
//!
//! Provides [`TheCatApiClient`], the production [`BreedValidator`] used when
//! creating cats.
//!
//! [`BreedValidator`]: spycat_core::cat::BreedValidator

pub mod client;

pub use client::{contains_breed, Breed, BreedCatalogError, TheCatApiClient};

/// Default catalog endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://api.thecatapi.com/v1/breeds";
