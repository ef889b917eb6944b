//! Cat personnel records and the service enforcing their rules.
//!
//! Cats are a flat table. The only policy is input validation and a breed
//! lookup against the external catalog, consulted on creation only.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CoreError, CoreResult};
use crate::types::DbId;

/// Message returned when a cat is created without a name.
pub const MSG_EMPTY_NAME: &str = "cat name cannot be empty";

/// Message returned when a negative salary is submitted.
pub const MSG_NEGATIVE_SALARY: &str = "salary cannot be negative";

/// Largest salary the `NUMERIC(12, 2)` column can hold.
pub const MAX_SALARY: f64 = 9_999_999_999.99;

/// Message returned when a salary does not fit the column.
pub const MSG_SALARY_TOO_LARGE: &str = "salary cannot exceed 9999999999.99";

/// A row from the `cats` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cat {
    pub id: DbId,
    pub name: String,
    pub years_of_experience: i32,
    pub breed: String,
    /// Two-decimal monetary amount.
    pub salary: f64,
}

/// DTO for creating a new cat.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCat {
    #[validate(length(min = 2, max = 50, message = "name must be between 2 and 50 characters"))]
    pub name: String,
    #[validate(range(min = 0, max = 50, message = "years_of_experience must be between 0 and 50"))]
    pub years_of_experience: i32,
    #[validate(length(min = 1, message = "breed is required"))]
    pub breed: String,
    #[validate(range(
        min = 0.0,
        max = 9_999_999_999.99,
        message = "salary must be between 0 and 9999999999.99"
    ))]
    pub salary: f64,
}

/// Persistence capability for cats.
#[async_trait]
pub trait CatRepository: Send + Sync {
    /// Insert a cat, returning it with its assigned id.
    async fn create(&self, input: &NewCat) -> CoreResult<Cat>;

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Cat>>;

    /// All cats, ordered by id.
    async fn list(&self) -> CoreResult<Vec<Cat>>;

    /// Replace the salary. Returns `false` if no row with `id` exists.
    async fn update_salary(&self, id: DbId, salary: f64) -> CoreResult<bool>;

    /// Remove a cat. Returns `false` if no row with `id` exists.
    async fn delete(&self, id: DbId) -> CoreResult<bool>;
}

/// Breed catalog capability.
///
/// Implementations answer whether `breed` names a known breed (exact,
/// case-sensitive match) and return [`CoreError::Upstream`] when the catalog
/// cannot be consulted.
#[async_trait]
pub trait BreedValidator: Send + Sync {
    async fn validate_breed(&self, breed: &str) -> CoreResult<bool>;
}

/// Validate a salary value.
pub fn validate_salary(salary: f64) -> CoreResult<()> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(CoreError::Validation(MSG_NEGATIVE_SALARY.to_string()));
    }
    if salary > MAX_SALARY {
        return Err(CoreError::Validation(MSG_SALARY_TOO_LARGE.to_string()));
    }
    Ok(())
}

/// Cat operations over a [`CatRepository`] and a [`BreedValidator`].
#[derive(Clone)]
pub struct CatService {
    repo: Arc<dyn CatRepository>,
    breeds: Arc<dyn BreedValidator>,
}

impl CatService {
    pub fn new(repo: Arc<dyn CatRepository>, breeds: Arc<dyn BreedValidator>) -> Self {
        Self { repo, breeds }
    }

    /// Create a cat after checking its breed against the catalog.
    ///
    /// Nothing is persisted unless the catalog confirms the breed.
    pub async fn create(&self, input: &NewCat) -> CoreResult<Cat> {
        if input.name.trim().is_empty() {
            return Err(CoreError::Validation(MSG_EMPTY_NAME.to_string()));
        }
        validate_salary(input.salary)?;

        let known = self.breeds.validate_breed(&input.breed).await?;
        if !known {
            tracing::debug!(breed = %input.breed, "Rejected cat with unknown breed");
            return Err(CoreError::InvalidBreed);
        }

        let cat = self.repo.create(input).await?;
        tracing::info!(cat_id = cat.id, "Cat created");
        Ok(cat)
    }

    pub async fn get_by_id(&self, id: DbId) -> CoreResult<Cat> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(CoreError::not_found("Cat", id))
    }

    pub async fn update_salary(&self, id: DbId, salary: f64) -> CoreResult<()> {
        validate_salary(salary)?;
        if self.repo.update_salary(id, salary).await? {
            Ok(())
        } else {
            Err(CoreError::not_found("Cat", id))
        }
    }

    pub async fn delete(&self, id: DbId) -> CoreResult<()> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(CoreError::not_found("Cat", id))
        }
    }

    pub async fn list(&self) -> CoreResult<Vec<Cat>> {
        self.repo.list().await
    }
}
