//! Category repository and service traits.
//!
//! These traits define the contract for category operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::categories_model::{
    Category, CategoryType, CategoryUpdate, CategoryWithSubcategories, NewCategory,
};
use crate::errors::Result;

/// Trait defining the contract for Category repository operations.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Creates a new category. Hierarchy rules are validated by the service.
    async fn create(&self, new_category: NewCategory) -> Result<Category>;

    /// Updates a category. When the target is a root category and its color
    /// changes, every live direct child's color is rewritten to match inside
    /// the same database transaction.
    async fn update(&self, update: CategoryUpdate) -> Result<Category>;

    /// Soft-deletes a category together with its live children, atomically.
    async fn soft_delete_with_children(&self, category_id: &str, user_id: &str) -> Result<()>;

    /// Permanently removes a category and all of its children, including
    /// already soft-deleted ones. No dependency checks are performed here;
    /// callers must ensure safety.
    async fn hard_delete_with_children(&self, category_id: &str) -> Result<()>;

    /// Returns the shared system transfer category, creating it when absent.
    ///
    /// Lookup is two-staged (exact name + type, then type only). A concurrent
    /// insert losing the race against the unique index is treated as
    /// "already exists" and re-fetched.
    async fn get_or_create_transfer_category(&self) -> Result<Category>;

    /// Fetches a category by id, regardless of owner.
    fn get_by_id(&self, category_id: &str) -> Result<Option<Category>>;

    /// Fetches a live category by name and type for a given user.
    fn get_by_name(
        &self,
        name: &str,
        category_type: CategoryType,
        user_id: &str,
    ) -> Result<Option<Category>>;

    /// Lists all live categories of a user, ordered by name.
    fn list(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Lists live categories of a user filtered by type, ordered by name.
    fn list_by_type(&self, user_id: &str, category_type: CategoryType) -> Result<Vec<Category>>;

    /// Lists the live direct children of a category.
    fn children(&self, parent_id: &str, user_id: &str) -> Result<Vec<Category>>;

    /// Lists all direct children of a category, including soft-deleted ones.
    fn children_including_deleted(&self, parent_id: &str) -> Result<Vec<Category>>;
}

/// Trait defining the contract for Category service operations.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    /// Creates a category after validating the hierarchy rules.
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    /// Updates a category (root color changes propagate to children).
    async fn update_category(&self, update: CategoryUpdate) -> Result<Category>;

    /// Soft-deletes a category and its children, blocked when any node of
    /// the subtree has live transactions attached.
    async fn delete_category(&self, category_id: &str, user_id: &str) -> Result<()>;

    /// Permanently removes a category and all of its children.
    async fn hard_delete_category(&self, category_id: &str) -> Result<()>;

    /// Returns the shared system transfer category, creating it when absent.
    async fn get_or_create_transfer_category(&self) -> Result<Category>;

    /// Idempotently creates the stock category set for a new user.
    async fn seed_default_categories(&self, user_id: &str) -> Result<()>;

    fn get_category(&self, category_id: &str) -> Result<Category>;

    fn get_category_by_name(
        &self,
        name: &str,
        category_type: CategoryType,
        user_id: &str,
    ) -> Result<Option<Category>>;

    fn list_categories(&self, user_id: &str) -> Result<Vec<Category>>;

    fn list_by_type(&self, user_id: &str, category_type: CategoryType) -> Result<Vec<Category>>;

    /// Lists root categories of a type, each with its live subcategories.
    fn list_with_subcategories(
        &self,
        user_id: &str,
        category_type: CategoryType,
    ) -> Result<Vec<CategoryWithSubcategories>>;

    fn subcategories(&self, parent_id: &str, user_id: &str) -> Result<Vec<Category>>;
}
