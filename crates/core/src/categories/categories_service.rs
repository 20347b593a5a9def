use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::categories_constants::DEFAULT_CATEGORIES;
use super::categories_errors::CategoryError;
use super::categories_model::{
    Category, CategoryType, CategoryUpdate, CategoryWithSubcategories, NewCategory,
};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result};
use crate::transactions::TransactionRepositoryTrait;

/// Service for managing the category hierarchy.
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl CategoryService {
    pub fn new(
        repository: Arc<dyn CategoryRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            transaction_repository,
        }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    /// Creates a category. A declared parent must exist, be active and carry
    /// the same type as the new category.
    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;

        if let Some(parent_id) = &new_category.parent_id {
            let parent = self
                .repository
                .get_by_id(parent_id)?
                .ok_or_else(|| CategoryError::ParentNotFound(parent_id.clone()))?;
            if !parent.is_active {
                return Err(CategoryError::ParentInactive(parent.name).into());
            }
            if parent.category_type != new_category.category_type {
                return Err(CategoryError::ParentTypeMismatch(parent.name).into());
            }
        }

        self.repository.create(new_category).await
    }

    async fn update_category(&self, update: CategoryUpdate) -> Result<Category> {
        update.validate()?;

        let id = update.id.clone().unwrap_or_default();
        if self.repository.get_by_id(&id)?.is_none() {
            return Err(Error::NotFound(format!("category {id}")));
        }

        self.repository.update(update).await
    }

    /// Soft-deletes a category and its subcategories. The whole cascade is
    /// aborted when the category or any live child still has transactions
    /// attached; the error names the blocking node.
    async fn delete_category(&self, category_id: &str, user_id: &str) -> Result<()> {
        let existing = self
            .repository
            .get_by_id(category_id)?
            .ok_or_else(|| Error::NotFound(format!("category {category_id}")))?;

        if self
            .transaction_repository
            .has_any_for_category(category_id, user_id)?
        {
            return Err(CategoryError::HasTransactions {
                category: existing.name,
            }
            .into());
        }

        let children = self.repository.children(category_id, user_id)?;
        for child in &children {
            if self
                .transaction_repository
                .has_any_for_category(&child.id, user_id)?
            {
                return Err(CategoryError::SubcategoryHasTransactions {
                    category: existing.name,
                    subcategory: child.name.clone(),
                }
                .into());
            }
        }

        self.repository
            .soft_delete_with_children(category_id, user_id)
            .await
    }

    async fn hard_delete_category(&self, category_id: &str) -> Result<()> {
        if self.repository.get_by_id(category_id)?.is_none() {
            return Err(Error::NotFound(format!("category {category_id}")));
        }
        self.repository.hard_delete_with_children(category_id).await
    }

    async fn get_or_create_transfer_category(&self) -> Result<Category> {
        self.repository.get_or_create_transfer_category().await
    }

    /// Seeds the stock categories for a new user. Existing categories are
    /// left untouched, so calling this on every login is safe.
    async fn seed_default_categories(&self, user_id: &str) -> Result<()> {
        let mut created = 0usize;
        for (name, category_type, color, icon) in DEFAULT_CATEGORIES {
            if self
                .repository
                .get_by_name(name, *category_type, user_id)?
                .is_some()
            {
                continue;
            }
            let result = self
                .repository
                .create(NewCategory {
                    id: None,
                    user_id: Some(user_id.to_string()),
                    name: (*name).to_string(),
                    description: String::new(),
                    category_type: *category_type,
                    color: (*color).to_string(),
                    icon: (*icon).to_string(),
                    parent_id: None,
                    visible: Some(true),
                })
                .await;
            match result {
                Ok(_) => created += 1,
                // A concurrent login may have seeded the same name already.
                Err(err) => warn!("default category '{}' for user {} not created: {}", name, user_id, err),
            }
        }
        if created > 0 {
            debug!("seeded {} default categories for user {}", created, user_id);
        }
        Ok(())
    }

    fn get_category(&self, category_id: &str) -> Result<Category> {
        self.repository
            .get_by_id(category_id)?
            .ok_or_else(|| Error::NotFound(format!("category {category_id}")))
    }

    fn get_category_by_name(
        &self,
        name: &str,
        category_type: CategoryType,
        user_id: &str,
    ) -> Result<Option<Category>> {
        self.repository.get_by_name(name, category_type, user_id)
    }

    fn list_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.repository.list(user_id)
    }

    fn list_by_type(&self, user_id: &str, category_type: CategoryType) -> Result<Vec<Category>> {
        self.repository.list_by_type(user_id, category_type)
    }

    fn list_with_subcategories(
        &self,
        user_id: &str,
        category_type: CategoryType,
    ) -> Result<Vec<CategoryWithSubcategories>> {
        let categories = self.repository.list_by_type(user_id, category_type)?;
        let mut result = Vec::new();
        for category in categories.into_iter().filter(Category::is_root) {
            let subcategories = self.repository.children(&category.id, user_id)?;
            result.push(CategoryWithSubcategories {
                category,
                subcategories,
            });
        }
        Ok(result)
    }

    fn subcategories(&self, parent_id: &str, user_id: &str) -> Result<Vec<Category>> {
        if self.repository.get_by_id(parent_id)?.is_none() {
            return Err(Error::NotFound(format!("category {parent_id}")));
        }
        self.repository.children(parent_id, user_id)
    }
}
