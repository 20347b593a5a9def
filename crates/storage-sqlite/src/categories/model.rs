//! Database model for categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use caixa_core::categories::{
    Category, NewCategory, TRANSFER_CATEGORY_COLOR, TRANSFER_CATEGORY_DESCRIPTION,
    TRANSFER_CATEGORY_ICON, TRANSFER_CATEGORY_NAME,
};
use caixa_core::errors::Result;

/// Database model for categories.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub description: String,
    pub category_type: String,
    pub color: String,
    pub icon: String,
    pub parent_id: Option<String>,
    pub is_active: bool,
    pub visible: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl CategoryDB {
    /// Materializes a row for insertion. New categories are always active.
    pub fn from_new(new_category: NewCategory) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: new_category
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            user_id: new_category.user_id,
            name: new_category.name,
            description: new_category.description,
            category_type: new_category.category_type.as_str().to_string(),
            color: new_category.color,
            icon: new_category.icon,
            parent_id: new_category.parent_id,
            is_active: true,
            visible: new_category.visible.unwrap_or(true),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// The shared system transfer category, ready for insertion.
    pub fn system_transfer() -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: None,
            name: TRANSFER_CATEGORY_NAME.to_string(),
            description: TRANSFER_CATEGORY_DESCRIPTION.to_string(),
            category_type: "transfer".to_string(),
            color: TRANSFER_CATEGORY_COLOR.to_string(),
            icon: TRANSFER_CATEGORY_ICON.to_string(),
            parent_id: None,
            is_active: true,
            visible: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn into_domain(self) -> Result<Category> {
        Ok(Category {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            category_type: self.category_type.parse()?,
            color: self.color,
            icon: self.icon,
            parent_id: self.parent_id,
            is_active: self.is_active,
            visible: self.visible,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}
