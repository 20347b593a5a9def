use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use caixa_core::categories::{
    Category, CategoryRepositoryTrait, CategoryType, CategoryUpdate, NewCategory,
    TRANSFER_CATEGORY_NAME,
};
use caixa_core::errors::{Error, Result, ValidationError};

use super::model::CategoryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::categories;

/// Repository for managing category rows.
pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_by_id(conn: &mut SqliteConnection, category_id: &str) -> Result<Option<CategoryDB>> {
    categories::table
        .find(category_id)
        .select(CategoryDB::as_select())
        .first::<CategoryDB>(conn)
        .optional()
        .into_core()
}

fn find_transfer_category(conn: &mut SqliteConnection) -> Result<Option<CategoryDB>> {
    // Exact name first, then any live transfer-typed category.
    let by_name = categories::table
        .filter(categories::category_type.eq("transfer"))
        .filter(categories::name.eq(TRANSFER_CATEGORY_NAME))
        .filter(categories::deleted_at.is_null())
        .select(CategoryDB::as_select())
        .first::<CategoryDB>(conn)
        .optional()
        .into_core()?;
    if by_name.is_some() {
        return Ok(by_name);
    }
    categories::table
        .filter(categories::category_type.eq("transfer"))
        .filter(categories::deleted_at.is_null())
        .select(CategoryDB::as_select())
        .first::<CategoryDB>(conn)
        .optional()
        .into_core()
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn| {
                let row = CategoryDB::from_new(new_category);
                diesel::insert_into(categories::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                row.into_domain()
            })
            .await
    }

    async fn update(&self, update: CategoryUpdate) -> Result<Category> {
        self.writer
            .exec(move |conn| {
                let category_id = update
                    .id
                    .clone()
                    .ok_or(Error::Validation(ValidationError::MissingField(
                        "id".to_string(),
                    )))?;

                let existing = load_by_id(conn, &category_id)?
                    .ok_or_else(|| Error::NotFound(format!("category {category_id}")))?;

                let now = chrono::Utc::now().naive_utc();
                diesel::update(
                    categories::table
                        .find(&category_id)
                        .filter(categories::user_id.eq(&update.user_id)),
                )
                .set((
                    categories::name.eq(&update.name),
                    categories::description.eq(&update.description),
                    categories::color.eq(&update.color),
                    categories::icon.eq(&update.icon),
                    categories::is_active.eq(update.is_active.unwrap_or(existing.is_active)),
                    categories::visible.eq(update.visible.unwrap_or(existing.visible)),
                    categories::updated_at.eq(now),
                ))
                .execute(conn)
                .into_core()?;

                // A root category's color is mirrored onto its live children
                // in the same transaction, so readers never see a half-done
                // cascade.
                if existing.parent_id.is_none() && update.color != existing.color {
                    let repainted = diesel::update(
                        categories::table
                            .filter(categories::parent_id.eq(&category_id))
                            .filter(categories::user_id.eq(&update.user_id))
                            .filter(categories::deleted_at.is_null()),
                    )
                    .set((
                        categories::color.eq(&update.color),
                        categories::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .into_core()?;
                    if repainted > 0 {
                        debug!(
                            "propagated color of category {} to {} children",
                            category_id, repainted
                        );
                    }
                }

                load_by_id(conn, &category_id)?
                    .ok_or_else(|| Error::NotFound(format!("category {category_id}")))?
                    .into_domain()
            })
            .await
    }

    async fn soft_delete_with_children(&self, category_id: &str, user_id: &str) -> Result<()> {
        let category_id = category_id.to_string();
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let now = chrono::Utc::now().naive_utc();
                diesel::update(
                    categories::table
                        .filter(categories::parent_id.eq(&category_id))
                        .filter(categories::user_id.eq(&user_id))
                        .filter(categories::deleted_at.is_null()),
                )
                .set((
                    categories::deleted_at.eq(Some(now)),
                    categories::updated_at.eq(now),
                ))
                .execute(conn)
                .into_core()?;

                diesel::update(
                    categories::table
                        .find(&category_id)
                        .filter(categories::user_id.eq(&user_id))
                        .filter(categories::deleted_at.is_null()),
                )
                .set((
                    categories::deleted_at.eq(Some(now)),
                    categories::updated_at.eq(now),
                ))
                .execute(conn)
                .into_core()?;
                Ok(())
            })
            .await
    }

    async fn hard_delete_with_children(&self, category_id: &str) -> Result<()> {
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    categories::table.filter(categories::parent_id.eq(&category_id)),
                )
                .execute(conn)
                .into_core()?;
                diesel::delete(categories::table.find(&category_id))
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    async fn get_or_create_transfer_category(&self) -> Result<Category> {
        self.writer
            .exec(move |conn| {
                if let Some(found) = find_transfer_category(conn)? {
                    return found.into_domain();
                }

                let row = CategoryDB::system_transfer();
                match diesel::insert_into(categories::table)
                    .values(&row)
                    .execute(conn)
                {
                    Ok(_) => row.into_domain(),
                    // Another writer won the race against the partial unique
                    // index; the category exists now, so fetch it.
                    Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                        find_transfer_category(conn)?
                            .ok_or_else(|| Error::NotFound("transfer category".to_string()))?
                            .into_domain()
                    }
                    Err(e) => Err(crate::errors::StorageError::QueryFailed(e).into()),
                }
            })
            .await
    }

    fn get_by_id(&self, category_id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let row = load_by_id(&mut conn, category_id)?;
        row.map(CategoryDB::into_domain).transpose()
    }

    fn get_by_name(
        &self,
        name: &str,
        category_type: CategoryType,
        user_id: &str,
    ) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let row = categories::table
            .filter(categories::name.eq(name))
            .filter(categories::category_type.eq(category_type.as_str()))
            .filter(categories::user_id.eq(user_id))
            .filter(categories::deleted_at.is_null())
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(&mut conn)
            .optional()
            .into_core()?;

        row.map(CategoryDB::into_domain).transpose()
    }

    fn list(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = categories::table
            .filter(categories::user_id.eq(user_id))
            .filter(categories::deleted_at.is_null())
            .select(CategoryDB::as_select())
            .order(categories::name.asc())
            .load::<CategoryDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(CategoryDB::into_domain).collect()
    }

    fn list_by_type(&self, user_id: &str, category_type: CategoryType) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = categories::table
            .filter(categories::user_id.eq(user_id))
            .filter(categories::category_type.eq(category_type.as_str()))
            .filter(categories::deleted_at.is_null())
            .select(CategoryDB::as_select())
            .order(categories::name.asc())
            .load::<CategoryDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(CategoryDB::into_domain).collect()
    }

    fn children(&self, parent_id: &str, user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = categories::table
            .filter(categories::parent_id.eq(parent_id))
            .filter(categories::user_id.eq(user_id))
            .filter(categories::deleted_at.is_null())
            .select(CategoryDB::as_select())
            .order(categories::name.asc())
            .load::<CategoryDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(CategoryDB::into_domain).collect()
    }

    fn children_including_deleted(&self, parent_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = categories::table
            .filter(categories::parent_id.eq(parent_id))
            .select(CategoryDB::as_select())
            .order(categories::name.asc())
            .load::<CategoryDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(CategoryDB::into_domain).collect()
    }
}
