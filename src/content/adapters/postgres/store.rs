//! `PostgreSQL` store implementation for content item persistence.

use super::{
    models::{ContentItemChanges, ContentItemRow, NewContentItemRow},
    schema::content_items,
};
use crate::content::{
    domain::{ContentId, ContentItem, ContentStatus, ContentType, PersistedContentData, Prompt},
    ports::{ContentStore, ContentStoreError, ContentStoreResult},
};
use crate::identity::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by content adapters.
pub type ContentPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed content store.
#[derive(Debug, Clone)]
pub struct PostgresContentStore {
    pool: ContentPgPool,
}

impl PostgresContentStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ContentPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ContentStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ContentStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ContentStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ContentStoreError::persistence)?
    }
}

#[async_trait]
impl ContentStore for PostgresContentStore {
    async fn list(&self, owner: UserId) -> ContentStoreResult<Vec<ContentItem>> {
        self.run_blocking(move |connection| {
            let rows = content_items::table
                .filter(content_items::owner_id.eq(owner.into_inner()))
                .order(content_items::created_at.asc())
                .select(ContentItemRow::as_select())
                .load::<ContentItemRow>(connection)
                .map_err(ContentStoreError::persistence)?;
            rows.into_iter().map(row_to_item).collect()
        })
        .await
    }

    async fn create(&self, owner: UserId, item: &ContentItem) -> ContentStoreResult<ContentItem> {
        let item_id = item.id();
        let new_row = to_new_row(owner, item);
        let stored = item.clone();

        self.run_blocking(move |connection| {
            diesel::insert_into(content_items::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ContentStoreError::DuplicateItem(item_id)
                    }
                    _ => ContentStoreError::persistence(err),
                })?;
            Ok(stored)
        })
        .await
    }

    async fn update(&self, owner: UserId, item: &ContentItem) -> ContentStoreResult<ContentItem> {
        let item_id = item.id();
        let changes = to_changes(item);
        let stored = item.clone();

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                content_items::table
                    .filter(content_items::id.eq(item_id.into_inner()))
                    .filter(content_items::owner_id.eq(owner.into_inner())),
            )
            .set(&changes)
            .execute(connection)
            .map_err(ContentStoreError::persistence)?;

            if affected == 0 {
                return Err(ContentStoreError::NotFound(item_id));
            }
            Ok(stored)
        })
        .await
    }

    async fn delete(&self, owner: UserId, id: ContentId) -> ContentStoreResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                content_items::table
                    .filter(content_items::id.eq(id.into_inner()))
                    .filter(content_items::owner_id.eq(owner.into_inner())),
            )
            .execute(connection)
            .map_err(ContentStoreError::persistence)?;

            if affected == 0 {
                return Err(ContentStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        owner: UserId,
        id: ContentId,
    ) -> ContentStoreResult<Option<ContentItem>> {
        self.run_blocking(move |connection| {
            let row = content_items::table
                .filter(content_items::id.eq(id.into_inner()))
                .filter(content_items::owner_id.eq(owner.into_inner()))
                .select(ContentItemRow::as_select())
                .first::<ContentItemRow>(connection)
                .optional()
                .map_err(ContentStoreError::persistence)?;
            row.map(row_to_item).transpose()
        })
        .await
    }
}

fn to_new_row(owner: UserId, item: &ContentItem) -> NewContentItemRow {
    NewContentItemRow {
        id: item.id().into_inner(),
        owner_id: owner.into_inner(),
        content_type: item.content_type().as_str().to_owned(),
        prompt: item.prompt().as_str().to_owned(),
        data: item.data().map(str::to_owned),
        status: item.status().as_str().to_owned(),
        schedule: item.schedule(),
        error_message: item.error_message().map(str::to_owned),
        created_at: item.created_at(),
        updated_at: item.updated_at(),
    }
}

fn to_changes(item: &ContentItem) -> ContentItemChanges {
    ContentItemChanges {
        status: item.status().as_str().to_owned(),
        data: item.data().map(str::to_owned),
        schedule: item.schedule(),
        error_message: item.error_message().map(str::to_owned),
        updated_at: item.updated_at(),
    }
}

fn row_to_item(row: ContentItemRow) -> ContentStoreResult<ContentItem> {
    let content_type =
        ContentType::try_from(row.content_type.as_str()).map_err(ContentStoreError::persistence)?;
    let status =
        ContentStatus::try_from(row.status.as_str()).map_err(ContentStoreError::persistence)?;
    let prompt = Prompt::new(row.prompt).map_err(ContentStoreError::persistence)?;

    Ok(ContentItem::from_persisted(PersistedContentData {
        id: ContentId::from_uuid(row.id),
        content_type,
        prompt,
        data: row.data,
        status,
        schedule: row.schedule,
        error_message: row.error_message,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
