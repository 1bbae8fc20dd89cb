use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::category::Category;
use crate::models::idea::{
    total_pages, Idea, IdeaChanges, IdeaDetail, IdeaFilter, IdeaPage, NewIdea,
};
use crate::models::status::{IdeaStatus, StatusCounts};
use super::IdeaStore;

const CNT_IDEA_SLUG: &str = "ideas_slug_key";

const IDEA_COLUMNS: &str =
    "id, title, slug, description, category_id, status_id, votes_count, created_at";

#[derive(sqlx::FromRow)]
struct IdeaRow {
    id: i64,
    title: String,
    slug: String,
    description: String,
    category_id: i64,
    status_id: i64,
    votes_count: i64,
    created_at: DateTime<Utc>,
}

impl From<IdeaRow> for Idea {
    fn from(row: IdeaRow) -> Self {
        Idea {
            id: row.id,
            title: row.title,
            slug: row.slug,
            description: row.description,
            category_id: row.category_id,
            // status_id is a foreign key into the fixed statuses table
            status: IdeaStatus::from_id(row.status_id).unwrap_or(IdeaStatus::Open),
            votes_count: row.votes_count,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct IdeaDetailRow {
    id: i64,
    title: String,
    slug: String,
    description: String,
    category_id: i64,
    category_name: String,
    status_id: i64,
    votes_count: i64,
    created_at: DateTime<Utc>,
}

impl From<IdeaDetailRow> for IdeaDetail {
    fn from(row: IdeaDetailRow) -> Self {
        IdeaDetail {
            id: row.id,
            title: row.title,
            slug: row.slug,
            description: row.description,
            category_id: row.category_id,
            category_name: row.category_name,
            status: IdeaStatus::from_id(row.status_id).unwrap_or(IdeaStatus::Open),
            votes_count: row.votes_count,
            created_at: row.created_at,
        }
    }
}

/// Map a failed insert, singling out the slug uniqueness constraint.
fn map_insert_error(err: sqlx::Error, slug: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        let is_slug_constraint = db_err.constraint() == Some(CNT_IDEA_SLUG);
        let is_unique_violation = db_err.code().as_deref() == Some("23505");
        if is_slug_constraint || (is_unique_violation && db_err.constraint().is_none()) {
            return AppError::SlugConflict(slug.to_string());
        }
    }
    AppError::Db(err)
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl IdeaStore for PgStore {
    async fn categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(category)
    }

    async fn create_category(&self, name: &str) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn slugs_with_base(&self, base: &str) -> Result<Vec<String>, AppError> {
        // Slugs are [a-z0-9-] only, so the base needs no LIKE escaping.
        let slugs = sqlx::query_scalar::<_, String>(
            "SELECT slug FROM ideas WHERE slug = $1 OR slug LIKE $2 ORDER BY id",
        )
        .bind(base)
        .bind(format!("{base}-%"))
        .fetch_all(&self.pool)
        .await?;
        Ok(slugs)
    }

    async fn insert_idea(&self, idea: &NewIdea, slug: &str) -> Result<Idea, AppError> {
        let sql = format!(
            "INSERT INTO ideas (title, slug, description, category_id, status_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {IDEA_COLUMNS}"
        );
        let row = sqlx::query_as::<_, IdeaRow>(&sql)
            .bind(&idea.title)
            .bind(slug)
            .bind(&idea.description)
            .bind(idea.category_id)
            .bind(idea.status.id())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, slug))?;
        Ok(row.into())
    }

    async fn find_page(
        &self,
        filter: &IdeaFilter,
        page: u32,
        per_page: u32,
    ) -> Result<IdeaPage, AppError> {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let offset = i64::from(page - 1) * i64::from(per_page);
        let status_id = filter.status.map(IdeaStatus::id);

        let total_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ideas i \
             WHERE ($1::BIGINT IS NULL OR i.category_id = $1) \
               AND ($2::BIGINT IS NULL OR i.status_id = $2)",
        )
        .bind(filter.category_id)
        .bind(status_id)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, IdeaDetailRow>(
            "SELECT i.id, i.title, i.slug, i.description, i.category_id, \
                    c.name AS category_name, i.status_id, i.votes_count, i.created_at \
             FROM ideas i \
             JOIN categories c ON c.id = i.category_id \
             WHERE ($1::BIGINT IS NULL OR i.category_id = $1) \
               AND ($2::BIGINT IS NULL OR i.status_id = $2) \
             ORDER BY i.id DESC \
             LIMIT $3 OFFSET $4",
        )
        .bind(filter.category_id)
        .bind(status_id)
        .bind(i64::from(per_page))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(IdeaPage {
            ideas: rows.into_iter().map(IdeaDetail::from).collect(),
            page,
            per_page,
            total_count,
            total_pages: total_pages(total_count, per_page),
        })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<IdeaDetail>, AppError> {
        let row = sqlx::query_as::<_, IdeaDetailRow>(
            "SELECT i.id, i.title, i.slug, i.description, i.category_id, \
                    c.name AS category_name, i.status_id, i.votes_count, i.created_at \
             FROM ideas i \
             JOIN categories c ON c.id = i.category_id \
             WHERE i.slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(IdeaDetail::from))
    }

    async fn update_idea(&self, id: i64, changes: &IdeaChanges) -> Result<Idea, AppError> {
        let sql = format!(
            "UPDATE ideas \
             SET title = $1, description = $2, category_id = $3, status_id = $4, \
                 updated_at = NOW() \
             WHERE id = $5 \
             RETURNING {IDEA_COLUMNS}"
        );
        let row = sqlx::query_as::<_, IdeaRow>(&sql)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.category_id)
            .bind(changes.status.id())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(row.into())
    }

    async fn status_counts(&self) -> Result<StatusCounts, AppError> {
        let counts = sqlx::query_as::<_, StatusCounts>(
            "SELECT COUNT(*) AS \"all\", \
                    COUNT(CASE WHEN status_id = 1 THEN 1 END) AS open, \
                    COUNT(CASE WHEN status_id = 2 THEN 1 END) AS considering, \
                    COUNT(CASE WHEN status_id = 3 THEN 1 END) AS in_progress, \
                    COUNT(CASE WHEN status_id = 4 THEN 1 END) AS implemented, \
                    COUNT(CASE WHEN status_id = 5 THEN 1 END) AS closed \
             FROM ideas",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }
}
