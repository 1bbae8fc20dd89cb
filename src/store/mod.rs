//! Persistence seam for ideas and their reference data.
//!
//! Handlers receive the store as `web::Data<dyn IdeaStore>`, so the same
//! routes run against PostgreSQL in production and against `MemoryStore`
//! in tests.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::category::Category;
use crate::models::idea::{Idea, IdeaChanges, IdeaDetail, IdeaFilter, IdeaPage, NewIdea};
use crate::models::status::StatusCounts;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait IdeaStore: Send + Sync {
    async fn categories(&self) -> Result<Vec<Category>, AppError>;

    async fn find_category(&self, id: i64) -> Result<Option<Category>, AppError>;

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, AppError>;

    async fn create_category(&self, name: &str) -> Result<Category, AppError>;

    /// Slugs equal to `base` or of the form `base-<anything>`.
    async fn slugs_with_base(&self, base: &str) -> Result<Vec<String>, AppError>;

    /// Insert an idea under `slug`. A taken slug yields `AppError::SlugConflict`.
    async fn insert_idea(&self, idea: &NewIdea, slug: &str) -> Result<Idea, AppError>;

    /// Newest-first page of ideas. `page` is 1-based.
    async fn find_page(
        &self,
        filter: &IdeaFilter,
        page: u32,
        per_page: u32,
    ) -> Result<IdeaPage, AppError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<IdeaDetail>, AppError>;

    /// Apply edits. Returns `AppError::NotFound` for an unknown id.
    async fn update_idea(&self, id: i64, changes: &IdeaChanges) -> Result<Idea, AppError>;

    async fn status_counts(&self) -> Result<StatusCounts, AppError>;
}
