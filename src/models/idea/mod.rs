pub mod slug;
mod types;

pub use types::*;

use crate::errors::AppError;
use crate::models::listing::ListingState;
use crate::models::status::{IdeaStatus, StatusCounts};
use crate::store::IdeaStore;

/// Insert attempts per idea: the first try plus one retry after losing a
/// slug race.
pub const MAX_SLUG_ATTEMPTS: usize = 2;

/// Create an idea with a unique slug derived from its title.
///
/// The colliding slugs are read and the insert is attempted; if a
/// concurrent submission took the same slug in between, the store reports
/// `SlugConflict` and the slug is reassigned from a fresh read.
pub async fn create(store: &dyn IdeaStore, new_idea: &NewIdea) -> Result<Idea, AppError> {
    let base = slug::base_slug(&new_idea.title);

    for attempt in 1..=MAX_SLUG_ATTEMPTS {
        let existing = store.slugs_with_base(&base).await?;
        let candidate = slug::assign(&new_idea.title, &existing);

        match store.insert_idea(new_idea, &candidate).await {
            Ok(idea) => {
                log::info!("Created idea #{} with slug {}", idea.id, idea.slug);
                return Ok(idea);
            }
            Err(AppError::SlugConflict(taken)) => {
                log::warn!(
                    "Slug {} taken concurrently (attempt {}/{})",
                    taken,
                    attempt,
                    MAX_SLUG_ATTEMPTS
                );
            }
            Err(e) => return Err(e),
        }
    }

    Err(AppError::SlugExhausted(new_idea.title.clone()))
}

/// Check a submitted idea form. Returns the list of problems, empty when valid.
pub async fn validate(store: &dyn IdeaStore, form: &IdeaForm) -> Result<Vec<String>, AppError> {
    let mut errors = Vec::new();

    let title = form.title.trim();
    if title.is_empty() {
        errors.push("Title is required".to_string());
    } else if title.chars().count() > TITLE_MAX_LEN {
        errors.push(format!("Title must be at most {TITLE_MAX_LEN} characters"));
    }

    if form.description.trim().is_empty() {
        errors.push("Description is required".to_string());
    }

    if store.find_category(form.category_id).await?.is_none() {
        errors.push("Please choose a valid category".to_string());
    }

    Ok(errors)
}

impl From<&IdeaForm> for NewIdea {
    fn from(form: &IdeaForm) -> Self {
        NewIdea {
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            category_id: form.category_id,
            status: IdeaStatus::Open,
        }
    }
}

/// Resolve the listing state into a store filter and fetch that page.
/// Unknown category names mean no category filter.
pub async fn list(store: &dyn IdeaStore, state: &ListingState) -> Result<IdeaPage, AppError> {
    let category_id = match state.category.as_deref() {
        Some(name) => store.find_category_by_name(name).await?.map(|c| c.id),
        None => None,
    };
    let filter = IdeaFilter {
        category_id,
        status: state.status.status(),
    };
    store.find_page(&filter, state.page, PAGE_SIZE).await
}

pub async fn find_by_slug(store: &dyn IdeaStore, slug: &str) -> Result<Option<IdeaDetail>, AppError> {
    store.find_by_slug(slug).await
}

/// Edit an idea. The slug chosen at creation is kept even when the title changes.
pub async fn update(store: &dyn IdeaStore, id: i64, changes: &IdeaChanges) -> Result<Idea, AppError> {
    if store.find_category(changes.category_id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let idea = store.update_idea(id, changes).await?;
    log::info!("Updated idea #{} ({})", idea.id, idea.slug);
    Ok(idea)
}

pub async fn status_counts(store: &dyn IdeaStore) -> Result<StatusCounts, AppError> {
    store.status_counts().await
}
