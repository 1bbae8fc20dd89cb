use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;
use crate::models::category::Category;
use crate::models::idea::{
    total_pages, Idea, IdeaChanges, IdeaDetail, IdeaFilter, IdeaPage, NewIdea,
};
use crate::models::status::StatusCounts;
use super::IdeaStore;

#[derive(Default)]
struct Inner {
    categories: Vec<Category>,
    ideas: Vec<Idea>,
    next_category_id: i64,
    next_idea_id: i64,
}

impl Inner {
    fn detail(&self, idea: &Idea) -> IdeaDetail {
        let category_name = self
            .categories
            .iter()
            .find(|c| c.id == idea.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        IdeaDetail {
            id: idea.id,
            title: idea.title.clone(),
            slug: idea.slug.clone(),
            description: idea.description.clone(),
            category_id: idea.category_id,
            category_name,
            status: idea.status,
            votes_count: idea.votes_count,
            created_at: idea.created_at,
        }
    }
}

/// In-process store with the same slug uniqueness and ordering rules as
/// the PostgreSQL schema.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Set the vote tally directly; voting itself lives outside this crate.
    pub fn set_votes(&self, id: i64, votes: i64) {
        let mut inner = self.lock();
        if let Some(idea) = inner.ideas.iter_mut().find(|i| i.id == id) {
            idea.votes_count = votes;
        }
    }
}

#[async_trait]
impl IdeaStore for MemoryStore {
    async fn categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.lock().categories.clone())
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>, AppError> {
        Ok(self.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        Ok(self.lock().categories.iter().find(|c| c.name == name).cloned())
    }

    async fn create_category(&self, name: &str) -> Result<Category, AppError> {
        let mut inner = self.lock();
        if let Some(existing) = inner.categories.iter().find(|c| c.name == name) {
            return Ok(existing.clone());
        }
        inner.next_category_id += 1;
        let category = Category {
            id: inner.next_category_id,
            name: name.to_string(),
        };
        inner.categories.push(category.clone());
        Ok(category)
    }

    async fn slugs_with_base(&self, base: &str) -> Result<Vec<String>, AppError> {
        let prefix = format!("{base}-");
        Ok(self
            .lock()
            .ideas
            .iter()
            .filter(|i| i.slug == base || i.slug.starts_with(&prefix))
            .map(|i| i.slug.clone())
            .collect())
    }

    async fn insert_idea(&self, idea: &NewIdea, slug: &str) -> Result<Idea, AppError> {
        let mut inner = self.lock();
        if inner.ideas.iter().any(|i| i.slug == slug) {
            return Err(AppError::SlugConflict(slug.to_string()));
        }
        inner.next_idea_id += 1;
        let stored = Idea {
            id: inner.next_idea_id,
            title: idea.title.clone(),
            slug: slug.to_string(),
            description: idea.description.clone(),
            category_id: idea.category_id,
            status: idea.status,
            votes_count: 0,
            created_at: Utc::now(),
        };
        inner.ideas.push(stored.clone());
        Ok(stored)
    }

    async fn find_page(
        &self,
        filter: &IdeaFilter,
        page: u32,
        per_page: u32,
    ) -> Result<IdeaPage, AppError> {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let inner = self.lock();

        let mut matching: Vec<&Idea> = inner
            .ideas
            .iter()
            .filter(|i| filter.category_id.is_none_or(|c| i.category_id == c))
            .filter(|i| filter.status.is_none_or(|s| i.status == s))
            .collect();
        matching.sort_by(|a, b| b.id.cmp(&a.id));

        let total_count = matching.len() as i64;
        let skip = (page as usize - 1) * per_page as usize;
        let ideas = matching
            .into_iter()
            .skip(skip)
            .take(per_page as usize)
            .map(|i| inner.detail(i))
            .collect();

        Ok(IdeaPage {
            ideas,
            page,
            per_page,
            total_count,
            total_pages: total_pages(total_count, per_page),
        })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<IdeaDetail>, AppError> {
        let inner = self.lock();
        Ok(inner.ideas.iter().find(|i| i.slug == slug).map(|i| inner.detail(i)))
    }

    async fn update_idea(&self, id: i64, changes: &IdeaChanges) -> Result<Idea, AppError> {
        let mut inner = self.lock();
        let idea = inner
            .ideas
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(AppError::NotFound)?;
        idea.title = changes.title.clone();
        idea.description = changes.description.clone();
        idea.category_id = changes.category_id;
        idea.status = changes.status;
        Ok(idea.clone())
    }

    async fn status_counts(&self) -> Result<StatusCounts, AppError> {
        let mut counts = StatusCounts::default();
        for idea in &self.lock().ideas {
            counts.tally(idea.status);
        }
        Ok(counts)
    }
}
