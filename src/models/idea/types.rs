use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::status::IdeaStatus;

/// Ideas per listing page.
pub const PAGE_SIZE: u32 = 10;

pub const TITLE_MAX_LEN: usize = 255;

/// A stored idea row.
#[derive(Debug, Clone, PartialEq)]
pub struct Idea {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category_id: i64,
    pub status: IdeaStatus,
    pub votes_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Idea joined with its category name, as shown in listings and detail pages.
#[derive(Debug, Clone, PartialEq)]
pub struct IdeaDetail {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category_id: i64,
    pub category_name: String,
    pub status: IdeaStatus,
    pub votes_count: i64,
    pub created_at: DateTime<Utc>,
}

impl IdeaDetail {
    pub fn status_name(&self) -> &'static str {
        self.status.name()
    }

    pub fn status_classes(&self) -> &'static str {
        self.status.classes()
    }

    pub fn created_date(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }

    /// First 200 characters of the description.
    pub fn excerpt(&self) -> String {
        let mut chars = self.description.chars();
        let head: String = chars.by_ref().take(200).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}

/// Fields for a new idea; the slug is assigned by `idea::create`.
#[derive(Debug, Clone)]
pub struct NewIdea {
    pub title: String,
    pub description: String,
    pub category_id: i64,
    pub status: IdeaStatus,
}

/// Editable fields. The slug is intentionally absent.
#[derive(Debug, Clone)]
pub struct IdeaChanges {
    pub title: String,
    pub description: String,
    pub category_id: i64,
    pub status: IdeaStatus,
}

/// Resolved listing filter handed to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdeaFilter {
    pub category_id: Option<i64>,
    pub status: Option<IdeaStatus>,
}

/// One page of the listing.
#[derive(Debug, Clone)]
pub struct IdeaPage {
    pub ideas: Vec<IdeaDetail>,
    pub page: u32,
    pub per_page: u32,
    pub total_count: i64,
    pub total_pages: u32,
}

impl IdeaPage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

pub fn total_pages(total_count: i64, per_page: u32) -> u32 {
    let per_page = i64::from(per_page.max(1));
    let pages = (total_count.max(0) + per_page - 1) / per_page;
    pages.max(1) as u32
}

/// Form input for submitting an idea.
#[derive(Debug, Clone, Deserialize)]
pub struct IdeaForm {
    pub title: String,
    pub category_id: i64,
    pub description: String,
    pub csrf_token: String,
}
