use askama::Template;

use crate::models::category::Category;
use crate::models::idea::{IdeaDetail, IdeaForm, IdeaPage};
use crate::models::listing::{ListingState, StatusFilter};
use crate::models::status::StatusCounts;
use super::PageContext;

/// One status tab with its unfiltered count.
pub struct StatusTab {
    pub label: &'static str,
    pub count: i64,
    pub href: String,
    pub active: bool,
}

impl StatusTab {
    pub fn build_all(state: &ListingState, counts: &StatusCounts) -> Vec<StatusTab> {
        StatusFilter::tabs()
            .map(|filter| StatusTab {
                label: filter.name(),
                count: match filter.status() {
                    Some(status) => counts.for_status(status),
                    None => counts.all,
                },
                href: state.href_for_status(filter),
                active: state.status == filter,
            })
            .collect()
    }
}

pub struct CategoryOption {
    pub id: i64,
    pub name: String,
    /// Listing link for this category, keeping the status filter.
    pub href: String,
    /// Currently used as the listing filter.
    pub filtered: bool,
    /// Preselected in the submission form.
    pub chosen: bool,
}

impl CategoryOption {
    pub fn build_all(
        categories: Vec<Category>,
        state: &ListingState,
        chosen_id: Option<i64>,
    ) -> Vec<CategoryOption> {
        categories
            .into_iter()
            .map(|c| CategoryOption {
                filtered: state.category.as_deref() == Some(c.name.as_str()),
                chosen: chosen_id == Some(c.id),
                href: state.href_for_category(Some(&c.name)),
                id: c.id,
                name: c.name,
            })
            .collect()
    }
}

/// Values echoed back into the submission form after a failed validation.
#[derive(Default)]
pub struct IdeaFormValues {
    pub title: String,
    pub description: String,
}

impl From<&IdeaForm> for IdeaFormValues {
    fn from(form: &IdeaForm) -> Self {
        Self {
            title: form.title.clone(),
            description: form.description.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "ideas/index.html")]
pub struct IdeaIndexTemplate {
    pub ctx: PageContext,
    pub idea_page: IdeaPage,
    pub status_tabs: Vec<StatusTab>,
    pub categories: Vec<CategoryOption>,
    pub category_filter: String,
    pub all_categories_href: String,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub form: IdeaFormValues,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "ideas/show.html")]
pub struct IdeaShowTemplate {
    pub ctx: PageContext,
    pub idea: IdeaDetail,
    pub back_url: String,
}
