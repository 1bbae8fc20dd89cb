use crate::models::status::IdeaStatus;

/// Sentinel shown for "no filter" on both the category and status selectors.
pub const ALL: &str = "All";

/// Status selector on the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(IdeaStatus),
}

impl StatusFilter {
    /// The tabs in display order, `All` first.
    pub fn tabs() -> impl Iterator<Item = StatusFilter> {
        std::iter::once(StatusFilter::All).chain(IdeaStatus::ALL.into_iter().map(StatusFilter::Only))
    }

    pub fn name(self) -> &'static str {
        match self {
            StatusFilter::All => ALL,
            StatusFilter::Only(status) => status.name(),
        }
    }

    /// Unknown names fall back to `All`.
    pub fn from_name(name: &str) -> Self {
        IdeaStatus::from_name(name)
            .map(StatusFilter::Only)
            .unwrap_or(StatusFilter::All)
    }

    pub fn status(self) -> Option<IdeaStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status),
        }
    }
}

/// What the listing page currently shows. Never persisted; rebuilt from the
/// query string on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    pub category: Option<String>,
    pub status: StatusFilter,
    pub page: u32,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            category: None,
            status: StatusFilter::All,
            page: 1,
        }
    }
}

impl ListingState {
    pub fn category_name(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL)
    }

    /// Relative link to the listing in this state.
    pub fn href(&self) -> String {
        let query = super::encode(self);
        if query.is_empty() {
            "/".to_string()
        } else {
            format!("/?{query}")
        }
    }

    /// Link to `page` with the current filters kept.
    pub fn href_for_page(&self, page: u32) -> String {
        reduce(self, FilterAction::GoToPage(page)).href()
    }

    pub fn href_for_status(&self, status: StatusFilter) -> String {
        reduce(self, FilterAction::SetStatus(status)).href()
    }

    /// Link to `category` (`None` for all) with the status filter kept.
    pub fn href_for_category(&self, category: Option<&str>) -> String {
        reduce(self, FilterAction::SetCategory(category.map(str::to_string))).href()
    }
}

/// Transitions driven by the filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    SetStatus(StatusFilter),
    SetCategory(Option<String>),
    GoToPage(u32),
}

/// Next listing state. Changing a filter returns to page 1.
pub fn reduce(state: &ListingState, action: FilterAction) -> ListingState {
    match action {
        FilterAction::SetStatus(status) => ListingState {
            category: state.category.clone(),
            status,
            page: 1,
        },
        FilterAction::SetCategory(category) => ListingState {
            category: category.filter(|c| !c.is_empty() && c != ALL),
            status: state.status,
            page: 1,
        },
        FilterAction::GoToPage(page) => ListingState {
            category: state.category.clone(),
            status: state.status,
            page: page.max(1),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filtered(page: u32) -> ListingState {
        ListingState {
            category: Some("Category 2".into()),
            status: StatusFilter::Only(IdeaStatus::Considering),
            page,
        }
    }

    #[test]
    fn set_status_keeps_category_and_resets_page() {
        let next = reduce(&filtered(4), FilterAction::SetStatus(StatusFilter::Only(IdeaStatus::Closed)));
        assert_eq!(next.category.as_deref(), Some("Category 2"));
        assert_eq!(next.status, StatusFilter::Only(IdeaStatus::Closed));
        assert_eq!(next.page, 1);
    }

    #[test]
    fn set_category_all_clears_filter() {
        let next = reduce(&filtered(3), FilterAction::SetCategory(Some("All".into())));
        assert_eq!(next.category, None);
        assert_eq!(next.status, StatusFilter::Only(IdeaStatus::Considering));
        assert_eq!(next.page, 1);
    }

    #[test]
    fn go_to_page_clamps_zero() {
        let next = reduce(&filtered(3), FilterAction::GoToPage(0));
        assert_eq!(next.page, 1);
        assert_eq!(reduce(&filtered(1), FilterAction::GoToPage(7)).page, 7);
    }

    #[test]
    fn tabs_start_with_all() {
        let tabs: Vec<_> = StatusFilter::tabs().map(StatusFilter::name).collect();
        assert_eq!(tabs, vec!["All", "Open", "Considering", "In Progress", "Implemented", "Closed"]);
    }

    #[test]
    fn hrefs_carry_filters() {
        let state = filtered(1);
        assert_eq!(state.href_for_page(2), "/?category=Category%202&status=Considering&page=2");
        assert_eq!(ListingState::default().href(), "/");
        assert_eq!(
            state.href_for_status(StatusFilter::All),
            "/?category=Category%202"
        );
    }

    #[test]
    fn category_links_keep_status_and_reset_page() {
        let state = filtered(5);
        assert_eq!(
            state.href_for_category(Some("Category 4")),
            "/?category=Category%204&status=Considering"
        );
        assert_eq!(state.href_for_category(None), "/?status=Considering");
        assert_eq!(state.href_for_category(Some(ALL)), "/?status=Considering");
    }
}
