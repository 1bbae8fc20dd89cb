use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::config::SiteSettings;
use crate::errors::{AppError, render};
use crate::models::idea;
use crate::models::listing::{self, ListingState};
use crate::session;
use crate::store::IdeaStore;
use crate::templates_structs::{
    CategoryOption, IdeaFormValues, IdeaIndexTemplate, PageContext, StatusTab,
};

/// GET /
/// Lists ideas newest-first, filtered by `category`/`status` and paginated by `page`.
pub async fn index(
    req: HttpRequest,
    store: web::Data<dyn IdeaStore>,
    site: web::Data<SiteSettings>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let state = listing::decode(&query);

    let response = render_index(
        store.get_ref(),
        &site,
        &session,
        &state,
        IdeaFormValues::default(),
        None,
        vec![],
    )
    .await?;

    session::remember_url(&session, &super::full_url(&req));
    Ok(response)
}

/// Render the listing page, optionally carrying a rejected submission form.
pub(super) async fn render_index(
    store: &dyn IdeaStore,
    site: &SiteSettings,
    session: &Session,
    state: &ListingState,
    form: IdeaFormValues,
    chosen_category: Option<i64>,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let idea_page = idea::list(store, state).await?;
    let counts = idea::status_counts(store).await?;
    let categories = store.categories().await?;

    let previous_href = idea_page
        .has_previous()
        .then(|| state.href_for_page(idea_page.page - 1));
    let next_href = idea_page
        .has_next()
        .then(|| state.href_for_page(idea_page.page + 1));

    let tmpl = IdeaIndexTemplate {
        ctx: PageContext::build(session, site),
        status_tabs: StatusTab::build_all(state, &counts),
        categories: CategoryOption::build_all(categories, state, chosen_category),
        category_filter: state.category_name().to_string(),
        all_categories_href: state.href_for_category(None),
        idea_page,
        previous_href,
        next_href,
        form,
        errors,
    };
    render(tmpl)
}
