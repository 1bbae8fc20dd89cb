use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::config::SiteSettings;
use crate::errors::{AppError, render};
use crate::models::{idea, listing};
use crate::session;
use crate::store::IdeaStore;
use crate::templates_structs::{IdeaShowTemplate, PageContext};

/// GET /ideas/{slug}
/// Shows one idea. The back link returns to the listing exactly as it was
/// left when the visitor came straight from it, otherwise to the bare index.
pub async fn show(
    req: HttpRequest,
    store: web::Data<dyn IdeaStore>,
    site: web::Data<SiteSettings>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let idea = idea::find_by_slug(store.get_ref(), &slug)
        .await?
        .ok_or(AppError::NotFound)?;

    let index_url = super::index_url(&req);
    let previous_listing = session::previous_url(&session)
        .filter(|url| listing::is_listing_url(url, &index_url));
    let back_url = listing::build_back_url(previous_listing.as_deref(), &index_url);

    let tmpl = IdeaShowTemplate {
        ctx: PageContext::build(&session, &site),
        idea,
        back_url,
    };
    let response = render(tmpl)?;

    session::remember_url(&session, &super::full_url(&req));
    Ok(response)
}
