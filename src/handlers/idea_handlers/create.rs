use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::config::SiteSettings;
use crate::errors::AppError;
use crate::models::idea::{self, IdeaForm, NewIdea};
use crate::models::listing::ListingState;
use crate::session::{self, csrf};
use crate::store::IdeaStore;
use crate::templates_structs::IdeaFormValues;

/// POST /ideas
/// Submits a new idea with status Open and redirects to its page.
pub async fn create(
    store: web::Data<dyn IdeaStore>,
    site: web::Data<SiteSettings>,
    session: Session,
    form: web::Form<IdeaForm>,
) -> Result<HttpResponse, AppError> {
    csrf::verify(&session, &form.csrf_token)?;

    let errors = idea::validate(store.get_ref(), &form).await?;
    if !errors.is_empty() {
        return super::list::render_index(
            store.get_ref(),
            &site,
            &session,
            &ListingState::default(),
            IdeaFormValues::from(&*form),
            Some(form.category_id),
            errors,
        )
        .await;
    }

    let created = idea::create(store.get_ref(), &NewIdea::from(&*form)).await?;

    session::set_flash(&session, "Idea was added successfully!");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", format!("/ideas/{}", created.slug)))
        .finish())
}
