// Template context structures for Askama templates.

use actix_session::Session;

use crate::config::SiteSettings;
use crate::session::{csrf, take_flash};

mod idea;

pub use self::idea::{CategoryOption, IdeaFormValues, IdeaIndexTemplate, IdeaShowTemplate, StatusTab};

/// Common context shared by all pages.
/// Templates access these as `ctx.app_name`, `ctx.flash`, etc.
pub struct PageContext {
    pub app_name: String,
    pub flash: Option<String>,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, site: &SiteSettings) -> Self {
        Self {
            app_name: site.app_name.clone(),
            flash: take_flash(session),
            csrf_token: csrf::session_token(session),
        }
    }
}
