//! Per-visitor state kept in the cookie session.

use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

pub mod csrf;

const FLASH_KEY: &str = "flash";
const PREVIOUS_URL_KEY: &str = "previous_url";

/// Longest URL kept for the back link. The whole session has to fit in one
/// cookie (about 4 KB once signed), so longer URLs are not recorded.
pub const MAX_REMEMBERED_URL_LEN: usize = 2048;

pub fn set_flash(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH_KEY, message) {
        log::warn!("Failed to store flash message: {e}");
    }
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}

/// Full URL of the last page rendered for this visitor.
pub fn previous_url(session: &Session) -> Option<String> {
    session.get::<String>(PREVIOUS_URL_KEY).unwrap_or(None)
}

/// Record `url` as the page just rendered, for the next request's back link.
/// URLs over `MAX_REMEMBERED_URL_LEN` clear the record instead, so the next
/// back link falls back to the index.
pub fn remember_url(session: &Session, url: &str) {
    if url.len() > MAX_REMEMBERED_URL_LEN {
        log::warn!(
            "Not recording previous URL of {} bytes (limit {})",
            url.len(),
            MAX_REMEMBERED_URL_LEN
        );
        session.remove(PREVIOUS_URL_KEY);
        return;
    }
    if let Err(e) = session.insert(PREVIOUS_URL_KEY, url) {
        log::warn!("Failed to record previous URL: {e}");
    }
}

/// Cookie-backed session middleware used by the app and its tests.
pub fn middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .cookie_http_only(true)
        .build()
}
