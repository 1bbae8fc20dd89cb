//! Per-session CSRF token for the idea submission form.

use actix_session::Session;

use crate::errors::AppError;

const TOKEN_KEY: &str = "csrf_token";
const TOKEN_BYTES: usize = 32;

/// Token for this session, minted and stored on first use.
pub fn session_token(session: &Session) -> String {
    match session.get::<String>(TOKEN_KEY) {
        Ok(Some(token)) => token,
        Ok(None) => store_new_token(session),
        Err(e) => {
            log::warn!("Unreadable CSRF token in session, replacing it: {e}");
            store_new_token(session)
        }
    }
}

/// Accept `submitted` only if it matches the token stored for this session.
pub fn verify(session: &Session, submitted: &str) -> Result<(), AppError> {
    let expected = session.get::<String>(TOKEN_KEY).ok().flatten();
    match expected {
        Some(expected) if tokens_match(expected.as_bytes(), submitted.as_bytes()) => Ok(()),
        Some(_) => {
            log::warn!("CSRF token mismatch on form submission");
            Err(AppError::Csrf)
        }
        None => {
            log::warn!("Form submitted without a CSRF token in session");
            Err(AppError::Csrf)
        }
    }
}

fn store_new_token(session: &Session) -> String {
    let token = hex::encode(rand::random::<[u8; TOKEN_BYTES]>());
    if let Err(e) = session.insert(TOKEN_KEY, &token) {
        log::warn!("Failed to store CSRF token: {e}");
    }
    token
}

/// Compares every byte regardless of where the first difference is.
/// An empty expected token never matches.
fn tokens_match(expected: &[u8], given: &[u8]) -> bool {
    if expected.is_empty() || expected.len() != given.len() {
        return false;
    }
    let diff = expected
        .iter()
        .zip(given)
        .map(|(a, b)| a ^ b)
        .fold(0u8, |acc, d| acc | d);
    diff == 0
}
