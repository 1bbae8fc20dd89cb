mod create;
mod detail;
mod list;

pub use create::create;
pub use detail::show;
pub use list::index;

use actix_web::HttpRequest;

/// Route name of the listing page.
pub const INDEX_ROUTE: &str = "idea.index";
/// Route name of the detail page.
pub const SHOW_ROUTE: &str = "idea.show";

/// Absolute URL of this request, query string included as received.
fn full_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), req.uri())
}

/// Absolute URL of the bare listing route.
fn index_url(req: &HttpRequest) -> String {
    req.url_for_static(INDEX_ROUTE)
        .map(|url| url.to_string())
        .unwrap_or_else(|e| {
            log::warn!("Could not build {INDEX_ROUTE} URL: {e}");
            "/".to_string()
        })
}
