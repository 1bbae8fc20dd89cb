//! Shared test infrastructure for the HTTP and model tests.
//!
//! - `memory_store()` - empty in-process store with the default categories
//! - `app()` - the full route table over any store, with cookie sessions
//! - `setup_pg()` - throwaway PostgreSQL schema, only when DATABASE_URL is set

#![allow(dead_code, unused_macros)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use regex::Regex;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use ideaboard::config::SiteSettings;
use ideaboard::models::category::{Category, DEFAULT_CATEGORIES};
use ideaboard::models::idea::{self, Idea, NewIdea};
use ideaboard::models::status::IdeaStatus;
use ideaboard::store::{IdeaStore, MemoryStore, PgStore};
use ideaboard::{db, handlers, routes, session};

// ============================================================================
// STORES
// ============================================================================

/// Memory store seeded with "Category 1" .. "Category 4".
pub async fn memory_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for name in DEFAULT_CATEGORIES {
        store.create_category(name).await.expect("create category");
    }
    store
}

pub async fn category(store: &dyn IdeaStore, name: &str) -> Category {
    store
        .find_category_by_name(name)
        .await
        .expect("query category")
        .expect("category exists")
}

/// Create an idea through the slug-assigning service.
pub async fn create_idea(
    store: &dyn IdeaStore,
    title: &str,
    category_id: i64,
    status: IdeaStatus,
) -> Idea {
    idea::create(
        store,
        &NewIdea {
            title: title.to_string(),
            description: format!("Description of {title}"),
            category_id,
            status,
        },
    )
    .await
    .expect("create idea")
}

// ============================================================================
// HTTP
// ============================================================================

/// GET `uri` and return `(status, body)`.
macro_rules! get_body {
    ($app:expr, $uri:expr) => {{
        let req = actix_web::test::TestRequest::get().uri($uri).to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        let status = resp.status();
        let body = actix_web::test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).expect("utf-8 body"))
    }};
}

pub fn app(
    store: Arc<dyn IdeaStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(session::middleware(Key::generate()))
        .app_data(web::Data::from(store))
        .app_data(web::Data::new(SiteSettings::default()))
        .configure(routes::configure)
        .default_service(web::to(handlers::not_found))
}

/// Session cookie set by a response, to send with the next request.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response().cookies().next().map(|c| c.into_owned())
}

/// Undo the HTML escaping applied by the templates: numeric character
/// references first, then the named entities, `&amp;` last.
pub fn unescape_html(s: &str) -> String {
    let numeric = Regex::new(r"&#([xX][0-9a-fA-F]+|[0-9]+);").unwrap();
    let decoded = numeric.replace_all(s, |caps: &regex::Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => code.parse::<u32>(),
        };
        value
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });
    decoded
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// `href` of the detail page's back link.
pub fn back_url(body: &str) -> String {
    let re = Regex::new(r#"id="back-link" href="([^"]*)""#).unwrap();
    let caps = re.captures(body).expect("back link present");
    unescape_html(&caps[1])
}

pub fn csrf_token(body: &str) -> String {
    let re = Regex::new(r#"name="csrf_token" value="([0-9a-f]+)""#).unwrap();
    re.captures(body).expect("csrf token present")[1].to_string()
}

// ============================================================================
// POSTGRESQL
// ============================================================================

/// A migrated schema private to one test.
pub struct TestDb {
    admin: PgPool,
    schema: String,
    store: PgStore,
}

impl TestDb {
    pub fn pool(&self) -> &PgPool {
        self.store.pool()
    }

    pub fn store(&self) -> &PgStore {
        &self.store
    }

    pub async fn cleanup(self) {
        self.store.pool().close().await;
        let _ = sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .execute(&self.admin)
            .await;
    }
}

/// Fresh schema with migrations and default categories, or `None` when no
/// DATABASE_URL is configured.
pub async fn setup_pg() -> Option<TestDb> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
            return None;
        }
    };

    let schema = format!("ideaboard_test_{}", hex::encode(rand::random::<[u8; 6]>()));

    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("connect admin pool");
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .expect("create schema");

    let search_path = format!("SET search_path TO {schema}");
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                sqlx::query(&search_path).execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("connect test pool");

    db::run_migrations(&pool).await.expect("run migrations");
    db::seed_categories(&pool).await.expect("seed categories");

    Some(TestDb {
        admin,
        schema,
        store: PgStore::new(pool),
    })
}
