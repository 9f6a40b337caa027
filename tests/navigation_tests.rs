mod common;

use std::sync::Arc;

use common::{app_with, stored_session};
use gudang_admin::{
    MemoryStorage, NavigationError, StaticSeoProvider,
    routes::{
        NOT_FOUND, RouteRecord, RouteTable,
        admin::{DEFAULT_LANDING, admin_routes},
    },
};

// Navigation never touches the admin API, so nothing listens here.
const NO_BACKEND: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn test_protected_route_redirects_to_login() {
    let mut app = app_with(
        NO_BACKEND,
        Arc::new(MemoryStorage::new()),
        StaticSeoProvider::new(),
    );

    let landed = app
        .navigate("/admin/ecommerce/products?page=2")
        .await
        .unwrap();

    assert_eq!(landed.location.path, "/login");
    assert_eq!(app.current_path(), Some("/login"));
    assert_eq!(
        app.auth().return_url(),
        Some("/admin/ecommerce/products?page=2")
    );
    assert!(!app.is_loading());
}

#[tokio::test]
async fn test_signed_in_user_bounced_from_login() {
    let mut app = app_with(
        NO_BACKEND,
        stored_session("dewi", &["admin"], "tok-1"),
        StaticSeoProvider::new(),
    );
    app.start().unwrap();

    let landed = app.navigate("/login").await.unwrap();

    assert_eq!(landed.location.path, DEFAULT_LANDING);
    assert_eq!(app.document().title(), "Dashboard - Gudang Grosiran");
}

#[tokio::test]
async fn test_guard_rehydrates_without_start() {
    let mut app = app_with(
        NO_BACKEND,
        stored_session("dewi", &["admin"], "tok-1"),
        StaticSeoProvider::new(),
    );
    assert!(app.session().is_none());

    let landed = app.navigate("/admin/pages/blogs/42").await.unwrap();

    assert_eq!(landed.location.path, "/admin/pages/blogs/42");
    assert_eq!(landed.params.get("id").map(String::as_str), Some("42"));
    assert!(app.auth().is_logged_in());
}

#[tokio::test]
async fn test_missing_role_redirects_to_landing() {
    let mut app = app_with(
        NO_BACKEND,
        stored_session("sari", &["editor"], "tok-2"),
        StaticSeoProvider::new(),
    );
    app.start().unwrap();

    let landed = app.navigate("/admin/pages/settings").await.unwrap();

    assert_eq!(landed.location.path, DEFAULT_LANDING);
}

#[tokio::test]
async fn test_admin_root_redirects_to_dashboard() {
    let mut app = app_with(
        NO_BACKEND,
        stored_session("dewi", &["admin"], "tok-1"),
        StaticSeoProvider::new(),
    );
    app.start().unwrap();

    let landed = app.navigate("/admin").await.unwrap();

    assert_eq!(landed.location.path, DEFAULT_LANDING);
    assert_eq!(landed.route.name.as_deref(), Some("Dashboard"));
}

#[tokio::test]
async fn test_anonymous_admin_root_remembers_dashboard() {
    let mut app = app_with(
        NO_BACKEND,
        Arc::new(MemoryStorage::new()),
        StaticSeoProvider::new(),
    );

    let landed = app.navigate("/admin").await.unwrap();

    assert_eq!(landed.location.path, "/login");
    assert_eq!(app.auth().return_url(), Some(DEFAULT_LANDING));
}

#[tokio::test]
async fn test_unknown_path_resolves_to_not_found() {
    let mut app = app_with(
        NO_BACKEND,
        Arc::new(MemoryStorage::new()),
        StaticSeoProvider::new(),
    );

    let landed = app.navigate("/no/such/page").await.unwrap();

    assert_eq!(landed.route.name.as_deref(), Some(NOT_FOUND));
    assert!(landed.route.is_catch_all());
    assert!(app.auth().return_url().is_none());
}

#[tokio::test]
async fn test_corrupted_session_is_discarded_on_navigation() {
    let storage = Arc::new(MemoryStorage::with_entries([
        ("user", "{not json"),
        ("token", "tok-x"),
    ]));
    let mut app = app_with(NO_BACKEND, storage.clone(), StaticSeoProvider::new());

    let landed = app.navigate("/admin/dashboard").await.unwrap();

    assert_eq!(landed.location.path, "/login");
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_redirect_cycle_fails_and_keeps_location() {
    let public = RouteRecord::new("/")
        .requires_auth(false)
        .children(vec![
            RouteRecord::new("/ping").name("Ping").redirect("/pong"),
            RouteRecord::new("/pong").name("Pong").redirect("/ping"),
            RouteRecord::new("/register").name("Register"),
        ]);
    let table = RouteTable::new(public, admin_routes(), "views/NotFound");
    let mut app = app_with(
        NO_BACKEND,
        Arc::new(MemoryStorage::new()),
        StaticSeoProvider::new(),
    )
    .with_routes(table);
    app.navigate("/register").await.unwrap();

    let result = app.navigate("/ping").await;

    assert!(matches!(result, Err(NavigationError::RedirectLoop(path)) if path == "/ping"));
    assert_eq!(app.current_path(), Some("/register"));
    assert!(!app.is_loading());
}
