mod common;

use std::sync::Arc;

use common::{MockBackend, app_with, config_for, spawn_backend, stored_session};
use gudang_admin::{
    App, ApiClient, HttpSeoProvider, MemoryStorage, SeoStore, StaticSeoProvider,
    app::SITE_TITLE,
    document::DESCRIPTION_META,
};
use serde_json::json;

const NO_BACKEND: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn test_public_route_gets_fetched_metadata() {
    let seo = StaticSeoProvider::new().with_page("about", "About Us", "X");
    let mut app = app_with(NO_BACKEND, Arc::new(MemoryStorage::new()), seo);

    app.navigate("/about").await.unwrap();

    assert_eq!(app.document().title(), "About Us");
    assert_eq!(app.document().meta(DESCRIPTION_META), Some("X"));
    assert_eq!(app.seo().cached("about").unwrap().seo_title, "About Us");
}

#[tokio::test]
async fn test_null_description_keeps_fetched_title() {
    let backend = MockBackend::new().respond(
        "GET",
        "/api/seo/about",
        200,
        json!({ "seo_title": "About Us", "seo_description": null }),
    );
    let address = spawn_backend(backend).await;
    let config = config_for(&address);
    let provider = HttpSeoProvider::new(ApiClient::public(&config).unwrap());
    let mut app = App::new(config, Arc::new(MemoryStorage::new()), Arc::new(provider)).unwrap();

    app.navigate("/about").await.unwrap();

    assert_eq!(app.document().title(), "About Us");
    assert_eq!(app.document().meta(DESCRIPTION_META), Some(""));
}

#[tokio::test]
async fn test_landing_page_uses_home_slug() {
    let seo = StaticSeoProvider::new().with_page("home", "Gudang Grosiran - Grosir Online", "Belanja grosir");
    let mut app = app_with(NO_BACKEND, Arc::new(MemoryStorage::new()), seo);

    app.navigate("/").await.unwrap();

    assert_eq!(app.document().title(), "Gudang Grosiran - Grosir Online");
    assert_eq!(app.document().meta(DESCRIPTION_META), Some("Belanja grosir"));
}

#[tokio::test]
async fn test_failed_fetch_leaves_document_unchanged() {
    let mut app = app_with(
        NO_BACKEND,
        Arc::new(MemoryStorage::new()),
        StaticSeoProvider::new_failing(),
    );

    let landed = app.navigate("/about").await.unwrap();

    assert_eq!(landed.location.path, "/about");
    assert_eq!(app.document().title(), SITE_TITLE);
    assert_eq!(app.document().meta(DESCRIPTION_META), None);
    assert!(app.seo().cached("about").is_none());
}

#[tokio::test]
async fn test_admin_route_uses_static_title() {
    let mut app = app_with(
        NO_BACKEND,
        stored_session("dewi", &["admin"], "tok-1"),
        StaticSeoProvider::new_failing(),
    );
    app.start().unwrap();

    app.navigate("/admin/pages/about").await.unwrap();

    assert_eq!(app.document().title(), "Pages About - Gudang Grosiran");
    assert!(app.seo().cached("about").is_none());
}

#[tokio::test]
async fn test_rendered_head_escapes_content() {
    let seo = StaticSeoProvider::new().with_page("promo", "Diskon <50%>", "\"Hemat\" & murah");
    let mut app = app_with(NO_BACKEND, Arc::new(MemoryStorage::new()), seo);

    app.navigate("/promo").await.unwrap();
    let head = app.document().render();

    assert!(head.contains("<title>Diskon &lt;50%&gt;</title>"));
    assert!(head.contains("&quot;Hemat&quot; &amp; murah"));
}

#[tokio::test]
async fn test_http_provider_reads_public_api_without_token() {
    let backend = MockBackend::new().respond(
        "GET",
        "/api/seo/about",
        200,
        json!({ "seo_title": "About Us", "seo_description": "X" }),
    );
    let address = spawn_backend(backend.clone()).await;
    let config = config_for(&address);
    let provider = HttpSeoProvider::new(ApiClient::public(&config).unwrap());
    let mut app = App::new(
        config,
        stored_session("dewi", &["admin"], "tok-1"),
        Arc::new(provider),
    )
    .unwrap();
    app.start().unwrap();

    app.navigate("/about").await.unwrap();

    assert_eq!(app.document().title(), "About Us");
    let sent = backend.last("GET", "/api/seo/about").unwrap();
    assert!(sent.authorization.is_none());
    assert!(sent.request_id.is_some());
}

#[tokio::test]
async fn test_http_provider_dynamic_record_fallbacks() {
    let backend = MockBackend::new().respond(
        "GET",
        "/api/products/kopi-gayo",
        200,
        json!({ "name": "Kopi Gayo", "short_desc": "Arabika Aceh", "seo_title": null }),
    );
    let address = spawn_backend(backend).await;
    let provider = HttpSeoProvider::new(ApiClient::public(&config_for(&address)).unwrap());
    let store = SeoStore::new(Arc::new(provider));

    let meta = store.fetch_dynamic("products", "kopi-gayo").await.unwrap();

    assert_eq!(meta.seo_title, "Kopi Gayo");
    assert_eq!(meta.seo_description, "Arabika Aceh");
    assert!(store.fetch_dynamic("blogs", "missing").await.is_none());
}
