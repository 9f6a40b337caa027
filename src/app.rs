use std::sync::Arc;

use crate::{
    auth::SessionManager,
    config::AppConfig,
    document::DocumentHead,
    error::{ApiError, NavigationError, StorageError},
    guard::{self, GuardDecision, LOGIN_PATH},
    http::ApiClient,
    models::Session,
    routes::{RouteMatch, RouteTable, admin::DEFAULT_LANDING},
    seo::{HttpSeoProvider, SeoProviderState, SeoStore},
    services::{
        BlogService, BrandService, CategoryService, PageService, ProductService, SlugService,
        TagService, UserService,
    },
    storage::{FileStorage, StorageState},
};

/// Upper bound on chained redirects within one navigation.
pub const MAX_REDIRECTS: usize = 8;

/// Title of the document before any navigation has committed.
pub const SITE_TITLE: &str = "Gudang Grosiran";

/// App
///
/// The application context. Holds every piece of client state that used to
/// be ambient: the session, the SEO cache, the current route and the
/// document head. It is created at start-up and torn down with the process;
/// `logout` resets the session part of it.
///
/// All mutation goes through `&mut self`, so state changes happen one
/// navigation at a time.
pub struct App {
    config: AppConfig,
    storage: StorageState,
    api: ApiClient,
    routes: RouteTable,
    auth: SessionManager,
    seo: SeoStore,
    document: DocumentHead,
    current: Option<RouteMatch>,
    loading: bool,
}

impl App {
    /// Assembles the context from explicit parts. Tests pass in-memory
    /// storage and a static SEO provider here.
    ///
    /// # Errors
    /// Fails when the HTTP client cannot be built.
    pub fn new(
        config: AppConfig,
        storage: StorageState,
        seo_provider: SeoProviderState,
    ) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config, storage.clone())?;
        let auth = SessionManager::new(api.clone(), storage.clone());
        Ok(Self {
            config,
            storage,
            api,
            routes: RouteTable::standard(),
            auth,
            seo: SeoStore::new(seo_provider),
            document: DocumentHead::new(SITE_TITLE),
            current: None,
            loading: false,
        })
    }

    /// Production wiring: file-backed storage and the HTTP SEO provider.
    pub fn from_config(config: AppConfig) -> Result<Self, ApiError> {
        let storage: StorageState = Arc::new(FileStorage::new(config.storage_path.clone()));
        let provider: SeoProviderState = Arc::new(HttpSeoProvider::new(ApiClient::public(&config)?));
        Self::new(config, storage, provider)
    }

    /// Replaces the standard route table.
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Rehydrates the session persisted by a previous run.
    pub fn start(&mut self) -> Result<(), StorageError> {
        self.auth.initialize()
    }

    // --- Accessors ---

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn storage(&self) -> &StorageState {
        &self.storage
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn auth(&self) -> &SessionManager {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut SessionManager {
        &mut self.auth
    }

    pub fn session(&self) -> Option<&Session> {
        self.auth.session()
    }

    pub fn seo(&self) -> &SeoStore {
        &self.seo
    }

    pub fn seo_mut(&mut self) -> &mut SeoStore {
        &mut self.seo
    }

    pub fn document(&self) -> &DocumentHead {
        &self.document
    }

    pub fn current(&self) -> Option<&RouteMatch> {
        self.current.as_ref()
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current.as_ref().map(|m| m.location.path.as_str())
    }

    /// True while a navigation is between guard and commit.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // --- Navigation ---

    /// navigate
    ///
    /// Resolves `to`, runs the guard, follows guard and route redirects, then
    /// commits the final location and runs the post-navigation SEO hook.
    /// Each redirect re-enters the guard.
    ///
    /// # Errors
    /// `RedirectLoop` after `MAX_REDIRECTS` hops; `Storage` when the guard's
    /// lazy session rehydration cannot read storage. On error the current
    /// location is unchanged.
    pub async fn navigate(&mut self, to: &str) -> Result<RouteMatch, NavigationError> {
        self.loading = true;
        let result = self.resolve_allowed(to);
        self.loading = false;

        let target = result?;
        self.current = Some(target.clone());
        tracing::info!(
            path = %target.location.full_path,
            route = target.route.name.as_deref().unwrap_or("-"),
            "navigated"
        );

        // The fetch is not cancelled by a later navigation: a slow response
        // can still land after the user has moved on.
        self.seo.inject(&target, &mut self.document).await;
        Ok(target)
    }

    fn resolve_allowed(&mut self, to: &str) -> Result<RouteMatch, NavigationError> {
        let mut next = to.to_string();
        for _ in 0..=MAX_REDIRECTS {
            let target = self
                .routes
                .resolve(&next)
                .ok_or_else(|| NavigationError::NoRoute(next.clone()))?;

            // Alias routes resolve first so the guard sees the real target.
            if let Some(path) = &target.route.redirect {
                next = path.clone();
                continue;
            }
            if let GuardDecision::Redirect(path) = guard::before_each(&target, &mut self.auth)? {
                tracing::debug!(from = %next, to = %path, "guard redirect");
                next = path;
                continue;
            }
            return Ok(target);
        }
        Err(NavigationError::RedirectLoop(to.to_string()))
    }

    // --- Session ---

    /// login
    ///
    /// Signs in, then navigates to the pending return URL or the default
    /// landing route. The return URL is consumed either way.
    ///
    /// # Errors
    /// `NavigationError::Auth` when the credentials are rejected; the session
    /// stays empty and no navigation happens.
    pub async fn login(&mut self, identifier: &str, secret: &str) -> Result<Session, NavigationError> {
        let session = self.auth.login(identifier, secret).await?;
        let target = self
            .auth
            .take_return_url()
            .unwrap_or_else(|| DEFAULT_LANDING.to_string());
        self.navigate(&target).await?;
        Ok(session)
    }

    /// logout
    ///
    /// Always ends at `/login` with no session. Server failures are absorbed
    /// by `SessionManager::logout`; a failed navigation is only logged.
    pub async fn logout(&mut self) {
        self.auth.logout().await;
        if let Err(e) = self.navigate(LOGIN_PATH).await {
            tracing::warn!(error = %e, "navigation to login after logout failed");
        }
    }

    // --- Resource Services ---

    pub fn users(&self) -> UserService {
        UserService::new(self.api.clone())
    }

    pub fn products(&self) -> ProductService {
        ProductService::new(self.api.clone())
    }

    pub fn blogs(&self) -> BlogService {
        BlogService::new(self.api.clone())
    }

    pub fn categories(&self) -> CategoryService {
        CategoryService::new(self.api.clone())
    }

    pub fn brands(&self) -> BrandService {
        BrandService::new(self.api.clone())
    }

    pub fn tags(&self) -> TagService {
        TagService::new(self.api.clone())
    }

    pub fn pages(&self) -> PageService {
        PageService::new(self.api.clone())
    }

    pub fn slugs(&self) -> SlugService {
        SlugService::new(self.api.clone())
    }
}
