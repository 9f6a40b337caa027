// --- Module Structure ---

// Core client services and components.
pub mod app;
pub mod auth;
pub mod config;
pub mod document;
pub mod error;
pub mod guard;
pub mod http;
pub mod models;
pub mod multipart;
pub mod seo;
pub mod storage;

// Route declarations (Public, Admin) and the matcher.
pub mod routes;

// Typed wrappers over the admin REST resources.
pub mod services;

// --- Public Re-exports ---

// Makes core state types easily accessible to the binary (main.rs) and tests.
pub use app::App;
pub use auth::SessionManager;
pub use config::{AppConfig, Env};
pub use error::{ApiError, AuthError, ConfigError, NavigationError, StorageError};
pub use guard::GuardDecision;
pub use http::ApiClient;
pub use routes::{RouteMatch, RouteTable};
pub use seo::{HttpSeoProvider, SeoProviderState, SeoStore, StaticSeoProvider};
pub use storage::{FileStorage, MemoryStorage, StorageState};
