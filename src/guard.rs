//! Pre-navigation gate.
//!
//! `before_each` is the only place that decides whether a navigation may
//! proceed. It reads the session and may record a return URL, nothing else:
//! no data fetching, no document changes.

use crate::{
    auth::SessionManager,
    error::StorageError,
    routes::{RouteMatch, admin::DEFAULT_LANDING},
};

/// Paths that never require a session, whatever their route metadata says.
pub const PUBLIC_PAGES: [&str; 4] = ["/", "/login", "/login1", "/register"];

/// Sign-in screens a signed-in user is bounced away from.
pub const LOGIN_PAGES: [&str; 2] = ["/login", "/login1"];

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// before_each
///
/// 1. Lazily rehydrates the session from storage when none is loaded.
/// 2. Auth is required when the path is not public and the merged route
///    metadata asks for it.
/// 3. No session on a protected route: remember the target, go to login.
/// 4. Session on a login screen: go to the dashboard.
/// 5. Declared roles must intersect the session's roles, otherwise the user
///    is quietly sent to the dashboard.
///
/// # Errors
/// Only a storage failure during rehydration.
pub fn before_each(
    target: &RouteMatch,
    auth: &mut SessionManager,
) -> Result<GuardDecision, StorageError> {
    if auth.session().is_none() {
        auth.initialize()?;
    }

    let path = target.location.path.as_str();
    let auth_required = !PUBLIC_PAGES.contains(&path) && target.route.requires_auth;

    let Some(user) = auth.user() else {
        if auth_required {
            auth.set_return_url(target.location.full_path.clone());
            return Ok(GuardDecision::Redirect(LOGIN_PATH.to_string()));
        }
        return Ok(GuardDecision::Allow);
    };

    if LOGIN_PAGES.contains(&path) {
        return Ok(GuardDecision::Redirect(DEFAULT_LANDING.to_string()));
    }

    if let Some(required) = &target.route.roles {
        if !user.has_any_role(required) {
            tracing::debug!(
                user = %user.username,
                path,
                "missing required role, redirecting to landing"
            );
            return Ok(GuardDecision::Redirect(DEFAULT_LANDING.to_string()));
        }
    }

    Ok(GuardDecision::Allow)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        http::ApiClient,
        routes::RouteTable,
        storage::{MemoryStorage, TOKEN_KEY, USER_KEY},
    };

    fn manager(entries: Vec<(&str, &str)>) -> SessionManager {
        let storage = Arc::new(MemoryStorage::with_entries(entries));
        let api = ApiClient::new(&AppConfig::default(), storage.clone()).unwrap();
        SessionManager::new(api, storage)
    }

    fn signed_in(roles: &str) -> SessionManager {
        let user = format!(
            r#"{{"id":1,"username":"dewi","email":"dewi@gg.test","roles":{roles}}}"#
        );
        let storage = Arc::new(MemoryStorage::with_entries([
            (USER_KEY.to_string(), user),
            (TOKEN_KEY.to_string(), "tok".to_string()),
        ]));
        let api = ApiClient::new(&AppConfig::default(), storage.clone()).unwrap();
        SessionManager::new(api, storage)
    }

    #[test]
    fn public_route_allowed_without_session() {
        let table = RouteTable::standard();
        let mut auth = manager(vec![]);
        let decision = before_each(&table.resolve("/register").unwrap(), &mut auth).unwrap();
        assert_eq!(decision, GuardDecision::Allow);
        assert!(auth.return_url().is_none());
    }

    #[test]
    fn wildcard_route_allowed_without_session() {
        let table = RouteTable::standard();
        let mut auth = manager(vec![]);
        let decision = before_each(&table.resolve("/nowhere").unwrap(), &mut auth).unwrap();
        assert_eq!(decision, GuardDecision::Allow);
    }

    #[test]
    fn guard_rehydrates_lazily() {
        let table = RouteTable::standard();
        let mut auth = signed_in(r#"["admin"]"#);
        assert!(auth.session().is_none());

        let decision =
            before_each(&table.resolve("/admin/ecommerce/products").unwrap(), &mut auth).unwrap();

        assert_eq!(decision, GuardDecision::Allow);
        assert!(auth.is_logged_in());
    }

    #[test]
    fn alternate_login_page_bounces_signed_in_user() {
        let table = RouteTable::standard();
        let mut auth = signed_in("[]");
        let decision = before_each(&table.resolve("/login1").unwrap(), &mut auth).unwrap();
        assert_eq!(decision, GuardDecision::Redirect(DEFAULT_LANDING.to_string()));
    }

    #[test]
    fn matching_role_is_allowed() {
        let table = RouteTable::standard();
        let mut auth = signed_in(r#"["editor","admin"]"#);
        let decision =
            before_each(&table.resolve("/admin/pages/settings").unwrap(), &mut auth).unwrap();
        assert_eq!(decision, GuardDecision::Allow);
    }
}
