/// Router Module Index
///
/// The route table is declared as two disjoint trees, mirroring the access
/// split of the admin shell:
///
/// - `public`: landing and authentication screens, reachable anonymously.
/// - `admin`: the dashboard tree, every route below it requires a session.
///
/// Both trees are flattened into a `RouteTable` together with a wildcard
/// fallback. Flattening merges ancestor metadata into one `ResolvedRoute` per
/// navigable path, so the guard reads a single record instead of walking the
/// ancestor chain at navigation time.
pub mod admin;
pub mod public;

use std::collections::{BTreeMap, BTreeSet};

/// Pattern of the wildcard fallback route.
pub const CATCH_ALL: &str = "/:pathMatch(.*)*";
pub const NOT_FOUND: &str = "NotFound";

// --- Declarative Tree ---

/// RouteMeta
///
/// Per-record metadata. `None` means "not declared here": the value is then
/// inherited from the nearest ancestor that declares it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: Option<bool>,
    pub title: Option<String>,
    pub roles: Option<BTreeSet<String>>,
    pub slug: Option<String>,
}

/// RouteRecord
///
/// One node of a route tree. A child `path` starting with `/` is absolute;
/// anything else is appended to the parent's path.
#[derive(Debug, Clone, Default)]
pub struct RouteRecord {
    pub path: String,
    pub name: Option<String>,
    /// Identifier of the view rendered for this record.
    pub view: Option<&'static str>,
    pub meta: RouteMeta,
    pub redirect: Option<String>,
    pub children: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn view(mut self, view: &'static str) -> Self {
        self.view = Some(view);
        self
    }

    pub fn requires_auth(mut self, required: bool) -> Self {
        self.meta.requires_auth = Some(required);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = Some(title.into());
        self
    }

    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.meta.slug = Some(slug.into());
        self
    }

    pub fn redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    pub fn children(mut self, children: Vec<RouteRecord>) -> Self {
        self.children = children;
        self
    }
}

// --- Flattened Table ---

/// ResolvedRoute
///
/// Decision record for one navigable path, with ancestor metadata merged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub pattern: String,
    pub name: Option<String>,
    pub view: Option<&'static str>,
    /// True when this record or any ancestor declares `requires_auth`.
    pub requires_auth: bool,
    pub title: Option<String>,
    pub roles: Option<BTreeSet<String>>,
    pub slug: Option<String>,
    /// Belongs to the admin tree.
    pub admin: bool,
    pub redirect: Option<String>,
    catch_all: bool,
}

impl ResolvedRoute {
    pub fn is_catch_all(&self) -> bool {
        self.catch_all
    }
}

/// Location
///
/// A parsed navigation target. `full_path` keeps query and hash so it can be
/// replayed verbatim, e.g. as the post-login return URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
    pub hash: Option<String>,
    pub full_path: String,
}

impl Location {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (rest, hash) = match raw.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };
        let path = normalize_path(path);

        let mut full_path = path.clone();
        if let Some(query) = &query {
            full_path.push('?');
            full_path.push_str(query);
        }
        if let Some(hash) = &hash {
            full_path.push('#');
            full_path.push_str(hash);
        }

        Self {
            path,
            query,
            hash,
            full_path,
        }
    }

    /// Non-empty path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }
}

/// RouteMatch
///
/// Outcome of resolving a location against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: ResolvedRoute,
    pub location: Location,
    pub params: BTreeMap<String, String>,
}

/// RouteTable
///
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<ResolvedRoute>,
}

#[derive(Default, Clone)]
struct Inherited {
    requires_auth: bool,
    title: Option<String>,
    roles: Option<BTreeSet<String>>,
    slug: Option<String>,
}

impl RouteTable {
    /// Flattens the public and admin trees and appends the wildcard
    /// fallback, which renders `fallback_view`.
    pub fn new(public: RouteRecord, admin: RouteRecord, fallback_view: &'static str) -> Self {
        let mut routes = Vec::new();
        flatten(&public, "", &Inherited::default(), false, &mut routes);
        flatten(&admin, "", &Inherited::default(), true, &mut routes);
        routes.push(ResolvedRoute {
            pattern: CATCH_ALL.to_string(),
            name: Some(NOT_FOUND.to_string()),
            view: Some(fallback_view),
            requires_auth: false,
            title: None,
            roles: None,
            slug: None,
            admin: false,
            redirect: None,
            catch_all: true,
        });
        Self { routes }
    }

    /// The application's route table: public tree, admin tree, 404 fallback.
    pub fn standard() -> Self {
        Self::new(
            public::public_routes(),
            admin::admin_routes(),
            "views/admin/pages/maintenance/error/Error404Page",
        )
    }

    pub fn routes(&self) -> &[ResolvedRoute] {
        &self.routes
    }

    pub fn by_name(&self, name: &str) -> Option<&ResolvedRoute> {
        self.routes
            .iter()
            .find(|route| route.name.as_deref() == Some(name))
    }

    /// resolve
    ///
    /// Static segments outrank parameters, so `ecommerce/products/add` wins
    /// over `ecommerce/products/:id`. Equal ranks fall back to declaration
    /// order. Paths nothing else matches land on the wildcard route.
    pub fn resolve(&self, raw: &str) -> Option<RouteMatch> {
        let location = Location::parse(raw);
        let segments: Vec<&str> = location.segments().collect();

        let mut best: Option<(usize, &ResolvedRoute, BTreeMap<String, String>)> = None;
        for route in self.routes.iter().filter(|r| !r.catch_all) {
            let Some((score, params)) = match_pattern(&route.pattern, &segments) else {
                continue;
            };
            if best.as_ref().is_none_or(|(top, _, _)| score > *top) {
                best = Some((score, route, params));
            }
        }

        if let Some((_, route, params)) = best {
            return Some(RouteMatch {
                route: route.clone(),
                location,
                params,
            });
        }

        let fallback = self.routes.iter().find(|r| r.catch_all)?;
        let mut params = BTreeMap::new();
        params.insert("pathMatch".to_string(), segments.join("/"));
        Some(RouteMatch {
            route: fallback.clone(),
            location,
            params,
        })
    }
}

fn flatten(
    record: &RouteRecord,
    parent: &str,
    inherited: &Inherited,
    admin: bool,
    out: &mut Vec<ResolvedRoute>,
) {
    let pattern = join_path(parent, &record.path);
    let merged = Inherited {
        requires_auth: inherited.requires_auth || record.meta.requires_auth == Some(true),
        title: record.meta.title.clone().or_else(|| inherited.title.clone()),
        roles: record.meta.roles.clone().or_else(|| inherited.roles.clone()),
        slug: record.meta.slug.clone().or_else(|| inherited.slug.clone()),
    };

    // Layout records are navigable only when named or redirecting.
    if record.name.is_some() || record.redirect.is_some() || record.children.is_empty() {
        out.push(ResolvedRoute {
            pattern: pattern.clone(),
            name: record.name.clone(),
            view: record.view,
            requires_auth: merged.requires_auth,
            title: merged.title.clone(),
            roles: merged.roles.clone(),
            slug: merged.slug.clone(),
            admin,
            redirect: record.redirect.clone(),
            catch_all: false,
        });
    }

    for child in &record.children {
        flatten(child, &pattern, &merged, admin, out);
    }
}

fn join_path(parent: &str, path: &str) -> String {
    if path.starts_with('/') {
        return normalize_path(path);
    }
    if path.is_empty() {
        return normalize_path(parent);
    }
    normalize_path(&format!("{}/{}", parent.trim_end_matches('/'), path))
}

fn normalize_path(path: &str) -> String {
    let joined = path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{joined}")
}

/// Matches `segments` against `pattern`; returns the number of static
/// segments matched and the captured parameters.
fn match_pattern(pattern: &str, segments: &[&str]) -> Option<(usize, BTreeMap<String, String>)> {
    let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if parts.len() != segments.len() {
        return None;
    }

    let mut score = 0;
    let mut params = BTreeMap::new();
    for (part, segment) in parts.iter().zip(segments) {
        if let Some(name) = part.strip_prefix(':') {
            params.insert(name.to_string(), (*segment).to_string());
        } else if part == segment {
            score += 1;
        } else {
            return None;
        }
    }
    Some((score, params))
}
