//! # Router
//!
//! Builds the route table from the page files the bundler discovered, adds a
//! catch-all 404 route, and decides how to recover from navigation errors.
//!
//! ## Page → Route
//! ```text
//! ┌─────────────────────────────┬──────────────────────┬─────────────────┐
//! │ page file                   │ path                 │ name            │
//! ├─────────────────────────────┼──────────────────────┼─────────────────┤
//! │ index.vue                   │ /                    │ index           │
//! │ posts/index.vue             │ /posts               │ posts           │
//! │ posts/[id].vue              │ /posts/:id           │ posts-id        │
//! │ chat/[roomId]/index.vue     │ /chat/:roomId        │ chat-roomId     │
//! │ docs/[...slug].vue          │ /docs/:slug(.*)*     │ docs-slug       │
//! │ (appended)                  │ /:pathMatch(.*)*     │ NotFound        │
//! └─────────────────────────────┴──────────────────────┴─────────────────┘
//! ```
//!
//! ## Matching
//! Static segments beat parameters, parameters beat catch-alls. Among equal
//! scores the route registered first wins, so the appended `NotFound` route
//! only answers when nothing else does. Static segments compare
//! case-insensitively; trailing slashes, query and hash are ignored.
//!
//! ## Dynamic-Import Recovery
//! ```text
//!  navigation error
//!        │
//!        ├── not a dynamic-import failure ───────────────► Report
//!        │
//!        ├── reload flag already set ────────────────────► GiveUp
//!        │
//!        └── set reload flag ────────────────────────────► Reload(to)
//!
//!  router ready ─────────────────────────────► clear reload flag
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::storage::KeyValueStorage;

/// Name of the appended 404 route.
pub const NOT_FOUND_ROUTE_NAME: &str = "NotFound";

/// Page component rendered for unknown paths.
pub const NOT_FOUND_COMPONENT: &str = "error/NotFound";

/// Pattern of the appended 404 route.
pub const NOT_FOUND_PATH: &str = "/:pathMatch(.*)*";

/// Prop handed to the 404 page with the path that failed to match.
pub const INVALID_PATH_PROP: &str = "invalidPath";

/// Local-storage flag guarding against reload loops.
pub const DYNAMIC_RELOAD_KEY: &str = "bazaar:dynamic-reload";

const DYNAMIC_IMPORT_FAILURE: &str = "Failed to fetch dynamically imported module";

// =============================================================================
// Routes
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

impl Segment {
    fn parse(raw: &str) -> Segment {
        if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            match inner.strip_prefix("...") {
                Some(name) => Segment::CatchAll(name.to_string()),
                None => Segment::Param(inner.to_string()),
            }
        } else {
            Segment::Static(raw.to_string())
        }
    }

    fn pattern(&self) -> String {
        match self {
            Segment::Static(s) => s.clone(),
            Segment::Param(name) => format!(":{}", name),
            Segment::CatchAll(name) => format!(":{}(.*)*", name),
        }
    }

    fn label(&self) -> &str {
        match self {
            Segment::Static(s) | Segment::Param(s) | Segment::CatchAll(s) => s,
        }
    }

    fn score(&self) -> u8 {
        match self {
            Segment::Static(_) => 3,
            Segment::Param(_) => 2,
            Segment::CatchAll(_) => 1,
        }
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Route {
    /// Path pattern, e.g. `/posts/:id`.
    pub path: String,

    pub name: String,

    /// Page component, relative to the pages directory, without extension.
    pub component: String,

    /// Layout wrapping the page. `None` renders the page bare.
    pub layout: Option<String>,

    #[serde(skip)]
    #[ts(skip)]
    segments: Vec<Segment>,
}

impl Route {
    /// The appended 404 route.
    pub fn not_found() -> Route {
        Route {
            path: NOT_FOUND_PATH.to_string(),
            name: NOT_FOUND_ROUTE_NAME.to_string(),
            component: NOT_FOUND_COMPONENT.to_string(),
            layout: None,
            segments: vec![Segment::CatchAll("pathMatch".to_string())],
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.name == NOT_FOUND_ROUTE_NAME
    }

    fn match_parts(&self, parts: &[&str]) -> Option<BTreeMap<String, String>> {
        let mut params = BTreeMap::new();
        let mut rest = parts;

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::CatchAll(name) => {
                    // Only valid as the final segment.
                    if i + 1 != self.segments.len() {
                        return None;
                    }
                    params.insert(name.clone(), rest.join("/"));
                    return Some(params);
                }
                Segment::Static(expected) => {
                    let (part, tail) = rest.split_first()?;
                    if !part.eq_ignore_ascii_case(expected) {
                        return None;
                    }
                    rest = tail;
                }
                Segment::Param(name) => {
                    let (part, tail) = rest.split_first()?;
                    params.insert(name.clone(), (*part).to_string());
                    rest = tail;
                }
            }
        }

        rest.is_empty().then_some(params)
    }

    /// Ranking key. Exact-length routes outrank catch-alls regardless of
    /// their segments; within each group segments compare left to right.
    fn score(&self) -> (bool, Vec<u8>) {
        let exact = !self
            .segments
            .iter()
            .any(|s| matches!(s, Segment::CatchAll(_)));
        (exact, self.segments.iter().map(Segment::score).collect())
    }
}

/// Converts a page file path into its route.
///
/// Accepts paths with or without an extension (`posts/[id].vue` or
/// `posts/[id]`). The route starts without a layout; see [`setup_layouts`].
pub fn route_from_page(page: &str) -> Route {
    let trimmed = page.trim_matches('/');
    let component = match trimmed.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') && !stem.ends_with("..") => stem,
        _ => trimmed,
    }
    .to_string();

    let mut raw: Vec<&str> = component.split('/').filter(|s| !s.is_empty()).collect();
    if raw.last() == Some(&"index") {
        raw.pop();
    }

    let segments: Vec<Segment> = raw.iter().map(|s| Segment::parse(s)).collect();

    let path = format!(
        "/{}",
        segments.iter().map(Segment::pattern).collect::<Vec<_>>().join("/")
    );
    let name = if segments.is_empty() {
        "index".to_string()
    } else {
        segments.iter().map(Segment::label).collect::<Vec<_>>().join("-")
    };

    Route {
        path,
        name,
        component,
        layout: None,
        segments,
    }
}

/// Layout selection for generated routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layouts {
    /// Layout used when no override matches.
    pub default: String,

    /// Component prefix → layout. The longest matching prefix wins.
    pub overrides: BTreeMap<String, String>,
}

impl Default for Layouts {
    fn default() -> Self {
        Layouts {
            default: "default".to_string(),
            overrides: BTreeMap::new(),
        }
    }
}

impl Layouts {
    fn layout_for(&self, component: &str) -> &str {
        self.overrides
            .iter()
            .filter(|(prefix, _)| component.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, layout)| layout.as_str())
            .unwrap_or(&self.default)
    }
}

/// Wraps every route in its layout.
pub fn setup_layouts(routes: Vec<Route>, layouts: &Layouts) -> Vec<Route> {
    routes
        .into_iter()
        .map(|mut route| {
            route.layout = Some(layouts.layout_for(&route.component).to_string());
            route
        })
        .collect()
}

// =============================================================================
// Router
// =============================================================================

/// Result of resolving a location.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RouteMatch {
    pub name: String,
    pub component: String,
    pub layout: Option<String>,

    /// Normalized path that was matched (no base, query or hash).
    pub path: String,

    /// Location as requested, query and hash included.
    pub full_path: String,

    pub params: BTreeMap<String, String>,

    /// Props passed to the page component.
    pub props: BTreeMap<String, String>,
}

impl RouteMatch {
    pub fn is_not_found(&self) -> bool {
        self.name == NOT_FOUND_ROUTE_NAME
    }
}

/// Route table with a 404 fallback.
#[derive(Debug, Clone)]
pub struct Router {
    base: String,
    routes: Vec<Route>,
}

impl Router {
    /// Generates routes for `pages`, wraps them in layouts and appends the
    /// 404 route.
    pub fn new<I, P>(pages: I, layouts: &Layouts) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let generated = pages.into_iter().map(|p| route_from_page(p.as_ref())).collect();
        let mut routes = setup_layouts(generated, layouts);
        routes.push(Route::not_found());

        Router {
            base: "/".to_string(),
            routes,
        }
    }

    /// Serves the app below `base` (e.g. `/app/`).
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.base = format!("/{}", base.trim_matches('/'));
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolves a location. Never fails: unknown paths land on `NotFound`.
    pub fn resolve(&self, full_path: &str) -> RouteMatch {
        let path = self.normalize(full_path);
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let mut best: Option<((bool, Vec<u8>), &Route, BTreeMap<String, String>)> = None;
        for route in &self.routes {
            if let Some(params) = route.match_parts(&parts) {
                let score = route.score();
                // Strictly greater keeps the earliest route on ties.
                if best.as_ref().map_or(true, |(s, _, _)| score > *s) {
                    best = Some((score, route, params));
                }
            }
        }

        let (route, params) = match best {
            Some((_, route, params)) => (route.clone(), params),
            None => (Route::not_found(), BTreeMap::new()),
        };

        let mut props = BTreeMap::new();
        if route.is_not_found() {
            props.insert(INVALID_PATH_PROP.to_string(), path.clone());
        }

        RouteMatch {
            name: route.name,
            component: route.component,
            layout: route.layout,
            path,
            full_path: full_path.to_string(),
            params,
            props,
        }
    }

    fn normalize(&self, full_path: &str) -> String {
        let end = full_path.find(&['?', '#'][..]).unwrap_or(full_path.len());
        let mut path = &full_path[..end];

        if self.base != "/" {
            if let Some(stripped) = path.strip_prefix(self.base.as_str()) {
                if stripped.is_empty() || stripped.starts_with('/') {
                    path = stripped;
                }
            }
        }

        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        }
    }
}

// =============================================================================
// Navigation Error Recovery
// =============================================================================

/// What to do after a navigation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "action", rename_all = "camelCase")]
#[ts(export)]
pub enum Recovery {
    /// Reload the window at `full_path` to fetch fresh chunks.
    Reload {
        #[serde(rename = "fullPath")]
        full_path: String,
    },

    /// A reload already happened and did not help.
    GiveUp,

    /// Unrelated error; report it unchanged.
    Report,
}

/// Whether the error comes from a stale lazily-loaded page chunk.
pub fn is_dynamic_import_failure(message: &str) -> bool {
    message.contains(DYNAMIC_IMPORT_FAILURE)
}

/// Decides how to recover from a failed navigation to `to_full_path`.
///
/// Sets the reload flag in `local` before asking for a reload, so a second
/// failure after the reload gives up instead of looping.
pub fn recover_from_navigation_error<S: KeyValueStorage>(
    local: &mut S,
    message: &str,
    to_full_path: &str,
) -> Result<Recovery, S::Error> {
    if !is_dynamic_import_failure(message) {
        return Ok(Recovery::Report);
    }

    if local.get_item(DYNAMIC_RELOAD_KEY)?.is_some() {
        return Ok(Recovery::GiveUp);
    }

    local.set_item(DYNAMIC_RELOAD_KEY, "true")?;
    Ok(Recovery::Reload {
        full_path: to_full_path.to_string(),
    })
}

/// Clears the reload flag once the router has finished its first navigation.
pub fn mark_router_ready<S: KeyValueStorage>(local: &mut S) -> Result<(), S::Error> {
    local.remove_item(DYNAMIC_RELOAD_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const PAGES: &[&str] = &[
        "index.vue",
        "login.vue",
        "posts/index.vue",
        "posts/[id].vue",
        "posts/new.vue",
        "chat/[roomId]/index.vue",
        "mypage/likes.vue",
        "error/NotFound.vue",
    ];

    fn router() -> Router {
        Router::new(PAGES.iter(), &Layouts::default())
    }

    #[test]
    fn test_route_from_page() {
        let route = route_from_page("index.vue");
        assert_eq!(route.path, "/");
        assert_eq!(route.name, "index");
        assert_eq!(route.component, "index");

        let route = route_from_page("posts/[id].vue");
        assert_eq!(route.path, "/posts/:id");
        assert_eq!(route.name, "posts-id");
        assert_eq!(route.component, "posts/[id]");

        let route = route_from_page("chat/[roomId]/index");
        assert_eq!(route.path, "/chat/:roomId");
        assert_eq!(route.name, "chat-roomId");

        let route = route_from_page("docs/[...slug].vue");
        assert_eq!(route.path, "/docs/:slug(.*)*");
    }

    #[test]
    fn test_not_found_is_appended_last() {
        let router = router();
        let last = router.routes().last().unwrap();
        assert_eq!(last.name, "NotFound");
        assert_eq!(last.path, "/:pathMatch(.*)*");
        assert_eq!(last.component, "error/NotFound");
        assert_eq!(last.layout, None);
        assert_eq!(router.routes().len(), PAGES.len() + 1);
    }

    #[test]
    fn test_generated_routes_get_default_layout() {
        let router = router();
        assert!(router
            .routes()
            .iter()
            .filter(|r| !r.is_not_found())
            .all(|r| r.layout.as_deref() == Some("default")));
    }

    #[test]
    fn test_layout_overrides_use_longest_prefix() {
        let mut layouts = Layouts::default();
        layouts.overrides.insert("chat".into(), "fullscreen".into());
        layouts.overrides.insert("chat/[roomId]".into(), "room".into());
        let router = Router::new(["chat/index.vue", "chat/[roomId].vue", "login.vue"], &layouts);

        assert_eq!(router.resolve("/chat").layout.as_deref(), Some("fullscreen"));
        assert_eq!(router.resolve("/chat/12").layout.as_deref(), Some("room"));
        assert_eq!(router.resolve("/login").layout.as_deref(), Some("default"));
    }

    #[test]
    fn test_resolve_static_and_root() {
        let router = router();
        assert_eq!(router.resolve("/").name, "index");
        assert_eq!(router.resolve("/posts").name, "posts");
        assert_eq!(router.resolve("/posts/").name, "posts");
        assert_eq!(router.resolve("/Login?next=/posts").name, "login");
    }

    #[test]
    fn test_static_beats_param() {
        let router = router();
        assert_eq!(router.resolve("/posts/new").name, "posts-new");

        let matched = router.resolve("/posts/42#comments");
        assert_eq!(matched.name, "posts-id");
        assert_eq!(matched.params.get("id").map(String::as_str), Some("42"));
        assert_eq!(matched.full_path, "/posts/42#comments");
        assert_eq!(matched.path, "/posts/42");
        assert!(matched.props.is_empty());
    }

    #[test]
    fn test_unknown_path_falls_back_to_not_found() {
        let router = router();
        let matched = router.resolve("/does/not/exist?x=1");
        assert!(matched.is_not_found());
        assert_eq!(matched.component, "error/NotFound");
        assert_eq!(
            matched.props.get("invalidPath").map(String::as_str),
            Some("/does/not/exist")
        );
        assert_eq!(
            matched.params.get("pathMatch").map(String::as_str),
            Some("does/not/exist")
        );
    }

    #[test]
    fn test_page_catch_all_wins_over_not_found() {
        let router = Router::new(["docs/[...slug].vue"], &Layouts::default());
        let matched = router.resolve("/docs/a/b");
        assert_eq!(matched.name, "docs-slug");
        assert_eq!(matched.params.get("slug").map(String::as_str), Some("a/b"));

        assert!(router.resolve("/other").is_not_found());
    }

    #[test]
    fn test_base_is_stripped() {
        let router = router().with_base("/app/");
        assert_eq!(router.resolve("/app").name, "index");
        assert_eq!(router.resolve("/app/posts/3").name, "posts-id");
        assert!(router.resolve("/application").is_not_found());
    }

    #[test]
    fn test_dynamic_import_recovery_reloads_once() {
        let mut local = MemoryStorage::new();
        let message = "TypeError: Failed to fetch dynamically imported module: /assets/posts-1a2b.js";

        let first = recover_from_navigation_error(&mut local, message, "/posts/3").unwrap();
        assert_eq!(
            first,
            Recovery::Reload {
                full_path: "/posts/3".into()
            }
        );
        assert_eq!(local.get_item(DYNAMIC_RELOAD_KEY).unwrap().as_deref(), Some("true"));

        let second = recover_from_navigation_error(&mut local, message, "/posts/3").unwrap();
        assert_eq!(second, Recovery::GiveUp);
    }

    #[test]
    fn test_router_ready_clears_flag() {
        let mut local = MemoryStorage::new().with_item(DYNAMIC_RELOAD_KEY, "true");
        mark_router_ready(&mut local).unwrap();
        assert!(local.get_item(DYNAMIC_RELOAD_KEY).unwrap().is_none());

        let message = "Failed to fetch dynamically imported module";
        assert!(matches!(
            recover_from_navigation_error(&mut local, message, "/").unwrap(),
            Recovery::Reload { .. }
        ));
    }

    #[test]
    fn test_other_errors_are_reported() {
        let mut local = MemoryStorage::new();
        let recovery = recover_from_navigation_error(&mut local, "Navigation cancelled", "/").unwrap();
        assert_eq!(recovery, Recovery::Report);
        assert!(local.is_empty());
    }

    #[test]
    fn test_recovery_wire_format() {
        let value = serde_json::to_value(Recovery::Reload {
            full_path: "/posts".into(),
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({"action": "reload", "fullPath": "/posts"}));
        assert_eq!(
            serde_json::to_value(Recovery::GiveUp).unwrap(),
            serde_json::json!({"action": "giveUp"})
        );
    }
}
