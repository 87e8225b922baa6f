/*!
 * Route surface of the site.
 *
 * Path builders, locale-prefix handling and the route classifier. A path is
 * classified once per call into a `RouteKind`; callers match on the kind
 * instead of chaining prefix checks.
 */

use std::collections::HashMap;

use serde::Serialize;

use crate::errors::ResolveError;
use crate::language_utils::Locale;

/// Route parameters supplied by the routing layer, e.g. `{"slug": "..."}`
pub type RouteParams = HashMap<String, String>;

/// Home route; the catalog grid lives there
pub const HOME_PATH: &str = "/";

/// First segment of service detail pages: `/service/:slug`
pub const SERVICE_SEGMENT: &str = "service";

/// First segment of child detail pages: `/equipment/:slug`
pub const CHILD_SEGMENT: &str = "equipment";

/// First segment of admin pages: `/admin/:section/:id`
pub const ADMIN_SEGMENT: &str = "admin";

/// Top-level pages whose parent is always home
pub const TOP_LEVEL_PAGES: &[&str] = &["videos", "about", "contact", "projects"];

/// Route parameter carrying a deep-link slug
pub const SLUG_PARAM: &str = "slug";

/// Route parameter carrying an admin record id
pub const ID_PARAM: &str = "id";

pub fn service_path(slug: &str) -> String {
    format!("/{}/{}", SERVICE_SEGMENT, slug)
}

pub fn child_path(slug: &str) -> String {
    format!("/{}/{}", CHILD_SEGMENT, slug)
}

pub fn admin_listing_path(section: &str) -> String {
    format!("/{}/{}", ADMIN_SEGMENT, section)
}

/// Where selecting a search result leads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationTarget {
    /// Route to navigate to
    pub path: String,

    /// In-page anchor to scroll to once the page has mounted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

impl NavigationTarget {
    pub fn page(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            anchor: None,
        }
    }

    pub fn anchored(path: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            anchor: Some(anchor.into()),
        }
    }
}

/// Split a leading locale segment off a path
///
/// Returns the locale, if any, and the remaining path (always starting with
/// `/`). `"/ar/service/x"` gives `(Some(Ar), "/service/x")`.
pub fn split_locale_prefix(path: &str) -> (Option<Locale>, &str) {
    let trimmed = path.trim();
    let without_slash = trimmed.trim_start_matches('/');
    let (first, rest) = match without_slash.find(['/', '?', '#']) {
        Some(pos) => (&without_slash[..pos], &without_slash[pos..]),
        None => (without_slash, ""),
    };

    match Locale::from_prefix(first) {
        Some(locale) if rest.is_empty() => (Some(locale), HOME_PATH),
        Some(locale) => (Some(locale), rest),
        None => (None, trimmed),
    }
}

/// Re-apply a locale prefix to a destination path
pub fn with_locale_prefix(locale: Option<Locale>, path: &str) -> String {
    match locale {
        None => path.to_string(),
        Some(locale) if path == HOME_PATH || path.is_empty() => format!("/{}", locale.code()),
        Some(locale) => format!("/{}{}", locale.code(), path),
    }
}

/// Decode the non-empty segments of a path, ignoring query and fragment
pub fn path_segments(path: &str) -> Result<Vec<String>, ResolveError> {
    let without_fragment = path.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();

    without_query
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            urlencoding::decode(segment)
                .map(|decoded| decoded.into_owned())
                .map_err(|_| ResolveError::MalformedSegment(segment.to_string()))
        })
        .collect()
}

/// Route classes the back action knows about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// `/`
    Home,
    /// `/equipment/:slug`; the slug is absent for a bare `/equipment`
    ChildDetail { slug: Option<String> },
    /// `/service/:slug`
    ServiceDetail { slug: String },
    /// `/admin/:section/:id`
    AdminDetail { section: String, id: String },
    /// `/admin` or `/admin/:section`
    AdminPage,
    /// A known top-level page such as `/videos`
    Page(String),
    /// Anything else
    Unknown,
}

/// Classify a locale-free path
///
/// A non-empty route parameter wins over the text of the path.
pub fn classify(path: &str, params: &RouteParams) -> Result<RouteKind, ResolveError> {
    let segments = path_segments(path)?;
    let param = |name: &str| {
        params
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let kind = match segments.as_slice() {
        [] => RouteKind::Home,
        [first, rest @ ..] if first.eq_ignore_ascii_case(CHILD_SEGMENT) => RouteKind::ChildDetail {
            slug: param(SLUG_PARAM).or_else(|| rest.first().cloned()),
        },
        [first, slug, ..] if first.eq_ignore_ascii_case(SERVICE_SEGMENT) => RouteKind::ServiceDetail {
            slug: param(SLUG_PARAM).unwrap_or_else(|| slug.clone()),
        },
        [first, section, rest @ ..] if first.eq_ignore_ascii_case(ADMIN_SEGMENT) => {
            match param(ID_PARAM).or_else(|| rest.first().cloned()) {
                Some(id) => RouteKind::AdminDetail {
                    section: section.to_lowercase(),
                    id,
                },
                None => RouteKind::AdminPage,
            }
        }
        [first] if first.eq_ignore_ascii_case(ADMIN_SEGMENT) => RouteKind::AdminPage,
        [first] if TOP_LEVEL_PAGES.iter().any(|p| first.eq_ignore_ascii_case(p)) => {
            RouteKind::Page(first.to_lowercase())
        }
        _ => RouteKind::Unknown,
    };

    Ok(kind)
}
