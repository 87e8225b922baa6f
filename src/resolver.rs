/*!
 * Parent resolution for the back action.
 *
 * Given the current route, computes where "back" should lead. Deep-linked
 * child pages go to their owning service; everything else goes to a fixed
 * parent. Resolution never fails: any internal error produces the home
 * route, with the caller's locale prefix preserved whenever it was
 * recognized.
 */

use std::sync::Arc;

use log::{debug, warn};

use crate::catalog::{Catalog, Service};
use crate::errors::ResolveError;
use crate::routes::{self, RouteKind, RouteParams, HOME_PATH};
use crate::slug;

/// Strategy that matched a deep-link slug to a catalog child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Case-insensitive slug equality
    ExactSlug,
    /// Equality of normalized slugs
    NormalizedSlug,
    /// Normalized slug equals a normalized title in either locale
    NormalizedTitle,
    /// One normalized slug contains the other
    Containment,
}

impl MatchStrategy {
    /// Strategies in the order they are tried
    pub const ORDER: [MatchStrategy; 4] = [
        MatchStrategy::ExactSlug,
        MatchStrategy::NormalizedSlug,
        MatchStrategy::NormalizedTitle,
        MatchStrategy::Containment,
    ];
}

/// Computes back-navigation destinations from the catalog
#[derive(Debug, Clone)]
pub struct ParentResolver {
    catalog: Arc<Catalog>,
}

impl ParentResolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Destination of a back action taken on `path`
    ///
    /// Always returns a non-empty path.
    pub fn resolve_parent(&self, path: &str, params: &RouteParams) -> String {
        let (locale, unprefixed) = routes::split_locale_prefix(path);

        let destination = match self.resolve_unprefixed(unprefixed, params) {
            Ok(destination) => destination,
            Err(e) => {
                warn!("Back from '{}' falls back to home: {}", path, e);
                HOME_PATH.to_string()
            }
        };

        routes::with_locale_prefix(locale, &destination)
    }

    fn resolve_unprefixed(&self, path: &str, params: &RouteParams) -> Result<String, ResolveError> {
        let kind = routes::classify(path, params)?;
        debug!("Route '{}' classified as {:?}", path, kind);

        match kind {
            RouteKind::ChildDetail { slug } => {
                let slug = slug.ok_or_else(|| ResolveError::MissingSlug(path.to_string()))?;
                let (service, strategy) = self
                    .find_owner(&slug)
                    .ok_or_else(|| ResolveError::NoMatch(slug.clone()))?;
                debug!("Slug '{}' matched service '{}' by {:?}", slug, service.slug, strategy);
                Ok(routes::service_path(&service.slug))
            }
            RouteKind::AdminDetail { section, .. } => Ok(routes::admin_listing_path(&section)),
            RouteKind::ServiceDetail { .. }
            | RouteKind::AdminPage
            | RouteKind::Page(_)
            | RouteKind::Home
            | RouteKind::Unknown => Ok(HOME_PATH.to_string()),
        }
    }

    /// Find the service owning the child a deep-link slug refers to
    ///
    /// Each strategy scans the whole catalog in declaration order before the
    /// next one is tried, so earlier strategies always win and ties go to the
    /// first declared entry.
    pub fn find_owner(&self, raw_slug: &str) -> Option<(&Service, MatchStrategy)> {
        let lowered = raw_slug.trim().to_lowercase();
        let key = slug::normalize(raw_slug);
        let entries = self.catalog.index().entries();

        MatchStrategy::ORDER.iter().find_map(|strategy| {
            let hit = entries.iter().find(|entry| match strategy {
                MatchStrategy::ExactSlug => !lowered.is_empty() && entry.slug_lower == lowered,
                MatchStrategy::NormalizedSlug => !key.is_empty() && entry.slug_key == key,
                MatchStrategy::NormalizedTitle => {
                    !key.is_empty() && entry.title_keys.iter().any(|title| *title == key)
                }
                MatchStrategy::Containment => {
                    !key.is_empty()
                        && !entry.slug_key.is_empty()
                        && (entry.slug_key.contains(&key) || key.contains(&entry.slug_key))
                }
            })?;

            let service = self.catalog.service(hit.service)?;
            Some((service, *strategy))
        })
    }
}
