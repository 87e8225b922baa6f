/*!
 * Bilingual catalog search.
 *
 * A query matches an entity when it is a case-insensitive substring of any
 * searchable field in English or Arabic. There is no scoring: results keep
 * catalog declaration order, services first, then products. The script of
 * the query only decides which locale a hit is displayed in.
 */

use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::catalog::{Catalog, ChildEntry, Service};
use crate::language_utils::{contains_arabic, Locale, LocalizedText};
use crate::routes::{self, NavigationTarget};

/// Queries shorter than this (in characters, after trimming) return nothing
pub const MIN_QUERY_CHARS: usize = 2;

/// A matching service
#[derive(Debug, Clone, Serialize)]
pub struct RankedService {
    pub id: u32,
    pub slug: String,
    pub title: String,
    pub category: String,
    pub display_locale: Locale,
    pub target: NavigationTarget,
}

/// A matching product or project
#[derive(Debug, Clone, Serialize)]
pub struct RankedProduct {
    pub id: u32,
    pub slug: String,
    pub title: String,
    pub usage: String,
    /// Slug of the owning service
    pub service_slug: String,
    pub display_locale: Locale,
    pub target: NavigationTarget,
}

/// Search output, grouped by entity kind
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub services: Vec<RankedService>,
    pub products: Vec<RankedProduct>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.services.is_empty() && self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.services.len() + self.products.len()
    }
}

/// Which locales of an entity matched the query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocaleHits {
    pub en: bool,
    pub ar: bool,
}

impl LocaleHits {
    fn any(&self) -> bool {
        self.en || self.ar
    }
}

/// Pick the locale a hit is shown in
///
/// An Arabic query shows Arabic when the Arabic text matched; any other
/// query shows English when the English text matched. Otherwise whichever
/// locale matched is used, and with no match at all the UI locale.
pub fn choose_display_locale(query_is_arabic: bool, hits: LocaleHits, ui_locale: Locale) -> Locale {
    match (query_is_arabic, hits.en, hits.ar) {
        (true, _, true) => Locale::Ar,
        (false, true, _) => Locale::En,
        (_, true, _) => Locale::En,
        (_, _, true) => Locale::Ar,
        _ => ui_locale,
    }
}

/// Search engine over a shared catalog
#[derive(Debug, Clone)]
pub struct SearchEngine {
    catalog: Arc<Catalog>,
}

impl SearchEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Search services and their children
    ///
    /// `ui_locale` is only a display tiebreak and never affects matching.
    pub fn search(&self, query: &str, ui_locale: Locale) -> SearchResults {
        // Length is counted before lowercasing, which can add code points
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return SearchResults::default();
        }
        let needle = trimmed.to_lowercase();

        let query_is_arabic = contains_arabic(&needle);
        let mut results = SearchResults::default();

        for service in self.catalog.services() {
            let hits = match_fields(&needle, &[&service.title, &service.description, &service.category]);
            if hits.any() {
                let locale = choose_display_locale(query_is_arabic, hits, ui_locale);
                results.services.push(rank_service(service, locale));
            }
        }

        // Children are scanned whether or not their service matched
        for (service, child) in self.catalog.children() {
            let hits = match_fields(&needle, &[&child.title, &child.usage]);
            if hits.any() {
                let locale = choose_display_locale(query_is_arabic, hits, ui_locale);
                results.products.push(rank_product(service, child, locale));
            }
        }

        debug!(
            "Search '{}' found {} services and {} products",
            needle,
            results.services.len(),
            results.products.len()
        );

        results
    }
}

fn match_fields(needle: &str, fields: &[&LocalizedText]) -> LocaleHits {
    let matches = |locale: Locale| {
        fields
            .iter()
            .any(|field| field.raw(locale).to_lowercase().contains(needle))
    };

    LocaleHits {
        en: matches(Locale::En),
        ar: matches(Locale::Ar),
    }
}

fn rank_service(service: &Service, locale: Locale) -> RankedService {
    RankedService {
        id: service.id,
        slug: service.slug.clone(),
        title: service.title.get(locale).to_string(),
        category: service.category.get(locale).to_string(),
        display_locale: locale,
        target: NavigationTarget::page(routes::service_path(&service.slug)),
    }
}

fn rank_product(service: &Service, child: &ChildEntry, locale: Locale) -> RankedProduct {
    let target = if service.child_routes {
        NavigationTarget::page(routes::child_path(&child.slug))
    } else {
        NavigationTarget::anchored(routes::service_path(&service.slug), child.slug.clone())
    };

    RankedProduct {
        id: child.id,
        slug: child.slug.clone(),
        title: child.title.get(locale).to_string(),
        usage: child.usage.get(locale).to_string(),
        service_slug: service.slug.clone(),
        display_locale: locale,
        target,
    }
}
