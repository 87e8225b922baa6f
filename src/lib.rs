/*!
 * # catnav - Catalog navigation and bilingual search
 *
 * The navigation core of a bilingual (English/Arabic) product and service
 * site: a static catalog of services with nested products, projects and
 * location galleries, back-navigation for deep links, and free-text search
 * across both locales.
 *
 * ## Features
 *
 * - Validated, immutable catalog loaded from embedded or on-disk JSON
 * - Slug normalization tolerant of case, separators, image extensions and
 *   numeric filename suffixes
 * - Parent resolution for "back" with a locale-preserving home fallback
 * - Bilingual substring search with per-hit display locale
 * - Exit transitions sequenced with delayed, cancellable navigation
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `catalog`: Catalog model, validation and lookup index
 * - `slug`: Slug normalization
 * - `routes`: Route constants, locale prefixes and route classification
 * - `resolver`: Back-navigation parent resolution
 * - `search`: Bilingual search engine
 * - `navigator`: Transition-coordinated navigation and anchor scrolling
 * - `language_utils`: Locales and locale-keyed text
 * - `app_config`: Configuration management
 * - `app_controller`: Wiring used by the command line tool
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod catalog;
pub mod errors;
pub mod language_utils;
pub mod navigator;
pub mod resolver;
pub mod routes;
pub mod search;
pub mod slug;

// Re-export main types for easier usage
pub use app_config::{Config, UiContext};
pub use catalog::{Catalog, ChildEntry, Location, Service};
pub use errors::{AppError, CatalogError, ResolveError};
pub use language_utils::{Locale, LocalizedText};
pub use navigator::{BackOutcome, TransitionNavigator};
pub use resolver::ParentResolver;
pub use routes::{NavigationTarget, RouteParams};
pub use search::{SearchEngine, SearchResults};
pub use slug::normalize;
