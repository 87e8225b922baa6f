use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::app_config::{Config, UiContext};
use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::language_utils::Locale;
use crate::navigator::{BackOutcome, PageRoot, Router, ScrollHost, TransitionNavigator, EXIT_TRANSITION};
use crate::resolver::ParentResolver;
use crate::routes::RouteParams;
use crate::search::{SearchEngine, SearchResults};

// @module: Application controller wiring catalog, resolver, search and navigator

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    catalog: Arc<Catalog>,
    resolver: ParentResolver,
    search: SearchEngine,
}

impl Controller {
    /// Create a controller over the embedded catalog with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let catalog = Arc::new(load_catalog(&config).context("Failed to load catalog")?);
        info!("Catalog ready with {} services", catalog.services().len());

        Ok(Self {
            resolver: ParentResolver::new(Arc::clone(&catalog)),
            search: SearchEngine::new(Arc::clone(&catalog)),
            catalog,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn resolver(&self) -> &ParentResolver {
        &self.resolver
    }

    pub fn ui_context(&self) -> UiContext {
        self.config.ui_context()
    }

    /// Back destination for a route
    pub fn resolve(&self, path: &str, params: &RouteParams) -> String {
        self.resolver.resolve_parent(path, params)
    }

    /// Search with an explicit locale, or the configured one
    pub fn search(&self, query: &str, locale: Option<Locale>) -> SearchResults {
        let ui = match locale {
            Some(locale) => self.ui_context().with_locale(locale),
            None => self.ui_context(),
        };
        self.search.search(query, ui.locale)
    }

    /// Build a navigator bound to the given page surfaces
    pub fn navigator(
        &self,
        router: Arc<dyn Router>,
        page_root: Arc<dyn PageRoot>,
        scroll_host: Arc<dyn ScrollHost>,
    ) -> TransitionNavigator {
        TransitionNavigator::new(router, page_root, scroll_host)
    }

    /// Run a full back action and wait for the navigation it produces
    pub async fn run_back(&self, path: &str, params: &RouteParams) -> Result<String> {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let router = move |destination: &str| {
            let _ = tx.send(destination.to_string());
        };

        let navigator = self.navigator(Arc::new(router), Arc::new(LoggingPageRoot), Arc::new(LoggingPageRoot));
        match navigator.go_back(&self.resolver, path, params) {
            BackOutcome::Scheduled { destination } => {
                debug!("Back from '{}' scheduled to '{}' in {:?}", path, destination, EXIT_TRANSITION);
            }
            BackOutcome::AlreadyExiting => return Err(anyhow!("A back action is already running")),
            BackOutcome::ShutDown => return Err(anyhow!("Navigator is shut down")),
        }

        rx.recv()
            .await
            .ok_or_else(|| anyhow!("Navigator stopped before navigating"))
    }
}

/// Load the configured catalog file, or the embedded one
pub fn load_catalog(config: &Config) -> Result<Catalog, AppError> {
    let catalog = match &config.catalog_path {
        Some(path) => {
            debug!("Loading catalog from {:?}", path);
            Catalog::from_file(path)?
        }
        None => Catalog::builtin()?,
    };

    Ok(catalog)
}

// Page surface for the command line, where there is nothing to animate
struct LoggingPageRoot;

impl PageRoot for LoggingPageRoot {
    fn apply_exit_marker(&self, class_name: &str) {
        debug!("Page root marked with '{}'", class_name);
    }
}

impl ScrollHost for LoggingPageRoot {
    fn scroll_to_anchor(&self, anchor: &str) -> bool {
        debug!("Scroll to '#{}' requested", anchor);
        false
    }
}
