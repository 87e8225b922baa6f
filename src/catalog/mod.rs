/*!
 * Catalog model.
 *
 * The catalog is a read-only tree of bilingual services, each owning its
 * products or projects and optional location galleries. It is built once,
 * validated, and then shared (usually behind an `Arc`) by the parent
 * resolver and the search engine.
 *
 * - `model`: entity types
 * - `index`: precomputed comparison keys for child entries
 */

use std::collections::HashSet;
use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;

use crate::errors::CatalogError;
use crate::slug;

pub mod index;
pub mod model;

pub use self::index::{IndexedChild, SlugIndex};
pub use self::model::{ChildEntry, Location, Service};

// Default catalog shipped with the binary
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Deserialize)]
struct CatalogDocument {
    services: Vec<Service>,
}

/// Immutable, validated catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    services: Vec<Service>,
    index: SlugIndex,
}

impl Catalog {
    /// Build a catalog from services in declaration order
    ///
    /// Children without a slug get one derived from their primary image.
    /// Fails on empty or duplicate slugs and on entities with no title.
    pub fn new(mut services: Vec<Service>) -> Result<Self, CatalogError> {
        let mut service_slugs = HashSet::new();
        let mut child_slugs = HashSet::new();

        for (service_pos, service) in services.iter_mut().enumerate() {
            if service.slug.trim().is_empty() {
                return Err(CatalogError::EmptySlug { id: service.id });
            }
            if !service_slugs.insert(service.slug.to_lowercase()) {
                return Err(CatalogError::DuplicateServiceSlug(service.slug.clone()));
            }
            if !service.title.has_any() {
                return Err(CatalogError::MissingTitle(service.slug.clone()));
            }

            for child in service.children.iter_mut() {
                if child.slug.trim().is_empty() {
                    let derived = child
                        .primary_image()
                        .map(slug::slug_from_image_path)
                        .unwrap_or_default();
                    if derived.is_empty() {
                        return Err(CatalogError::EmptySlug { id: child.id });
                    }
                    debug!("Derived slug '{}' for child {} from its image", derived, child.id);
                    child.slug = derived;
                }
                if !child_slugs.insert(child.slug.to_lowercase()) {
                    return Err(CatalogError::DuplicateChildSlug(child.slug.clone()));
                }
                if !child.title.has_any() {
                    return Err(CatalogError::MissingTitle(child.slug.clone()));
                }
                child.service_index = service_pos;
            }
        }

        let index = SlugIndex::build(&services);
        debug!("Catalog built: {} services, {} children", services.len(), index.len());

        Ok(Self { services, index })
    }

    /// Parse and validate a JSON catalog document
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::new(document.services)
    }

    /// Load a JSON catalog document from disk
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content).inspect_err(|e| {
            warn!("Catalog at {:?} rejected: {}", path, e);
        })
    }

    /// The catalog embedded at build time
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn service(&self, position: usize) -> Option<&Service> {
        self.services.get(position)
    }

    /// Case-insensitive service lookup
    pub fn service_by_slug(&self, slug: &str) -> Option<&Service> {
        self.services
            .iter()
            .find(|s| s.slug.eq_ignore_ascii_case(slug.trim()))
    }

    /// Case-insensitive child lookup
    pub fn child_by_slug(&self, slug: &str) -> Option<&ChildEntry> {
        self.children()
            .map(|(_, child)| child)
            .find(|c| c.slug.eq_ignore_ascii_case(slug.trim()))
    }

    /// Owning service of a child that belongs to this catalog
    pub fn owner_of(&self, child: &ChildEntry) -> Option<&Service> {
        self.services.get(child.service_index)
    }

    /// Every child with its owning service, in declaration order
    pub fn children(&self) -> impl Iterator<Item = (&Service, &ChildEntry)> + '_ {
        self.services
            .iter()
            .flat_map(|service| service.children.iter().map(move |child| (service, child)))
    }

    /// Resolve an index entry to its service and child
    pub fn entry(&self, indexed: &IndexedChild) -> Option<(&Service, &ChildEntry)> {
        let service = self.services.get(indexed.service)?;
        let child = service.children.get(indexed.child)?;
        Some((service, child))
    }

    pub fn index(&self) -> &SlugIndex {
        &self.index
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
