/*!
 * Precomputed comparison keys for child entries.
 *
 * Built once with the catalog so the parent resolver never normalizes
 * catalog text on the hot path.
 */

use crate::catalog::model::Service;
use crate::language_utils::Locale;
use crate::slug;

/// Comparison keys for one child entry
#[derive(Debug, Clone)]
pub struct IndexedChild {
    /// Position of the owning service
    pub service: usize,

    /// Position of the child within its service
    pub child: usize,

    /// Slug, lower-cased only
    pub slug_lower: String,

    /// Normalized slug
    pub slug_key: String,

    /// Normalized titles, one per locale with a non-empty title
    pub title_keys: Vec<String>,
}

/// Child keys in catalog declaration order
#[derive(Debug, Clone, Default)]
pub struct SlugIndex {
    entries: Vec<IndexedChild>,
}

impl SlugIndex {
    pub fn build(services: &[Service]) -> Self {
        let mut entries = Vec::new();

        for (service_pos, service) in services.iter().enumerate() {
            for (child_pos, child) in service.children.iter().enumerate() {
                let title_keys = Locale::ALL
                    .iter()
                    .map(|locale| slug::normalize(child.title.raw(*locale)))
                    .filter(|key| !key.is_empty())
                    .collect();

                entries.push(IndexedChild {
                    service: service_pos,
                    child: child_pos,
                    slug_lower: child.slug.to_lowercase(),
                    slug_key: slug::normalize(&child.slug),
                    title_keys,
                });
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[IndexedChild] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
