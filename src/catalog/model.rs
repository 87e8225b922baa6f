/*!
 * Catalog entity types.
 *
 * Services own their children and locations. A child only records the
 * position of its owning service; the catalog resolves that position.
 */

use serde::{Deserialize, Serialize};

use crate::language_utils::LocalizedText;

/// A top-level catalog service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Stable numeric identifier
    pub id: u32,

    /// URL-safe, locale-independent identifier, unique across services
    pub slug: String,

    pub title: LocalizedText,

    #[serde(default)]
    pub category: LocalizedText,

    #[serde(default)]
    pub description: LocalizedText,

    /// Image paths, shared by all locales
    #[serde(default)]
    pub images: Vec<String>,

    /// Products or projects, in declaration order
    #[serde(default, alias = "products", alias = "projects")]
    pub children: Vec<ChildEntry>,

    /// Named sub-galleries
    #[serde(default)]
    pub locations: Vec<Location>,

    /// Whether children have their own detail page
    #[serde(default)]
    pub child_routes: bool,
}

impl Service {
    pub fn new(id: u32, slug: impl Into<String>, title: LocalizedText) -> Self {
        Self {
            id,
            slug: slug.into(),
            title,
            category: LocalizedText::default(),
            description: LocalizedText::default(),
            images: Vec::new(),
            children: Vec::new(),
            locations: Vec::new(),
            child_routes: false,
        }
    }

    pub fn with_category(mut self, category: LocalizedText) -> Self {
        self.category = category;
        self
    }

    pub fn with_description(mut self, description: LocalizedText) -> Self {
        self.description = description;
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_children(mut self, children: Vec<ChildEntry>) -> Self {
        self.children = children;
        self
    }

    pub fn with_locations(mut self, locations: Vec<Location>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_child_routes(mut self, child_routes: bool) -> Self {
        self.child_routes = child_routes;
        self
    }
}

/// A product or project listed under a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildEntry {
    pub id: u32,

    /// Deep-link identifier; derived from the first image when empty
    #[serde(default)]
    pub slug: String,

    pub title: LocalizedText,

    /// What the product is used for, or the project description
    #[serde(default, alias = "description")]
    pub usage: LocalizedText,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,

    // Position of the owning service, assigned when the catalog is built
    #[serde(skip)]
    pub(crate) service_index: usize,
}

impl ChildEntry {
    pub fn new(id: u32, slug: impl Into<String>, title: LocalizedText) -> Self {
        Self {
            id,
            slug: slug.into(),
            title,
            usage: LocalizedText::default(),
            image: None,
            images: Vec::new(),
            service_index: 0,
        }
    }

    pub fn with_usage(mut self, usage: LocalizedText) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// The single `image` if set, else the first of `images`
    pub fn primary_image(&self) -> Option<&str> {
        self.image
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }

    /// Position of the owning service in the catalog
    pub fn service_index(&self) -> usize {
        self.service_index
    }
}

/// A named gallery inside a service, such as one project site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub slug: String,

    pub name: LocalizedText,

    #[serde(default)]
    pub images: Vec<String>,
}

impl Location {
    pub fn new(slug: impl Into<String>, name: LocalizedText) -> Self {
        Self {
            slug: slug.into(),
            name,
            images: Vec::new(),
        }
    }
}
