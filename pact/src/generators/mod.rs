//! Generator registry.
//!
//! Generators are keyed by the part of the interaction they target
//! ([`Category`]) and, within a category, by a key: a path expression for
//! bodies, a header or query parameter name for those categories, and the
//! empty string for method, path and status.

pub mod generator;
pub mod handler;

pub use generator::{GenerateValue, Generator, RandomIntGenerator, RandomStringGenerator, UuidGenerator};
pub use handler::{ContentTypeHandler, ContentTypeHandlers, JsonContentTypeHandler};

use crate::body::OptionalBody;
use crate::content_type::ContentType;
use crate::error::{PactError, PactResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Part of an interaction a generator applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Request method
    Method,
    /// Request path
    Path,
    /// Request or response headers
    Header,
    /// Request query parameters
    Query,
    /// Request or response body
    Body,
    /// Response status code
    Status,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Method,
        Self::Path,
        Self::Header,
        Self::Query,
        Self::Body,
        Self::Status,
    ];

    /// Persisted category name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Path => "path",
            Self::Header => "header",
            Self::Query => "query",
            Self::Body => "body",
            Self::Status => "status",
        }
    }

    /// Check if generators in this category are keyed by name or path.
    ///
    /// Method, path and status are single values and use the empty key.
    #[must_use]
    pub const fn is_keyed(self) -> bool {
        matches!(self, Self::Header | Self::Query | Self::Body)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| PactError::UnknownCategory(s.to_string()))
    }
}

/// Generators for an interaction, by category and key.
///
/// Each `(category, key)` pair holds at most one generator. Entries iterate
/// in insertion order; replacing a generator keeps its position.
///
/// Not synchronized: share behind a lock, or clone, if mutated concurrently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generators {
    categories: IndexMap<Category, IndexMap<String, Generator>>,
}

impl Generators {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the persisted `generators` block of a pact file.
    ///
    /// ```json
    /// {
    ///   "body": { "$.id": { "type": "Uuid" } },
    ///   "header": { "X-Request-Id": { "type": "RandomString", "size": 12 } },
    ///   "status": { "type": "RandomInt", "min": 200, "max": 300 }
    /// }
    /// ```
    ///
    /// Method, path and status take a bare generator; every category also
    /// accepts a map of key to generator. Unknown categories and invalid
    /// definitions are logged and skipped.
    #[must_use]
    pub fn from_map(map: Option<&Map<String, Value>>) -> Self {
        let mut generators = Self::new();
        let Some(map) = map else {
            return generators;
        };

        for (name, value) in map {
            let category = match name.parse::<Category>() {
                Ok(category) => category,
                Err(err) => {
                    warn!(error = %err, "Ignoring generators for unknown category");
                    continue;
                }
            };

            match value {
                Value::Object(entries) if !category.is_keyed() && entries.contains_key("type") => {
                    generators.add_definition(category, "", value);
                }
                Value::Object(entries) => {
                    for (key, definition) in entries {
                        generators.add_definition(category, key, definition);
                    }
                }
                other => {
                    warn!(%category, value = %other, "Ignoring generators: expected a JSON object");
                }
            }
        }

        generators
    }

    fn add_definition(&mut self, category: Category, key: &str, definition: &Value) {
        match Generator::from_json(definition) {
            Ok(generator) => {
                self.add_generator(category, key, generator);
            }
            Err(err) => {
                warn!(%category, key, error = %err, "Ignoring invalid generator definition");
            }
        }
    }

    /// Render the registry in its persisted form (see [`Generators::from_map`]).
    ///
    /// Custom generators have no persisted form and are left out.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();

        for (category, entries) in &self.categories {
            let mut rendered = Map::new();
            for (key, generator) in entries {
                match generator.to_json() {
                    Some(definition) => {
                        rendered.insert(key.clone(), definition);
                    }
                    None => {
                        debug!(%category, key, generator = generator.type_name(), "Custom generator not persisted");
                    }
                }
            }
            if rendered.is_empty() {
                continue;
            }

            let single = !category.is_keyed() && rendered.len() == 1;
            let value = match rendered.get("").cloned() {
                Some(definition) if single => definition,
                _ => Value::Object(rendered),
            };
            map.insert(category.to_string(), value);
        }

        map
    }

    /// Add a generator, replacing any existing one for the same category and key.
    pub fn add_generator(
        &mut self,
        category: Category,
        key: impl Into<String>,
        generator: Generator,
    ) -> &mut Self {
        self.categories
            .entry(category)
            .or_default()
            .insert(key.into(), generator);
        self
    }

    /// Add a generator under the empty key, which targets the whole value.
    pub fn add_category_generator(&mut self, category: Category, generator: Generator) -> &mut Self {
        self.add_generator(category, "", generator)
    }

    /// Look up the generator for a category and key.
    #[must_use]
    pub fn get(&self, category: Category, key: &str) -> Option<&Generator> {
        self.categories.get(&category)?.get(key)
    }

    /// Iterate over the `(key, generator)` pairs of a category in insertion order.
    pub fn iter(&self, category: Category) -> impl Iterator<Item = (&str, &Generator)> {
        self.categories
            .get(&category)
            .into_iter()
            .flat_map(|entries| entries.iter().map(|(key, generator)| (key.as_str(), generator)))
    }

    /// Call `action` once for every `(key, generator)` pair of a category.
    pub fn apply_generator<F>(&self, category: Category, mut action: F)
    where
        F: FnMut(&str, &Generator),
    {
        for (key, generator) in self.iter(category) {
            action(key, generator);
        }
    }

    /// Categories with at least one generator.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(category, _)| *category)
    }

    /// Total number of generators across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.values().map(IndexMap::len).sum()
    }

    /// Check if the registry holds no generators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply the body generators to `body`, returning a new body.
    ///
    /// Empty, missing and null bodies, bodies that are neither JSON nor
    /// XML, and content types without a registered handler come back
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PactError::UnparseableBody`] if the body does not parse as
    /// its content type, or [`PactError::InvalidPath`] for a malformed key.
    pub fn apply_body_generators(
        &self,
        body: &OptionalBody,
        content_type: &ContentType,
        handlers: &ContentTypeHandlers,
    ) -> PactResult<OptionalBody> {
        let Some(raw) = body.value() else {
            return Ok(body.clone());
        };

        if !content_type.is_json() && !content_type.is_xml() {
            debug!(%content_type, "Body generators not applied to unsupported content type");
            return Ok(body.clone());
        }

        let canonical = content_type.canonical();
        let Some(handler) = handlers.get(&canonical) else {
            debug!(content_type = %canonical, "No content-type handler registered, body left unchanged");
            return Ok(body.clone());
        };

        handler.process_body(raw, &mut |document| {
            for (key, generator) in self.iter(Category::Body) {
                handler.apply_key(document, key, generator)?;
            }
            Ok(())
        })
    }
}

impl Serialize for Generators {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Generators {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Option::<Map<String, Value>>::deserialize(deserializer)?;
        Ok(Self::from_map(map.as_ref()))
    }
}
