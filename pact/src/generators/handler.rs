//! Content-type handlers: parse a body, let generators rewrite it, serialize it back.

use super::Generator;
use crate::body::OptionalBody;
use crate::content_type::JSON;
use crate::error::{PactError, PactResult};
use crate::path::PathExpression;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Parses and re-serializes bodies of one content type.
///
/// Documents are held as a [`serde_json::Value`] tree regardless of the
/// wire format.
pub trait ContentTypeHandler: Send + Sync {
    /// Parse `raw`, call `visit` exactly once with the document, then
    /// serialize the (possibly mutated) document into a present body.
    ///
    /// # Errors
    ///
    /// Returns [`PactError::UnparseableBody`] if `raw` cannot be parsed, or
    /// whatever error `visit` returns.
    fn process_body(
        &self,
        raw: &str,
        visit: &mut dyn FnMut(&mut Value) -> PactResult<()>,
    ) -> PactResult<OptionalBody>;

    /// Replace every node `key` addresses in `document` with a value from
    /// `generator`. A key that addresses nothing is a no-op.
    ///
    /// Keys are relative to the body document itself, in the pact v3 form:
    /// `$.id` addresses the body's top-level `id`. The v2 form `$.body.id`
    /// is not rewritten and addresses a field literally named `body`.
    ///
    /// # Errors
    ///
    /// Returns [`PactError::InvalidPath`] if `key` is not a valid path expression.
    fn apply_key(&self, document: &mut Value, key: &str, generator: &Generator) -> PactResult<()>;
}

/// Handler for JSON bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonContentTypeHandler;

impl ContentTypeHandler for JsonContentTypeHandler {
    fn process_body(
        &self,
        raw: &str,
        visit: &mut dyn FnMut(&mut Value) -> PactResult<()>,
    ) -> PactResult<OptionalBody> {
        let mut document: Value = serde_json::from_str(raw)
            .map_err(|e| PactError::unparseable_body(JSON, e.to_string()))?;
        visit(&mut document)?;
        Ok(OptionalBody::body(serde_json::to_string(&document)?))
    }

    fn apply_key(&self, document: &mut Value, key: &str, generator: &Generator) -> PactResult<()> {
        let path = PathExpression::parse(key)?;
        let applied = path.apply(document, |node| {
            let generated = generator.generate(Some(&*node));
            *node = generated;
        });
        trace!(key, generator = generator.type_name(), applied, "Applied body generator");
        Ok(())
    }
}

/// Content-type handlers keyed by canonical content type.
///
/// Build once at startup and pass to every generation call.
#[derive(Clone)]
pub struct ContentTypeHandlers {
    handlers: HashMap<String, Arc<dyn ContentTypeHandler>>,
}

impl ContentTypeHandlers {
    /// Create a registry with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler, replacing any existing one for the content type.
    #[must_use]
    pub fn register<H>(mut self, content_type: impl AsRef<str>, handler: H) -> Self
    where
        H: ContentTypeHandler + 'static,
    {
        self.handlers
            .insert(content_type.as_ref().to_ascii_lowercase(), Arc::new(handler));
        self
    }

    /// Look up the handler for a content type.
    #[must_use]
    pub fn get(&self, content_type: &str) -> Option<&dyn ContentTypeHandler> {
        self.handlers
            .get(&content_type.to_ascii_lowercase())
            .map(|handler| &**handler)
    }

    /// Check if a handler is registered for a content type.
    #[must_use]
    pub fn contains(&self, content_type: &str) -> bool {
        self.handlers.contains_key(&content_type.to_ascii_lowercase())
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for ContentTypeHandlers {
    fn default() -> Self {
        Self::new().register(JSON, JsonContentTypeHandler)
    }
}

impl fmt::Debug for ContentTypeHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.handlers.keys().collect();
        keys.sort();
        f.debug_struct("ContentTypeHandlers")
            .field("content_types", &keys)
            .finish()
    }
}
