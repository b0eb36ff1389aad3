//! Mock generators and content-type handlers for testing.

use pact_model::{ContentTypeHandler, GenerateValue, Generator, OptionalBody, PactResult};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Custom generator that always returns the same value and records the
/// values it replaced.
#[derive(Debug)]
pub struct FixedValueGenerator {
    value: Value,
    bases: Mutex<Vec<Option<Value>>>,
}

impl FixedValueGenerator {
    /// Create a generator returning `value`.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            bases: Mutex::new(Vec::new()),
        }
    }

    /// Wrap a shared instance as a [`Generator`], keeping the handle for inspection.
    #[must_use]
    pub fn shared(value: impl Into<Value>) -> (Arc<Self>, Generator) {
        let fixed = Arc::new(Self::new(value));
        let generator = Generator::Custom(fixed.clone());
        (fixed, generator)
    }

    /// Values passed as `base`, in call order.
    #[must_use]
    pub fn bases(&self) -> Vec<Option<Value>> {
        self.bases.lock().map(|bases| bases.clone()).unwrap_or_default()
    }

    /// Number of `generate` calls.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.bases.lock().map(|bases| bases.len()).unwrap_or_default()
    }
}

impl GenerateValue for FixedValueGenerator {
    fn generate(&self, base: Option<&Value>) -> Value {
        if let Ok(mut bases) = self.bases.lock() {
            bases.push(base.cloned());
        }
        self.value.clone()
    }

    fn name(&self) -> &str {
        "Fixed"
    }
}

/// Content-type handler that records calls and returns the raw body unchanged.
///
/// The document handed to the visitor is the raw body as a JSON string.
/// Clones share their recorded state.
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    visits: Arc<AtomicUsize>,
    applied: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingHandler {
    /// Create a new recording handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `process_body` visits.
    #[must_use]
    pub fn visits(&self) -> usize {
        self.visits.load(Ordering::SeqCst)
    }

    /// `(key, generator type)` pairs passed to `apply_key`, in call order.
    #[must_use]
    pub fn applied(&self) -> Vec<(String, String)> {
        self.applied.lock().map(|applied| applied.clone()).unwrap_or_default()
    }
}

impl ContentTypeHandler for RecordingHandler {
    fn process_body(
        &self,
        raw: &str,
        visit: &mut dyn FnMut(&mut Value) -> PactResult<()>,
    ) -> PactResult<OptionalBody> {
        self.visits.fetch_add(1, Ordering::SeqCst);
        let mut document = Value::String(raw.to_string());
        visit(&mut document)?;
        Ok(OptionalBody::body(raw))
    }

    fn apply_key(&self, _document: &mut Value, key: &str, generator: &Generator) -> PactResult<()> {
        if let Ok(mut applied) = self.applied.lock() {
            applied.push((key.to_string(), generator.type_name().to_string()));
        }
        Ok(())
    }
}
