//! Requests and responses with generated values applied.

use crate::body::OptionalBody;
use crate::content_type::ContentType;
use crate::error::{PactError, PactResult};
use crate::generators::{Category, ContentTypeHandlers, Generators};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// HTTP request in an interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method
    pub method: String,
    /// Request path
    pub path: String,
    /// Query parameters, each with one or more values
    pub query: IndexMap<String, Vec<String>>,
    /// Request headers
    pub headers: IndexMap<String, String>,
    /// Request body
    pub body: OptionalBody,
    /// Value generators for this request
    pub generators: Generators,
}

/// HTTP response in an interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: IndexMap<String, String>,
    /// Response body
    pub body: OptionalBody,
    /// Value generators for this response
    pub generators: Generators,
}

impl Request {
    /// Create a request with no query, headers, body or generators.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: IndexMap::new(),
            headers: IndexMap::new(),
            body: OptionalBody::Missing,
            generators: Generators::new(),
        }
    }

    /// Add a query parameter value.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.entry(name.into()).or_default().push(value.into());
        self
    }

    /// Set a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<OptionalBody>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the generators.
    #[must_use]
    pub fn with_generators(mut self, generators: Generators) -> Self {
        self.generators = generators;
        self
    }

    /// Body content type, from the `Content-Type` header or detected from the body.
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        content_type(&self.headers, &self.body)
    }

    /// Copy of this request with every generator applied.
    ///
    /// # Errors
    ///
    /// Fails if the body cannot be parsed or a body key is not a valid path.
    pub fn generated_request(&self, handlers: &ContentTypeHandlers) -> PactResult<Self> {
        let mut request = self.clone();

        if let Some(generator) = self.generators.get(Category::Method, "") {
            let base = Value::String(self.method.clone());
            request.method = value_to_string(generator.generate(Some(&base)));
        }

        if let Some(generator) = self.generators.get(Category::Path, "") {
            let base = Value::String(self.path.clone());
            request.path = value_to_string(generator.generate(Some(&base)));
        }

        apply_header_generators(&self.generators, &mut request.headers);

        self.generators.apply_generator(Category::Query, |key, generator| {
            match request.query.get_mut(key) {
                Some(values) => {
                    for value in values.iter_mut() {
                        let base = Value::String(std::mem::take(value));
                        *value = value_to_string(generator.generate(Some(&base)));
                    }
                }
                None => debug!(key, "Query generator has no matching parameter"),
            }
        });

        request.body = self.generators.apply_body_generators(
            &self.body,
            &self.content_type(),
            handlers,
        )?;

        Ok(request)
    }
}

impl Response {
    /// Create a response with no headers, body or generators.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: IndexMap::new(),
            body: OptionalBody::Missing,
            generators: Generators::new(),
        }
    }

    /// Set a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<OptionalBody>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the generators.
    #[must_use]
    pub fn with_generators(mut self, generators: Generators) -> Self {
        self.generators = generators;
        self
    }

    /// Body content type, from the `Content-Type` header or detected from the body.
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        content_type(&self.headers, &self.body)
    }

    /// Copy of this response with every generator applied.
    ///
    /// # Errors
    ///
    /// Fails if a status generator yields something other than an integer
    /// in `100..=599`, the body cannot be parsed, or a body key is not a
    /// valid path.
    pub fn generated_response(&self, handlers: &ContentTypeHandlers) -> PactResult<Self> {
        let mut response = self.clone();

        if let Some(generator) = self.generators.get(Category::Status, "") {
            let generated = generator.generate(Some(&Value::from(self.status)));
            response.status = generated
                .as_u64()
                .and_then(|status| u16::try_from(status).ok())
                .filter(|status| (100..=599).contains(status))
                .ok_or_else(|| {
                    PactError::invalid_generated_value(
                        Category::Status.as_str(),
                        format!("{generated} is not an HTTP status code"),
                    )
                })?;
        }

        apply_header_generators(&self.generators, &mut response.headers);

        response.body = self.generators.apply_body_generators(
            &self.body,
            &self.content_type(),
            handlers,
        )?;

        Ok(response)
    }
}

fn apply_header_generators(generators: &Generators, headers: &mut IndexMap<String, String>) {
    generators.apply_generator(Category::Header, |key, generator| {
        if key.is_empty() {
            debug!("Header generator has no header name, skipping");
            return;
        }
        let base = headers.get(key).cloned().map(Value::String);
        let value = value_to_string(generator.generate(base.as_ref()));
        headers.insert(key.to_string(), value);
    });
}

fn content_type(headers: &IndexMap<String, String>, body: &OptionalBody) -> ContentType {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE_HEADER))
        .map_or_else(
            || ContentType::detect(body.value_or_empty()),
            |(_, value)| ContentType::new(value.as_str()),
        )
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::Generator;
    use serde_json::json;

    #[test]
    fn test_content_type_from_header() {
        let request = Request::new("POST", "/token")
            .with_header("content-type", "application/hal+json")
            .with_body("<xml/>");
        assert!(request.content_type().is_json());
    }

    #[test]
    fn test_content_type_detected() {
        let request = Request::new("POST", "/token").with_body("{\"a\": 1}");
        assert!(request.content_type().is_json());
        assert!(!Response::new(200).content_type().is_json());
    }

    #[test]
    fn test_generated_request() {
        let mut generators = Generators::new();
        generators
            .add_category_generator(Category::Path, Generator::random_string(6))
            .add_generator(Category::Header, "X-Request-Id", Generator::uuid())
            .add_generator(Category::Query, "page", Generator::random_int(1, 10).unwrap())
            .add_generator(Category::Query, "absent", Generator::uuid())
            .add_generator(Category::Body, "$.id", Generator::random_int(100, 200).unwrap());

        let request = Request::new("GET", "/users/1")
            .with_query("page", "1")
            .with_query("page", "2")
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"id": 1, "name": "x"}"#)
            .with_generators(generators);

        let generated = request.generated_request(&ContentTypeHandlers::default()).unwrap();

        assert_eq!(generated.method, "GET");
        assert_eq!(generated.path.len(), 6);
        assert!(uuid::Uuid::parse_str(&generated.headers["X-Request-Id"]).is_ok());
        for value in &generated.query["page"] {
            let page: i64 = value.parse().unwrap();
            assert!((1..10).contains(&page));
        }
        assert!(!generated.query.contains_key("absent"));

        let body: Value = serde_json::from_str(generated.body.value().unwrap()).unwrap();
        assert!((100..200).contains(&body["id"].as_i64().unwrap()));
        assert_eq!(body["name"], json!("x"));

        assert_eq!(request.path, "/users/1");
        assert_eq!(request.body.value(), Some(r#"{"id": 1, "name": "x"}"#));
    }

    #[test]
    fn test_header_generator_without_name_is_skipped() {
        let mut generators = Generators::new();
        generators
            .add_category_generator(Category::Header, Generator::uuid())
            .add_generator(Category::Header, "X-Id", Generator::random_string(5));
        let handlers = ContentTypeHandlers::default();

        let request = Request::new("GET", "/").with_generators(generators.clone());
        let generated = request.generated_request(&handlers).unwrap();
        assert_eq!(generated.headers.keys().collect::<Vec<_>>(), vec!["X-Id"]);

        let persisted = json!({"header": {"": {"type": "Uuid"}}});
        let response = Response::new(200)
            .with_generators(Generators::from_map(persisted.as_object()));
        let generated = response.generated_response(&handlers).unwrap();
        assert!(generated.headers.is_empty());
    }

    #[test]
    fn test_generated_response_status() {
        let mut generators = Generators::new();
        generators.add_category_generator(Category::Status, Generator::random_int(200, 300).unwrap());
        let response = Response::new(200).with_generators(generators);

        let generated = response.generated_response(&ContentTypeHandlers::default()).unwrap();
        assert!((200..300).contains(&generated.status));
    }

    #[test]
    fn test_generated_response_invalid_status() {
        let mut generators = Generators::new();
        generators.add_category_generator(Category::Status, Generator::random_string(3));
        let response = Response::new(200).with_generators(generators);

        let err = response
            .generated_response(&ContentTypeHandlers::default())
            .unwrap_err();
        assert!(matches!(err, PactError::InvalidGeneratedValue { .. }));
    }

    #[test]
    fn test_generated_response_without_generators() {
        let response = Response::new(204).with_header("X-Trace", "abc");
        let generated = response.generated_response(&ContentTypeHandlers::default()).unwrap();
        assert_eq!(generated, response);
    }
}
