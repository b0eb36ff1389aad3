//! Pact interaction model with dynamic value generators.
//!
//! Generators replace example values in a recorded interaction (method,
//! path, headers, query, body, status) with synthesized ones while keeping
//! the example's structure. Body generators are keyed by path expressions
//! and applied through a per-content-type handler.
//!
//! ```
//! use pact_model::{Category, ContentType, ContentTypeHandlers, Generator, Generators, OptionalBody};
//!
//! let mut generators = Generators::new();
//! generators.add_generator(Category::Body, "$.id", Generator::uuid());
//!
//! let body = OptionalBody::body(r#"{"id": 1, "name": "x"}"#);
//! let generated = generators
//!     .apply_body_generators(&body, &ContentType::json(), &ContentTypeHandlers::default())
//!     .unwrap();
//! assert_ne!(generated, body);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod body;
pub mod content_type;
pub mod error;
pub mod generators;
pub mod interaction;
pub mod path;
pub mod tracing_config;

pub use body::{BodyState, OptionalBody};
pub use content_type::ContentType;
pub use error::{PactError, PactResult};
pub use generators::{
    Category, ContentTypeHandler, ContentTypeHandlers, GenerateValue, Generator, Generators,
    JsonContentTypeHandler, RandomIntGenerator, RandomStringGenerator, UuidGenerator,
};
pub use interaction::{Request, Response};
pub use path::{parse_path, PathExpression, PathToken};
pub use tracing_config::{init_tracing, TracingConfig};
