//! Test fixtures with sample data.

use pact_model::{Category, Generator, Generators, OptionalBody, Request, Response};
use serde_json::{json, Map, Value};

/// The flat body used throughout the generator tests: `{"id":1,"name":"x"}`.
#[must_use]
pub fn sample_json_body() -> OptionalBody {
    OptionalBody::body(r#"{"id":1,"name":"x"}"#)
}

/// A nested order body with an array of line items.
#[must_use]
pub fn sample_order_body() -> OptionalBody {
    OptionalBody::body(
        r#"{"order":{"id":1001,"customer":"alice"},"items":[{"sku":"A1","qty":1},{"sku":"B2","qty":3}],"total":42}"#,
    )
}

/// A persisted `generators` block covering every category.
#[must_use]
pub fn sample_generators_map() -> Map<String, Value> {
    let value = json!({
        "method": {"type": "RandomString", "size": 3},
        "path": {"type": "RandomString", "size": 10},
        "header": {"X-Request-Id": {"type": "Uuid"}},
        "query": {"page": {"type": "RandomInt", "min": 1, "max": 100}},
        "body": {
            "$.order.id": {"type": "RandomInt", "min": 1, "max": 100000},
            "$.items[*].sku": {"type": "RandomString", "size": 6}
        },
        "status": {"type": "RandomInt", "min": 200, "max": 204}
    });
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Body generators for [`sample_order_body`].
#[must_use]
pub fn sample_order_generators() -> Generators {
    let mut generators = Generators::new();
    generators
        .add_generator(Category::Body, "$.order.id", Generator::uuid())
        .add_generator(Category::Body, "$.items[*].sku", Generator::random_string(6));
    generators
}

/// A JSON order request with header, query and body generators.
#[must_use]
pub fn sample_request() -> Request {
    let mut generators = sample_order_generators();
    generators
        .add_generator(Category::Header, "X-Request-Id", Generator::uuid())
        .add_generator(Category::Query, "page", Generator::random_string(4));

    Request::new("POST", "/orders")
        .with_query("page", "1")
        .with_header("Content-Type", "application/json")
        .with_body(sample_order_body())
        .with_generators(generators)
}

/// A JSON order response with status and body generators.
#[must_use]
pub fn sample_response() -> Response {
    let mut generators = sample_order_generators();
    if let Ok(status) = Generator::random_int(200, 202) {
        generators.add_category_generator(Category::Status, status);
    }

    Response::new(201)
        .with_header("Content-Type", "application/json; charset=utf-8")
        .with_body(sample_order_body())
        .with_generators(generators)
}
