//! Shared proptest strategies for the pact model types.

use pact_model::{Category, ContentType, Generator, OptionalBody};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Generate any generator category.
pub fn category_strategy() -> impl Strategy<Value = Category> {
    proptest::sample::select(Category::ALL.to_vec())
}

/// Generate valid built-in generators.
pub fn generator_strategy() -> impl Strategy<Value = Generator> {
    prop_oneof![
        (-1000i64..1000, 1i64..1000)
            .prop_filter_map("max must exceed min", |(min, width)| {
                Generator::random_int(min, min + width).ok()
            }),
        (0usize..64).prop_map(Generator::random_string),
        Just(Generator::uuid()),
    ]
}

/// Generate `(min, max)` pairs with `max <= min`.
pub fn degenerate_range_strategy() -> impl Strategy<Value = (i64, i64)> {
    (-1000i64..1000, 0i64..100).prop_map(|(min, below)| (min, min - below))
}

/// Generate header names.
pub fn header_name_strategy() -> impl Strategy<Value = String> {
    "X-[A-Z][a-z]{2,10}"
}

/// Generate JSON object keys that are valid in dotted path expressions.
pub fn json_key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}"
}

/// Generate JSON scalar values.
pub fn json_scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
    ]
}

/// Generate flat JSON objects with 1 to 8 scalar fields.
pub fn json_object_strategy() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::btree_map(json_key_strategy(), json_scalar_strategy(), 1..8)
        .prop_map(|fields| fields.into_iter().collect())
}

/// Generate content types that are neither JSON nor XML.
pub fn unstructured_content_type_strategy() -> impl Strategy<Value = ContentType> {
    prop_oneof![
        Just("text/plain"),
        Just("text/html; charset=utf-8"),
        Just("application/octet-stream"),
        Just("application/x-www-form-urlencoded"),
        Just("multipart/form-data"),
    ]
    .prop_map(ContentType::new)
}

/// Generate content types of any kind, including JSON and XML flavours.
pub fn content_type_strategy() -> impl Strategy<Value = ContentType> {
    prop_oneof![
        unstructured_content_type_strategy(),
        Just(ContentType::json()),
        Just(ContentType::new("application/vnd.api+json")),
        Just(ContentType::new("application/xml")),
    ]
}

/// Generate bodies without content.
pub fn absent_body_strategy() -> impl Strategy<Value = OptionalBody> {
    prop_oneof![
        Just(OptionalBody::empty()),
        Just(OptionalBody::missing()),
        Just(OptionalBody::null()),
    ]
}
