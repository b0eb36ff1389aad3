//! Value generators.
//!
//! Built-in generators ignore the value they replace; custom generators
//! receive it and may derive the new value from it.

use crate::error::{PactError, PactResult};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Extension point for custom generators.
pub trait GenerateValue: fmt::Debug + Send + Sync {
    /// Produce a replacement for `base`, the value currently in place.
    fn generate(&self, base: Option<&Value>) -> Value;

    /// Name used in logs.
    fn name(&self) -> &str {
        "Custom"
    }
}

/// Random integer drawn uniformly from `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomIntGenerator {
    min: i64,
    max: i64,
}

impl RandomIntGenerator {
    /// Create a generator for `[min, max)`.
    ///
    /// # Errors
    ///
    /// Returns [`PactError::InvalidGenerator`] unless `max > min`.
    pub fn new(min: i64, max: i64) -> PactResult<Self> {
        if max <= min {
            return Err(PactError::invalid_generator(format!(
                "RandomInt max ({max}) must be greater than min ({min})"
            )));
        }
        Ok(Self { min, max })
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Draw a value.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> i64 {
        rng.gen_range(self.min..self.max)
    }
}

/// Random alphanumeric string of a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomStringGenerator {
    size: usize,
}

impl RandomStringGenerator {
    /// Length used when none is given.
    pub const DEFAULT_SIZE: usize = 20;

    /// Create a generator for strings of `size` characters.
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self { size }
    }

    /// Generated string length.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Draw a value.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> String {
        (0..self.size)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect()
    }
}

impl Default for RandomStringGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

/// Random v4 UUID in lowercase hyphenated form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UuidGenerator;

impl UuidGenerator {
    /// Draw a value.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> String {
        let mut bytes = [0u8; 16];
        rng.fill(&mut bytes);
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .hyphenated()
            .to_string()
    }
}

/// A value-synthesis rule attached to part of an interaction.
#[derive(Debug, Clone)]
pub enum Generator {
    /// Random integer in a half-open range
    RandomInt(RandomIntGenerator),
    /// Random alphanumeric string
    RandomString(RandomStringGenerator),
    /// Random UUID
    Uuid(UuidGenerator),
    /// User-supplied generator
    Custom(Arc<dyn GenerateValue>),
}

impl Generator {
    /// Random integer generator for `[min, max)`.
    ///
    /// # Errors
    ///
    /// Returns [`PactError::InvalidGenerator`] unless `max > min`.
    pub fn random_int(min: i64, max: i64) -> PactResult<Self> {
        RandomIntGenerator::new(min, max).map(Self::RandomInt)
    }

    /// Random string generator.
    #[must_use]
    pub const fn random_string(size: usize) -> Self {
        Self::RandomString(RandomStringGenerator::new(size))
    }

    /// UUID generator.
    #[must_use]
    pub const fn uuid() -> Self {
        Self::Uuid(UuidGenerator)
    }

    /// Wrap a custom generator.
    #[must_use]
    pub fn custom(generator: impl GenerateValue + 'static) -> Self {
        Self::Custom(Arc::new(generator))
    }

    /// Generator type name, as persisted in the `type` attribute.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::RandomInt(_) => "RandomInt",
            Self::RandomString(_) => "RandomString",
            Self::Uuid(_) => "Uuid",
            Self::Custom(custom) => custom.name(),
        }
    }

    /// Generate a replacement for `base` using the thread-local RNG.
    #[must_use]
    pub fn generate(&self, base: Option<&Value>) -> Value {
        self.generate_with(&mut rand::thread_rng(), base)
    }

    /// Generate a replacement for `base` using the given RNG.
    ///
    /// Custom generators bring their own randomness and ignore `rng`.
    pub fn generate_with<R: Rng>(&self, rng: &mut R, base: Option<&Value>) -> Value {
        match self {
            Self::RandomInt(generator) => Value::from(generator.generate_with(rng)),
            Self::RandomString(generator) => Value::String(generator.generate_with(rng)),
            Self::Uuid(generator) => Value::String(generator.generate_with(rng)),
            Self::Custom(custom) => custom.generate(base),
        }
    }

    /// Build a generator from its persisted JSON form, e.g.
    /// `{"type": "RandomInt", "min": 0, "max": 10}`.
    ///
    /// # Errors
    ///
    /// Returns [`PactError::InvalidGenerator`] for unknown types, wrongly
    /// typed attributes or out-of-range parameters.
    pub fn from_json(value: &Value) -> PactResult<Self> {
        let definition: GeneratorDefinition = serde_json::from_value(value.clone())
            .map_err(|e| PactError::invalid_generator(e.to_string()))?;
        definition.try_into()
    }

    /// Persisted JSON form. Custom generators have none.
    #[must_use]
    pub fn to_json(&self) -> Option<Value> {
        let definition = match self {
            Self::RandomInt(generator) => GeneratorDefinition::RandomInt {
                min: generator.min,
                max: generator.max,
            },
            Self::RandomString(generator) => GeneratorDefinition::RandomString {
                size: generator.size,
            },
            Self::Uuid(_) => GeneratorDefinition::Uuid,
            Self::Custom(_) => return None,
        };
        serde_json::to_value(definition).ok()
    }
}

impl PartialEq for Generator {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::RandomInt(a), Self::RandomInt(b)) => a == b,
            (Self::RandomString(a), Self::RandomString(b)) => a == b,
            (Self::Uuid(_), Self::Uuid(_)) => true,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<RandomIntGenerator> for Generator {
    fn from(generator: RandomIntGenerator) -> Self {
        Self::RandomInt(generator)
    }
}

impl From<RandomStringGenerator> for Generator {
    fn from(generator: RandomStringGenerator) -> Self {
        Self::RandomString(generator)
    }
}

impl From<UuidGenerator> for Generator {
    fn from(generator: UuidGenerator) -> Self {
        Self::Uuid(generator)
    }
}

const fn default_max() -> i64 {
    i32::MAX as i64
}

const fn default_size() -> usize {
    RandomStringGenerator::DEFAULT_SIZE
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
enum GeneratorDefinition {
    RandomInt {
        #[serde(default)]
        min: i64,
        #[serde(default = "default_max")]
        max: i64,
    },
    RandomString {
        #[serde(default = "default_size")]
        size: usize,
    },
    Uuid,
}

impl TryFrom<GeneratorDefinition> for Generator {
    type Error = PactError;

    fn try_from(definition: GeneratorDefinition) -> PactResult<Self> {
        match definition {
            GeneratorDefinition::RandomInt { min, max } => Self::random_int(min, max),
            GeneratorDefinition::RandomString { size } => Ok(Self::random_string(size)),
            GeneratorDefinition::Uuid => Ok(Self::uuid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[derive(Debug)]
    struct Doubler;

    impl GenerateValue for Doubler {
        fn generate(&self, base: Option<&Value>) -> Value {
            base.and_then(Value::as_i64).map_or(Value::Null, |n| json!(n * 2))
        }

        fn name(&self) -> &str {
            "Doubler"
        }
    }

    #[test]
    fn test_random_int_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let generator = Generator::random_int(5, 10).unwrap();

        for _ in 0..10_000 {
            let value = generator.generate_with(&mut rng, None).as_i64().unwrap();
            assert!((5..10).contains(&value));
        }
    }

    #[test]
    fn test_random_int_rejects_degenerate_range() {
        assert!(Generator::random_int(10, 10).unwrap_err().is_validation());
        assert!(RandomIntGenerator::new(10, 5).is_err());
        assert!(RandomIntGenerator::new(-1, 0).is_ok());
    }

    #[test]
    fn test_random_string_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let generator = Generator::random_string(8);
        let value = generator.generate_with(&mut rng, None);
        let s = value.as_str().unwrap();
        assert_eq!(s.len(), 8);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));

        let empty = Generator::random_string(0).generate(None);
        assert_eq!(empty, json!(""));
        assert_eq!(RandomStringGenerator::default().size(), 20);
    }

    #[test]
    fn test_uuid_format() {
        let value = Generator::uuid().generate(Some(&json!(1)));
        let parsed = uuid::Uuid::parse_str(value.as_str().unwrap()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_ne!(value, Generator::uuid().generate(None));
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let generator = Generator::uuid();
        let a = generator.generate_with(&mut StdRng::seed_from_u64(1), None);
        let b = generator.generate_with(&mut StdRng::seed_from_u64(1), None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_generator_receives_base() {
        let generator = Generator::custom(Doubler);
        assert_eq!(generator.generate(Some(&json!(21))), json!(42));
        assert_eq!(generator.type_name(), "Doubler");
        assert!(generator.to_json().is_none());
        assert_eq!(generator, generator.clone());
        assert_ne!(generator, Generator::custom(Doubler));
    }

    #[test]
    fn test_from_json() {
        let generator = Generator::from_json(&json!({"type": "RandomInt", "min": 1, "max": 3})).unwrap();
        assert_eq!(generator, Generator::random_int(1, 3).unwrap());

        let generator = Generator::from_json(&json!({"type": "RandomInt"})).unwrap();
        assert_eq!(generator, Generator::random_int(0, i64::from(i32::MAX)).unwrap());

        let generator = Generator::from_json(&json!({"type": "RandomString"})).unwrap();
        assert_eq!(generator, Generator::random_string(20));

        let generator = Generator::from_json(&json!({"type": "Uuid"})).unwrap();
        assert_eq!(generator, Generator::uuid());
    }

    #[test]
    fn test_from_json_rejects_invalid_definitions() {
        for bad in [
            json!({"type": "RandomInt", "min": 5, "max": 1}),
            json!({"type": "RandomString", "size": -1}),
            json!({"type": "Regex"}),
            json!({"min": 1}),
            json!("Uuid"),
        ] {
            let err = Generator::from_json(&bad).unwrap_err();
            assert!(matches!(err, PactError::InvalidGenerator(_)), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_to_json() {
        let generator = Generator::random_int(0, 100).unwrap();
        assert_eq!(
            generator.to_json(),
            Some(json!({"type": "RandomInt", "min": 0, "max": 100}))
        );
        assert_eq!(Generator::uuid().to_json(), Some(json!({"type": "Uuid"})));
    }
}
