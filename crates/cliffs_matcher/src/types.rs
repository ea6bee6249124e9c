//! Type registry and argument coercion.
//!
//! Typed parameters (`<n: int>`) coerce their token through a named
//! function. Every matcher owns its own registry, pre-populated with the
//! built-in types `str`, `int`, `float` and `bool`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use cliffs_foundation::{Error, Value};
use thiserror::Error;

/// A coercion function turning a raw token into a value.
pub type Coercion = Arc<dyn Fn(&str) -> Result<Value, CoercionError> + Send + Sync>;

/// A coercion function's rejection of a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CoercionError {
    /// Why the token was rejected.
    pub message: String,
}

impl CoercionError {
    /// Creates a rejection with the given explanation.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Why an argument could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgError {
    /// The type name was never registered.
    #[error(transparent)]
    UndefinedType(#[from] Error),
    /// The type's coercion rejected the token.
    #[error(transparent)]
    Rejected(#[from] CoercionError),
}

/// Named coercion functions.
#[derive(Clone)]
pub struct TypeRegistry {
    types: HashMap<String, Coercion>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("str", |raw| Ok(Value::from(raw)));
        registry.register("int", parse_int);
        registry.register("float", parse_float);
        registry.register("bool", |raw| loose_bool(raw).map(Value::Bool));
        registry
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl TypeRegistry {
    /// Creates a registry without any types, not even the built-ins.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Registers a type, replacing any previous type with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, coercion: F)
    where
        F: Fn(&str) -> Result<Value, CoercionError> + Send + Sync + 'static,
    {
        self.types.insert(name.into(), Arc::new(coercion));
    }

    /// Returns true if a type with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the registered type names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Coerces a raw token with the named type.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::UndefinedType`] if no such type is registered and
    /// [`ArgError::Rejected`] if the coercion rejects the token.
    pub fn coerce(&self, typename: &str, raw: &str) -> Result<Value, ArgError> {
        let coercion = self
            .types
            .get(typename)
            .ok_or_else(|| Error::undefined_type(typename))?;
        Ok(coercion(raw)?)
    }
}

fn parse_int(raw: &str) -> Result<Value, CoercionError> {
    raw.trim()
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|e| CoercionError::new(format!("invalid integer {raw:?}: {e}")))
}

fn parse_float(raw: &str) -> Result<Value, CoercionError> {
    raw.trim()
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|e| CoercionError::new(format!("invalid number {raw:?}: {e}")))
}

const TRUE_WORDS: [&str; 8] = ["y", "yes", "t", "true", "do", "ok", "sure", "alright"];
const FALSE_WORDS: [&str; 5] = ["n", "no", "f", "false", "dont"];

/// Interprets a string as a boolean, leniently.
///
/// Numbers are true when non-zero. Otherwise the trimmed, lowercased text
/// must be one of `y yes t true do ok sure alright` or `n no f false dont`.
///
/// # Errors
///
/// Returns an error for anything else.
pub fn loose_bool(raw: &str) -> Result<bool, CoercionError> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<f64>() {
        return Ok(n != 0.0);
    }

    let lower = trimmed.to_lowercase();
    if TRUE_WORDS.contains(&lower.as_str()) {
        Ok(true)
    } else if FALSE_WORDS.contains(&lower.as_str()) {
        Ok(false)
    } else {
        Err(CoercionError::new(format!(
            "cannot interpret {raw:?} as a boolean"
        )))
    }
}
