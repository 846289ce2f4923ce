use super::file::DeferredUpload;
use crate::error::{Error, ErrorType, Result};
use hashbrown::{hash_map, HashMap};
use serde::Serialize;
use serde_json::{Map, Value};

/// A single runtime argument value passed to a resolver.
///
/// Plain input values, including `null`, are kept as JSON. Files are deferred until the upload
/// middleware resolves them and puts the handler's output `T` in their place.
#[derive(Debug)]
pub enum ArgumentValue<T> {
    Value(Value),
    Upload(DeferredUpload),
    List(Vec<ArgumentValue<T>>),
    Processed(T),
}

impl<T> ArgumentValue<T> {
    /// Returns the plain JSON value, if this isn't an upload.
    pub fn value(&self) -> Option<&Value> {
        match self {
            ArgumentValue::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the handler's output, if this was an upload that has been processed.
    pub fn processed(&self) -> Option<&T> {
        match self {
            ArgumentValue::Processed(processed) => Some(processed),
            _ => None,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, ArgumentValue::Value(Value::Null))
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            ArgumentValue::Value(Value::Null) => "null",
            ArgumentValue::Value(Value::Bool(_)) => "a boolean",
            ArgumentValue::Value(Value::Number(_)) => "a number",
            ArgumentValue::Value(Value::String(_)) => "a string",
            ArgumentValue::Value(Value::Array(_)) => "a list",
            ArgumentValue::Value(Value::Object(_)) => "an object",
            ArgumentValue::Upload(_) => "an upload",
            ArgumentValue::List(_) => "a list",
            ArgumentValue::Processed(_) => "a processed upload",
        }
    }
}

impl<T: Serialize> ArgumentValue<T> {
    /// Converts the value back into JSON, serializing processed uploads.
    pub fn into_json(self) -> Result<Value> {
        match self {
            ArgumentValue::Value(value) => Ok(value),
            ArgumentValue::Processed(processed) => serde_json::to_value(processed)
                .map_err(|error| Error::new(error.to_string(), Some(ErrorType::Upload))),
            ArgumentValue::List(items) => items
                .into_iter()
                .map(ArgumentValue::into_json)
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            ArgumentValue::Upload(_) => Err(Error::new(
                "Upload was never resolved.",
                Some(ErrorType::Upload),
            )),
        }
    }
}

impl<T> From<Value> for ArgumentValue<T> {
    #[inline]
    fn from(value: Value) -> Self {
        ArgumentValue::Value(value)
    }
}

impl<T> From<DeferredUpload> for ArgumentValue<T> {
    #[inline]
    fn from(upload: DeferredUpload) -> Self {
        ArgumentValue::Upload(upload)
    }
}

/// The argument bag of one resolver invocation, keyed by argument name.
///
/// A name that isn't present in the bag was not passed at all, which GraphQL distinguishes from
/// an explicit `null`.
#[derive(Debug)]
pub struct Arguments<T>(HashMap<String, ArgumentValue<T>>);

impl<T> Arguments<T> {
    pub fn new() -> Self {
        Arguments(HashMap::new())
    }

    /// Builds a bag from plain JSON input values.
    pub fn from_json(values: Map<String, Value>) -> Self {
        values
            .into_iter()
            .map(|(name, value)| (name, ArgumentValue::Value(value)))
            .collect()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&ArgumentValue<T>> {
        self.0.get(name)
    }

    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Sets an argument's value and returns the value it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ArgumentValue<T>>,
    ) -> Option<ArgumentValue<T>> {
        self.0.insert(name.into(), value.into())
    }

    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<ArgumentValue<T>> {
        self.0.remove(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgumentValue<T>)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<T: Serialize> Arguments<T> {
    /// Converts the bag into a JSON object.
    ///
    /// This fails if an upload is left that the middleware hasn't processed.
    pub fn into_json(self) -> Result<Map<String, Value>> {
        self.0
            .into_iter()
            .map(|(name, value)| match value.into_json() {
                Ok(value) => Ok((name, value)),
                Err(error) => Err(Error::new(
                    format!("Argument `{}`: {}", name, error.message()),
                    Some(error.error_type()),
                )),
            })
            .collect()
    }
}

impl<T> Default for Arguments<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Into<String>> FromIterator<(K, ArgumentValue<T>)> for Arguments<T> {
    fn from_iter<I: IntoIterator<Item = (K, ArgumentValue<T>)>>(iter: I) -> Self {
        Arguments(iter.into_iter().map(|(name, value)| (name.into(), value)).collect())
    }
}

impl<T, K: Into<String>> Extend<(K, ArgumentValue<T>)> for Arguments<T> {
    fn extend<I: IntoIterator<Item = (K, ArgumentValue<T>)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(name, value)| (name.into(), value)))
    }
}

impl<T> IntoIterator for Arguments<T> {
    type Item = (String, ArgumentValue<T>);
    type IntoIter = hash_map::IntoIter<String, ArgumentValue<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
