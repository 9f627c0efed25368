//! Query string construction
//!
//! Parameters keep their insertion order and `None` values are dropped, so
//! the same inputs always produce the same string.

use chrono::{DateTime, SecondsFormat, Utc};

/// A value that can appear in a query string
pub trait QueryValue {
    /// Encoded form, or `None` to omit the parameter
    fn to_query_value(&self) -> Option<String>;
}

impl QueryValue for str {
    fn to_query_value(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl QueryValue for String {
    fn to_query_value(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl QueryValue for bool {
    fn to_query_value(&self) -> Option<String> {
        Some(if *self { "true" } else { "false" }.to_string())
    }
}

macro_rules! impl_query_value_display {
    ($($ty:ty),*) => {
        $(impl QueryValue for $ty {
            fn to_query_value(&self) -> Option<String> {
                Some(self.to_string())
            }
        })*
    };
}

impl_query_value_display!(i32, i64, u32, u64, usize, f64);

impl QueryValue for DateTime<Utc> {
    fn to_query_value(&self) -> Option<String> {
        Some(self.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl<T: QueryValue> QueryValue for Option<T> {
    fn to_query_value(&self) -> Option<String> {
        self.as_ref().and_then(QueryValue::to_query_value)
    }
}

/// Lists are sent comma separated; an empty list is omitted
impl<T: QueryValue> QueryValue for [T] {
    fn to_query_value(&self) -> Option<String> {
        let parts: Vec<String> = self.iter().filter_map(QueryValue::to_query_value).collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(","))
        }
    }
}

impl<T: QueryValue> QueryValue for Vec<T> {
    fn to_query_value(&self) -> Option<String> {
        self.as_slice().to_query_value()
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn to_query_value(&self) -> Option<String> {
        (**self).to_query_value()
    }
}

/// Ordered query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, Option<String>)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter; `None` values are kept in order but never emitted
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl QueryValue) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl QueryValue) {
        self.params.push((key.into(), value.to_query_value()));
    }

    /// True when no parameter would be emitted
    pub fn is_empty(&self) -> bool {
        self.params.iter().all(|(_, v)| v.is_none())
    }

    /// `""` when empty, otherwise `?` followed by urlencoded pairs
    pub fn build(&self) -> String {
        build_query(self.params.iter().map(|(k, v)| (k.as_str(), v.as_deref())))
    }
}

impl<K: Into<String>, V: QueryValue> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (key, value) in iter {
            query.push(key, value);
        }
        query
    }
}

/// Build a query string from ordered key/value pairs, skipping `None` values
pub fn build_query<'a>(params: impl IntoIterator<Item = (&'a str, Option<&'a str>)>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in params {
        if let Some(value) = value {
            serializer.append_pair(key, value);
            any = true;
        }
    }
    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}
