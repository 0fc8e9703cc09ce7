//! API parameter filters.
//!
//! Every SoftLayer call may carry an object id (the remote object the call
//! targets), an object mask (which relational properties to include), a result
//! limit and an object filter. [`ApiParameterFilter`] collects these and turns
//! them into URL query pairs for the REST transport.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: Display,
    {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Append using a mapping function when the value is present.
    pub fn push_opt_with<T, F>(&mut self, key: &'static str, value: Option<T>, mut map: F)
    where
        F: FnMut(T) -> String,
    {
        if let Some(value) = value {
            self.pairs.push((key, map(value)));
        }
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Offset/limit pair applied to list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLimit {
    /// Index of the first result
    pub offset: u32,
    /// Maximum number of results
    pub limit: u32,
}

/// Parameters that accompany a remote method call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiParameterFilter {
    /// Id of the remote object targeted by the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<Value>,

    /// Object mask, always in `mask[...]` form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_mask: Option<String>,

    /// Result limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_limit: Option<ResultLimit>,

    /// Object filter (a nested JSON object of operations)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_filter: Option<Value>,
}

impl ApiParameterFilter {
    /// Create an empty filter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            object_id: None,
            object_mask: None,
            result_limit: None,
            object_filter: None,
        }
    }

    /// Target a specific remote object.
    #[must_use]
    pub fn with_object_id(mut self, id: impl Into<Value>) -> Self {
        self.object_id = Some(id.into());
        self
    }

    /// Set the object mask. Bare property lists are wrapped in `mask[...]`.
    #[must_use]
    pub fn with_object_mask(mut self, mask: impl AsRef<str>) -> Self {
        self.object_mask = Some(normalize_mask(mask.as_ref()));
        self
    }

    /// Limit the number of results.
    #[must_use]
    pub const fn with_result_limit(mut self, offset: u32, limit: u32) -> Self {
        self.result_limit = Some(ResultLimit { offset, limit });
        self
    }

    /// Set the object filter.
    #[must_use]
    pub fn with_object_filter(mut self, filter: Value) -> Self {
        self.object_filter = Some(filter);
        self
    }

    /// Returns true if no parameter is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.object_id.is_none()
            && self.object_mask.is_none()
            && self.result_limit.is_none()
            && self.object_filter.is_none()
    }

    /// Combine two filters; fields set on `other` take precedence.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            object_id: other.object_id.clone().or_else(|| self.object_id.clone()),
            object_mask: other
                .object_mask
                .clone()
                .or_else(|| self.object_mask.clone()),
            result_limit: other.result_limit.or(self.result_limit),
            object_filter: other
                .object_filter
                .clone()
                .or_else(|| self.object_filter.clone()),
        }
    }

    /// Unescaped text of the id, if one is set; callers push it as a single path segment.
    #[must_use]
    pub fn object_id_segment(&self) -> Option<String> {
        self.object_id.as_ref().map(|id| match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Query pairs understood by the REST endpoint.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_opt("objectMask", self.object_mask.as_deref());
        params.push_opt_with("resultLimit", self.result_limit, |limit| {
            format!("{},{}", limit.offset, limit.limit)
        });
        params.push_opt("objectFilter", self.object_filter.as_ref());
        params.into_pairs()
    }
}

fn normalize_mask(mask: &str) -> String {
    let mask = mask.trim();
    if mask.starts_with("mask") || mask.starts_with("filteredMask") {
        mask.to_string()
    } else {
        format!("mask[{mask}]")
    }
}
