//! # List Parameters
//!
//! The page/limit/search/sort/filter bag governing a collection view, plus
//! the minimal query-string codec.
//!
//! ## Codec Semantics
//!
//! - A key is emitted only when its value is non-empty and differs from the
//!   caller-supplied defaults; the encoding is the minimal non-empty subset
//! - Emission order is deterministic: page, limit, search, sortBy,
//!   sortOrder, then filters in key order
//! - Decoding merges over the same defaults; unrecognized keys are kept
//!   verbatim as filter entries
//! - Malformed numeric values fall back to the default instead of erroring

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default page size when the caller supplies none
pub const DEFAULT_LIMIT: u32 = 20;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),
}

/// Sort direction for a collection view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ParamsError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Parameters of one collection view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// 1-based page number
    pub page: u32,

    /// Page size, always > 0
    pub limit: u32,

    /// Server-side search term; empty means no search
    pub search: String,

    /// Sort field; empty means service default ordering
    pub sort_by: String,

    pub sort_order: SortOrder,

    /// Free-form filter entries, including unrecognized query keys
    pub filters: BTreeMap<String, String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            search: String::new(),
            sort_by: String::new(),
            sort_order: SortOrder::Asc,
            filters: BTreeMap::new(),
        }
    }
}

/// Partial update to [`ListParams`]; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct ParamsPatch {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,

    /// Filters to set (key -> value)
    pub set_filters: BTreeMap<String, String>,

    /// Filter keys to remove
    pub remove_filters: Vec<String>,
}

impl ParamsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.max(1));
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort(mut self, key: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(key.into());
        self.sort_order = Some(order);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_filters.insert(key.into(), value.into());
        self
    }

    pub fn remove_filter(mut self, key: impl Into<String>) -> Self {
        self.remove_filters.push(key.into());
        self
    }
}

impl ListParams {
    /// Apply a partial update in place
    pub fn apply(&mut self, patch: &ParamsPatch) {
        if let Some(page) = patch.page {
            self.page = page.max(1);
        }
        if let Some(limit) = patch.limit {
            self.limit = limit.max(1);
        }
        if let Some(search) = &patch.search {
            self.search = search.clone();
        }
        if let Some(sort_by) = &patch.sort_by {
            self.sort_by = sort_by.clone();
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
        for (key, value) in &patch.set_filters {
            if value.is_empty() {
                self.filters.remove(key);
            } else {
                self.filters.insert(key.clone(), value.clone());
            }
        }
        for key in &patch.remove_filters {
            self.filters.remove(key);
        }
    }

    /// Encode as the minimal canonical query string (no leading `?`).
    ///
    /// Only values that are non-empty and differ from `defaults` are
    /// emitted, so re-reading an encoded state and re-encoding it is
    /// idempotent.
    pub fn to_query_string(&self, defaults: &ListParams) -> String {
        let mut pairs: Vec<(String, String)> = Vec::new();

        if self.page != defaults.page {
            pairs.push(("page".to_string(), self.page.to_string()));
        }
        if self.limit != defaults.limit {
            pairs.push(("limit".to_string(), self.limit.to_string()));
        }
        if !self.search.is_empty() && self.search != defaults.search {
            pairs.push(("search".to_string(), self.search.clone()));
        }
        if !self.sort_by.is_empty() && self.sort_by != defaults.sort_by {
            pairs.push(("sortBy".to_string(), self.sort_by.clone()));
        }
        if self.sort_order != defaults.sort_order {
            pairs.push(("sortOrder".to_string(), self.sort_order.to_string()));
        }
        for (key, value) in &self.filters {
            if value.is_empty() {
                continue;
            }
            if defaults.filters.get(key) == Some(value) {
                continue;
            }
            pairs.push((key.clone(), value.clone()));
        }

        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Decode a query string, merging over `defaults`.
    ///
    /// Unrecognized keys are preserved verbatim as filter entries so newer
    /// producers can add keys without breaking older consumers.
    pub fn from_query_string(query: &str, defaults: &ListParams) -> ListParams {
        let mut params = defaults.clone();

        for pair in query.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (raw_key, raw_value) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, ""),
            };
            let key = percent_decode(raw_key);
            let value = percent_decode(raw_value);
            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                "page" => {
                    params.page = value.parse::<u32>().map(|p| p.max(1)).unwrap_or(defaults.page)
                }
                "limit" => {
                    params.limit = value
                        .parse::<u32>()
                        .ok()
                        .filter(|l| *l > 0)
                        .unwrap_or(defaults.limit)
                }
                "search" => params.search = value,
                "sortBy" => params.sort_by = value,
                "sortOrder" => {
                    params.sort_order = value.parse().unwrap_or(defaults.sort_order);
                }
                _ => {
                    params.filters.insert(key, value);
                }
            }
        }

        params
    }
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{:02X}", byte));
            }
        }
    }
    out
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        // Malformed escape, keep it literally
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
