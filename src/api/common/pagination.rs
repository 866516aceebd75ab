//
//  tonicpow
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for List Endpoints
//!
//! List endpoints take a page number, a page size and an optional sort, and
//! return one page of results. Page numbers are passed through to the API
//! unchanged; the client never follows pages on its own.
//!
//! # Overview
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`ListOptions`] | Page, page size and sort sent with a list request |
//! | [`SortOrder`] | Ascending or descending |
//! | [`PageResults`] | One page of results |
//!
//! # Sorting
//!
//! Each endpoint accepts a fixed set of sort fields (see
//! [`CAMPAIGN_SORT_FIELDS`], [`APP_SORT_FIELDS`], [`REFERRAL_SORT_FIELDS`]).
//! An unknown field fails locally with
//! [`Error::InvalidSortField`](super::Error::InvalidSortField). With no sort
//! field the request is sent as `sort_by=created_at&sort_order=desc`.
//!
//! # Example
//!
//! ```rust
//! use tonicpow::api::common::{ListOptions, PageResults, SortOrder};
//!
//! let options = ListOptions::new()
//!     .page(2)
//!     .per_page(25)
//!     .sort_by("balance")
//!     .sort_order(SortOrder::Asc);
//! assert_eq!(options.page, 2);
//!
//! let json = r#"{"campaigns":[{"id":1}],"current_page":2,"results":1,"results_per_page":25}"#;
//! let page: PageResults<serde_json::Value> = serde_json::from_str(json).unwrap();
//! assert_eq!(page.len(), 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Error, Result};

/// Sort fields accepted by campaign list endpoints.
pub const CAMPAIGN_SORT_FIELDS: &[&str] = &[
    "balance",
    "created_at",
    "links_created",
    "paid_clicks",
    "pay_per_click_rate",
];

/// Sort fields accepted by app list endpoints.
pub const APP_SORT_FIELDS: &[&str] = &["created_at", "name"];

/// Sort fields accepted by the referral list endpoint.
pub const REFERRAL_SORT_FIELDS: &[&str] = &["created_at", "referrals"];

/// Sort field used when none is given.
pub const DEFAULT_SORT_FIELD: &str = "created_at";

/// Direction of a sorted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Wire value (`asc` or `desc`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(Error::Validation(format!(
                "sort order {other} is not valid (expected asc or desc)"
            ))),
        }
    }
}

/// Page and sort parameters for a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Page number, passed through as `current_page`.
    pub page: u32,
    /// Page size, passed through as `results_per_page`.
    pub results_per_page: u32,
    /// Field to sort by. `None` or empty means the default sort.
    pub sort_by: Option<String>,
    /// Sort direction. Omitted from the query when `None`.
    pub sort_order: Option<SortOrder>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, results_per_page: u32) -> Self {
        self.results_per_page = results_per_page;
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// Validates the sort field against `allowed` and returns the query pairs.
    ///
    /// The field is compared case-insensitively but sent as given.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSortField`] if the field is not in `allowed`.
    pub fn query_pairs(&self, allowed: &[&str]) -> Result<Vec<(String, String)>> {
        let (sort_by, sort_order) = match self.sort_by.as_deref().map(str::trim) {
            Some(field) if !field.is_empty() => {
                let lowered = field.to_lowercase();
                if !allowed.contains(&lowered.as_str()) {
                    return Err(Error::InvalidSortField(field.to_string()));
                }
                (field.to_string(), self.sort_order)
            }
            _ => (DEFAULT_SORT_FIELD.to_string(), Some(SortOrder::Desc)),
        };

        let mut pairs = vec![
            ("current_page".to_string(), self.page.to_string()),
            ("results_per_page".to_string(), self.results_per_page.to_string()),
            ("sort_by".to_string(), sort_by),
        ];
        if let Some(order) = sort_order {
            pairs.push(("sort_order".to_string(), order.as_str().to_string()));
        }
        Ok(pairs)
    }
}

/// One page of results from a list endpoint.
///
/// The item array is named after the resource on the wire (`campaigns`,
/// `apps`, `links` or `referrals`); all of them land in `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResults<T> {
    /// Items in this page.
    #[serde(
        default = "Vec::new",
        alias = "campaigns",
        alias = "apps",
        alias = "links",
        alias = "referrals"
    )]
    pub items: Vec<T>,

    /// Page number echoed by the API.
    #[serde(default)]
    pub current_page: u32,

    /// Number of results reported by the API.
    #[serde(default)]
    pub results: u32,

    /// Page size echoed by the API.
    #[serde(default)]
    pub results_per_page: u32,
}

impl<T> PageResults<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for PageResults<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 0,
            results: 0,
            results_per_page: 0,
        }
    }
}

impl<T> IntoIterator for PageResults<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_empty_sort_defaults_to_created_at_desc() {
        let pairs = ListOptions::new().page(1).per_page(10).query_pairs(CAMPAIGN_SORT_FIELDS).unwrap();
        assert_eq!(lookup(&pairs, "sort_by"), Some("created_at"));
        assert_eq!(lookup(&pairs, "sort_order"), Some("desc"));
        assert_eq!(lookup(&pairs, "current_page"), Some("1"));
        assert_eq!(lookup(&pairs, "results_per_page"), Some("10"));

        let blank = ListOptions::new().sort_by("  ").query_pairs(APP_SORT_FIELDS).unwrap();
        assert_eq!(lookup(&blank, "sort_by"), Some("created_at"));
    }

    #[test]
    fn test_sort_field_is_case_insensitive() {
        let pairs = ListOptions::new()
            .sort_by("Balance")
            .sort_order(SortOrder::Asc)
            .query_pairs(CAMPAIGN_SORT_FIELDS)
            .unwrap();
        assert_eq!(lookup(&pairs, "sort_by"), Some("Balance"));
        assert_eq!(lookup(&pairs, "sort_order"), Some("asc"));
    }

    #[test]
    fn test_sort_order_omitted_when_unset() {
        let pairs = ListOptions::new().sort_by("name").query_pairs(APP_SORT_FIELDS).unwrap();
        assert_eq!(lookup(&pairs, "sort_order"), None);
    }

    #[test]
    fn test_unknown_sort_field_rejected() {
        let err = ListOptions::new()
            .sort_by("bad_field")
            .query_pairs(CAMPAIGN_SORT_FIELDS)
            .unwrap_err();
        assert_eq!(err.to_string(), "sort by bad_field is not valid");

        // Allow-lists are per resource
        assert!(ListOptions::new().sort_by("balance").query_pairs(APP_SORT_FIELDS).is_err());
        assert!(ListOptions::new().sort_by("referrals").query_pairs(REFERRAL_SORT_FIELDS).is_ok());
    }

    #[test]
    fn test_page_results_aliases() {
        for key in ["campaigns", "apps", "links", "referrals", "items"] {
            let json = format!(r#"{{"{key}":[1,2,3],"current_page":1,"results":3,"results_per_page":10}}"#);
            let page: PageResults<u32> = serde_json::from_str(&json).unwrap();
            assert_eq!(page.items, vec![1, 2, 3]);
        }

        let empty: PageResults<u32> = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
