//! Paging and sorting request fields shared by search endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sort direction for paged queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Base paging fields embedded (flattened) into search request DTOs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageRequest {
    /// Zero-based page index.
    #[serde(default)]
    pub page: usize,
    /// Page size; requests with `size == 0` are rejected at validation.
    #[serde(default = "default_page_size")]
    pub size: usize,
    /// Field name to sort by; no sorting when absent.
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

fn default_page_size() -> usize {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
            sort_by: None,
            sort_direction: SortDirection::Asc,
        }
    }
}

impl PageRequest {
    /// Total number of pages for `total` matching elements.
    pub fn total_pages(&self, total: usize) -> usize {
        if self.size == 0 {
            0
        } else {
            total.div_ceil(self.size)
        }
    }

    /// Index of the first element on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_on_empty_body() {
        let req: PageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, 10);
        assert!(req.sort_by.is_none());
        assert_eq!(req.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn sort_direction_uses_uppercase_wire_form() {
        let req: PageRequest =
            serde_json::from_str(r#"{"sort_by": "price", "sort_direction": "DESC"}"#).unwrap();
        assert_eq!(req.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn total_pages_rounds_up() {
        let req = PageRequest {
            size: 10,
            ..Default::default()
        };
        assert_eq!(req.total_pages(0), 0);
        assert_eq!(req.total_pages(10), 1);
        assert_eq!(req.total_pages(11), 2);
        assert_eq!(req.total_pages(95), 10);
    }

    #[test]
    fn offset_from_page_and_size() {
        let req = PageRequest {
            page: 3,
            size: 25,
            ..Default::default()
        };
        assert_eq!(req.offset(), 75);
    }
}
