use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        (page, per_page)
    }
}

/// Query state for a back-office list: status facet, free-text search and
/// pagination, rendered as query-string pairs.
#[derive(Debug, Clone, Default)]
pub struct WorkflowQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub pagination: Pagination,
}

impl WorkflowQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let (page, per_page) = self.pagination.normalize();
        let mut pairs = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(status) = self.status.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("status", status.clone()));
        }
        if let Some(q) = self.search.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("q", q.clone()));
        }
        pairs
    }
}

/// One page of a back-office list plus the counts-by-status facets the
/// screens render as clickable filters.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowPage<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub counts: BTreeMap<String, i64>,
}

/// Body of a moderation action: target status plus an optional free-text
/// reason shown to the affected party.
#[derive(Debug, Clone, Serialize)]
pub struct ModerationRequest {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCase {
    pub id: String,
    pub order_id: String,
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub id: String,
    pub vendor_id: String,
    pub amount: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductApproval {
    pub id: String,
    pub product_name: String,
    pub vendor_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_skip_empty_filters() {
        let query = WorkflowQuery {
            status: Some(String::new()),
            search: Some("acme".into()),
            pagination: Pagination {
                page: Some(0),
                per_page: Some(500),
            },
        };
        let pairs = query.to_query_pairs();
        assert!(pairs.contains(&("page", "1".to_string())));
        assert!(pairs.contains(&("per_page", "100".to_string())));
        assert!(pairs.contains(&("q", "acme".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "status"));
    }
}
