//! Query-string construction for the items endpoint.
//!
//! Qiita filters through a single `query` parameter holding a small search
//! language: space-separated clauses such as `created:>=2023-01-01` or
//! `tag:Ruby,Rails`. This module translates [`FetchParams`] into that
//! language and into the final form-encoded query string.

use url::form_urlencoded;

use crate::params::FetchParams;

/// Date format used in `created:` clauses.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Builds the composite search expression, or `None` when no clause applies.
///
/// Clause order is fixed: free-text query, `created:>=`, `created:<=`,
/// `tag:`. An empty tag list contributes nothing.
pub fn search_expression(params: &FetchParams) -> Option<String> {
    let mut clauses = Vec::new();

    if let Some(query) = params.query.as_deref().filter(|q| !q.is_empty()) {
        clauses.push(query.to_string());
    }
    if let Some(from) = params.created_from {
        clauses.push(format!("created:>={}", from.format(DATE_FORMAT)));
    }
    if let Some(to) = params.created_to {
        clauses.push(format!("created:<={}", to.format(DATE_FORMAT)));
    }
    if let Some(tags) = params.tags.as_ref().filter(|t| !t.is_empty()) {
        clauses.push(format!("tag:{}", tags.join(",")));
    }

    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(" "))
    }
}

/// Builds the form-encoded query string (without a leading `?`).
///
/// Returns an empty string when no parameter is set.
pub fn build_query_string(params: &FetchParams) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if let Some(page) = params.page {
        serializer.append_pair("page", &page.to_string());
    }
    if let Some(per_page) = params.per_page {
        serializer.append_pair("per_page", &per_page.to_string());
    }
    if let Some(expression) = search_expression(params) {
        serializer.append_pair("query", &expression);
    }

    serializer.finish()
}

/// Appends the query string to the items endpoint URL.
///
/// No `?` is added when there is nothing to send.
pub fn build_items_url(items_url: &str, params: &FetchParams) -> String {
    let query = build_query_string(params);
    if query.is_empty() {
        items_url.to_string()
    } else {
        format!("{items_url}?{query}")
    }
}
