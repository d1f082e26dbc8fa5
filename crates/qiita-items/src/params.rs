//! Tool parameter handling for item listings.
//!
//! Parameters arrive from schema-less remote callers, so handling is split
//! into two composable stages:
//!
//! 1. [`normalize`] is lenient. Coerces stringly-typed numbers, drops empty
//!    strings and nulls, ignores unknown keys. Never fails.
//! 2. [`validate`] is strict. Checks types and ranges and produces a typed
//!    [`FetchParams`], or one [`Error::Validation`] listing every violation.
//!
//! Leniency stops at stage 1: a value that survives normalization but has
//! the wrong shape is reported, not dropped.

use chrono::{DateTime, NaiveDate};
use qiita_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Smallest accepted `page` / `per_page` value.
pub const MIN_PAGE_VALUE: i64 = 1;

/// Largest accepted `page` / `per_page` value.
pub const MAX_PAGE_VALUE: i64 = 100;

// ============================================================================
// Types
// ============================================================================

/// Validated filter parameters for the items endpoint.
///
/// Every field is optional; absence means the filter is not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchParams {
    /// Page number, 1–100.
    pub page: Option<u32>,
    /// Items per page, 1–100.
    pub per_page: Option<u32>,
    /// Free-text search expression, prepended to the composite query.
    pub query: Option<String>,
    /// Lower bound on creation date (inclusive).
    pub created_from: Option<NaiveDate>,
    /// Upper bound on creation date (inclusive).
    pub created_to: Option<NaiveDate>,
    /// Tags to filter by, in caller order.
    pub tags: Option<Vec<String>>,
    /// Extra fields to project, possibly dotted (`"user.id"`).
    pub additional_fields: Option<Vec<String>>,
}

impl FetchParams {
    /// Creates empty parameters (no filters).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses raw tool arguments through both stages.
    pub fn from_args(args: &Map<String, Value>) -> Result<Self> {
        validate(normalize(args))
    }

    /// Sets the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Sets the free-text query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the lower creation-date bound.
    pub fn with_created_from(mut self, date: NaiveDate) -> Self {
        self.created_from = Some(date);
        self
    }

    /// Sets the upper creation-date bound.
    pub fn with_created_to(mut self, date: NaiveDate) -> Self {
        self.created_to = Some(date);
        self
    }

    /// Sets the tag filter.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the additional projected fields.
    pub fn with_additional_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Additional fields as a slice; empty when absent.
    pub fn additional_fields(&self) -> &[String] {
        self.additional_fields.as_deref().unwrap_or(&[])
    }

    /// Re-checks the numeric ranges of already-typed parameters.
    ///
    /// Parameters built in code bypass [`validate`], so the fetcher runs this
    /// before issuing a request.
    pub fn check(&self) -> Result<()> {
        let mut violations = Violations::default();
        for (field, value) in [("page", self.page), ("per_page", self.per_page)] {
            if let Some(n) = value {
                if let Err(reason) = check_range(i64::from(n)) {
                    violations.push(field, reason);
                }
            }
        }
        violations.into_result()
    }
}

/// Output of the lenient stage: values that still need strict checking.
///
/// Each field holds the caller's value after coercion, or `None` when the
/// caller omitted it (or supplied null / an empty string).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParams {
    /// `page`, numeric strings already coerced to numbers.
    pub page: Option<Value>,
    /// `per_page`, numeric strings already coerced to numbers.
    pub per_page: Option<Value>,
    /// `query`.
    pub query: Option<Value>,
    /// `created_from`, empty string removed.
    pub created_from: Option<Value>,
    /// `created_to`, empty string removed.
    pub created_to: Option<Value>,
    /// `tags`.
    pub tags: Option<Value>,
    /// `additional_fields`.
    pub additional_fields: Option<Value>,
}

// ============================================================================
// Stage 1: normalize
// ============================================================================

/// Leniently normalizes untyped tool arguments.
pub fn normalize(args: &Map<String, Value>) -> RawParams {
    RawParams {
        page: args.get("page").and_then(coerce_number),
        per_page: args.get("per_page").and_then(coerce_number),
        query: args.get("query").and_then(non_null),
        created_from: args.get("created_from").and_then(coerce_date),
        created_to: args.get("created_to").and_then(coerce_date),
        tags: args.get("tags").and_then(non_null),
        additional_fields: args.get("additional_fields").and_then(non_null),
    }
}

fn non_null(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        other => Some(other.clone()),
    }
}

/// Strings become numbers; empty or unparsable strings are dropped.
fn coerce_number(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            if let Ok(n) = s.parse::<i64>() {
                return Some(Value::from(n));
            }
            s.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
        }
        other => non_null(other),
    }
}

fn coerce_date(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        other => non_null(other),
    }
}

// ============================================================================
// Stage 2: validate
// ============================================================================

/// Strictly validates normalized parameters.
///
/// All violations are collected before failing, in field order.
pub fn validate(raw: RawParams) -> Result<FetchParams> {
    let mut violations = Violations::default();

    let page = violations.check("page", raw.page, bounded_int);
    let per_page = violations.check("per_page", raw.per_page, bounded_int);
    let query = violations.check("query", raw.query, string);
    let created_from = violations.check("created_from", raw.created_from, date);
    let created_to = violations.check("created_to", raw.created_to, date);
    let tags = violations.check("tags", raw.tags, string_list);
    let additional_fields = violations.check("additional_fields", raw.additional_fields, string_list);

    violations.into_result()?;

    Ok(FetchParams {
        page,
        per_page,
        query,
        created_from,
        created_to,
        tags,
        additional_fields,
    })
}

/// Ordered `"<field>: <reason>"` accumulator.
#[derive(Debug, Default)]
struct Violations(Vec<String>);

impl Violations {
    fn push(&mut self, field: &str, reason: &str) {
        self.0.push(format!("{field}: {reason}"));
    }

    fn check<T>(
        &mut self,
        field: &str,
        value: Option<Value>,
        parse: fn(&Value) -> std::result::Result<T, &'static str>,
    ) -> Option<T> {
        match parse(&value?) {
            Ok(parsed) => Some(parsed),
            Err(reason) => {
                self.push(field, reason);
                None
            }
        }
    }

    fn into_result(self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(self.0.join(", ")))
        }
    }
}

fn check_range(n: i64) -> std::result::Result<(), &'static str> {
    if n < MIN_PAGE_VALUE {
        Err("must be >= 1")
    } else if n > MAX_PAGE_VALUE {
        Err("must be <= 100")
    } else {
        Ok(())
    }
}

fn bounded_int(value: &Value) -> std::result::Result<u32, &'static str> {
    let Value::Number(number) = value else {
        return Err("must be a number");
    };
    let n = if let Some(n) = number.as_i64() {
        n
    } else if number.is_u64() {
        return Err("must be <= 100");
    } else {
        let f = number.as_f64().ok_or("must be a number")?;
        if f.fract() != 0.0 {
            return Err("must be an integer");
        }
        if f < MIN_PAGE_VALUE as f64 {
            return Err("must be >= 1");
        }
        if f > MAX_PAGE_VALUE as f64 {
            return Err("must be <= 100");
        }
        f as i64
    };
    check_range(n)?;
    u32::try_from(n).map_err(|_| "must be <= 100")
}

fn string(value: &Value) -> std::result::Result<String, &'static str> {
    value.as_str().map(str::to_string).ok_or("must be a string")
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 date-time.
///
/// A date-time keeps the calendar date of its own offset; it is not shifted
/// to UTC first.
fn date(value: &Value) -> std::result::Result<NaiveDate, &'static str> {
    let s = value.as_str().ok_or("must be a date string")?.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .map_err(|_| "must be a valid date (YYYY-MM-DD)")
}

fn string_list(value: &Value) -> std::result::Result<Vec<String>, &'static str> {
    const REASON: &str = "must be an array of strings";
    value
        .as_array()
        .ok_or(REASON)?
        .iter()
        .map(|v| v.as_str().map(str::to_string).ok_or(REASON))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn parse(value: Value) -> Result<FetchParams> {
        FetchParams::from_args(&args(value))
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -- normalize ----------------------------------------------------------

    #[test]
    fn test_normalize_coerces_numeric_strings() {
        let raw = normalize(&args(json!({"page": "2", "per_page": " 10 "})));
        assert_eq!(raw.page, Some(json!(2)));
        assert_eq!(raw.per_page, Some(json!(10)));
    }

    #[test]
    fn test_normalize_drops_empty_and_unparsable_numbers() {
        let raw = normalize(&args(json!({"page": "", "per_page": "ten"})));
        assert_eq!(raw.page, None);
        assert_eq!(raw.per_page, None);
    }

    #[test]
    fn test_normalize_keeps_fractional_string_for_strict_stage() {
        let raw = normalize(&args(json!({"page": "1.5"})));
        assert_eq!(raw.page, Some(json!(1.5)));
    }

    #[test]
    fn test_normalize_drops_empty_dates_and_nulls() {
        let raw = normalize(&args(json!({
            "created_from": "",
            "created_to": null,
            "tags": null
        })));
        assert_eq!(raw, RawParams::default());
    }

    #[test]
    fn test_normalize_ignores_unknown_keys() {
        let raw = normalize(&args(json!({"sort": "likes", "limit": 3})));
        assert_eq!(raw, RawParams::default());
    }

    // -- validate -----------------------------------------------------------

    #[test]
    fn test_empty_args_give_empty_params() {
        assert_eq!(parse(json!({})).unwrap(), FetchParams::default());
    }

    #[test]
    fn test_full_valid_args() {
        let params = parse(json!({
            "page": 2,
            "per_page": "10",
            "query": "rust",
            "created_from": "2023-01-01",
            "created_to": "2023-12-31",
            "tags": ["Ruby", "Rails"],
            "additional_fields": ["id", "user.id"]
        }))
        .unwrap();

        assert_eq!(
            params,
            FetchParams::new()
                .with_page(2)
                .with_per_page(10)
                .with_query("rust")
                .with_created_from(ymd(2023, 1, 1))
                .with_created_to(ymd(2023, 12, 31))
                .with_tags(["Ruby", "Rails"])
                .with_additional_fields(["id", "user.id"])
        );
    }

    #[test]
    fn test_page_below_range() {
        let err = parse(json!({"page": 0})).unwrap_err();
        assert_eq!(err.to_string(), "Invalid parameters: page: must be >= 1");
    }

    #[test]
    fn test_per_page_above_range() {
        let err = parse(json!({"per_page": 101})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameters: per_page: must be <= 100"
        );
    }

    #[test]
    fn test_fractional_page_rejected() {
        let err = parse(json!({"page": 1.5})).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid parameters"));
        assert!(msg.contains("page"));
        assert!(msg.contains("must be an integer"));
    }

    #[test]
    fn test_integral_float_accepted() {
        let params = parse(json!({"page": 3.0})).unwrap();
        assert_eq!(params.page, Some(3));
    }

    #[test]
    fn test_huge_page_rejected() {
        let err = parse(json!({"page": u64::MAX})).unwrap_err();
        assert!(err.to_string().contains("page: must be <= 100"));
    }

    #[test]
    fn test_non_numeric_page_type_rejected() {
        let err = parse(json!({"page": true})).unwrap_err();
        assert!(err.to_string().contains("page: must be a number"));
    }

    #[test]
    fn test_violations_aggregate_in_field_order() {
        let err = parse(json!({
            "tags": "Rust",
            "per_page": 0,
            "page": 101,
            "created_from": "yesterday"
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameters: page: must be <= 100, per_page: must be >= 1, \
             created_from: must be a valid date (YYYY-MM-DD), tags: must be an array of strings"
        );
    }

    #[test]
    fn test_tags_with_non_string_entry_rejected() {
        let err = parse(json!({"tags": ["Rust", 1]})).unwrap_err();
        assert!(err.to_string().contains("tags: must be an array of strings"));
    }

    #[test]
    fn test_empty_tags_preserved_as_empty() {
        let params = parse(json!({"tags": []})).unwrap();
        assert_eq!(params.tags, Some(vec![]));
    }

    #[test]
    fn test_rfc3339_date_keeps_its_own_calendar_day() {
        let params = parse(json!({
            "created_from": "2023-01-01T00:30:00+09:00",
            "created_to": "2023-12-31T23:59:59-05:00"
        }))
        .unwrap();
        assert_eq!(params.created_from, Some(ymd(2023, 1, 1)));
        assert_eq!(params.created_to, Some(ymd(2023, 12, 31)));
    }

    #[test]
    fn test_query_must_be_string() {
        let err = parse(json!({"query": 42})).unwrap_err();
        assert!(err.to_string().contains("query: must be a string"));
    }

    #[test]
    fn test_check_rejects_out_of_range_typed_params() {
        let err = FetchParams::new().with_page(0).with_per_page(500).check().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameters: page: must be >= 1, per_page: must be <= 100"
        );
        assert!(FetchParams::new().with_page(100).check().is_ok());
    }

    #[test]
    fn test_additional_fields_accessor() {
        assert!(FetchParams::new().additional_fields().is_empty());
        let params = FetchParams::new().with_additional_fields(["id"]);
        assert_eq!(params.additional_fields(), ["id".to_string()]);
    }

    proptest! {
        #[test]
        fn prop_in_range_pages_accepted(n in 1i64..=100) {
            let params = parse(json!({"page": n, "per_page": n.to_string()})).unwrap();
            prop_assert_eq!(params.page, Some(n as u32));
            prop_assert_eq!(params.per_page, Some(n as u32));
        }

        #[test]
        fn prop_out_of_range_pages_name_the_field(
            n in prop_oneof![i64::MIN..1i64, 101i64..i64::MAX]
        ) {
            let err = parse(json!({"per_page": n})).unwrap_err();
            prop_assert!(err.to_string().contains("per_page"));
        }

        #[test]
        fn prop_fractional_pages_rejected(n in 1i64..100, frac in 0.01f64..0.99) {
            let err = parse(json!({"page": n as f64 + frac})).unwrap_err();
            prop_assert!(err.to_string().contains("page"));
        }
    }
}
