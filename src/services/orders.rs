use crate::domain::models::ExecutiveOrder;
use crate::error::IngestError;
use crate::services::source::SheetSource;
use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};
use std::cmp::Reverse;
use tracing::info;

/// Lowercase the title and collapse every run outside `[a-z0-9]` into one `-`.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_gap = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            in_gap = false;
        } else if !in_gap {
            out.push('-');
            in_gap = true;
        }
    }
    out
}

/// Parse the dates found in order indexes and bill sheets:
/// `YYYY-MM-DD`, `MM/DD/YYYY` and RFC 3339 timestamps.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
}

pub fn order_date(order: &ExecutiveOrder) -> Option<NaiveDate> {
    parse_date(&order.date)
}

fn text(details: &Value, key: &str) -> String {
    details
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Build the order list from the title-keyed index object, newest first.
///
/// Entries are not validated: missing fields come through empty. Equal dates
/// keep index order. Undated entries sort after every dated one.
pub fn build_orders(index: &Map<String, Value>) -> Vec<ExecutiveOrder> {
    let mut orders: Vec<ExecutiveOrder> = index
        .iter()
        .map(|(title, details)| ExecutiveOrder {
            id: slugify(title),
            title: title.clone(),
            date: text(details, "date"),
            federal_register_link: text(details, "federal_register_link"),
            ai_summary: text(details, "ai_summary"),
            bill_sheet: text(details, "bill_sheet"),
        })
        .collect();
    // sort_by_key is stable
    orders.sort_by_key(|o| Reverse(order_date(o)));
    orders
}

pub fn parse_order_index(name: &str, raw: &str) -> Result<Vec<ExecutiveOrder>, IngestError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| IngestError::Json {
        name: name.to_string(),
        source,
    })?;
    let index = value
        .as_object()
        .ok_or_else(|| IngestError::IndexShape(name.to_string()))?;
    Ok(build_orders(index))
}

pub fn load_orders(source: &impl SheetSource, name: &str) -> Result<Vec<ExecutiveOrder>, IngestError> {
    let raw = source.fetch_text(name)?;
    let orders = parse_order_index(name, &raw)?;
    info!(count = orders.len(), index = name, "loaded executive orders");
    Ok(orders)
}
