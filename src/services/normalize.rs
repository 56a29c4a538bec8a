use crate::domain::models::{Bill, RejectReason, RejectedRow, DEFAULT_POSITION};
use crate::domain::states::resolve;
use crate::error::IngestError;
use crate::services::sponsors::annotate;
use std::collections::BTreeMap;
use tracing::debug;

/// One parsed sheet row: header name to cell text.
pub type RawRow = BTreeMap<String, String>;

pub mod columns {
    pub const STATE: &str = "State";
    pub const BILL_ID: &str = "Bill ID";
    pub const NAME: &str = "Name";
    pub const SUMMARY: &str = "Summary";
    pub const AI_SUMMARY: &str = "AI Summary";
    pub const URL: &str = "Url";
    pub const LAST_ACTION: &str = "Last Action";
    pub const ACTION_DATE: &str = "Action Date";
    pub const KEYWORDS: &str = "Keywords";
    pub const SPONSOR_LIST: &str = "Sponsor List";
    /// Older sheets carry sponsors under this header instead.
    pub const SPONSORS: &str = "Sponsors";
    pub const BILL_PROGRESS: &str = "Bill Progress";
    pub const POSITION: &str = "Position";
    pub const COMMITTEE: &str = "Committee Category";
    pub const CREATED: &str = "Created";

    pub const KNOWN: [&str; 15] = [
        STATE,
        BILL_ID,
        NAME,
        SUMMARY,
        AI_SUMMARY,
        URL,
        LAST_ACTION,
        ACTION_DATE,
        KEYWORDS,
        SPONSOR_LIST,
        SPONSORS,
        BILL_PROGRESS,
        POSITION,
        COMMITTEE,
        CREATED,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedSheet {
    pub rows: usize,
    pub accepted: Vec<Bill>,
    pub rejected: Vec<RejectedRow>,
}

fn field(row: &RawRow, column: &str) -> String {
    row.get(column).cloned().unwrap_or_default()
}

fn non_empty<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.get(column).map(String::as_str).filter(|v| !v.is_empty())
}

/// Map one sheet row onto the canonical bill record.
///
/// A missing or unresolvable state rejects the row; every other column is
/// optional and falls back to an empty string (`Position` falls back to `N/A`).
pub fn normalize(row: &RawRow) -> Result<Bill, RejectReason> {
    let raw_state = non_empty(row, columns::STATE).ok_or(RejectReason::MissingState)?;
    let state =
        resolve(raw_state).ok_or_else(|| RejectReason::UnknownState(raw_state.to_string()))?;

    let sponsor_field = non_empty(row, columns::SPONSOR_LIST)
        .or_else(|| non_empty(row, columns::SPONSORS))
        .unwrap_or_default();
    let annotation = annotate(sponsor_field);

    let extra = row
        .iter()
        .filter(|(k, v)| !columns::KNOWN.contains(&k.as_str()) && !v.is_empty())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(Bill {
        state,
        bill_number: field(row, columns::BILL_ID),
        name: field(row, columns::NAME),
        summary: field(row, columns::SUMMARY),
        ai_summary: field(row, columns::AI_SUMMARY),
        url: field(row, columns::URL),
        status: field(row, columns::BILL_PROGRESS),
        last_action: field(row, columns::LAST_ACTION),
        action_date: field(row, columns::ACTION_DATE),
        keywords: field(row, columns::KEYWORDS),
        sponsors: annotation.sponsors,
        sponsor_parties: annotation.sponsor_parties,
        bill_progress: field(row, columns::BILL_PROGRESS),
        position: non_empty(row, columns::POSITION)
            .unwrap_or(DEFAULT_POSITION)
            .to_string(),
        committee: field(row, columns::COMMITTEE),
        creation_date: field(row, columns::CREATED),
        extra,
    })
}

/// Normalize every row, keeping accepted bills in row order and recording
/// why each rejected row was dropped.
pub fn normalize_rows(rows: impl IntoIterator<Item = RawRow>) -> NormalizedSheet {
    let mut out = NormalizedSheet::default();
    for (i, raw) in rows.into_iter().enumerate() {
        out.rows += 1;
        match normalize(&raw) {
            Ok(bill) => out.accepted.push(bill),
            Err(reason) => {
                debug!(row = i + 1, ?reason, "dropping bill row");
                out.rejected.push(RejectedRow {
                    row: i + 1,
                    reason,
                    raw,
                });
            }
        }
    }
    out
}

/// Parse comma-delimited text whose first line names the columns.
///
/// Blank lines are skipped. Short rows leave their trailing columns absent;
/// cells beyond the header width are ignored.
pub fn parse_sheet(name: &str, text: &str) -> Result<Vec<RawRow>, IngestError> {
    let csv_err = |source| IngestError::Csv {
        name: name.to_string(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers().map_err(csv_err)?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
