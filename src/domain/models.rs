use crate::domain::states::StateCode;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Party {
    Democrat,
    Republican,
}

/// Result of looking for a `(R)` / `(D)` marker in one sponsor string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartyMarker {
    Republican,
    Democrat,
    Unknown,
}

impl PartyMarker {
    pub fn party(self) -> Option<Party> {
        match self {
            PartyMarker::Republican => Some(Party::Republican),
            PartyMarker::Democrat => Some(Party::Democrat),
            PartyMarker::Unknown => None,
        }
    }
}

/// Stance bucket used for tallies. Raw position text stays on the bill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Support,
    Oppose,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Enacted,
    Failed,
    Pending,
    Unknown,
}

impl StatusTone {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusTone::Enacted => "enacted",
            StatusTone::Failed => "failed",
            StatusTone::Pending => "pending",
            StatusTone::Unknown => "unknown",
        }
    }
}

pub const DEFAULT_POSITION: &str = "N/A";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExecutiveOrder {
    pub id: String,
    pub title: String,
    /// As written in the order index; see `services::orders::order_date`.
    pub date: String,
    pub federal_register_link: String,
    pub ai_summary: String,
    pub bill_sheet: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub state: StateCode,
    pub bill_number: String,
    pub name: String,
    pub summary: String,
    pub ai_summary: String,
    pub url: String,
    pub status: String,
    pub last_action: String,
    pub action_date: String,
    pub keywords: String,
    pub sponsors: Vec<String>,
    pub sponsor_parties: Vec<Party>,
    pub bill_progress: String,
    pub position: String,
    pub committee: String,
    pub creation_date: String,
    /// Columns the schema does not know about, keyed by header.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Bill {
    pub fn stance(&self) -> Position {
        match self.position.to_ascii_lowercase().as_str() {
            "support" => Position::Support,
            "oppose" => Position::Oppose,
            _ => Position::Neutral,
        }
    }

    pub fn status_tone(&self) -> StatusTone {
        let s = self.status.to_lowercase();
        let any = |words: &[&str]| words.iter().any(|w| s.contains(w));
        if s.is_empty() {
            StatusTone::Unknown
        } else if any(&["enacted", "signed", "adopted", "passed"]) {
            StatusTone::Enacted
        } else if any(&["vetoed", "failed", "blocked", "rejected"]) {
            StatusTone::Failed
        } else if any(&["committee", "pending", "introduced", "in progress"]) {
            StatusTone::Pending
        } else {
            StatusTone::Unknown
        }
    }

    /// Case-insensitive search over bill number, name and AI summary.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        [&self.bill_number, &self.name, &self.ai_summary]
            .iter()
            .any(|field| field.to_lowercase().contains(&q))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RejectReason {
    MissingState,
    UnknownState(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// 1-based, counting data rows only.
    pub row: usize,
    pub reason: RejectReason,
    pub raw: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub order_id: String,
    pub bill_sheet: String,
    pub rows: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub states: usize,
    pub rejected_rows: Vec<RejectedRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StateStats {
    pub state: StateCode,
    pub name: &'static str,
    pub bill_count: usize,
    pub support: usize,
    pub oppose: usize,
    pub neutral: usize,
    pub avg_days_since_action: Option<i64>,
    pub party: Option<Party>,
    pub support_share: Option<f64>,
    pub intensity: f64,
}

#[derive(Serialize, Clone)]
pub struct PartyRow {
    pub state: StateCode,
    pub name: &'static str,
    pub party: Party,
}

/// A bill as listed by `bills`, with its status bucket alongside.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRow<'a> {
    #[serde(flatten)]
    pub bill: &'a Bill,
    pub status_tone: StatusTone,
}

impl<'a> From<&'a Bill> for BillRow<'a> {
    fn from(bill: &'a Bill) -> Self {
        Self {
            bill,
            status_tone: bill.status_tone(),
        }
    }
}

#[derive(Serialize)]
pub struct BillsReport<'a> {
    pub order: &'a ExecutiveOrder,
    pub report: &'a IngestReport,
    pub bills: Vec<BillRow<'a>>,
}

#[derive(Serialize)]
pub struct StatsReport<'a> {
    pub order: &'a ExecutiveOrder,
    pub today: String,
    /// Size of the largest state bucket.
    pub max_bucket_len: usize,
    pub states: Vec<StateStats>,
}

#[derive(Serialize)]
pub struct ResolveReport {
    pub raw: String,
    pub code: StateCode,
    pub name: &'static str,
}

#[derive(Serialize)]
pub struct ExtractReport {
    pub key: String,
    pub out: String,
    pub bills: usize,
    pub rejected: usize,
}
