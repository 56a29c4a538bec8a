//! Bill ingestion for the currently selected executive order.
//!
//! A [`Session`] is the single writer of the published [`StateBillIndex`].
//! Readers take [`Session::snapshot`] and hold an `Arc` to an immutable map;
//! each run builds a complete new map and swaps it in, so nobody ever sees a
//! half-filled index.
//!
//! Selection and completion are split so a slow fetch for an old selection
//! can finish after a newer one without clobbering it: every selection bumps
//! a generation counter, and [`Session::complete`] only publishes results
//! whose [`Ticket`] carries the current generation.

use crate::domain::models::{Bill, ExecutiveOrder, IngestReport, Party};
use crate::domain::states::{party_table, StateCode};
use crate::error::IngestError;
use crate::services::normalize::{normalize_rows, parse_sheet};
use crate::services::orders::load_orders;
use crate::services::source::SheetSource;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// State code to that state's bills, in sheet row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StateBillIndex {
    buckets: BTreeMap<StateCode, Vec<Bill>>,
}

impl StateBillIndex {
    pub fn from_bills(bills: impl IntoIterator<Item = Bill>) -> Self {
        let mut buckets: BTreeMap<StateCode, Vec<Bill>> = BTreeMap::new();
        for bill in bills {
            buckets.entry(bill.state).or_default().push(bill);
        }
        Self { buckets }
    }

    pub fn bills_for(&self, state: StateCode) -> &[Bill] {
        self.buckets.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateCode, &[Bill])> {
        self.buckets.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_bills(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn max_bucket_len(&self) -> usize {
        self.buckets.values().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// Proof of a selection, redeemed by [`Session::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    pub order: ExecutiveOrder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Published(IngestReport),
    Failed(String),
    /// A newer selection was made; the result was discarded.
    Superseded,
}

/// Parse and bucket one bill sheet. Pure: nothing is published.
pub fn ingest_sheet(
    order: &ExecutiveOrder,
    text: &str,
) -> Result<(StateBillIndex, IngestReport), IngestError> {
    let rows = parse_sheet(&order.bill_sheet, text)?;
    info!(sheet = %order.bill_sheet, rows = rows.len(), "parsed bill sheet");
    let sheet = normalize_rows(rows);
    let accepted = sheet.accepted.len();
    let index = StateBillIndex::from_bills(sheet.accepted);
    let report = IngestReport {
        order_id: order.id.clone(),
        bill_sheet: order.bill_sheet.clone(),
        rows: sheet.rows,
        accepted,
        rejected: sheet.rejected.len(),
        states: index.len(),
        rejected_rows: sheet.rejected,
    };
    info!(
        accepted = report.accepted,
        rejected = report.rejected,
        states = report.states,
        "normalized bill sheet"
    );
    Ok((index, report))
}

pub struct Session<S> {
    source: S,
    orders: Arc<Vec<ExecutiveOrder>>,
    party: Arc<Vec<(StateCode, Party)>>,
    selected: Option<ExecutiveOrder>,
    generation: u64,
    phase: Phase,
    published: Arc<StateBillIndex>,
    last_report: Option<IngestReport>,
}

impl<S: SheetSource> Session<S> {
    /// Load the order index through `source`. Fails as a whole; there is no
    /// partial order list.
    pub fn open(source: S, order_index: &str) -> Result<Self, IngestError> {
        let orders = load_orders(&source, order_index)?;
        Ok(Self::with_orders(source, orders))
    }

    pub fn with_orders(source: S, orders: Vec<ExecutiveOrder>) -> Self {
        Self {
            source,
            orders: Arc::new(orders),
            party: Arc::new(party_table()),
            selected: None,
            generation: 0,
            phase: Phase::Idle,
            published: Arc::new(StateBillIndex::default()),
            last_report: None,
        }
    }

    pub fn executive_orders(&self) -> Arc<Vec<ExecutiveOrder>> {
        Arc::clone(&self.orders)
    }

    pub fn party_control(&self) -> Arc<Vec<(StateCode, Party)>> {
        Arc::clone(&self.party)
    }

    pub fn find_order(&self, id: &str) -> Result<ExecutiveOrder, IngestError> {
        self.orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| IngestError::UnknownOrder(id.to_string()))
    }

    pub fn selected(&self) -> Option<&ExecutiveOrder> {
        self.selected.as_ref()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Arc<StateBillIndex> {
        Arc::clone(&self.published)
    }

    pub fn last_report(&self) -> Option<&IngestReport> {
        self.last_report.as_ref()
    }

    /// Change the selection. The published index empties right away; a
    /// ticket comes back when there is something to load.
    pub fn select(&mut self, order: Option<&ExecutiveOrder>) -> Option<Ticket> {
        self.generation += 1;
        self.published = Arc::new(StateBillIndex::default());
        self.last_report = None;
        self.selected = order.cloned();
        match order {
            None => {
                self.phase = Phase::Idle;
                None
            }
            Some(order) => {
                self.phase = Phase::Loading;
                Some(Ticket {
                    generation: self.generation,
                    order: order.clone(),
                })
            }
        }
    }

    pub fn fetch(&self, ticket: &Ticket) -> Result<String, IngestError> {
        if ticket.order.bill_sheet.is_empty() {
            return Err(IngestError::MissingBillSheet(ticket.order.title.clone()));
        }
        info!(sheet = %ticket.order.bill_sheet, "loading bills");
        self.source.fetch_text(&ticket.order.bill_sheet)
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Finish a run started by [`Session::select`].
    pub fn complete(&mut self, ticket: Ticket, fetched: Result<String, IngestError>) -> Completion {
        if !self.is_current(&ticket) {
            warn!(order = %ticket.order.id, "discarding superseded bill load");
            return Completion::Superseded;
        }
        match fetched.and_then(|text| ingest_sheet(&ticket.order, &text)) {
            Ok((index, report)) => {
                self.published = Arc::new(index);
                self.last_report = Some(report.clone());
                self.phase = Phase::Ready;
                Completion::Published(report)
            }
            Err(err) => {
                let msg = format!("Failed to load bills: {}", err);
                warn!(order = %ticket.order.id, error = %err, "bill load failed");
                self.published = Arc::new(StateBillIndex::default());
                self.phase = Phase::Error(msg.clone());
                Completion::Failed(msg)
            }
        }
    }

    /// Select, fetch and complete in one go.
    pub fn load(&mut self, order: &ExecutiveOrder) -> Completion {
        match self.select(Some(order)) {
            Some(ticket) => {
                let fetched = self.fetch(&ticket);
                self.complete(ticket, fetched)
            }
            None => Completion::Superseded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MemSource(HashMap<String, String>);

    impl SheetSource for MemSource {
        fn fetch_text(&self, name: &str) -> Result<String, IngestError> {
            self.0.get(name).cloned().ok_or_else(|| IngestError::Read {
                path: name.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    const INDEX: &str = r#"{
        "Order One": {"date": "2025-01-02", "bill_sheet": "one.csv"},
        "Order Two": {"date": "2025-01-05", "bill_sheet": "two.csv"},
        "Order Gone": {"date": "2025-01-01", "bill_sheet": "gone.csv"},
        "Order Blank": {"date": "2025-01-01"}
    }"#;

    const ONE: &str = "State,Bill ID,Position\nCalifornia,AB1,\nZZ,X1,Support\n";
    const TWO: &str =
        "State,Bill ID,Position,Sponsor List\nTX,HB1,Oppose,A (R)\nTexas,HB2,support,\nNY,S1,,B (D)\n";

    fn session() -> Session<MemSource> {
        let files = [
            ("idx.json", INDEX),
            ("one.csv", ONE),
            ("two.csv", TWO),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Session::open(MemSource(files), "idx.json").expect("open")
    }

    fn code(s: &str) -> StateCode {
        crate::domain::states::resolve(s).expect("valid code")
    }

    #[test]
    fn open_sorts_orders_and_starts_idle() {
        let s = session();
        let ids: Vec<String> = s.executive_orders().iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids[0], "order-two");
        assert_eq!(s.phase(), &Phase::Idle);
        assert!(s.snapshot().is_empty());
        assert_eq!(s.party_control().len(), 51);
    }

    #[test]
    fn bad_state_rows_drop_silently() {
        let mut s = session();
        let one = s.find_order("order-one").expect("order");
        let report = match s.load(&one) {
            Completion::Published(r) => r,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(report.rejected, 1);
        let index = s.snapshot();
        assert_eq!(index.len(), 1);
        let ca = index.bills_for(code("CA"));
        assert_eq!(ca.len(), 1);
        assert_eq!(ca[0].position, "N/A");
        assert_eq!(s.phase(), &Phase::Ready);
        assert!(s.error().is_none());
    }

    #[test]
    fn rows_keep_sheet_order_within_buckets() {
        let mut s = session();
        let two = s.find_order("order-two").expect("order");
        s.load(&two);
        let index = s.snapshot();
        let tx: Vec<&str> = index
            .bills_for(code("TX"))
            .iter()
            .map(|b| b.bill_number.as_str())
            .collect();
        assert_eq!(tx, vec!["HB1", "HB2"]);
        assert_eq!(index.total_bills(), 3);
        assert_eq!(index.max_bucket_len(), 2);
    }

    #[test]
    fn selecting_empties_index_before_results_arrive() {
        let mut s = session();
        let one = s.find_order("order-one").expect("order");
        let two = s.find_order("order-two").expect("order");
        s.load(&one);
        let held = s.snapshot();
        let ticket = s.select(Some(&two)).expect("ticket");
        assert_eq!(s.phase(), &Phase::Loading);
        assert!(s.snapshot().is_empty());
        // earlier readers keep their own snapshot
        assert_eq!(held.total_bills(), 1);
        let fetched = s.fetch(&ticket);
        s.complete(ticket, fetched);
        assert_eq!(s.snapshot().total_bills(), 3);
    }

    #[test]
    fn stale_fetch_cannot_overwrite_newer_selection() {
        let mut s = session();
        let one = s.find_order("order-one").expect("order");
        let two = s.find_order("order-two").expect("order");

        let stale = s.select(Some(&one)).expect("ticket");
        let fresh = s.select(Some(&two)).expect("ticket");
        let stale_text = s.fetch(&stale);
        let fresh_text = s.fetch(&fresh);

        assert!(matches!(
            s.complete(fresh, fresh_text),
            Completion::Published(_)
        ));
        assert_eq!(s.complete(stale, stale_text), Completion::Superseded);

        let index = s.snapshot();
        assert!(index.bills_for(code("CA")).is_empty());
        assert_eq!(index.bills_for(code("TX")).len(), 2);
        assert_eq!(s.selected().map(|o| o.id.as_str()), Some("order-two"));
        assert_eq!(s.last_report().map(|r| r.order_id.as_str()), Some("order-two"));
    }

    #[test]
    fn deselect_returns_to_idle_and_voids_in_flight_runs() {
        let mut s = session();
        let one = s.find_order("order-one").expect("order");
        let ticket = s.select(Some(&one)).expect("ticket");
        assert!(s.select(None).is_none());
        let fetched = s.fetch(&ticket);
        assert_eq!(s.complete(ticket, fetched), Completion::Superseded);
        assert_eq!(s.phase(), &Phase::Idle);
        assert!(s.snapshot().is_empty());
    }

    #[test]
    fn fetch_failures_set_error_and_leave_index_empty() {
        let mut s = session();
        let gone = s.find_order("order-gone").expect("order");
        assert!(matches!(s.load(&gone), Completion::Failed(_)));
        assert!(s.snapshot().is_empty());
        let msg = s.error().expect("error message");
        assert!(msg.contains("gone.csv"), "{msg}");

        let blank = s.find_order("order-blank").expect("order");
        assert!(matches!(s.load(&blank), Completion::Failed(_)));
        assert!(s.error().expect("error").contains("no bill sheet"));

        // retry by selecting again
        let one = s.find_order("order-one").expect("order");
        assert!(matches!(s.load(&one), Completion::Published(_)));
        assert_eq!(s.phase(), &Phase::Ready);
    }

    #[test]
    fn reingesting_the_same_sheet_is_idempotent() {
        let mut s = session();
        let two = s.find_order("order-two").expect("order");
        s.load(&two);
        let first = s.snapshot();
        s.load(&two);
        let second = s.snapshot();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn unknown_order_ids_are_errors() {
        let s = session();
        assert!(matches!(
            s.find_order("nope"),
            Err(IngestError::UnknownOrder(_))
        ));
    }
}
