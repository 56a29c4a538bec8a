use crate::domain::models::{Bill, Position, StateStats};
use crate::domain::states::{party_control, StateCode};
use crate::services::orders::parse_date;
use crate::services::pipeline::StateBillIndex;
use chrono::NaiveDate;

/// Bucket size at which shading saturates.
pub const INTENSITY_CEILING: usize = 20;

/// Rounded mean of |today - action date| in days, over bills whose action
/// date parses. `None` when none do.
pub fn avg_days_since_action(bills: &[Bill], today: NaiveDate) -> Option<i64> {
    let days: Vec<i64> = bills
        .iter()
        .filter_map(|b| parse_date(&b.action_date))
        .map(|d| (today - d).num_days().abs())
        .collect();
    if days.is_empty() {
        return None;
    }
    let total: i64 = days.iter().sum();
    Some((total as f64 / days.len() as f64).round() as i64)
}

pub fn bucket_stats(state: StateCode, bills: &[Bill], today: NaiveDate) -> StateStats {
    let (mut support, mut oppose, mut neutral) = (0, 0, 0);
    for bill in bills {
        match bill.stance() {
            Position::Support => support += 1,
            Position::Oppose => oppose += 1,
            Position::Neutral => neutral += 1,
        }
    }
    let decided = support + oppose;
    StateStats {
        state,
        name: state.name(),
        bill_count: bills.len(),
        support,
        oppose,
        neutral,
        avg_days_since_action: avg_days_since_action(bills, today),
        party: party_control(state),
        support_share: (decided > 0).then(|| support as f64 / decided as f64),
        intensity: (bills.len() as f64 / INTENSITY_CEILING as f64).min(1.0),
    }
}

/// Per-state aggregates, computed fresh from a published snapshot.
pub fn state_stats(index: &StateBillIndex, today: NaiveDate) -> Vec<StateStats> {
    index
        .iter()
        .map(|(state, bills)| bucket_stats(state, bills, today))
        .collect()
}
