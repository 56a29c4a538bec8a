use crate::domain::models::Party;
use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel bucket for federal bills.
pub const FEDERAL: &str = "US";

/// Full state name to postal code, exactly as bill sheets spell them.
pub const STATE_NAMES: [(&str, &str); 51] = [
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
    ("District of Columbia", "DC"),
];

/// Controlling party per state. Compiled in, never derived from bill data.
const PARTY_CONTROL: [(&str, Party); 51] = [
    ("AL", Party::Republican),
    ("AK", Party::Republican),
    ("AZ", Party::Republican),
    ("AR", Party::Republican),
    ("CA", Party::Democrat),
    ("CO", Party::Democrat),
    ("CT", Party::Democrat),
    ("DE", Party::Democrat),
    ("FL", Party::Republican),
    ("GA", Party::Republican),
    ("HI", Party::Democrat),
    ("ID", Party::Republican),
    ("IL", Party::Democrat),
    ("IN", Party::Republican),
    ("IA", Party::Republican),
    ("KS", Party::Republican),
    ("KY", Party::Republican),
    ("LA", Party::Republican),
    ("ME", Party::Democrat),
    ("MD", Party::Democrat),
    ("MA", Party::Democrat),
    ("MI", Party::Democrat),
    ("MN", Party::Democrat),
    ("MS", Party::Republican),
    ("MO", Party::Republican),
    ("MT", Party::Republican),
    ("NE", Party::Republican),
    ("NV", Party::Democrat),
    ("NH", Party::Republican),
    ("NJ", Party::Democrat),
    ("NM", Party::Democrat),
    ("NY", Party::Democrat),
    ("NC", Party::Republican),
    ("ND", Party::Republican),
    ("OH", Party::Republican),
    ("OK", Party::Republican),
    ("OR", Party::Democrat),
    ("PA", Party::Democrat),
    ("RI", Party::Democrat),
    ("SC", Party::Republican),
    ("SD", Party::Republican),
    ("TN", Party::Republican),
    ("TX", Party::Republican),
    ("UT", Party::Republican),
    ("VT", Party::Democrat),
    ("VA", Party::Republican),
    ("WA", Party::Democrat),
    ("WV", Party::Republican),
    ("WI", Party::Democrat),
    ("WY", Party::Republican),
    ("DC", Party::Democrat),
];

/// A two-letter code from the fixed vocabulary (50 states, DC, and `US`).
///
/// Only [`resolve`] and [`StateCode::all`] hand these out, so every value in
/// circulation is a vocabulary member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateCode(&'static str);

impl StateCode {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn is_federal(&self) -> bool {
        self.0 == FEDERAL
    }

    /// Display name for the code; `"United States"` for the federal bucket.
    pub fn name(&self) -> &'static str {
        if self.is_federal() {
            return "United States";
        }
        STATE_NAMES
            .iter()
            .find(|(_, code)| *code == self.0)
            .map(|(name, _)| *name)
            .unwrap_or(self.0)
    }

    /// Every state code plus DC, in table order. Excludes the federal sentinel.
    pub fn all() -> impl Iterator<Item = StateCode> {
        STATE_NAMES.iter().map(|(_, code)| StateCode(code))
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for StateCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

fn vocabulary_code(raw: &str) -> Option<&'static str> {
    if raw == FEDERAL {
        return Some(FEDERAL);
    }
    STATE_NAMES
        .iter()
        .find(|(_, code)| *code == raw)
        .map(|(_, code)| *code)
}

/// Canonicalize a free-form state value.
///
/// Values of at most two characters must already be a vocabulary code. Longer
/// values go through the exact, case-sensitive full-name table. Nothing else
/// is attempted; a miss is `None` and the caller drops the row.
pub fn resolve(raw: &str) -> Option<StateCode> {
    let code = if raw.chars().count() <= 2 {
        vocabulary_code(raw)?
    } else {
        STATE_NAMES
            .iter()
            .find(|(name, _)| *name == raw)
            .map(|(_, code)| *code)?
    };
    Some(StateCode(code))
}

pub fn party_control(code: StateCode) -> Option<Party> {
    PARTY_CONTROL
        .iter()
        .find(|(c, _)| *c == code.as_str())
        .map(|(_, party)| *party)
}

/// The full static party-control table, keyed by code.
pub fn party_table() -> Vec<(StateCode, Party)> {
    StateCode::all()
        .filter_map(|code| party_control(code).map(|p| (code, p)))
        .collect()
}
