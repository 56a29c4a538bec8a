use crate::domain::models::{Party, PartyMarker};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SponsorAnnotation {
    pub sponsors: Vec<String>,
    pub sponsor_parties: Vec<Party>,
}

/// First `(R)` or `(D)` anywhere in the sponsor text decides the marker.
pub fn party_marker(sponsor: &str) -> PartyMarker {
    let r = sponsor.find("(R)");
    let d = sponsor.find("(D)");
    match (r, d) {
        (Some(r), Some(d)) if d < r => PartyMarker::Democrat,
        (Some(_), _) => PartyMarker::Republican,
        (None, Some(_)) => PartyMarker::Democrat,
        (None, None) => PartyMarker::Unknown,
    }
}

/// Split a comma-delimited sponsor field and collect the party markers found.
///
/// Entries are kept untrimmed so display text is unchanged. Sponsors without
/// a marker add nothing to `sponsor_parties`. An empty field yields no
/// sponsors at all rather than one empty entry.
pub fn annotate(raw: &str) -> SponsorAnnotation {
    if raw.is_empty() {
        return SponsorAnnotation::default();
    }
    let sponsors: Vec<String> = raw.split(',').map(str::to_string).collect();
    let sponsor_parties = sponsors
        .iter()
        .filter_map(|s| party_marker(s).party())
        .collect();
    SponsorAnnotation {
        sponsors,
        sponsor_parties,
    }
}
