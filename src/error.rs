/// Run-level failures. Row-level problems never become one of these; they
/// are reported as `RejectedRow`s by the normalizer.
#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to fetch {url}: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("invalid JSON in {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("order index {0} is not a JSON object")]
    IndexShape(String),
    #[error("failed to parse CSV {name}: {source}")]
    Csv {
        name: String,
        #[source]
        source: csv::Error,
    },
    #[error("no bill sheet specified for executive order {0}")]
    MissingBillSheet(String),
    #[error("executive order not found: {0}")]
    UnknownOrder(String),
    #[error("BillTrack50 API key not configured (set BILLTRACK50_API_KEY)")]
    MissingApiKey,
}
