use crate::error::IngestError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Anything that can hand back the text of a named data file.
pub trait SheetSource {
    fn fetch_text(&self, name: &str) -> Result<String, IngestError>;
}

#[derive(Debug, Clone)]
pub enum DataSource {
    Dir(PathBuf),
    Http { base_url: String, timeout_ms: u64 },
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

impl DataSource {
    pub fn from_spec(source: &str, timeout_ms: u64) -> Self {
        if is_remote(source) {
            DataSource::Http {
                base_url: source.trim_end_matches('/').to_string(),
                timeout_ms,
            }
        } else {
            DataSource::Dir(PathBuf::from(source))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Dir(dir) => dir.to_string_lossy().to_string(),
            DataSource::Http { base_url, .. } => base_url.clone(),
        }
    }
}

fn read_local(dir: &Path, name: &str) -> Result<String, IngestError> {
    let path = dir.join(name);
    let bytes = std::fs::read(&path).map_err(|source| IngestError::Read {
        path: path.to_string_lossy().to_string(),
        source,
    })?;
    // Spreadsheet exports are often not UTF-8; decode the way HTTP bodies are.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn fetch_remote(base_url: &str, name: &str, timeout_ms: u64) -> Result<String, IngestError> {
    let url = format!("{}/{}", base_url, name.trim_start_matches('/'));
    let fetch_err = |source| IngestError::Fetch {
        url: url.clone(),
        source,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .map_err(fetch_err)?;
    let resp = client.get(&url).send().map_err(fetch_err)?;
    if !resp.status().is_success() {
        return Err(IngestError::Status {
            url: url.clone(),
            status: resp.status(),
        });
    }
    resp.text().map_err(fetch_err)
}

impl SheetSource for DataSource {
    fn fetch_text(&self, name: &str) -> Result<String, IngestError> {
        debug!(source = %self.describe(), name, "fetching data file");
        match self {
            DataSource::Dir(dir) => read_local(dir, name),
            DataSource::Http {
                base_url,
                timeout_ms,
            } => fetch_remote(base_url, name, *timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ExecutiveOrder;
    use crate::services::pipeline::{Completion, Session};

    #[test]
    fn urls_become_http_sources() {
        match DataSource::from_spec("https://example.org/data/", 100) {
            DataSource::Http { base_url, .. } => assert_eq!(base_url, "https://example.org/data"),
            other => panic!("unexpected source {:?}", other),
        }
        assert!(matches!(
            DataSource::from_spec("public/data", 100),
            DataSource::Dir(_)
        ));
    }

    #[test]
    fn local_reads_surface_missing_files() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        std::fs::write(tmp.path().join("a.csv"), "State\nCA\n").expect("write");
        let src = DataSource::Dir(tmp.path().to_path_buf());
        assert_eq!(src.fetch_text("a.csv").expect("read"), "State\nCA\n");
        let err = src.fetch_text("missing.csv").expect_err("missing file");
        assert!(matches!(err, IngestError::Read { .. }));
    }

    #[test]
    fn local_reads_decode_non_utf8_lossily() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        std::fs::write(
            tmp.path().join("s.csv"),
            b"State,Bill ID,Sponsor List\nCA,AB1,Jos\xe9 Ruiz (D)\nTX,HB2,A (R)\n",
        )
        .expect("write");
        let src = DataSource::Dir(tmp.path().to_path_buf());
        let text = src.fetch_text("s.csv").expect("lossy read");
        assert!(text.contains("Jos\u{FFFD} Ruiz (D)"));
        assert!(text.contains("TX,HB2,A (R)"));

        let order = ExecutiveOrder {
            id: "o".to_string(),
            title: "O".to_string(),
            date: String::new(),
            federal_register_link: String::new(),
            ai_summary: String::new(),
            bill_sheet: "s.csv".to_string(),
        };
        let mut session = Session::with_orders(src, vec![order.clone()]);
        match session.load(&order) {
            Completion::Published(report) => {
                assert_eq!(report.accepted, 2);
                assert_eq!(report.rejected, 0);
            }
            other => panic!("unexpected completion {:?}", other),
        }
    }
}
