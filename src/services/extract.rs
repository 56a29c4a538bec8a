use crate::domain::models::{Bill, ExtractReport};
use crate::error::IngestError;
use crate::services::normalize::{normalize_rows, parse_sheet};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

pub const DEFAULT_SHEET: &str = "public/data/eo-gender.csv";
pub const DEFAULT_OUT: &str = "public/data/eo-to-bills.json";
pub const DEFAULT_KEY: &str = "eo-gender";
pub const DEFAULT_TITLE: &str = "Executive Order on Gender Identity";
pub const DEFAULT_DESCRIPTION: &str = "Executive order related to gender identity policies";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BillRef {
    pub bill_number: String,
    pub state: String,
    pub name: String,
    pub url: String,
}

impl From<&Bill> for BillRef {
    fn from(b: &Bill) -> Self {
        Self {
            bill_number: b.bill_number.clone(),
            state: b.state.to_string(),
            name: b.name.clone(),
            url: b.url.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct Mapping {
    pub title: String,
    pub description: String,
    pub bills: Vec<BillRef>,
}

pub struct ExtractRequest<'a> {
    pub sheet: &'a Path,
    pub out: &'a Path,
    pub key: &'a str,
    pub title: &'a str,
    pub description: &'a str,
}

/// Accepted rows with a bill number, reduced to the fields the mapping keeps.
pub fn build_mapping(
    sheet_name: &str,
    text: &str,
    title: &str,
    description: &str,
) -> Result<(Mapping, usize), IngestError> {
    let sheet = normalize_rows(parse_sheet(sheet_name, text)?);
    let bills = sheet
        .accepted
        .iter()
        .filter(|b| !b.bill_number.is_empty())
        .map(BillRef::from)
        .collect();
    Ok((
        Mapping {
            title: title.to_string(),
            description: description.to_string(),
            bills,
        },
        sheet.rejected.len(),
    ))
}

/// One-shot precompute: normalize a local bill sheet and write the mapping artifact.
pub fn extract(req: &ExtractRequest) -> anyhow::Result<ExtractReport> {
    let sheet_name = req.sheet.to_string_lossy().to_string();
    let bytes = std::fs::read(req.sheet).map_err(|source| IngestError::Read {
        path: sheet_name.clone(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let (mapping, rejected) = build_mapping(&sheet_name, &text, req.title, req.description)?;
    let count = mapping.bills.len();

    let mut artifact = Map::new();
    artifact.insert(req.key.to_string(), serde_json::to_value(&mapping)?);
    if let Some(parent) = req.out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(req.out, serde_json::to_string_pretty(&Value::Object(artifact))?)?;
    info!(bills = count, out = %req.out.display(), "wrote bill mapping");

    Ok(ExtractReport {
        key: req.key.to_string(),
        out: req.out.to_string_lossy().to_string(),
        bills: count,
        rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_keeps_numbered_bills_with_resolved_states() {
        let (mapping, rejected) = build_mapping(
            "s.csv",
            "State,Bill ID,Name,Url\nOhio,HB 8,Parents Act,https://x/hb8\nOH,,Untracked,\nNowhere,SB 1,,\n",
            "T",
            "D",
        )
        .expect("mapping");
        assert_eq!(rejected, 1);
        assert_eq!(
            mapping.bills,
            vec![BillRef {
                bill_number: "HB 8".to_string(),
                state: "OH".to_string(),
                name: "Parents Act".to_string(),
                url: "https://x/hb8".to_string(),
            }]
        );
    }

    #[test]
    fn extract_writes_keyed_artifact() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let sheet = tmp.path().join("sheet.csv");
        let out = tmp.path().join("nested/out.json");
        std::fs::write(&sheet, "State,Bill ID\nIowa,SF 418\n").expect("write sheet");
        let report = extract(&ExtractRequest {
            sheet: &sheet,
            out: &out,
            key: "eo-test",
            title: "Title",
            description: "Desc",
        })
        .expect("extract");
        assert_eq!(report.bills, 1);
        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&out).expect("read out")).expect("json");
        assert_eq!(written["eo-test"]["bills"][0]["billNumber"], "SF 418");
        assert_eq!(written["eo-test"]["bills"][0]["state"], "IA");
        assert_eq!(written["eo-test"]["title"], "Title");
    }

    #[test]
    fn extract_tolerates_non_utf8_sheets() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let sheet = tmp.path().join("sheet.csv");
        let out = tmp.path().join("out.json");
        std::fs::write(&sheet, b"State,Bill ID,Name\nTexas,HB 1,Jos\xe9 Act\nOH,HB 8,Plain\n")
            .expect("write sheet");
        let report = extract(&ExtractRequest {
            sheet: &sheet,
            out: &out,
            key: "eo-test",
            title: "Title",
            description: "Desc",
        })
        .expect("extract");
        assert_eq!(report.bills, 2);
        assert_eq!(report.rejected, 0);
    }
}
