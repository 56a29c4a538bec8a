#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub data: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let data = make_fixture_data(tmp.path());

        Self {
            _tmp: tmp,
            home,
            data,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("eobills");
        cmd.env("HOME", &self.home)
            .env_remove("EOBILLS_DATA")
            .env_remove("EOBILLS_ORDER_INDEX")
            .env_remove("BILLTRACK50_API_KEY")
            .env_remove("EOBILLS_LOG");
        cmd
    }

    pub fn data_arg(&self) -> &str {
        self.data.to_str().expect("data path utf8")
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .arg("--data")
            .arg(self.data_arg())
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .arg("--data")
            .arg(self.data_arg())
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

pub const GENDER_SHEET: &str = "\
State,Bill ID,Name,AI Summary,Url,Bill Progress,Last Action,Action Date,Sponsor List,Position,Session
Texas,HB 229,Women's Bill of Rights,Defines sex in statute,https://bills.example/tx/hb229,Signed by Governor,Effective,2025-06-01,\"Smith (R),Jones (R)\",Support,89R
TX,SB 12,Parental Rights,Curriculum notices,https://bills.example/tx/sb12,In Committee,Referred,2025-06-11,Lee (D),oppose,89R
California,AB 1955,SAFETY Act,Student privacy protections,https://bills.example/ca/ab1955,Vetoed,Vetoed,,Ward (D),,2025
Atlantis,X 1,Sunken Bill,,,,,,,,
,HB 0,No State,,,,,,,,
US,HR 28,Protection of Women and Girls in Sports Act,Federal sports bill,https://bills.example/us/hr28,Passed House,Received in Senate,2025-01-14,Steube (R),Support,119
";

pub const TARIFF_SHEET: &str = "\
State,Bill ID,Name,Position
Ohio,HB 8,Tariff Relief,Support
";

fn make_fixture_data(base: &Path) -> PathBuf {
    let data = base.join("data");
    fs::create_dir_all(&data).expect("create data dir");

    let index = serde_json::json!({
        "Defending Women From Gender Ideology Extremism": {
            "date": "2025-01-20",
            "federal_register_link": "https://fr.example/2025-02090",
            "ai_summary": "Defines sex for federal policy",
            "bill_sheet": "eo-gender.csv"
        },
        "Reciprocal Trade": {
            "date": "2025-04-02",
            "federal_register_link": "https://fr.example/2025-06063",
            "ai_summary": "Adjusts import duties",
            "bill_sheet": "eo-tariff.csv"
        },
        "Missing Sheet Order": {
            "date": "2025-03-01",
            "bill_sheet": "nowhere.csv"
        },
        "Unlinked Order": {
            "date": "not a date"
        }
    });
    fs::write(
        data.join("eo-to-billsheet.json"),
        serde_json::to_string_pretty(&index).expect("serialize order index"),
    )
    .expect("write order index");
    fs::write(data.join("eo-gender.csv"), GENDER_SHEET).expect("write gender sheet");
    fs::write(data.join("eo-tariff.csv"), TARIFF_SHEET).expect("write tariff sheet");

    data
}
