use crate::cli::{Cli, Commands};
use anyhow::bail;
use eobills::config::Config;
use eobills::domain::models::{PartyRow, ResolveReport};
use eobills::domain::states::{party_table, resolve};
use eobills::services::billtrack::BillTrackClient;
use eobills::services::extract::{extract, ExtractRequest};
use eobills::services::output::{print_one, print_out};
use std::path::Path;

pub fn handle_reference_commands(cli: &Cli, config: &Config) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Party => {
            let rows: Vec<PartyRow> = party_table()
                .into_iter()
                .map(|(state, party)| PartyRow {
                    state,
                    name: state.name(),
                    party,
                })
                .collect();
            print_out(cli.json, &rows, |r| format!("{}\t{:?}\t{}", r.state, r.party, r.name))?;
        }
        Commands::Resolve { raw } => {
            let Some(code) = resolve(raw) else {
                bail!("unrecognized state: {}", raw);
            };
            print_one(
                cli.json,
                ResolveReport {
                    raw: raw.clone(),
                    code,
                    name: code.name(),
                },
                |r| r.code.to_string(),
            )?;
        }
        Commands::Extract {
            sheet,
            out,
            key,
            title,
            description,
        } => {
            let report = extract(&ExtractRequest {
                sheet: Path::new(sheet),
                out: Path::new(out),
                key,
                title,
                description,
            })?;
            print_one(cli.json, report, |r| {
                format!(
                    "wrote {} bills to {} ({} rows dropped)",
                    r.bills, r.out, r.rejected
                )
            })?;
        }
        Commands::Sponsors { bill_id } => {
            let client = BillTrackClient::from_config(config)?;
            let details = client.sponsor_details(bill_id)?;
            print_out(cli.json, &details, |d| {
                format!(
                    "{}\t{}\t{} bills",
                    d.sponsor.name,
                    d.sponsor.legislator_party.as_deref().unwrap_or("n/a"),
                    d.bills.len()
                )
            })?;
        }
        _ => return Ok(false),
    }

    Ok(true)
}
