use crate::cli::{Cli, Commands};
use anyhow::{anyhow, bail};
use eobills::domain::models::{BillRow, BillsReport, ExecutiveOrder, IngestReport, StatsReport};
use eobills::domain::states::resolve;
use eobills::services::orders::parse_date;
use eobills::services::output::{print_one, print_out};
use eobills::services::stats::state_stats;
use eobills::{Completion, DataSource, Session};

fn ingest(
    session: &mut Session<DataSource>,
    order: &ExecutiveOrder,
) -> anyhow::Result<IngestReport> {
    match session.load(order) {
        Completion::Published(report) => Ok(report),
        Completion::Failed(msg) => bail!(msg),
        Completion::Superseded => bail!("bill load for {} was superseded", order.id),
    }
}

pub fn handle_ingest_commands(
    cli: &Cli,
    session: &mut Session<DataSource>,
) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Orders => {
            let orders = session.executive_orders();
            print_out(cli.json, &orders[..], |o| {
                format!("{}\t{}\t{}", o.date, o.id, o.title)
            })?;
        }
        Commands::Bills {
            order,
            state,
            query,
        } => {
            let only = match state {
                Some(raw) => Some(resolve(raw).ok_or_else(|| anyhow!("unknown state: {}", raw))?),
                None => None,
            };
            let order = session.find_order(order)?;
            let report = ingest(session, &order)?;
            let index = session.snapshot();
            let query = query.as_deref().unwrap_or("");
            let bills: Vec<BillRow> = index
                .iter()
                .filter(|(code, _)| only.map(|o| o == *code).unwrap_or(true))
                .flat_map(|(_, bills)| bills.iter())
                .filter(|b| b.matches(query))
                .map(BillRow::from)
                .collect();

            print_one(
                cli.json,
                BillsReport {
                    order: &order,
                    report: &report,
                    bills,
                },
                |r| {
                    let mut lines: Vec<String> = r
                        .bills
                        .iter()
                        .map(|row| {
                            let b = row.bill;
                            format!(
                                "{}\t{}\t{}\t{}\t{}",
                                b.state,
                                b.bill_number,
                                b.position,
                                b.name,
                                row.status_tone.as_str()
                            )
                        })
                        .collect();
                    lines.push(format!(
                        "{} bills in {} states ({} rows dropped)",
                        r.report.accepted, r.report.states, r.report.rejected
                    ));
                    lines.join("\n")
                },
            )?;
        }
        Commands::Stats { order, today } => {
            let today = match today {
                Some(raw) => parse_date(raw).ok_or_else(|| anyhow!("invalid date: {}", raw))?,
                None => chrono::Local::now().date_naive(),
            };
            let order = session.find_order(order)?;
            ingest(session, &order)?;
            let index = session.snapshot();
            let report = StatsReport {
                order: &order,
                today: today.to_string(),
                max_bucket_len: index.max_bucket_len(),
                states: state_stats(&index, today),
            };
            print_one(cli.json, report, |r| {
                r.states
                    .iter()
                    .map(|s| {
                        format!(
                            "{}\t{}\tsupport={}\toppose={}\tneutral={}\tavg_days={}",
                            s.state,
                            s.bill_count,
                            s.support,
                            s.oppose,
                            s.neutral,
                            s.avg_days_since_action
                                .map(|d| d.to_string())
                                .unwrap_or_else(|| "n/a".to_string())
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        _ => return Ok(false),
    }

    Ok(true)
}
