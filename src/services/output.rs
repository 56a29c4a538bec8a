use crate::domain::models::JsonOut;
use serde::Serialize;

#[derive(Serialize)]
struct JsonErr<'a> {
    ok: bool,
    error: &'a str,
}

fn emit<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok: true, data })?
    );
    Ok(())
}

/// Rows as one JSON envelope, or one text line per row.
pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        return emit(data);
    }
    for d in data {
        println!("{}", row(d));
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    render: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        return emit(data);
    }
    println!("{}", render(&data));
    Ok(())
}

/// JSON envelope for a run-level failure. Text mode leaves reporting to the
/// returned error.
pub fn print_failure(json: bool, message: &str) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonErr {
                ok: false,
                error: message
            })?
        );
    }
    Ok(())
}
