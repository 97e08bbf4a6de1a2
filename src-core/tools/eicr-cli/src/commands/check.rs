// FICHIER : src-core/tools/eicr-cli/src/commands/check.rs

use super::{load_table, print_json, print_result, read_record, Outcome};
use clap::Args;
use eicr::checker::{check_regulation_compliance, Severity};
use eicr::utils::error::AnyResult;
use std::path::PathBuf;

#[derive(Args, Clone, Debug)]
pub struct CheckArgs {
    /// Fichier JSON du relevé
    #[arg(long)]
    pub file: PathBuf,

    /// Sortie JSON brute
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(args: CheckArgs) -> AnyResult<Outcome> {
    let table = load_table()?;
    let record = read_record(&args.file).await?;
    let result = check_regulation_compliance(&record, &table);

    if args.json {
        print_json(&result)?;
    } else {
        print_result(&record.label(), &result);
    }

    Ok(match result.highest_severity() {
        Some(Severity::Critical) => Outcome::CriticalFound,
        _ => Outcome::Clean,
    })
}
