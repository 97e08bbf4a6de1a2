// FICHIER : src-core/tools/eicr-cli/src/commands/hash.rs

use super::{load_table, read_schedule, Outcome};
use clap::Args;
use eicr::batch::schedule_hash;
use eicr::utils::error::AnyResult;
use std::path::PathBuf;

#[derive(Args, Clone, Debug)]
pub struct HashArgs {
    /// Fichier JSON du tableau de relevés
    #[arg(long)]
    pub file: PathBuf,
}

pub async fn handle(args: HashArgs) -> AnyResult<Outcome> {
    let table = load_table()?;
    let records = read_schedule(&args.file).await?;
    println!("{}", schedule_hash(&records, &table));
    Ok(Outcome::Clean)
}
