// FICHIER : src-core/tools/eicr-cli/src/commands/rules.rs

use super::{load_table, print_json, Outcome};
use clap::Args;
use eicr::user_info;
use eicr::utils::error::AnyResult;

#[derive(Args, Clone, Debug)]
pub struct RulesArgs {
    /// Sortie JSON brute
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(args: RulesArgs) -> AnyResult<Outcome> {
    let table = load_table()?;

    if args.json {
        let rules: Vec<_> = table.active_rules().collect();
        print_json(&rules)?;
        return Ok(Outcome::Clean);
    }

    user_info!(
        "RULES_TABLE",
        "{} {} : {} règle(s) active(s) sur {}",
        table.standard(),
        table.version(),
        table.active_rules().count(),
        table.len()
    );
    for rule in table.rules() {
        let state = if table.is_active(rule) { " " } else { "-" };
        println!(
            " {} {:<22} {:<8} {:<9} {}",
            state, rule.id, rule.severity, rule.regulation, rule.title
        );
    }
    Ok(Outcome::Clean)
}
