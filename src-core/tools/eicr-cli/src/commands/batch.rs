// FICHIER : src-core/tools/eicr-cli/src/commands/batch.rs

use super::{load_table, print_json, read_schedule, Outcome};
use clap::Args;
use eicr::batch::evaluate_batch;
use eicr::utils::context::AppConfig;
use eicr::utils::error::AnyResult;
use eicr::{user_info, user_success, user_warn};
use std::path::PathBuf;

#[derive(Args, Clone, Debug)]
pub struct BatchArgs {
    /// Fichier JSON du tableau de relevés
    #[arg(long)]
    pub file: PathBuf,

    /// Sortie JSON brute
    #[arg(long)]
    pub json: bool,

    /// Nombre d'anomalies critiques affichées (défaut : configuration)
    #[arg(long)]
    pub preview: Option<usize>,
}

pub async fn handle(args: BatchArgs) -> AnyResult<Outcome> {
    let table = load_table()?;
    let records = read_schedule(&args.file).await?;
    let summary = evaluate_batch(&records, &table);

    if args.json {
        print_json(&summary)?;
    } else {
        user_info!(
            "BATCH_SUMMARY",
            "{}/{} circuits conformes | {} critique(s), {} avertissement(s), {} note(s)",
            summary.compliant_circuits,
            summary.total_circuits,
            summary.critical_issues,
            summary.warning_issues,
            summary.info_issues
        );

        let limit = args
            .preview
            .unwrap_or(AppConfig::get().checker.preview_limit);
        let preview = summary.critical_preview(limit);
        for issue in &preview.issues {
            user_warn!(
                "BATCH_CRITICAL",
                "{} : {} ({}) : {}",
                issue.circuit_description,
                issue.warning.title,
                issue.warning.regulation,
                issue.warning.description
            );
        }
        if preview.remaining > 0 {
            println!("   ... et {} autre(s) anomalie(s) critique(s)", preview.remaining);
        }
        if !summary.has_critical() {
            user_success!("BATCH_OK", "Aucune anomalie critique");
        }
    }

    Ok(if summary.has_critical() {
        Outcome::CriticalFound
    } else {
        Outcome::Clean
    })
}
