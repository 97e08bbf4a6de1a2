// FICHIER : src-core/tools/eicr-cli/src/commands/autofill.rs

use super::{load_table, print_json, print_result, read_record, Outcome};
use clap::Args;
use eicr::presets::{review_preset, PresetCatalog};
use eicr::utils::context::AppConfig;
use eicr::utils::error::{anyhow, AnyResult, Context};
use eicr::{user_info, user_success, user_warn};
use std::path::PathBuf;

#[derive(Args, Clone, Debug)]
pub struct AutofillArgs {
    /// Fichier JSON du relevé à compléter
    #[arg(long)]
    pub file: PathBuf,

    /// Nom du preset (ex: ring_final, shower)
    #[arg(long)]
    pub preset: String,

    /// Sortie JSON brute (mise à jour en attente)
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(args: AutofillArgs) -> AnyResult<Outcome> {
    let table = load_table()?;
    let catalog =
        PresetCatalog::from_config(AppConfig::get()).context("Chargement des presets")?;
    let preset = catalog.get(&args.preset).ok_or_else(|| {
        anyhow!(
            "Preset inconnu '{}' (disponibles : {})",
            args.preset,
            catalog.names().join(", ")
        )
    })?;

    let current = read_record(&args.file).await?;
    let pending = review_preset(&current, preset, &table)?;

    if args.json {
        print_json(&pending)?;
    } else {
        user_info!(
            "AUTOFILL_PREVIEW",
            "{} : preset '{}', champs modifiés : {}",
            pending.merged.label(),
            preset.label,
            pending.changed_fields.join(", ")
        );
        print_result(&pending.merged.label(), &pending.result);
        if pending.requires_approval {
            user_warn!("AUTOFILL_APPROVAL", "Approbation requise avant application");
        } else {
            user_success!("AUTOFILL_READY", "Mise à jour applicable sans approbation");
        }
    }

    Ok(if pending.result.counts.critical > 0 {
        Outcome::CriticalFound
    } else {
        Outcome::Clean
    })
}
