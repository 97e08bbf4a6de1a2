// FICHIER : src-core/tools/eicr-cli/src/main.rs

use clap::{Parser, Subcommand};

mod commands;

use commands::Outcome;
use eicr::{
    user_error, user_info,
    utils::context::{self, AppConfig},
};

#[derive(Parser)]
#[command(name = "eicr")]
#[command(about = "Vérification BS 7671 des relevés d'essais de circuits", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Vérifie un relevé de circuit isolé
    Check(commands::check::CheckArgs),

    /// Valide un tableau complet de relevés
    Batch(commands::batch::BatchArgs),

    /// Empreinte du tableau (invalidation de cache côté appelant)
    Hash(commands::hash::HashArgs),

    /// Liste les règles de la table active
    Rules(commands::rules::RulesArgs),

    /// Prévisualise un auto-remplissage par preset avant approbation
    Autofill(commands::autofill::AutofillArgs),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // 1. Configuration (CRITIQUE)
    if let Err(e) = AppConfig::init() {
        eprintln!("❌ CRITICAL ERROR: Impossible d'initialiser la configuration.");
        eprintln!("   Détails : {}", e);
        std::process::exit(1);
    }

    // 2. Logger
    context::init_logging(AppConfig::get());
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Démarrage du CLI");

    // 3. Parsing & Dispatch
    let cli = Cli::parse();

    match execute_command(cli.command).await {
        Ok(Outcome::Clean) => {}
        Ok(Outcome::CriticalFound) => {
            user_info!("CRITICAL_FOUND", "Anomalies critiques détectées (code de sortie 2)");
            std::process::exit(2);
        }
        Err(e) => {
            user_error!("CMD_FAIL", "{:#}", e);
            std::process::exit(1);
        }
    }
}

async fn execute_command(cmd: Commands) -> eicr::utils::error::AnyResult<Outcome> {
    match cmd {
        Commands::Check(args) => commands::check::handle(args).await,
        Commands::Batch(args) => commands::batch::handle(args).await,
        Commands::Hash(args) => commands::hash::handle(args).await,
        Commands::Rules(args) => commands::rules::handle(args).await,
        Commands::Autofill(args) => commands::autofill::handle(args).await,
    }
}
