// FICHIER : src-core/src/utils/logger.rs

use crate::utils::config::AppConfig;
use std::sync::Once;
use tracing_appender::rolling;
use tracing_subscriber::{
    filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

// Sécurité pour éviter la double initialisation (crash fréquent en tests)
static INIT: Once = Once::new();

/// Filtre de niveau des deux sorties (console et fichier JSON) :
/// `RUST_LOG` prioritaire, sinon `log_level` de la configuration.
pub fn level_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

pub fn init_logging(config: &AppConfig) {
    INIT.call_once(|| {
        // =========================================================================
        // LAYER 1 : FICHIER JSON (optionnel, rotation quotidienne)
        // =========================================================================
        let file_layer = config.log_dir.as_ref().and_then(|log_dir| {
            if let Err(e) = std::fs::create_dir_all(log_dir) {
                eprintln!("⚠️ [Logger] Dossier de logs inaccessible {:?} : {}", log_dir, e);
                return None;
            }
            let file_appender = rolling::daily(log_dir, "eicr.log");
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(level_filter(config)),
            )
        });

        // =========================================================================
        // LAYER 2 : CONSOLE (stderr, pour l'inspecteur)
        // =========================================================================
        // Les macros user_* affichent déjà leur message : on ne le répète pas.
        let anti_double_filter =
            filter_fn(|metadata| !metadata.fields().iter().any(|f| f.name() == "event"));

        let console_layer = fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(level_filter(config))
            .with_filter(anti_double_filter);

        // =========================================================================
        // ASSEMBLAGE ET INITIALISATION
        // =========================================================================
        let registry = tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer);

        if registry.try_init().is_err() {
            tracing::warn!("[Logger] Ré-initialisation ignorée (subscriber global déjà actif).");
            return;
        }

        tracing::debug!(
            log_dir = ?config.log_dir,
            level = %config.log_level,
            "Logger initialisé"
        );
    });
}
