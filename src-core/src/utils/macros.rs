// FICHIER : src-core/src/utils/macros.rs

/// Affiche une info à l'inspecteur et logue l'événement
#[macro_export]
macro_rules! user_info {
    ($key:expr, $($arg:tt)+) => {{
        let msg = format!($($arg)+);
        println!("{}", msg);
        tracing::info!(event = "user_notification", key = $key, message = %msg);
    }};
}

/// Affiche un succès à l'inspecteur
#[macro_export]
macro_rules! user_success {
    ($key:expr, $($arg:tt)+) => {{
        let msg = format!($($arg)+);
        println!("✅ {}", msg);
        tracing::info!(event = "user_success", key = $key, message = %msg);
    }};
}

/// Affiche un avertissement (anomalies non bloquantes)
#[macro_export]
macro_rules! user_warn {
    ($key:expr, $($arg:tt)+) => {{
        let msg = format!($($arg)+);
        println!("⚠️  {}", msg);
        tracing::warn!(event = "user_warning", key = $key, message = %msg);
    }};
}

/// Affiche une erreur à l'inspecteur ET logue la structure technique enrichie
#[macro_export]
macro_rules! user_error {
    // Format enrichi : composant + action + erreur source
    (
        $key:expr,
        error = $err:expr,
        component = $comp:expr,
        action = $action:expr
    ) => {{
        eprintln!("❌ [{}] {} : {}", $comp, $key, $err);
        tracing::error!(
            service = "eicr", componentName = $comp, action = $action,
            error = ?$err, event = "user_error", key = $key
        );
    }};

    ($key:expr, $($arg:tt)+) => {{
        let msg = format!($($arg)+);
        eprintln!("❌ {}", msg);
        tracing::error!(event = "user_error", key = $key, message = %msg);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand_with_format_args() {
        let circuits = 3;
        crate::user_info!("BATCH_START", "Vérification de {} circuits", circuits);
        crate::user_success!("BATCH_DONE", "{} circuits conformes", circuits);
        crate::user_warn!("BATCH_WARN", "{} avertissement(s)", 1);
        crate::user_error!("LOAD_FAILED", "Fichier {} illisible", "schedule.json");

        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "schedule.json");
        crate::user_error!(
            "LOAD_FAILED",
            error = err,
            component = "batch",
            action = "read_schedule"
        );
    }
}
