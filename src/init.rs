use crate::read_config::SimulationConfig;

/// Initialise `env_logger`. `RUST_LOG` garde la priorité ; sinon le niveau vient
/// de la configuration. Les logs partent sur stderr, les tables sur stdout.
pub fn init_logging(config: &SimulationConfig) {
    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    // Déjà initialisé (tests, double appel) : on garde le premier logger
    let _ = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .try_init();
}
