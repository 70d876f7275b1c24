mod main_runtime;

use anyhow::Context;
use clap::Parser;
use gradecast::api::start_api_server;
use gradecast::cli::script::{self, ScriptFailure, EXIT_ENVIRONMENT};
use gradecast::cli::{Cli, Commands};
use gradecast::ml::{ModelKind, Predictor};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command() {
        Commands::Predict { model_dir } => {
            let code = run_predict(&cli.config, model_dir.as_deref());
            std::process::exit(code);
        }
        Commands::Serve {
            host,
            port,
            model_dir,
        } => run_serve(&cli.config, host, port, model_dir).await?,
    }

    Ok(())
}

/// stdin -> stdout prediction. Returns the process exit code.
fn run_predict(config_dir: &str, model_dir: Option<&Path>) -> i32 {
    main_runtime::init_script_logging();

    let config = match main_runtime::load_config(config_dir) {
        Ok(config) => config,
        Err(e) => {
            return script::report(
                &mut io::stderr(),
                &ScriptFailure {
                    code: EXIT_ENVIRONMENT,
                    message: format!("failed to load configuration: {e}"),
                },
            );
        }
    };

    let predictor = Predictor::new(config.models.store(model_dir));
    let mut out = io::stdout().lock();
    let code = script::run(io::stdin().lock(), &mut out, &mut io::stderr(), &predictor);
    let _ = out.flush();
    code
}

async fn run_serve(
    config_dir: &str,
    host: Option<String>,
    port: Option<u16>,
    model_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = main_runtime::load_config(config_dir).context("failed to load configuration")?;
    let _log_guard = main_runtime::init_logging(&config.logging);

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let predictor = Predictor::new(config.models.store(model_dir.as_deref()));

    info!(dir = %predictor.store().dir().display(), "serving models");
    for kind in [ModelKind::Simple, ModelKind::Multi] {
        if !predictor.store().is_available(kind) {
            warn!(
                "{} artifact missing: {}",
                kind,
                predictor.store().path_for(kind).display()
            );
        }
    }

    start_api_server(&host, port, predictor)
        .await
        .context("API server failed")?;
    Ok(())
}
