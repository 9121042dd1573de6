use ovdk_args::{config, logging, parser, AppConfig, Severity};
use std::{ffi::OsString, process::ExitCode};

/// Exit status used when the caller rejects a soft (frame size) error.
const SOFT_ERROR_STATUS: u8 = 2;

fn report(config: &AppConfig) {
    let ports: Vec<String> = config.port_mask().ports().map(|p| p.to_string()).collect();
    tracing::info!(
        "Using {} port(s) [{}] from portmask {}",
        config.port_mask().count(),
        ports.join(", "),
        config.port_mask()
    );
    tracing::info!(
        "Log level {} ({}), max frame size {} bytes",
        config.log_level().ordinal(),
        config.log_level(),
        config.max_frame_size()
    );

    match (config.stats_period(), config.stats_core_id()) {
        (Some(period), Some(core)) => {
            tracing::info!("Reporting stats every {:?} on core {}", period, core)
        }
        (Some(period), None) => tracing::info!("Reporting stats every {:?}", period),
        (None, _) => tracing::info!("Stats reporting disabled"),
    }
}

fn main() -> ExitCode {
    let argv: Vec<OsString> = std::env::args_os().collect();
    let program = parser::program_name(&argv);

    // Fatal errors exit inside parse_app_args after printing usage.
    let config = match parser::parse_app_args(argv) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{program}: {err}");
            return match err.severity() {
                Severity::Fatal => ExitCode::FAILURE,
                Severity::Soft => ExitCode::from(SOFT_ERROR_STATUS),
            };
        }
    };

    logging::init(config.log_level());

    let config = match config::install(config) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    if config.port_mask().is_empty() {
        parser::print_usage(&program);
        tracing::error!("No ports selected; a non-zero portmask (-p) is required");
        return ExitCode::FAILURE;
    }

    report(config);
    ExitCode::SUCCESS
}
