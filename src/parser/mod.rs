//! Application argument parsing
//!
//! The platform runtime strips its own arguments before this module runs, so
//! `argv` holds the program name followed by application options only.

pub mod convert;
pub mod getopt;

#[cfg(test)]
mod tests;

use crate::config::{AppConfig, LogLevel, PortMask, DEFAULT_MAX_FRAME_SIZE};
use crate::error::{ArgsError, ValueError};
use clap::{CommandFactory, Parser};
use getopt::{AppOption, Scanner};
use std::{
    convert::Infallible,
    ffi::{OsStr, OsString},
    process,
};

const REQUIRED_HEADING: &str = "Required Arguments";
const OPTIONAL_HEADING: &str = "Optional Arguments";
const DEFAULT_PROGRAM_NAME: &str = "ovdk";

/// Application option grammar.
///
/// Every option takes exactly one value, which may itself start with `-`.
/// Repeating an option replaces the earlier value. [`parse`] fills this in
/// with [`Scanner`] so that options are validated strictly in argv order; the
/// clap derive supplies the usage text.
#[derive(Parser, Debug, Default, Clone)]
#[command(
    about = "Intel DPDK vSwitch datapath application",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true,
    infer_long_args = true
)]
pub struct Args {
    /// Hex bitmask of phy ports to use
    #[arg(
        short = 'p',
        value_name = "PORTMASK",
        value_parser = convert::parse_portmask,
        allow_hyphen_values = true,
        help_heading = REQUIRED_HEADING
    )]
    pub portmask: Option<PortMask>,

    #[arg(
        short = 'v',
        value_name = "LOG_LEVEL",
        value_parser = convert::parse_log_level,
        allow_hyphen_values = true,
        help = format!("Verbosity of logging (default: {})", LogLevel::default().ordinal()),
        help_heading = OPTIONAL_HEADING
    )]
    pub log_level: Option<LogLevel>,

    /// Print stats every INT seconds (default: 0, disabled)
    #[arg(
        long = "stats_int",
        value_name = "INT",
        value_parser = parse_stats_interval,
        allow_hyphen_values = true,
        help_heading = OPTIONAL_HEADING
    )]
    pub stats_interval: Option<i32>,

    /// Id of core used to print stats
    #[arg(
        long = "stats_core",
        value_name = "CORE",
        value_parser = parse_stats_core,
        allow_hyphen_values = true,
        help_heading = OPTIONAL_HEADING
    )]
    pub stats_core: Option<i32>,

    #[arg(
        short = 'J',
        value_name = "FRAME_SIZE",
        value_parser = convert::parse_frame_size,
        allow_hyphen_values = true,
        help = format!("Maximum frame size (default: {DEFAULT_MAX_FRAME_SIZE})"),
        help_heading = OPTIONAL_HEADING
    )]
    pub max_frame_size: Option<u32>,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        let defaults = AppConfig::default();
        AppConfig::new(
            args.portmask.unwrap_or(defaults.port_mask()),
            args.log_level.unwrap_or(defaults.log_level()),
            args.stats_interval.unwrap_or(defaults.stats_interval()),
            args.stats_core.unwrap_or(defaults.stats_core()),
            args.max_frame_size.unwrap_or(defaults.max_frame_size()),
        )
    }
}

impl Args {
    /// Validates `value` for `option` and stores it, replacing any earlier value.
    ///
    /// Values that are not valid UTF-8 are checked in lossy form, so they are
    /// rejected by the option's own validation.
    pub fn apply(&mut self, option: AppOption, value: &OsStr) -> Result<(), ValueError> {
        let value = value.to_string_lossy();
        match option {
            AppOption::Portmask => self.portmask = Some(convert::parse_portmask(&value)?),
            AppOption::LogLevel => self.log_level = Some(convert::parse_log_level(&value)?),
            AppOption::FrameSize => {
                self.max_frame_size = Some(convert::parse_frame_size(&value)?)
            }
            AppOption::StatsInterval => {
                self.stats_interval = Some(lenient_int(option.flag(), &value))
            }
            AppOption::StatsCore => self.stats_core = Some(lenient_int(option.flag(), &value)),
        }
        Ok(())
    }
}

fn parse_stats_interval(arg: &str) -> Result<i32, Infallible> {
    Ok(lenient_int(AppOption::StatsInterval.flag(), arg))
}

fn parse_stats_core(arg: &str) -> Result<i32, Infallible> {
    Ok(lenient_int(AppOption::StatsCore.flag(), arg))
}

fn lenient_int(option: &str, arg: &str) -> i32 {
    let (value, exact) = convert::atoi(arg);
    if !exact {
        tracing::warn!("{} value '{}' is not a plain integer, using {}", option, arg, value);
    }
    value
}

/// Parses application arguments into a configuration record.
///
/// `argv[0]` is the program name. Options are validated in the order they
/// appear and parsing stops at the first bad one. Non-option words are
/// ignored and `--` ends option processing. This never exits the process;
/// use [`ArgsError::severity`] to decide what to do with a failure.
pub fn parse<I, T>(argv: I) -> Result<AppConfig, ArgsError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = Args::default();
    for item in Scanner::new(argv) {
        let (option, value) = item?;
        args.apply(option, &value)?;
    }
    tracing::debug!("Parsed application arguments: {:?}", args);

    let config = AppConfig::from(args);
    tracing::debug!(
        "Configuration: portmask={}, log_level={}, stats_interval={}, stats_core={}, max_frame_size={}",
        config.port_mask(),
        config.log_level().ordinal(),
        config.stats_interval(),
        config.stats_core(),
        config.max_frame_size()
    );
    Ok(config)
}

/// Parses application arguments the way the datapath always has.
///
/// Usage is printed on any error. Fatal errors then terminate the process
/// with a failure status; a bad frame size is returned to the caller instead.
pub fn parse_app_args<I, T>(argv: I) -> Result<AppConfig, ArgsError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let program = program_name(&argv);

    parse(argv).map_err(|err| {
        print_usage(&program);
        if err.is_fatal() {
            eprintln!("{program}: {err}");
            process::exit(1);
        }
        err
    })
}

/// The program name from `argv[0]`, or a fixed fallback if it is missing.
pub fn program_name(argv: &[OsString]) -> String {
    argv.first()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string())
}

/// Renders the help text for `program_name`.
pub fn usage(program_name: &str) -> String {
    let template = format!(
        "{program_name}: {{about}}\n\n{{usage-heading}} {{usage}}\n\n{{all-args}}\n\n{{after-help}}"
    );
    let mut command = Args::command()
        .bin_name(program_name)
        .override_usage(format!("{program_name} [EAL] -- [ARG...]"))
        .help_template(template)
        .after_help(log_level_table());
    command.render_help().to_string()
}

pub fn print_usage(program_name: &str) {
    print!("{}", usage(program_name));
}

fn log_level_table() -> String {
    let levels = LogLevel::ALL
        .iter()
        .map(|level| format!("{}={}", level.ordinal(), level))
        .collect::<Vec<_>>()
        .join(" ");
    format!("Log levels:\n  {levels}\n  Higher log levels print all lower level logs\n")
}
