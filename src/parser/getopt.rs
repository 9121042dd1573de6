//! In-order option scanner
//!
//! Behaves like GNU `getopt_long` for this option set: options are handled
//! one at a time in argv order, every option takes the next word as its value
//! when none is attached, non-option words are skipped, `--` ends option
//! processing, and a long option may be shortened to any unique prefix.

use crate::error::ArgsError;
use clap_lex::{ArgCursor, RawArgs};
use std::ffi::{OsStr, OsString};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppOption {
    Portmask,
    LogLevel,
    FrameSize,
    StatsInterval,
    StatsCore,
}

impl AppOption {
    pub const ALL: [AppOption; 5] = [
        AppOption::Portmask,
        AppOption::LogLevel,
        AppOption::FrameSize,
        AppOption::StatsInterval,
        AppOption::StatsCore,
    ];

    pub const fn short(self) -> Option<char> {
        match self {
            AppOption::Portmask => Some('p'),
            AppOption::LogLevel => Some('v'),
            AppOption::FrameSize => Some('J'),
            AppOption::StatsInterval | AppOption::StatsCore => None,
        }
    }

    pub const fn long(self) -> Option<&'static str> {
        match self {
            AppOption::StatsInterval => Some("stats_int"),
            AppOption::StatsCore => Some("stats_core"),
            AppOption::Portmask | AppOption::LogLevel | AppOption::FrameSize => None,
        }
    }

    /// The option as written on the command line.
    pub const fn flag(self) -> &'static str {
        match self {
            AppOption::Portmask => "-p",
            AppOption::LogLevel => "-v",
            AppOption::FrameSize => "-J",
            AppOption::StatsInterval => "--stats_int",
            AppOption::StatsCore => "--stats_core",
        }
    }

    fn from_short(flag: char) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.short() == Some(flag))
    }

    /// Exact name first, then a prefix matching exactly one long option.
    fn from_long(name: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }
        if let Some(exact) = Self::ALL.into_iter().find(|option| option.long() == Some(name)) {
            return Some(exact);
        }

        let mut candidates = Self::ALL
            .into_iter()
            .filter(|option| option.long().is_some_and(|long| long.starts_with(name)));
        match (candidates.next(), candidates.next()) {
            (Some(option), None) => Some(option),
            _ => None,
        }
    }
}

/// Yields each recognised option with its raw value, stopping at the first
/// unknown option or missing value.
pub struct Scanner {
    raw: RawArgs,
    cursor: ArgCursor,
    finished: bool,
}

impl Scanner {
    /// `argv[0]` is the program name and is skipped.
    pub fn new<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let raw = RawArgs::new(argv);
        let mut cursor = raw.cursor();
        raw.next_os(&mut cursor);
        Self {
            raw,
            cursor,
            finished: false,
        }
    }
}

/// The attached value if there is one, otherwise the next word whatever it is.
fn take_value(
    raw: &RawArgs,
    cursor: &mut ArgCursor,
    option: AppOption,
    attached: Option<&OsStr>,
) -> Result<(AppOption, OsString), ArgsError> {
    attached
        .or_else(|| raw.next_os(cursor))
        .map(|value| (option, value.to_os_string()))
        .ok_or_else(|| ArgsError::MissingArgument(option.flag().to_string()))
}

impl Iterator for Scanner {
    type Item = Result<(AppOption, OsString), ArgsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some(arg) = self.raw.next(&mut self.cursor) else {
                self.finished = true;
                return None;
            };

            if arg.is_escape() {
                self.finished = true;
                return None;
            }

            if let Some((name, attached)) = arg.to_long() {
                let result = match name {
                    Ok(name) => match AppOption::from_long(name) {
                        Some(option) => take_value(&self.raw, &mut self.cursor, option, attached),
                        None => Err(ArgsError::UnknownOption(format!("--{name}"))),
                    },
                    Err(name) => Err(ArgsError::UnknownOption(format!(
                        "--{}",
                        name.to_string_lossy()
                    ))),
                };
                if result.is_err() {
                    self.finished = true;
                }
                return Some(result);
            }

            if let Some(mut shorts) = arg.to_short() {
                let result = match shorts.next_flag() {
                    Some(Ok(flag)) => match AppOption::from_short(flag) {
                        Some(option) => {
                            // Every option takes a value, so the rest of the word is it.
                            let attached = shorts.next_value_os().filter(|value| !value.is_empty());
                            take_value(&self.raw, &mut self.cursor, option, attached)
                        }
                        None => Err(ArgsError::UnknownOption(format!("-{flag}"))),
                    },
                    Some(Err(rest)) => Err(ArgsError::UnknownOption(format!(
                        "-{}",
                        rest.to_string_lossy()
                    ))),
                    None => continue,
                };
                if result.is_err() {
                    self.finished = true;
                }
                return Some(result);
            }

            tracing::debug!(
                "Ignoring non-option argument '{}'",
                arg.to_value_os().to_string_lossy()
            );
        }
    }
}
