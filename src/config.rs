//! Application configuration record
//!
//! The record is built once by [`crate::parser::parse`] and never mutated
//! afterwards. It can be passed around by value, or installed process-wide
//! with [`install`] for readers that have no other way to reach it.

use crate::error::ArgsError;
use std::{fmt, sync::OnceLock, time::Duration};

/// Maximum frame size used when `-J` is not supplied (Ethernet max frame length).
pub const DEFAULT_MAX_FRAME_SIZE: u32 = 1518;

/// Statistics reporting is disabled by default.
pub const DEFAULT_STATS_INTERVAL: i32 = 0;

/// No core is designated for statistics reporting by default.
pub const DEFAULT_STATS_CORE: i32 = -1;

/// Bitmask selecting the physical ports the datapath manages.
///
/// Bits are not checked against the ports actually present; that is up to
/// whoever brings the ports up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortMask(u64);

impl PortMask {
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, port: u32) -> bool {
        port < u64::BITS && self.0 & (1u64 << port) != 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Indices of the selected ports, lowest first.
    pub fn ports(self) -> impl Iterator<Item = u32> {
        (0..u64::BITS).filter(move |&port| self.contains(port))
    }
}

impl From<u64> for PortMask {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl fmt::Display for PortMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Logging verbosity. Each level also enables every lower-numbered level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum LogLevel {
    Emergency = 1,
    Alert = 2,
    Critical = 3,
    #[default]
    Error = 4,
    Warning = 5,
    Notice = 6,
    Info = 7,
    Debug = 8,
}

impl LogLevel {
    pub const MAX: LogLevel = LogLevel::Debug;

    pub const ALL: [LogLevel; 8] = [
        LogLevel::Emergency,
        LogLevel::Alert,
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Notice,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        match self {
            LogLevel::Emergency => "EMERGENCY",
            LogLevel::Alert => "ALERT",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Notice => "NOTICE",
            LogLevel::Info => "INFORMATION",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// The closest `tracing` level. The three levels above ERROR collapse into it.
    pub const fn as_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Emergency | LogLevel::Alert | LogLevel::Critical | LogLevel::Error => {
                tracing::Level::ERROR
            }
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Notice | LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
        }
    }
}

impl TryFrom<u32> for LogLevel {
    type Error = u32;

    fn try_from(ordinal: u32) -> Result<Self, u32> {
        ordinal
            .checked_sub(1)
            .and_then(|index| LogLevel::ALL.get(index as usize))
            .copied()
            .ok_or(ordinal)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Process configuration produced by argument parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    port_mask: PortMask,
    log_level: LogLevel,
    stats_interval: i32,
    stats_core: i32,
    max_frame_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port_mask: PortMask::default(),
            log_level: LogLevel::default(),
            stats_interval: DEFAULT_STATS_INTERVAL,
            stats_core: DEFAULT_STATS_CORE,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

impl AppConfig {
    pub(crate) fn new(
        port_mask: PortMask,
        log_level: LogLevel,
        stats_interval: i32,
        stats_core: i32,
        max_frame_size: u32,
    ) -> Self {
        Self {
            port_mask,
            log_level,
            stats_interval,
            stats_core,
            max_frame_size,
        }
    }

    pub fn port_mask(&self) -> PortMask {
        self.port_mask
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Statistics reporting interval in seconds, exactly as given.
    pub fn stats_interval(&self) -> i32 {
        self.stats_interval
    }

    /// Core id for statistics reporting, exactly as given (`-1` when unset).
    pub fn stats_core(&self) -> i32 {
        self.stats_core
    }

    pub fn max_frame_size(&self) -> u32 {
        self.max_frame_size
    }

    /// Reporting period, if statistics reporting is enabled.
    pub fn stats_period(&self) -> Option<Duration> {
        u64::try_from(self.stats_interval)
            .ok()
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }

    pub fn stats_core_id(&self) -> Option<u32> {
        u32::try_from(self.stats_core).ok()
    }
}

static INSTALLED: OnceLock<AppConfig> = OnceLock::new();

/// Publishes `config` as the process-wide configuration.
///
/// Only the first call succeeds; there is no reconfiguration after startup.
pub fn install(config: AppConfig) -> Result<&'static AppConfig, ArgsError> {
    INSTALLED
        .set(config)
        .map_err(|_| ArgsError::AlreadyInstalled)?;
    INSTALLED.get().ok_or(ArgsError::AlreadyInstalled)
}

/// The process-wide configuration, once [`install`] has run.
pub fn get() -> Option<&'static AppConfig> {
    INSTALLED.get()
}
