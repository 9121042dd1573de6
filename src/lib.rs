//! # ovdk-args - Datapath Application Arguments
//!
//! Parses and validates the application-specific arguments of a DPDK-style
//! packet-processing datapath. The platform runtime consumes its own
//! arguments first; this crate sees only what follows.
//!
//! ## Options
//!
//! - `-p PORTMASK` hex bitmask of physical ports to use
//! - `-v LOG_LEVEL` verbosity, 1 (emergency) to 8 (debug)
//! - `-J FRAME_SIZE` maximum frame size in bytes
//! - `--stats_int INT` statistics reporting interval in seconds
//! - `--stats_core CORE` core that reports statistics
//!
//! ## Example
//!
//! ```rust,no_run
//! use ovdk_args::{parser, Severity};
//!
//! let argv: Vec<String> = std::env::args().collect();
//! match parser::parse(&argv) {
//!     Ok(config) => println!("ports: {}", config.port_mask()),
//!     Err(err) if err.severity() == Severity::Soft => eprintln!("warning: {err}"),
//!     Err(err) => {
//!         parser::print_usage(&argv[0]);
//!         eprintln!("{err}");
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod parser;

pub use config::{AppConfig, LogLevel, PortMask};
pub use error::{ArgsError, Severity, ValueError};
pub use parser::{parse, parse_app_args, usage, Args};
