use super::*;
use crate::config::{DEFAULT_STATS_CORE, DEFAULT_STATS_INTERVAL};
use crate::error::{Severity, ValueError};

fn argv(args: &[&str]) -> Vec<String> {
    std::iter::once("ovdk")
        .chain(args.iter().copied())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_no_arguments_gives_defaults() {
    let config = parse(argv(&[])).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_portmask_hex() {
    for (arg, expected) in [("f", 0xf), ("0x3", 0x3), ("FF", 0xff), ("1a2b", 0x1a2b)] {
        let config = parse(argv(&["-p", arg])).unwrap();
        assert_eq!(config.port_mask().bits(), expected, "portmask {arg}");
    }
}

#[test]
fn test_portmask_attached_value() {
    let config = parse(argv(&["-p3"])).unwrap();
    assert_eq!(config.port_mask().bits(), 3);
}

#[test]
fn test_portmask_rejects_trailing_garbage() {
    for arg in ["", "fg", "0x", "3 ", "-1", "x"] {
        let err = parse(argv(&["-p", arg])).unwrap_err();
        assert!(
            matches!(&err, ArgsError::Value(ValueError::Portmask(v)) if v == arg),
            "portmask {arg:?} gave {err:?}"
        );
        assert_eq!(err.severity(), Severity::Fatal);
    }
}

#[test]
fn test_log_level_range() {
    for n in 1..=8u32 {
        let config = parse(argv(&["-v", n.to_string().as_str()])).unwrap();
        assert_eq!(config.log_level().ordinal(), n);
    }

    for arg in ["0", "9", "", "abc", "3x", "-4"] {
        let err = parse(argv(&["-v", arg])).unwrap_err();
        assert!(
            matches!(&err, ArgsError::Value(ValueError::LogLevel(v)) if v == arg),
            "log level {arg:?} gave {err:?}"
        );
        assert!(err.is_fatal());
    }
}

#[test]
fn test_frame_size() {
    let config = parse(argv(&["-J", "9000"])).unwrap();
    assert_eq!(config.max_frame_size(), 9000);

    for arg in ["0", "", "big", "12k"] {
        let err = parse(argv(&["-J", arg])).unwrap_err();
        assert!(
            matches!(&err, ArgsError::Value(ValueError::FrameSize(v)) if v == arg),
            "frame size {arg:?} gave {err:?}"
        );
        assert_eq!(err.severity(), Severity::Soft);
    }
}

#[test]
fn test_stats_options() {
    let config = parse(argv(&["--stats_int", "5", "--stats_core", "2"])).unwrap();
    assert_eq!(config.stats_interval(), 5);
    assert_eq!(config.stats_core(), 2);

    let config = parse(argv(&["--stats_int=7"])).unwrap();
    assert_eq!(config.stats_interval(), 7);
    assert_eq!(config.stats_core(), DEFAULT_STATS_CORE);
}

#[test]
fn test_stats_options_are_lenient() {
    let config = parse(argv(&["--stats_int", "abc", "--stats_core", "3cores"])).unwrap();
    assert_eq!(config.stats_interval(), 0);
    assert_eq!(config.stats_core(), 3);

    let config = parse(argv(&["--stats_int", "-10", "--stats_core", "-1"])).unwrap();
    assert_eq!(config.stats_interval(), -10);
    assert_eq!(config.stats_core(), -1);
}

#[test]
fn test_unknown_options_are_fatal() {
    for arg in ["-z", "-h", "--help", "--stats"] {
        let err = parse(argv(&["-p", "1", arg])).unwrap_err();
        assert!(
            matches!(&err, ArgsError::UnknownOption(opt) if opt == arg),
            "{arg} gave {err:?}"
        );
        assert!(err.is_fatal());
    }
}

#[test]
fn test_missing_argument_is_fatal() {
    let err = parse(argv(&["-p"])).unwrap_err();
    assert!(matches!(&err, ArgsError::MissingArgument(opt) if opt == "-p"), "{err:?}");
    assert!(err.is_fatal());

    let err = parse(argv(&["-p", "1", "--stats_core"])).unwrap_err();
    assert!(matches!(&err, ArgsError::MissingArgument(opt) if opt == "--stats_core"), "{err:?}");
}

#[test]
fn test_option_value_may_start_with_hyphen() {
    // Like getopt, "-v" is taken as the portmask value.
    let err = parse(argv(&["-p", "-v", "3"])).unwrap_err();
    assert!(matches!(&err, ArgsError::Value(ValueError::Portmask(v)) if v == "-v"), "{err:?}");
}

#[test]
fn test_repeated_option_last_wins() {
    let config = parse(argv(&["-p", "1", "-v", "2", "-p", "ff"])).unwrap();
    assert_eq!(config.port_mask().bits(), 0xff);
    assert_eq!(config.log_level(), LogLevel::Alert);
}

#[test]
fn test_first_invalid_option_is_reported() {
    let err = parse(argv(&["-J", "0", "-p", "zz"])).unwrap_err();
    assert!(matches!(err, ArgsError::Value(ValueError::FrameSize(_))), "{err:?}");

    let err = parse(argv(&["-p", "zz", "-J", "0"])).unwrap_err();
    assert!(matches!(err, ArgsError::Value(ValueError::Portmask(_))), "{err:?}");
}

#[test]
fn test_end_to_end() {
    let config = parse(argv(&["-p", "f", "-v", "3", "--stats_int", "10"])).unwrap();

    assert_eq!(config.port_mask().bits(), 15);
    assert_eq!(config.log_level().ordinal(), 3);
    assert_eq!(config.stats_interval(), 10);
    assert_eq!(config.stats_core(), DEFAULT_STATS_CORE);
    assert_eq!(config.max_frame_size(), DEFAULT_MAX_FRAME_SIZE);
    assert_ne!(config.stats_interval(), DEFAULT_STATS_INTERVAL);
}

#[test]
fn test_usage_text() {
    let text = usage("ovdk-vswitchd");

    assert!(text.starts_with("ovdk-vswitchd: "));
    assert!(text.contains("ovdk-vswitchd [EAL] -- [ARG...]"));
    assert!(text.contains("Required Arguments"));
    assert!(text.contains("Optional Arguments"));
    for flag in ["-p", "-v", "-J", "--stats_int", "--stats_core"] {
        assert!(text.contains(flag), "usage is missing {flag}");
    }
    assert!(text.contains(&format!("(default: {DEFAULT_MAX_FRAME_SIZE})")));
    assert!(text.contains("1=EMERGENCY"));
    assert!(text.contains("4=ERROR"));
    assert!(text.contains("8=DEBUG"));
}

#[test]
fn test_program_name() {
    assert_eq!(program_name(&[OsString::from("/usr/bin/ovdk")]), "/usr/bin/ovdk");
    assert_eq!(program_name(&[]), DEFAULT_PROGRAM_NAME);
}

#[test]
fn test_parsing_stops_at_first_bad_value() {
    let err = parse(argv(&["-J", "0", "-z"])).unwrap_err();
    assert!(matches!(&err, ArgsError::Value(ValueError::FrameSize(v)) if v == "0"), "{err:?}");
    assert_eq!(err.severity(), Severity::Soft);

    let err = parse(argv(&["-p", "zz", "-z"])).unwrap_err();
    assert!(matches!(&err, ArgsError::Value(ValueError::Portmask(v)) if v == "zz"), "{err:?}");

    let err = parse(argv(&["-J", "0", "extra"])).unwrap_err();
    assert_eq!(err.severity(), Severity::Soft);
}

#[test]
fn test_non_option_words_are_ignored() {
    let config = parse(argv(&["-p", "1", "extra"])).unwrap();
    assert_eq!(config.port_mask().bits(), 1);

    let config = parse(argv(&["extra", "-p", "3", "more", "-v", "5"])).unwrap();
    assert_eq!(config.port_mask().bits(), 3);
    assert_eq!(config.log_level(), LogLevel::Warning);
}

#[test]
fn test_double_dash_ends_options() {
    let config = parse(argv(&["-p", "1", "--", "x", "-z", "-v", "9"])).unwrap();
    assert_eq!(config.port_mask().bits(), 1);
    assert_eq!(config.log_level(), LogLevel::Error);

    let config = parse(argv(&["--", "-p", "1"])).unwrap();
    assert!(config.port_mask().is_empty());
}

#[test]
fn test_long_option_abbreviations() {
    let config = parse(argv(&["-p", "1", "--stats_i", "5", "--stats_c=2"])).unwrap();
    assert_eq!(config.stats_interval(), 5);
    assert_eq!(config.stats_core(), 2);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_frame_size_is_soft() {
    use std::os::unix::ffi::OsStringExt;

    let argv = vec![
        OsString::from("ovdk"),
        OsString::from("-J"),
        OsString::from_vec(b"\xff1".to_vec()),
    ];
    let err = parse(argv).unwrap_err();
    assert!(matches!(err, ArgsError::Value(ValueError::FrameSize(_))), "{err:?}");
    assert_eq!(err.severity(), Severity::Soft);
}

#[test]
fn test_soft_error_returned_by_parse_app_args() {
    let err = parse_app_args(argv(&["-p", "1", "-J", "0"])).unwrap_err();
    assert!(matches!(err, ArgsError::Value(ValueError::FrameSize(_))), "{err:?}");

    let config = parse_app_args(argv(&["-p", "1", "-J", "64"])).unwrap();
    assert_eq!(config.max_frame_size(), 64);
}

#[test]
fn test_scanner_options_match_usage_grammar() {
    let command = Args::command();
    for option in AppOption::ALL {
        assert!(
            command
                .get_arguments()
                .any(|arg| arg.get_short() == option.short() && arg.get_long() == option.long()),
            "{} missing from the usage grammar",
            option.flag()
        );
    }
    assert_eq!(command.get_arguments().count(), AppOption::ALL.len());
}
