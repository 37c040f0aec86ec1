//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Module file, directory or `-` for stdin (positional).
pub fn module_path_arg() -> Arg {
    Arg::new("module_path")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .help("Module file, directory of .zego files, or - for stdin")
}

/// Inline module text (-q/--query).
pub fn module_text_arg() -> Arg {
    Arg::new("module_text")
        .short('q')
        .long("query")
        .value_name("TEXT")
        .conflicts_with("module_path")
        .help("Inline module text")
}

/// Ad-hoc query to compile against the modules (-e/--eval).
pub fn eval_arg() -> Arg {
    Arg::new("eval")
        .short('e')
        .long("eval")
        .value_name("QUERY")
        .required(true)
        .help("Query expressions to check against the modules")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Include trivia tokens (--raw).
pub fn raw_arg() -> Arg {
    Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Include whitespace, newline and comment tokens")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Print JSON instead of surface syntax (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON")
}

/// Show the rule tree instead of the module tree (--rules).
pub fn rules_arg() -> Arg {
    Arg::new("rules")
        .long("rules")
        .action(ArgAction::SetTrue)
        .help("Show the rule tree instead of the module tree")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for debug logs, -vv for trace logs)")
}
