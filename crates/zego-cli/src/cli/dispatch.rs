//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::query::QueryArgs;
use crate::commands::tokens::TokensArgs;
use crate::commands::tree::TreeArgs;

pub struct TokensParams {
    pub module_path: Option<PathBuf>,
    pub module_text: Option<String>,
    pub raw: bool,
    pub json: bool,
}

impl TokensParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            module_path: m.get_one::<PathBuf>("module_path").cloned(),
            module_text: m.get_one::<String>("module_text").cloned(),
            raw: m.get_flag("raw"),
            json: m.get_flag("json"),
        }
    }
}

impl From<TokensParams> for TokensArgs {
    fn from(p: TokensParams) -> Self {
        Self {
            module_path: p.module_path,
            module_text: p.module_text,
            raw: p.raw,
            json: p.json,
        }
    }
}

pub struct AstParams {
    pub module_path: Option<PathBuf>,
    pub module_text: Option<String>,
    pub json: bool,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            module_path: m.get_one::<PathBuf>("module_path").cloned(),
            module_text: m.get_one::<String>("module_text").cloned(),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            module_path: p.module_path,
            module_text: p.module_text,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub module_path: Option<PathBuf>,
    pub module_text: Option<String>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            module_path: m.get_one::<PathBuf>("module_path").cloned(),
            module_text: m.get_one::<String>("module_text").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            module_path: p.module_path,
            module_text: p.module_text,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TreeParams {
    pub module_path: Option<PathBuf>,
    pub module_text: Option<String>,
    pub rules: bool,
    pub color: ColorChoice,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            module_path: m.get_one::<PathBuf>("module_path").cloned(),
            module_text: m.get_one::<String>("module_text").cloned(),
            rules: m.get_flag("rules"),
            color: parse_color(m),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            module_path: p.module_path,
            module_text: p.module_text,
            rules: p.rules,
            color: p.color.should_colorize(),
        }
    }
}

pub struct QueryParams {
    pub module_path: Option<PathBuf>,
    pub module_text: Option<String>,
    pub eval: String,
    pub json: bool,
    pub color: ColorChoice,
}

impl QueryParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            module_path: m.get_one::<PathBuf>("module_path").cloned(),
            module_text: m.get_one::<String>("module_text").cloned(),
            eval: m.get_one::<String>("eval").cloned().unwrap_or_default(),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<QueryParams> for QueryArgs {
    fn from(p: QueryParams) -> Self {
        Self {
            module_path: p.module_path,
            module_text: p.module_text,
            eval: p.eval,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
