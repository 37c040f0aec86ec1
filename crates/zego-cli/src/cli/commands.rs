//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! Every command reads modules the same way and accepts `-v`.

use clap::Command;

use super::args::*;

/// Module input and verbosity, shared by every command.
fn with_common_args(cmd: Command) -> Command {
    cmd.arg(module_path_arg())
        .arg(module_text_arg())
        .arg(verbose_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("zego")
        .about("Inspect, check and query zego policy modules")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(tokens_command())
        .subcommand(ast_command())
        .subcommand(check_command())
        .subcommand(tree_command())
        .subcommand(query_command())
}

/// Show the token stream of a module.
pub fn tokens_command() -> Command {
    let cmd = Command::new("tokens")
        .about("Show the tokens of a module")
        .override_usage(
            "\
  zego tokens <PATH>
  zego tokens -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  zego tokens policy.zego            # significant tokens
  zego tokens policy.zego --raw      # include whitespace and comments
  zego tokens -q 'a := 1 + 2'        # inline module"#,
        )
        .arg(raw_arg())
        .arg(json_arg());

    with_common_args(cmd)
}

/// Show the parsed modules.
pub fn ast_command() -> Command {
    let cmd = Command::new("ast")
        .about("Show the parsed modules")
        .override_usage(
            "\
  zego ast <PATH>
  zego ast -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  zego ast policy.zego               # rendered module
  zego ast policies/ --json          # every .zego file, as JSON
  cat policy.zego | zego ast -       # from stdin"#,
        )
        .arg(json_arg())
        .arg(color_arg());

    with_common_args(cmd)
}

/// Validate modules.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate modules")
        .override_usage(
            "\
  zego check <PATH>
  zego check -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  zego check policy.zego             # syntax and references
  zego check policies/ --strict      # warnings fail too
  zego check -q 'package p'          # inline module"#,
        )
        .arg(strict_arg())
        .arg(color_arg());

    with_common_args(cmd)
}

/// Show the namespace tree of compiled modules.
pub fn tree_command() -> Command {
    let cmd = Command::new("tree")
        .about("Show the namespace tree of compiled modules")
        .override_usage(
            "\
  zego tree <PATH> [--rules]
  zego tree -q <TEXT> [--rules]",
        )
        .after_help(
            r#"EXAMPLES:
  zego tree policies/                # modules per package
  zego tree policies/ --rules        # rules per package"#,
        )
        .arg(rules_arg())
        .arg(color_arg());

    with_common_args(cmd)
}

/// Compile an ad-hoc query against modules.
pub fn query_command() -> Command {
    let cmd = Command::new("query")
        .about("Compile an ad-hoc query against modules")
        .override_usage(
            "\
  zego query -e <QUERY> [PATH]
  zego query -e <QUERY> -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  zego query -e 'zego.p.allow == true' policies/
  zego query -e 'x := input.a + 1'   # no modules"#,
        )
        .arg(eval_arg())
        .arg(json_arg())
        .arg(color_arg());

    with_common_args(cmd)
}
