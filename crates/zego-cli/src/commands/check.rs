use std::path::PathBuf;

use zego_compiler::Compiler;

use super::run_common::{load_sources_or_exit, parse_modules_or_exit, print_diagnostics};

pub struct CheckArgs {
    pub module_path: Option<PathBuf>,
    pub module_text: Option<String>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let sources = load_sources_or_exit(args.module_path.as_deref(), args.module_text.as_deref());
    let modules = parse_modules_or_exit(&sources, args.color);

    let mut compiler = Compiler::new();
    compiler.compile(modules);
    let diagnostics = compiler.diagnostics();

    let is_valid = if args.strict {
        !diagnostics.has_errors() && !diagnostics.has_warnings()
    } else {
        !compiler.failed()
    };

    if !diagnostics.is_empty() {
        print_diagnostics(diagnostics, &sources, args.color);
    }
    if !is_valid {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
