use std::path::PathBuf;

use super::run_common::{compile_or_exit, load_sources_or_exit};

pub struct TreeArgs {
    pub module_path: Option<PathBuf>,
    pub module_text: Option<String>,
    pub rules: bool,
    pub color: bool,
}

pub fn run(args: TreeArgs) {
    let sources = load_sources_or_exit(args.module_path.as_deref(), args.module_text.as_deref());
    let compiler = compile_or_exit(&sources, args.color);

    if args.rules {
        println!("{}", compiler.rule_tree());
    } else {
        println!("{}", compiler.module_tree());
    }
}
