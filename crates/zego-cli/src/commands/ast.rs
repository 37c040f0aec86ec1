use std::path::PathBuf;

use serde_json::json;

use super::run_common::{fail, load_sources_or_exit, parse_modules_or_exit};

pub struct AstArgs {
    pub module_path: Option<PathBuf>,
    pub module_text: Option<String>,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let sources = load_sources_or_exit(args.module_path.as_deref(), args.module_text.as_deref());
    let modules = parse_modules_or_exit(&sources, args.color);

    if args.json {
        let out: Vec<_> = modules
            .iter()
            .map(|(file, module)| json!({ "file": file, "module": module }))
            .collect();
        match serde_json::to_string_pretty(&out) {
            Ok(out) => println!("{}", out),
            Err(e) => fail(e),
        }
        return;
    }

    for (i, (file, module)) in modules.iter().enumerate() {
        if i > 0 {
            println!();
        }
        if modules.len() > 1 {
            println!("# {}", file);
        }
        println!("{}", module);
    }
}
