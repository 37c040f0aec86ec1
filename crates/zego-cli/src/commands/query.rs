use std::path::PathBuf;

use zego_compiler::{Compiler, QueryCompiler, parse_query};

use super::run_common::{compile_or_exit, fail, load_sources_or_exit};

pub struct QueryArgs {
    pub module_path: Option<PathBuf>,
    pub module_text: Option<String>,
    pub eval: String,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: QueryArgs) {
    let compiler = if args.module_path.is_none() && args.module_text.is_none() {
        Compiler::new()
    } else {
        let sources =
            load_sources_or_exit(args.module_path.as_deref(), args.module_text.as_deref());
        compile_or_exit(&sources, args.color)
    };

    let query_compiler = QueryCompiler::new(&compiler);
    let body = match parse_query(&args.eval).and_then(|body| query_compiler.compile(body)) {
        Ok(body) => body,
        Err(e) => {
            // Query diagnostics carry no file; the query text is their source.
            let rendered = e
                .diagnostics()
                .printer()
                .source(&args.eval)
                .colored(args.color)
                .render();
            eprintln!("{}", rendered);
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&body) {
            Ok(out) => println!("{}", out),
            Err(e) => fail(e),
        }
        return;
    }

    for expr in &body {
        println!("{}", expr);
    }
}
