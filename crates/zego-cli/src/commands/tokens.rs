use std::path::PathBuf;

use serde_json::json;
use zego_compiler::lexer::{Token, TokenKind, lex};

use super::run_common::{fail, load_sources_or_exit};

pub struct TokensArgs {
    pub module_path: Option<PathBuf>,
    pub module_text: Option<String>,
    pub raw: bool,
    pub json: bool,
}

pub fn run(args: TokensArgs) {
    let sources = load_sources_or_exit(args.module_path.as_deref(), args.module_text.as_deref());

    let mut rows = Vec::new();
    let mut halted = None;
    for source in sources.iter() {
        let tokens = lex(source.name(), source.as_str());
        let illegal = tokens
            .last()
            .filter(|t| t.kind == TokenKind::Illegal && halted.is_none());
        if let Some(last) = illegal {
            halted = Some(format!(
                "{}:{}:{}: {}",
                source.name(),
                last.line,
                last.column,
                last.text
            ));
        }
        let visible = tokens.iter().filter(|t| args.raw || !t.kind.is_trivia());

        if args.json {
            rows.extend(visible.map(|t| token_json(source.name(), t)));
            continue;
        }
        if sources.len() > 1 {
            println!("# {}", source.name());
        }
        for token in visible {
            println!("{}:{}\t{}\t{:?}", token.line, token.column, token.kind, token.text);
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&rows) {
            Ok(out) => println!("{}", out),
            Err(e) => fail(e),
        }
    }
    if let Some(message) = halted {
        fail(message);
    }
}

fn token_json(file: &str, token: &Token<'_>) -> serde_json::Value {
    json!({
        "file": file,
        "kind": token.kind.name(),
        "text": token.text,
        "line": token.line,
        "column": token.column,
        "offset": token.offset(),
    })
}
