mod cli;
mod commands;
mod logging;

use cli::{AstParams, CheckParams, QueryParams, TokensParams, TreeParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    let Some((name, m)) = matches.subcommand() else {
        unreachable!("clap should have caught this")
    };

    logging::init(m.get_count("verbose"));

    match name {
        "tokens" => {
            let params = TokensParams::from_matches(m);
            commands::tokens::run(params.into());
        }
        "ast" => {
            let params = AstParams::from_matches(m);
            commands::ast::run(params.into());
        }
        "check" => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        "tree" => {
            let params = TreeParams::from_matches(m);
            commands::tree::run(params.into());
        }
        "query" => {
            let params = QueryParams::from_matches(m);
            commands::query::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
