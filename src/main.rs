//! `lookql`: parse LOOK statements into JSON for the execution engine.
//!
//! ```text
//! lookql [--config <file>] [--tokens] <query | ->
//! lookql [--config <file>]                 交互模式
//! ```

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use lookql::config::{CliConfig, DEFAULT_CONFIG_FILE};
use lookql::{Scanner, Statement, TokenKind};

#[derive(ClapParser, Debug, PartialEq)]
#[command(name = "lookql")]
#[command(about = "Parse LOOK statements into JSON for the execution engine")]
#[command(version)]
struct Options {
    /// JSON config file (defaults to ./lookql.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the token stream instead of the statement
    #[arg(long)]
    tokens: bool,

    /// The query, or `-` to read it from stdin. Starts the REPL when omitted.
    query: Option<String>,
}

fn load_config(path: Option<&Path>) -> Result<CliConfig> {
    if let Some(path) = path {
        return CliConfig::from_json_file(path).context("loading --config file");
    }
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if !default_path.exists() {
        debug!("no {} found, using default configuration", DEFAULT_CONFIG_FILE);
        return Ok(CliConfig::default());
    }
    match CliConfig::from_json_file(default_path) {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!("{}, using default configuration", e);
            Ok(CliConfig::default())
        }
    }
}

fn render(stmt: &Statement, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(stmt)
    } else {
        serde_json::to_string(stmt)
    };
    json.context("serializing statement")
}

fn print_tokens(query: &str) {
    for token in Scanner::new(query).filter(|t| t.kind != TokenKind::Whitespace) {
        println!("{:<12} {:<16} {}", format!("{:?}", token.kind), format!("{:?}", token.text), token.span);
    }
}

fn run_once(query: &str, options: &Options, config: &CliConfig) -> Result<()> {
    if options.tokens {
        print_tokens(query);
        return Ok(());
    }
    let stmt = lookql::parse(query).context("parse failed")?;
    println!("{}", render(&stmt, config.pretty)?);
    Ok(())
}

fn repl(config: &CliConfig) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    if let Some(path) = &config.history_file {
        if let Err(e) = editor.load_history(path) {
            debug!("no history loaded from {}: {}", path.display(), e);
        }
    }

    println!("LOOK statement parser. :tokens <query> shows tokens, :quit exits.");
    loop {
        match editor.readline(&config.prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line)?;

                if line == ":quit" || line == ":q" {
                    break;
                }
                if let Some(query) = line.strip_prefix(":tokens") {
                    print_tokens(query.trim());
                    continue;
                }
                match lookql::parse(line) {
                    Ok(stmt) => println!("{}", render(&stmt, config.pretty)?),
                    Err(e) => println!("parse error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &config.history_file {
        editor
            .save_history(path)
            .with_context(|| format!("saving history to {}", path.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lookql=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let options = Options::parse();
    let config = load_config(options.config.as_deref())?;

    match options.query.as_deref() {
        None => repl(&config),
        Some("-") => {
            let mut query = String::new();
            io::stdin()
                .read_to_string(&mut query)
                .context("reading query from stdin")?;
            run_once(&query, &options, &config)
        }
        Some(query) => run_once(query, &options, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let options =
            Options::try_parse_from(["lookql", "--tokens", "--config", "x.json", "LOOK"]).unwrap();
        assert_eq!(
            options,
            Options {
                config: Some(PathBuf::from("x.json")),
                tokens: true,
                query: Some("LOOK".to_string()),
            }
        );

        let options = Options::try_parse_from(["lookql"]).unwrap();
        assert_eq!(options.query, None);
        assert!(!options.tokens);

        let options = Options::try_parse_from(["lookql", "-"]).unwrap();
        assert_eq!(options.query.as_deref(), Some("-"));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(Options::try_parse_from(["lookql", "--config"]).is_err());
        assert!(Options::try_parse_from(["lookql", "a", "b"]).is_err());
        assert!(Options::try_parse_from(["lookql", "--verbose"]).is_err());
    }

    #[test]
    fn test_render_compact() {
        let stmt = lookql::parse("LOOK (a'int): CONDITION [a.f EQ \"x\"] AT [1:1 - 2:2]").unwrap();
        let json = render(&stmt, false).unwrap();
        assert!(json.contains(r#""value":{"type":"text","value":"x"}"#));
        assert!(json.contains(r#""time_begin":"1:1""#));
    }
}
