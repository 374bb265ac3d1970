//! Main entry point for the CLI command evaluating resolver functions.

use std::fs;
use std::io::IsTerminal;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context as _;
use anyhow::Result;
use anyhow::anyhow;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use tracing_subscriber::EnvFilter;

use crate::configuration::Configuration;
use crate::configuration::generate_config_schema;
use crate::context::Context;
use crate::resolver::ResolverFunction;
use crate::resolver::evaluate;
use crate::resolvers::CreateEvent;

/// Options for the resolver CLI
#[derive(Parser, Debug)]
#[command(
    name = "event-resolver",
    about = "Evaluates the createEvent resolver against an invocation context"
)]
pub(crate) struct Opt {
    /// Log level (off|error|warn|info|debug|trace).
    #[arg(
        long = "log",
        default_value = "info",
        alias = "log-level",
        env = "EVENT_RESOLVER_LOG"
    )]
    log_level: String,

    /// Configuration file location.
    #[arg(short, long = "config", env = "EVENT_RESOLVER_CONFIG_PATH")]
    config_path: Option<PathBuf>,

    /// Prints the configuration schema.
    #[arg(long)]
    schema: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs one resolver function and prints its output as JSON.
    Evaluate {
        /// The function to run (request|response).
        #[arg(long)]
        function: ResolverFunction,

        /// Context document location, `-` for stdin.
        #[arg(long)]
        context: PathBuf,
    },
}

/// This is the main resolver CLI entrypoint.
pub fn main() -> Result<()> {
    let opt = Opt::parse();

    if opt.schema {
        let schema = generate_config_schema();
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let builder = tracing_subscriber::fmt::fmt()
        .with_env_filter(
            EnvFilter::try_new(&opt.log_level).context("could not parse log configuration")?,
        )
        .with_writer(std::io::stderr);
    if std::io::stderr().is_terminal() {
        builder.init();
    } else {
        builder.json().init();
    }

    let configuration = match &opt.config_path {
        Some(path) => Configuration::from_file(path)?,
        None => Configuration::default(),
    };

    match opt.command {
        Some(Command::Evaluate { function, context }) => {
            let resolver = CreateEvent::new(&configuration.create_event);
            let context = read_context(&context)?;
            match evaluate(&resolver, function, &context) {
                Ok(output) => {
                    println!("{}", serde_json::to_string_pretty(&output)?);
                    Ok(())
                }
                Err(err) => {
                    let error = err.to_graphql_error(context.path());
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({ "error": error }))?
                    );
                    Err(anyhow!(err))
                }
            }
        }
        None => {
            Opt::command().print_help()?;
            Ok(())
        }
    }
}

fn read_context(location: &Path) -> Result<Context> {
    let raw = if location == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("could not read context from stdin")?;
        raw
    } else {
        fs::read_to_string(location)
            .with_context(|| format!("could not read context from {}", location.display()))?
    };
    Ok(Context::from_json(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_evaluate_command() {
        let opt = Opt::try_parse_from([
            "event-resolver",
            "--config",
            "resolver.yaml",
            "evaluate",
            "--function",
            "response",
            "--context",
            "-",
        ])
        .unwrap();

        assert_eq!(opt.config_path, Some(PathBuf::from("resolver.yaml")));
        match opt.command {
            Some(Command::Evaluate { function, context }) => {
                assert_eq!(function, ResolverFunction::Response);
                assert_eq!(context, PathBuf::from("-"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_function() {
        let result = Opt::try_parse_from([
            "event-resolver",
            "evaluate",
            "--function",
            "pipeline",
            "--context",
            "ctx.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        Opt::command().debug_assert();
    }

    #[test]
    fn reads_context_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context.json");
        fs::write(&path, r#"{ "arguments": { "userId": 3 } }"#).unwrap();

        let context = read_context(&path).unwrap();
        assert_eq!(context.argument("userId"), Some(&serde_json_bytes::json!(3)));
    }
}
