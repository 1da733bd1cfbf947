mod commands;
mod render;

use clap::{Parser, Subcommand};
use folio_core::{ErrorKind, ExitCode, FolioError, FolioResult};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    version,
    about = "Config-driven GitHub portfolio for the terminal",
    arg_required_else_help = true
)]
struct Cli {
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[arg(long, global = true)]
    json: bool,

    #[arg(long, global = true)]
    no_color: bool,

    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a starter folio.toml
    Init,
    /// Validate the configuration and report per-check health
    Check,
    /// Fetch the remote profile and render the portfolio
    Show,
}

#[derive(Debug, Clone)]
struct GlobalOptions {
    config: Option<PathBuf>,
    api_url: Option<String>,
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    configure_logging(cli.debug, cli.json, cli.no_color);

    let globals = GlobalOptions {
        config: cli.config,
        api_url: cli.api_url,
        json: cli.json,
    };

    let result = run_command(cli.command, &globals);

    let exit = match result {
        Ok(code) => code,
        Err(error) => {
            render_error(&error, globals.json);
            error.exit_code()
        }
    };

    std::process::exit(exit.as_i32());
}

fn configure_logging(debug: bool, json: bool, no_color: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(!no_color)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run_command(command: Command, globals: &GlobalOptions) -> FolioResult<ExitCode> {
    match command {
        Command::Init => commands::config::cmd_init(globals),
        Command::Check => commands::config::cmd_check(globals),
        Command::Show => commands::show::cmd_show(globals),
    }
}

fn config_target(globals: &GlobalOptions) -> FolioResult<PathBuf> {
    if let Some(path) = &globals.config {
        return absolutize(path);
    }

    let cwd = std::env::current_dir().map_err(|err| {
        FolioError::io(format!(
            "failed to resolve current directory for default config: {err}"
        ))
    })?;

    Ok(cwd.join("folio.toml"))
}

fn api_url(globals: &GlobalOptions) -> &str {
    globals
        .api_url
        .as_deref()
        .unwrap_or(folio_api::DEFAULT_API_URL)
}

fn absolutize(path: &Path) -> FolioResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(|err| {
        FolioError::io(format!(
            "failed to resolve current directory for path: {err}"
        ))
    })?;

    Ok(cwd.join(path))
}

/// Full-page titles for the error kinds a viewer can hit; plain CLI errors
/// (usage, io) stay single-line.
fn error_page(kind: ErrorKind) -> Option<(&'static str, &'static str)> {
    match kind {
        ErrorKind::RateLimit => Some((
            "Too many requests",
            "GitHub's API rate limit was hit; the message below says when it resets.",
        )),
        ErrorKind::NotFound => Some((
            "GitHub user not found",
            "Check the github.username value in your config.",
        )),
        ErrorKind::Config => Some((
            "Invalid configuration",
            "The config file is missing required fields.",
        )),
        ErrorKind::Api => Some((
            "Something went wrong",
            "The GitHub API request failed; the message below has the details.",
        )),
        ErrorKind::Usage | ErrorKind::Io => None,
    }
}

fn render_error(error: &FolioError, json_output: bool) {
    if json_output {
        let payload = json!({
            "ok": false,
            "error": {
                "kind": error.kind,
                "message": &error.message,
            }
        });
        let serialized = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| {
            "{\"ok\":false,\"error\":{\"kind\":\"io\",\"message\":\"failed to serialize error\"}}".to_string()
        });
        eprintln!("{serialized}");
    } else if let Some((title, subtitle)) = error_page(error.kind) {
        eprintln!("{title}");
        eprintln!("{subtitle}");
        eprintln!();
        eprintln!("error: {}", error.message);
    } else {
        eprintln!("error: {}", error.message);
    }
}

fn print_json<T: Serialize>(value: &T) -> FolioResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| FolioError::io(format!("failed to render JSON output: {err}")))?;
    println!("{rendered}");
    Ok(())
}
