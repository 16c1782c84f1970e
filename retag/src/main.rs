use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod context;
mod format;
mod version;

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// Retag - publish an existing image manifest under a new tag
///
/// Accepts either `<name> <source> <target>` or `<name[:tag|@digest]> <target>`.
/// No layers are transferred; only the manifest is copied.
#[derive(Parser, Debug)]
#[command(name = "retag")]
#[command(about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Image name and references
    #[arg(value_name = "ARGS")]
    args: Vec<String>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (YAML)
    #[arg(long, env = "RETAG_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Registry base URL
    #[arg(long, value_name = "URL")]
    registry: Option<String>,

    /// Token endpoint URL
    #[arg(long, value_name = "URL")]
    auth_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Registry username
    #[arg(long, env = "DOCKER_USER", hide_env_values = true)]
    username: Option<String>,

    /// Registry password or access token
    #[arg(long, env = "DOCKER_PASS", hide_env_values = true)]
    password: Option<String>,

    /// Resolve and print the operation without contacting the registry
    #[arg(long)]
    dry_run: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = format::OutputFormat::Pretty)]
    format: format::OutputFormat,

    /// Control colored output
    #[arg(long, value_enum, default_value_t = format::ColorChoice::Auto)]
    color: format::ColorChoice,

    /// Generate a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,

    /// Print version information
    #[arg(short = 'V', long)]
    version: bool,
}

impl Cli {
    fn settings(&self) -> context::Settings {
        context::Settings {
            config_path: self.config.clone(),
            registry: self.registry.clone(),
            auth_url: self.auth_url.clone(),
            timeout: self.timeout,
            color: self.color,
            format: self.format,
            verbosity: context::VerbosityLevel::from_count(self.verbose),
        }
    }
}

fn init_tracing(verbosity: context::VerbosityLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| verbosity.as_filter().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        return match format::format_output(&version::VersionInfo::current(), cli.format) {
            Ok(output) => {
                println!("{}", output);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", format::error_line(&e));
                ExitCode::FAILURE
            }
        };
    }

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    let settings = cli.settings();
    init_tracing(settings.verbosity);
    let formatter = format::create_formatter(settings.color);

    // Build context with precedence: defaults < config file < env vars < CLI flags
    let ctx = match context::AppContext::build(&settings) {
        Ok(ctx) => ctx,
        Err(e) => {
            formatter.error(&format::error_chain(&e));
            return ExitCode::FAILURE;
        }
    };

    let request = commands::retag::RetagRequest {
        args: cli.args,
        username: cli.username,
        password: cli.password,
        dry_run: cli.dry_run,
    };

    match commands::retag::handle_retag(&ctx, request).await {
        Ok(outcome) => match format::format_output(&outcome, ctx.format) {
            Ok(output) if ctx.format == format::OutputFormat::Pretty => {
                formatter.success(&output);
                ExitCode::SUCCESS
            }
            Ok(output) => {
                println!("{}", output);
                ExitCode::SUCCESS
            }
            Err(e) => {
                formatter.error(&e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            formatter.error(&format::error_chain(&e));
            ExitCode::FAILURE
        }
    }
}
