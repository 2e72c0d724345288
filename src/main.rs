use anyhow::Result;
use lang_sync::config::Config;
use lang_sync::error::SyncError;
use lang_sync::i18n::Language;
use lang_sync::openai::OpenAiTranslator;
use lang_sync::resources::ResourcePaths;
use lang_sync::sync::{ResourceSynchronizer, SyncOptions};
use std::process::ExitCode;
use tracing::{error, info};

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    language: String,
    dry_run: bool,
}

/// Parse `[--dry-run] <lang>` (program name already removed).
fn parse_args<I>(args: I) -> Result<CliArgs, SyncError>
where
    I: IntoIterator<Item = String>,
{
    let mut dry_run = false;
    let mut positional = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--dry-run" => dry_run = true,
            _ => positional.push(arg),
        }
    }

    if positional.len() != 1 {
        return Err(SyncError::Usage);
    }

    Ok(CliArgs {
        language: positional.remove(0),
        dry_run,
    })
}

async fn run(args: CliArgs) -> Result<()> {
    // Reject unknown languages before reading config or touching any file
    let language = Language::target_from_code(&args.language)?;

    // Load .env file (ignored in CI)
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    info!(
        "Synchronizing {} against {} in {}",
        language,
        Language::source(),
        config.lang_dir.display()
    );

    let translator = OpenAiTranslator::new(reqwest::Client::new(), &config);
    let synchronizer = ResourceSynchronizer::new(
        ResourcePaths::new(&config.lang_dir),
        translator,
        SyncOptions {
            concurrency: config.concurrency,
            dry_run: args.dry_run,
        },
    );

    let report = synchronizer.sync(language.code()).await?;

    if report.missing_keys.is_empty() {
        info!("Nothing to do");
    } else if report.written {
        info!(
            "Added {} keys ({} validation warnings)",
            report.missing_keys.len(),
            report.warnings
        );
    } else {
        info!("Dry run: {} keys missing", report.missing_keys.len());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lang_sync=info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
