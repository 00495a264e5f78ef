use anyhow::{Context, Result};
use clap::Parser;

use ado_pr::{Config, PullRequestOpener, cli::Args, logging::init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = init_logging(&args.log_config()?).context("Failed to open log file")?;

    // Handle --create-config flag
    if args.create_config {
        match Config::create_sample_config()? {
            Some(path) => println!("Wrote sample configuration to {}", path.display()),
            None => println!("Configuration file already exists, leaving it unchanged"),
        }
        return Ok(());
    }

    // Resolve configuration from defaults, config file, environment variables, and CLI args
    let config = Config::defaults()
        .merge(Config::load_from_file()?)
        .merge(Config::load_from_env()?)
        .merge(args.to_config());

    // clap enforces these unless --create-config was given
    let repo_url = args.repo_url.as_deref().context("repository URL is required")?;
    let title = args.title.as_deref().context("--title is required")?;
    let source_branch = args
        .source_branch
        .as_deref()
        .context("--source-branch is required")?;
    let target_branch = config
        .target_branch
        .as_deref()
        .unwrap_or(ado_pr::config::DEFAULT_TARGET_BRANCH);

    let result = PullRequestOpener::new()
        .addressing(config.addressing.unwrap_or_default())
        .timeout(config.timeout())
        .open(
            repo_url,
            title,
            &args.description,
            target_branch,
            source_branch,
            &config.credentials(),
        )
        .await
        .map_err(|err| {
            let context = if err.is_local() {
                format!("Cannot open a pull request for {repo_url}")
            } else {
                format!("Failed to open pull request in {repo_url}")
            };
            anyhow::Error::new(err).context(context)
        })?;

    println!("{}", result.web_url.as_deref().unwrap_or(&result.url));
    Ok(())
}
