use anyhow::{Context, Result};
use clap::{ArgEnum, Parser};
use remote_sources::{
    config::{self, Config},
    credentials::{FixedPrompter, Prompter, TerminalPrompter},
    CredentialStore, GithubRemoteSourceProvider, RemoteSourceProvider,
};
use std::sync::Arc;
use tracing::{info, Level};

#[derive(ArgEnum, Debug, Clone, Copy)]
enum Format {
    Yaml,
    Json,
}

/// List GitHub repositories that can be cloned
#[derive(Parser, Debug)]
#[clap(name = "remote-sources", version, about)]
struct Cli {
    /// Config file, defaults to ~/.remote-sources.yaml when present
    #[clap(short, long)]
    config: Option<String>,

    /// Search repositories matching this query as well
    #[clap(short, long)]
    query: Option<String>,

    #[clap(long, arg_enum, default_value = "yaml")]
    format: Format,

    /// Never prompt; only configured tokens and $GITHUB_TOKEN are used
    #[clap(long)]
    non_interactive: bool,

    #[clap(short, long)]
    verbose: bool,
}

fn load(path: &Option<String>) -> Result<Config> {
    if let Some(path) = path {
        return config::load_config(path);
    }

    let path = config::default_config_path()?;
    if !path.exists() {
        return Ok(Config::default());
    }
    let path = path.to_str().context("Config path is not valid UTF-8")?;
    config::load_config(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(level)
        .init();

    let config = load(&cli.config)?;
    let remote = config.target_remote.descriptor();
    info!("using target remote '{}' ({})", remote.name, remote.url);

    let prompter: Arc<dyn Prompter> = if cli.non_interactive {
        Arc::new(FixedPrompter::decline())
    } else {
        Arc::new(TerminalPrompter)
    };
    let timeout = config.github.timeout()?;
    let store = CredentialStore::new(config.github.clone(), timeout, prompter);
    let provider = GithubRemoteSourceProvider::new(Arc::new(store), remote);

    let sources = provider
        .get_remote_sources(cli.query.as_deref())
        .await
        .with_context(|| format!("Failed to list {} remote sources", provider.name()))?;

    let output = match cli.format {
        Format::Yaml => serde_yaml::to_string(&sources)?,
        Format::Json => serde_json::to_string_pretty(&sources)?,
    };
    println!("{}", output);
    Ok(())
}
