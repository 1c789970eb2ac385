use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ask_bestie::{
    Commands, Container, ContainerConfig, Router, ServingEndpointConfig, DEFAULT_ALL_PORTALS_URL,
    DEFAULT_CATALOG_PATH,
};

#[derive(Parser)]
#[command(name = "ask-bestie")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Service catalog spreadsheet (.xlsx, .xls, .xlsm, .ods or .csv)
    #[arg(long, global = true, env = "CATALOG_PATH", default_value = DEFAULT_CATALOG_PATH)]
    catalog: String,

    #[arg(long, global = true)]
    mock_embeddings: bool,

    #[arg(long, global = true, env = "EMBEDDING_MODEL")]
    embedding_model: Option<String>,

    /// Comma-separated URL prefixes links must start with
    #[arg(long, global = true, env = "ALLOWED_LINK_PREFIXES", default_value = "")]
    allowed_link_prefixes: String,

    #[arg(long, global = true, env = "ALL_PORTALS_URL", default_value = DEFAULT_ALL_PORTALS_URL)]
    all_portals_url: String,

    #[arg(long, global = true, env = "SLACK_BOT_TOKEN", hide_env_values = true)]
    slack_bot_token: Option<String>,

    #[arg(long, global = true, env = "SLACK_SIGNING_SECRET", hide_env_values = true, default_value = "")]
    slack_signing_secret: String,

    /// Only the literal `true` (any case) disables signature checks
    #[arg(long, global = true, env = "SKIP_SLACK_SIGNATURE_VERIFY")]
    skip_slack_signature_verify: Option<String>,

    /// Only the literal `true` (any case) enables the external model
    #[arg(long, global = true, env = "USE_MODEL")]
    use_model: Option<String>,

    #[arg(long, global = true, env = "DATABRICKS_HOST", default_value = "")]
    databricks_host: String,

    #[arg(long, global = true, env = "DATABRICKS_TOKEN", hide_env_values = true, default_value = "")]
    databricks_token: String,

    /// Serving endpoint path appended to the host
    #[arg(long, global = true, env = "PHI3_ENDPOINT", default_value = "")]
    model_endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn container_config(&self) -> ContainerConfig {
        ContainerConfig {
            catalog_path: self.catalog.clone(),
            mock_embeddings: self.mock_embeddings,
            embedding_model: self.embedding_model.clone().filter(|m| !m.is_empty()),
            allowed_link_prefixes: self.allowed_link_prefixes.clone(),
            all_portals_url: self.all_portals_url.clone(),
            serving_endpoint: ServingEndpointConfig {
                enabled: is_true(self.use_model.as_deref()),
                host: self.databricks_host.clone(),
                endpoint: self.model_endpoint.clone(),
                token: self.databricks_token.clone(),
            },
            slack_bot_token: self.slack_bot_token.clone(),
            slack_signing_secret: self.slack_signing_secret.clone(),
            skip_signature_verify: is_true(self.skip_slack_signature_verify.as_deref()),
            discover_bot_identity: matches!(self.command, Commands::Serve { .. }),
        }
    }
}

fn is_true(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = cli.container_config();
    let container = Container::new(config).await?;
    let router = Router::new(&container);

    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn only_literal_true_enables_flags() {
        assert!(is_true(Some("true")));
        assert!(is_true(Some("TRUE")));
        assert!(!is_true(Some("1")));
        assert!(!is_true(Some("yes")));
        assert!(!is_true(None));
    }

    #[test]
    fn serve_defaults_to_port_3000() {
        let cli = Cli::try_parse_from(["ask-bestie", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { port, host } => {
                if std::env::var_os("PORT").is_none() {
                    assert_eq!(port, 3000);
                }
                assert_eq!(host, "0.0.0.0");
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn external_model_requires_use_model() {
        let cli = Cli::try_parse_from([
            "ask-bestie",
            "--use-model",
            "false",
            "--databricks-host",
            "https://dbc.example",
            "--databricks-token",
            "t",
            "--model-endpoint",
            "/serving-endpoints/phi3/invocations",
            "search",
            "vpn",
        ])
        .unwrap();

        let config = cli.container_config();
        assert!(!config.serving_endpoint.is_complete());
        assert!(!config.discover_bot_identity);
    }

    #[test]
    fn ask_takes_plain_flag() {
        let cli = Cli::try_parse_from(["ask-bestie", "ask", "vpn access", "--plain"]).unwrap();
        assert!(matches!(cli.command, Commands::Ask { plain: true, .. }));
    }
}
