use invitation_server::config::Config;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Environment misconfigured: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = invitation_server::start_server(config).await {
        error!("invitation-server failed: {e}");
        std::process::exit(1);
    }
}
