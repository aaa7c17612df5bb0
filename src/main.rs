use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use assiah::{Config, Error};

#[actix_web::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("assiah=debug")),
        )
        .with_span_events(FmtSpan::NEW)
        .compact()
        .init();

    let config = Config::from_env()?;

    assiah::run(config).await
}
