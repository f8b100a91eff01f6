//! Helper tool rendering a demo palette graph as an HTML grid and JSON dump.

mod preview;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    preview::run()
}
