use anyhow::Context;
use termdonut::cli::Cli;
use termdonut::{DonutConfig, Renderer, Settings, Terminal};
use tracing_subscriber::EnvFilter;

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    // stdout carries frames and the benchmark report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_lenient();
    init_logging(cli.log_level.as_deref());

    let mut cfg = DonutConfig::default();
    Settings::load(cli.config.as_deref()).apply(&mut cfg);
    cli.apply(&mut cfg);
    cfg.validate().context("invalid configuration")?;
    tracing::debug!(?cfg, "effective configuration");

    let mut renderer = Renderer::new(cfg);
    if renderer.config().benchmark {
        let report = renderer.run_benchmark();
        println!("{report}");
        return Ok(());
    }

    let mut term = Terminal::stdout();
    renderer
        .animate(&mut term, |_| true)
        .context("failed to write frame")?;
    Ok(())
}
