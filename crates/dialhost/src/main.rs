use clap::Parser;
use dialhost::app::{AppModel, LogHaptics};
use dialhost::config::{self, Config};
use dialhost::sys::runtime;

#[derive(Parser, Debug)]
#[command(name = "dialhost", version, about, long_about = None)]
struct Cli {
    /// Write the default config file, print its path and exit
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_default_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let (tx, rx) = async_channel::bounded(32);

    let app = AppModel::new(&config, Box::new(LogHaptics)).or_else(|e| {
        log::error!("Invalid dial configuration, using defaults: {}", e);
        AppModel::new(&Config::default(), Box::new(LogHaptics))
    })?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        // Start Background Services
        runtime::start_background_services(tx);
        app.run(rx).await;
    });

    Ok(())
}
