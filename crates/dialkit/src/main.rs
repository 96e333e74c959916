use clap::{Parser, Subcommand};
use dialkit::ipc;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "dialctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Start a gesture at the given position
    Down { x: f64, y: f64 },
    /// Move the indicator by a delta
    Drag {
        #[arg(allow_negative_numbers = true)]
        dx: f64,
        #[arg(allow_negative_numbers = true)]
        dy: f64,
    },
    /// End the gesture, selecting whatever is under the indicator
    Release,
    /// Allow an option to be selected
    Enable { region: String },
    /// Keep an option on the dial but make it unselectable
    Disable { region: String },
    /// Reload the host configuration
    Reload,
    /// Run a whole gesture: down at the origin, one drag, release
    Swipe {
        #[arg(allow_negative_numbers = true)]
        dx: f64,
        #[arg(allow_negative_numbers = true)]
        dy: f64,
    },
}

impl Commands {
    fn lines(&self) -> Vec<String> {
        match self {
            Self::Down { x, y } => vec![format!("down {} {}", x, y)],
            Self::Drag { dx, dy } => vec![format!("drag {} {}", dx, dy)],
            Self::Release => vec!["release".to_string()],
            Self::Enable { region } => vec![format!("enable {}", region)],
            Self::Disable { region } => vec![format!("disable {}", region)],
            Self::Reload => vec!["reload".to_string()],
            Self::Swipe { dx, dy } => vec![
                "down 0 0".to_string(),
                format!("drag {} {}", dx, dy),
                "release".to_string(),
            ],
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    send_lines(&cli.command.lines())
}

fn send_lines(lines: &[String]) -> anyhow::Result<()> {
    let path = ipc::socket_path();
    let mut stream = UnixStream::connect(&path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to dial host at {}: {}. Is dialhost running?",
            path.display(),
            e
        )
    })?;

    for line in lines {
        log::debug!("Sending '{}'", line);
        writeln!(stream, "{}", line)?;
    }
    Ok(())
}
