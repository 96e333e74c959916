use crate::events::AppEvent;
use crate::region::DialRegion;
use async_channel::Sender;
use dialkit::{Point, ipc};
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' expects two numbers")]
    BadPoint(String),
    #[error("Unknown region '{0}'")]
    BadRegion(String),
}

/// Parses one line of the gesture protocol.
pub fn parse_command(line: &str) -> Result<AppEvent, CommandError> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    match verb {
        "down" => parse_point(verb, &args).map(AppEvent::Down),
        "drag" => parse_point(verb, &args).map(AppEvent::Drag),
        "release" if args.is_empty() => Ok(AppEvent::Release),
        "reload" if args.is_empty() => Ok(AppEvent::ConfigReload),
        "enable" => parse_region(&args).map(AppEvent::Enable),
        "disable" => parse_region(&args).map(AppEvent::Disable),
        _ => Err(CommandError::Unknown(line.trim().to_string())),
    }
}

fn parse_point(verb: &str, args: &[&str]) -> Result<Point, CommandError> {
    match args {
        [x, y] => {
            let x = x.parse::<f64>().ok().filter(|v| v.is_finite());
            let y = y.parse::<f64>().ok().filter(|v| v.is_finite());
            x.zip(y)
                .map(|(x, y)| Point::new(x, y))
                .ok_or_else(|| CommandError::BadPoint(verb.to_string()))
        }
        _ => Err(CommandError::BadPoint(verb.to_string())),
    }
}

fn parse_region(args: &[&str]) -> Result<DialRegion, CommandError> {
    match args {
        [name] => DialRegion::from_str(name).map_err(|_| CommandError::BadRegion(name.to_string())),
        _ => Err(CommandError::BadRegion(args.join(" "))),
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    let socket_path = ipc::socket_path();

    // Cleanup old socket if it exists
    if fs_err::metadata(&socket_path).is_ok() {
        let _ = fs_err::remove_file(&socket_path);
    }

    let listener = match UnixListener::bind(&socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", socket_path.display(), e);
            return;
        }
    };
    log::info!("Listening on {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match parse_command(&line) {
                            Ok(event) => {
                                if tx.send(event).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => log::warn!("{}", e),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
