use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Subcommand;
use tomata_core::{AppConfig, PlayerCommand, PlayerEvent, PlayerProcess};

#[derive(Subcommand)]
pub enum PlayerAction {
    /// Spawn the helper, query status and devices, print what comes back
    Probe {
        /// Helper binary (defaults to the configured player.exe_path)
        #[arg(long)]
        exe: Option<PathBuf>,
        /// Output device id to pass at startup
        #[arg(long)]
        device: Option<i64>,
        /// Seconds to wait for events before tearing down
        #[arg(long, default_value = "3")]
        wait_secs: u64,
    },
}

pub fn run(action: PlayerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlayerAction::Probe {
            exe,
            device,
            wait_secs,
        } => probe(exe, device, wait_secs),
    }
}

fn probe(
    exe: Option<PathBuf>,
    device: Option<i64>,
    wait_secs: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let exe = match exe {
        Some(path) => path,
        None => {
            let config = AppConfig::load_or_default();
            if config.player.exe_path.is_empty() {
                return Err("no helper configured; pass --exe or set player.exe_path".into());
            }
            PathBuf::from(config.player.exe_path)
        }
    };

    let mut bridge = PlayerProcess::new();
    bridge.start(&exe, device)?;
    bridge.send(&PlayerCommand::GetStatus);
    bridge.send(&PlayerCommand::GetDevices);

    let mut got_status = false;
    let mut got_devices = false;
    let deadline = Instant::now() + Duration::from_secs(wait_secs);
    while Instant::now() < deadline && !(got_status && got_devices) {
        for event in bridge.poll_events() {
            match &event {
                PlayerEvent::Status { playing, name, .. } => {
                    got_status = true;
                    println!("status: playing={playing} track={name:?}");
                }
                PlayerEvent::Devices(payload) => {
                    got_devices = true;
                    for dev in &payload.devices {
                        let marker = if dev.is_default { " (default)" } else { "" };
                        println!("device {}: {}{marker}", dev.id, dev.name);
                    }
                }
                PlayerEvent::Ready => println!("ready"),
                other => println!("event: {other:?}"),
            }
        }
        std::thread::sleep(Duration::from_millis(50));
    }

    bridge.stop();
    if !got_status {
        return Err("helper never reported status".into());
    }
    Ok(())
}
