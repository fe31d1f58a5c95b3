use std::io::Write;
use std::time::{Duration, Instant};

use clap::Args;
use tomata_core::{
    App, AppConfig, AppEvent, PlayerProcess, PlayerStatus, SessionKind, TopMode,
};

use super::open_store;

#[derive(Args)]
pub struct RunArgs {
    /// Execute the saved plan instead of a single session
    #[arg(long)]
    plan: bool,
    /// Run a break session (single mode)
    #[arg(long = "break")]
    break_: bool,
    /// Session length in minutes (single mode, 1-120)
    #[arg(long)]
    minutes: Option<u32>,
    /// Start the configured music helper alongside the timer
    #[arg(long)]
    music: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_or_default();
    let store = open_store()?;
    let mut app = App::new(store, config.clone());

    if args.plan {
        render_events(&app.set_app_mode(TopMode::Plan)?);
        if app.plan_status().map(|s| s.total).unwrap_or(0) == 0 {
            return Err("the plan is empty; add steps with `tomata plan add`".into());
        }
    } else {
        if args.break_ {
            render_events(&app.set_mode(SessionKind::Break)?);
        }
        if let Some(minutes) = args.minutes {
            render_events(&app.set_time(minutes)?);
        }
    }

    let mut player = PlayerProcess::new();
    let mut player_status = PlayerStatus::default();
    if args.music {
        if config.player.exe_path.is_empty() {
            eprintln!("no music helper configured (player.exe_path); continuing without music");
        } else {
            let device = (config.player.device_id >= 0).then_some(config.player.device_id);
            if let Err(e) = player.start(config.player.exe_path.as_ref(), device) {
                // The timer keeps working even if the bridge is dead.
                eprintln!("music helper unavailable: {e}");
            }
        }
    }

    render_events(&app.start());

    let mut done = false;
    while !done {
        std::thread::sleep(Duration::from_secs(1));

        let events = app.tick(Instant::now());
        done = events.iter().any(|e| {
            matches!(e, AppEvent::PlanCompleted)
                || (!args.plan && matches!(e, AppEvent::SessionCompleted { .. }))
        });
        render_events(&events);

        for event in player.poll_events() {
            player_status.apply(&event);
        }
        player_status.tick_second();

        if !done {
            render_countdown(&app, &player_status);
        }
    }

    app.flush();
    player.stop();
    Ok(())
}

fn render_countdown(app: &App, player: &PlayerStatus) {
    let remaining = app.timer().remaining_secs();
    let mut line = format!(
        "\r{} {:02}:{:02}",
        app.status_label(),
        remaining / 60,
        remaining % 60
    );
    if player.playing {
        line.push_str(&format!(
            "  | {} {:.0}/{:.0}s",
            player.track_name, player.current_secs, player.duration_secs
        ));
    }
    print!("{line}  ");
    let _ = std::io::stdout().flush();
}

fn render_events(events: &[AppEvent]) {
    for event in events {
        match event {
            AppEvent::StatusChanged { label } => println!("\n[{label}]"),
            AppEvent::Notification { title, body } => println!("\n{title}: {body}"),
            AppEvent::StepAdvanced {
                index,
                kind,
                minutes,
            } => println!("\nstep {index}: {kind} {minutes} min"),
            AppEvent::SessionCompleted { kind, minutes } => {
                println!("\ncompleted: {kind} {minutes} min")
            }
            AppEvent::PlanCompleted => println!("\nplan finished"),
            // Armed durations, accent and input toggles are GUI concerns.
            _ => {}
        }
    }
}
