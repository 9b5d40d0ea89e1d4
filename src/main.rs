use std::path::Path;
use std::time::{Duration, Instant};

use clap::Parser;

use ascii_video::cli::{self, Args, Command};
use ascii_video::config::Config;
use ascii_video::player::{self, PlaybackReport, Player};
use ascii_video::terminal::{self, InterruptFlag, TerminalSink};
use ascii_video::PlayerError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Some(Command::Config { action }) = &args.command {
        if let Err(e) = cli::handle_config_action(action.clone(), args.config.as_deref()) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let Some(path) = args.path.as_deref() else {
        eprintln!("Error: no video file given. Usage: ascii-video <PATH> [OPTIONS]");
        std::process::exit(1);
    };

    match run(&args, path) {
        Ok(report) => {
            println!("{}", cli::format_summary(&report));
            if report.outcome.is_failure() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Open `path`, print the banner and play it to stdout.
///
/// Errors before the first frame (config, missing or unreadable file) are
/// returned; anything later is part of the report.
fn run(args: &Args, path: &Path) -> Result<PlaybackReport, PlayerError> {
    let cfg = Config::load(args.config.as_deref())?;
    let settings = cli::resolve_settings(args, &cfg, terminal::terminal_width())?;

    let interrupt = InterruptFlag::new();
    if let Err(e) = terminal::install_ctrlc_handler(&interrupt) {
        log::warn!("Failed to set Ctrl+C handler: {}", e);
    }

    let mut player = Player::new(settings, interrupt.clone())?;
    let source = player.open(path, &cfg.decoder)?;

    println!(
        "{}",
        cli::format_banner(path, player.settings().width, player.target_fps_for(&source))
    );

    if !args.no_intro && cfg.playback.intro_delay_ms > 0 {
        let deadline = Instant::now() + Duration::from_millis(cfg.playback.intro_delay_ms);
        // An interrupt here is picked up before the first frame
        player::sleep_until(deadline, &interrupt);
    }

    let mut sink = TerminalSink::stdout();
    Ok(player.play(source, &mut sink))
}
