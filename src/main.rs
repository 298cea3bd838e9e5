//! Headless timeline player.
//!
//! Loads a clip array from JSON, plays it through the engine on a tokio
//! interval ticker and logs what a host would receive.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::Parser;
use crossbeam::channel;
use tokio::sync::oneshot;

use cutline::core::time::format_time;
use cutline::playback::{MediaSyncTarget, TokioTicker};
use cutline::timeline::classify_cut;
use cutline::{load_clips, ClipUpdate, EngineConfig, PlaybackControl, Seconds, TimelineEditor, TimelineHost};

#[derive(Parser, Debug)]
#[command(name = "cutline-sim", about = "Play a clip sequence through the timeline engine")]
struct Args {
    /// JSON array of timeline clips
    clips: PathBuf,

    /// JSON engine config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the config frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Start position in seconds
    #[arg(long, default_value_t = 0.0)]
    start: f64,
}

/// Host that logs engine output
struct LogHost;

impl TimelineHost for LogHost {
    fn on_clip_update(&mut self, clip_id: &str, update: ClipUpdate) {
        log::info!("clip {} updated: {:?}", clip_id, update);
    }

    fn on_playback_change(&mut self, is_playing: bool, current_time: Seconds) {
        log::debug!(
            "{} {}",
            if is_playing { "playing" } else { "stopped" },
            format_time(current_time)
        );
    }

    fn on_media_sync(&mut self, target: &MediaSyncTarget) {
        log::trace!(
            "sync {} video {:.3}s audio {:.3}s{}",
            target.clip_id,
            target.video_time,
            target.audio_time,
            if target.audio_active { "" } else { " (muted)" }
        );
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    config.validate()?;

    let clips = load_clips(&args.clips)?;
    for clip in &clips {
        log::info!(
            "{:>12}  {:>8.3}s  {}",
            clip.id,
            clip.effective_duration(),
            classify_cut(clip)
        );
    }

    // The ticker's runtime is driven on its own thread until shutdown
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let handle = runtime.handle().clone();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let driver = thread::spawn(move || {
        let _ = runtime.block_on(shutdown_rx);
    });

    let (tick_tx, tick_rx) = channel::unbounded();
    let mut editor = TimelineEditor::new(&config, LogHost).with_ticker(TokioTicker::new(handle, tick_tx));

    editor.seek_to(&clips, args.start);
    log::info!(
        "playing {} clips ({}) from {}",
        clips.len(),
        format_time(editor.total_duration()),
        editor.timecode()
    );
    editor.play();

    while editor.is_playing() {
        match tick_rx.recv() {
            Ok(_) => {
                editor.tick(&clips);
            }
            Err(_) => break,
        }
    }
    log::info!("stopped at {}", editor.timecode());
    let stopped_at = editor.current_time();
    drop(editor);

    let _ = shutdown_tx.send(());
    if driver.join().is_err() {
        log::error!("ticker runtime thread panicked");
    }
    println!("{}", format_time(stopped_at));
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
