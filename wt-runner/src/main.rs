//! This binary runs the Wish Tree scene headless, rendering with the debug renderer and taking
//! commands on stdin.
//!
//! Usage: `wt-runner [config.ron] [keypoints.ron]`. The config defaults to
//! `$DATA_DIR/config/scene.ron`, and hand tracking is only available if a keypoint script is
//! given.

mod commands;
mod logging;

use self::commands::{parse_line, Command};
use color_eyre::Result;
use debug::DebugRenderer;
use std::{
    env,
    io::{self, BufRead},
    ops::ControlFlow,
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};
use tokio::{
    sync::mpsc,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};
use tracing_unwrap::ResultExt;
use wt_gesture::{DetectorError, KeypointSource, ScriptedSource, SourceFactory};
use wt_renderer_trait::Renderer;
use wt_scene::{Scene, SceneConfig, SceneHandle};

const HELP_TEXT: &str = r#"Use the following commands to play with the scene:

    help  -  Show this help text
    ?     -  Same as help

    wish <text>   -  Make a wish, which flies to the top of the tree
    gift <image>  -  Add a gift with the given image URL or filename
    gift "<image>"  -  Same, for images with spaces in their name

    track on   -  Turn on hand tracking, if a keypoint script was given
    track off  -  Turn off hand tracking

    click <id>         -  Click on a decoration, like -1 or default-wish-0
    hover <id> on|off  -  Move the pointer onto or off of a decoration

    quit  -  Stop the scene and exit
    exit  -  Same as quit

Use Ctrl+C at any time to quit."#;

/// The time between frames of the scene.
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Run a single command, returning whether to keep going.
fn run_command(command: Command<'_>, handle: &SceneHandle) -> ControlFlow<()> {
    let sent = match command {
        Command::Help => {
            println!("{HELP_TEXT}");
            true
        }
        Command::Quit => return ControlFlow::Break(()),
        Command::Wish(text) => handle.submit_wish(text),
        Command::Gift(image) => handle.submit_gift(image),
        Command::Track(enabled) => handle.set_tracking_enabled(enabled),
        Command::Click(id) => handle.click(id),
        Command::Hover(id, hovered) => handle.hover(id, hovered),
    };

    if sent {
        ControlFlow::Continue(())
    } else {
        ControlFlow::Break(())
    }
}

/// Read commands from stdin on a background thread until the user quits.
///
/// A message is sent on `quit_tx` when the user asks to quit. If stdin closes, the thread just
/// stops reading and the scene keeps running.
fn spawn_stdin_reader(handle: SceneHandle, quit_tx: mpsc::UnboundedSender<()>) -> io::Result<()> {
    thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(error) => {
                        warn!(%error, "Unable to read from stdin");
                        break;
                    }
                };

                if line.trim().is_empty() {
                    continue;
                }

                let Some(command) = parse_line(&line) else {
                    println!("Unknown command: {line:?}. Type `help` to see the commands.");
                    continue;
                };

                debug!(?command, "Running command");
                if run_command(command, &handle).is_break() {
                    let _ = quit_tx.send(());
                    return;
                }
            }

            debug!("Stdin closed, so no more commands");
        })?;

    Ok(())
}

/// Make a source factory that replays the keypoint script at the given path.
fn scripted_source_factory(path: PathBuf) -> SourceFactory {
    Box::new(move || -> Result<Box<dyn KeypointSource>, DetectorError> {
        Ok(Box::new(ScriptedSource::from_file(&path)))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = logging::init_tracing();

    let mut args = env::args().skip(1);
    let config_path = args.next().map_or_else(
        || logging::data_dir().join("config").join("scene.ron"),
        PathBuf::from,
    );
    let keypoints_path = args.next().map(PathBuf::from);

    let config = SceneConfig::from_file(&config_path);
    let mut scene = Scene::new(config, keypoints_path.map(scripted_source_factory))?;
    scene.on_decoration_click(|id, payload| info!(%id, %payload, "Decoration clicked"));

    let (quit_tx, mut quit_rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(scene.handle(), quit_tx)?;
    println!("Type `help` to see the commands.");

    let mut renderer = DebugRenderer::init();
    let mut frames = interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut last_frame = Instant::now();
    info!("Running scene");

    loop {
        tokio::select! {
            biased;

            result = &mut ctrl_c => {
                result.expect_or_log("Should be able to listen for ^C");
                info!("Received ^C");
                break;
            }
            Some(()) = quit_rx.recv() => {
                info!("Quitting");
                break;
            }
            _ = frames.tick() => {
                let now = Instant::now();
                scene.advance(now.duration_since(last_frame).as_secs_f32());
                last_frame = now;

                renderer.render_frame(&scene.frame());
            }
        }
    }

    scene.set_tracking_enabled(false);
    renderer.shutdown();
    scene.shutdown();

    info!(frames = renderer.frames_rendered(), "Goodbye");
    Ok(())
}
