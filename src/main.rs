// The raster module is a drawing API; not every primitive is used by the
// demo scene
#![allow(dead_code)]

mod config;
mod display;
mod game;
mod logging;
mod math;
mod raster;
mod remote;
mod util;

use std::time::Duration;

use anyhow::{anyhow, Context};
use config::{Command, Settings};
use display::{Display, InputEvent, RenderBuffer, RenderTarget};
use game::{Event, FrameMemory, Key};
use logging::{init_logging, LoggingConfig};
use remote::RemoteKeys;
use util::FpsCounter;

const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(5);

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings: Settings = match config::from_args(&args).context("invalid configuration")? {
        Command::Run(settings) => settings,
        Command::Help => {
            println!("{}", config::usage());
            return Ok(());
        },
    };

    run(&settings)
}

fn run(settings: &Settings) -> anyhow::Result<()> {
    let (width, height) = (settings.width, settings.height);

    let (mut display, texture_creator) =
        Display::with_options(&settings.title, width, height, settings.vsync).map_err(|e| anyhow!(e))?;
    let mut target = RenderTarget::with_size(&texture_creator, width, height).map_err(|e| anyhow!(e))?;
    let mut buffer = RenderBuffer::with_size(width, height);
    let mut memory = FrameMemory::new(width, height);
    let frame_config = settings.frame_config();

    let remote = match settings.mqtt_host.as_deref() {
        Some(host) => match RemoteKeys::connect(host, &settings.mqtt_topic) {
            Ok(remote) => Some(remote),
            Err(e) => {
                log::warn!("remote keys disabled: {}", e);
                None
            },
        },
        None => None,
    };

    log::info!("resolution: {}x{}", width, height);
    if settings.vsync {
        log::info!("vsync on; use --no-vsync for uncapped");
    } else {
        log::info!("vsync off (uncapped framerate)");
    }
    log::info!("controls: WASD move, 1/2 swap fill modes, 3 wireframe, Escape quit");

    let mut fps_counter = FpsCounter::new(60);
    let mut events: Vec<Event> = Vec::new();

    while memory.running {
        fps_counter.tick();

        events.clear();
        for event in display.poll_events() {
            match event {
                // Window close quits like a released Escape
                InputEvent::Quit => events.push(Event::KeyUp(Key::Escape)),
                InputEvent::Key(event) => events.push(event),
            }
        }
        if let Some(remote) = &remote {
            remote.drain_into(&mut events);
        }

        game::update_and_render(&mut memory, &events, &mut buffer, &frame_config);
        display.present(&mut target, &buffer).map_err(|e| anyhow!(e))?;

        if fps_counter.report_due(FPS_REPORT_INTERVAL) {
            let (min_fps, max_fps) = fps_counter.min_max_fps();
            log::debug!(
                "FPS {:.0} avg  {:.0} min  {:.0} max  {:.1}ms",
                fps_counter.avg_fps(),
                min_fps,
                max_fps,
                fps_counter.avg_frame_time_ms()
            );
        }
    }

    log::info!("shutting down");
    Ok(())
}
