//! Desktop simulator for the cardsense screens.
//!
//! Renders cardsense-core pages in an SDL2 window via
//! `embedded-graphics-simulator`. A background thread plays the part of the
//! platform sensor service, emitting synthetic light and proximity readings
//! at whatever rate the active page requested.
//!
//! # Key bindings
//!
//! | Key       | Action            |
//! |-----------|-------------------|
//! | 1         | Business card     |
//! | 2         | Sensor readout    |
//! | 3         | Dice              |
//! | Backspace | Back              |
//! | Q / Esc   | Quit              |
//!
//! Mouse clicks are forwarded as touch events.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};

use cardsense_core::config::Config;
use cardsense_core::framebuffer::FrameBuffer;
use cardsense_core::pages::{BusinessCardPage, DicePage, PageManager, SensorPage, screen_bounds};
use cardsense_core::sensors::{SensorKind, SensorReading, SimulatedSensorService};
use cardsense_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, PageId, TouchEvent, TouchPoint};

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Feeder interval while no page is listening.
const IDLE_FEED_INTERVAL: Duration = Duration::from_millis(250);

/// Lower bound on the feeder interval, so `Fastest` does not spin.
const MIN_FEED_INTERVAL: Duration = Duration::from_millis(5);

#[derive(Parser, Debug)]
#[command(name = "cardsense-simulator")]
#[command(about = "Business card and sensor screens in a desktop window", long_about = None)]
struct Args {
    /// JSON configuration file with a `profile` object
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Simulate a device without an ambient light sensor
    #[arg(long)]
    no_light: bool,

    /// Simulate a device without a proximity sensor
    #[arg(long)]
    no_proximity: bool,

    /// Simulate a device without a magnetometer
    #[arg(long)]
    no_magnetometer: bool,

    /// Pixel scale factor for the window
    #[arg(short, long, default_value = "2")]
    scale: u32,
}

// ---------------------------------------------------------------------------
// Synthetic sensor feed
// ---------------------------------------------------------------------------

fn build_service(args: &Args) -> SimulatedSensorService {
    let mut service = SimulatedSensorService::new();
    if !args.no_light {
        service = service.with_sensor(SensorKind::Light);
    }
    if !args.no_proximity {
        service = service.with_sensor(SensorKind::Proximity);
    }
    if !args.no_magnetometer {
        service = service.with_sensor(SensorKind::MagneticField);
    }
    service
}

/// Light drifts between roughly 20 and 380 lux; proximity toggles between
/// near and far every four seconds, like a hand waved over the phone.
fn synthetic_reading(kind: SensorKind, t: f32) -> f32 {
    match kind {
        SensorKind::Light => (200.0 + 180.0 * (t / 7.0).sin() + 15.0 * (t / 1.3).cos()).round(),
        SensorKind::Proximity => {
            if (t as u32 / 4) % 2 == 0 {
                5.0
            } else {
                0.0
            }
        }
        SensorKind::MagneticField => 48.0 + 2.0 * (t / 3.0).sin(),
    }
}

/// Next delivery interval: the fastest rate any listener asked for.
fn feed_interval(service: &SimulatedSensorService) -> Duration {
    SensorKind::ALL
        .iter()
        .filter_map(|kind| service.requested_period(*kind))
        .min()
        .map(|period| Duration::from_micros(period.as_micros()).max(MIN_FEED_INTERVAL))
        .unwrap_or(IDLE_FEED_INTERVAL)
}

/// Emit readings from a background thread until `running` is cleared.
fn spawn_feeder(
    service: Arc<SimulatedSensorService>,
    running: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let start = Instant::now();
        while running.load(Ordering::Relaxed) {
            let elapsed = start.elapsed();
            let t = elapsed.as_secs_f32();
            for kind in SensorKind::ALL {
                let reading = SensorReading::new(kind, synthetic_reading(kind, t))
                    .with_timestamp(elapsed.as_micros() as u64);
                service.emit_reading(reading);
            }
            thread::sleep(feed_interval(&service));
        }
    })
}

// ---------------------------------------------------------------------------
// Configuration and navigation
// ---------------------------------------------------------------------------

fn read_profile(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("unable to read profile {}", path.display()))
}

/// Map an SDL keycode to a page navigation request.
fn keycode_to_page(keycode: Keycode) -> Option<PageId> {
    match keycode {
        Keycode::Num1 | Keycode::Kp1 => Some(PageId::BusinessCard),
        Keycode::Num2 | Keycode::Kp2 => Some(PageId::Sensors),
        Keycode::Num3 | Keycode::Kp3 => Some(PageId::Dice),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let profile_text = args.profile.as_deref().map(read_profile).transpose()?;
    let config = match profile_text.as_deref() {
        Some(text) => serde_json::from_str::<Config>(text).context("invalid profile JSON")?,
        None => Config::default(),
    };

    info!("Starting cardsense simulator");
    info!(
        "Display: {}x{} (scale {}x)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, args.scale
    );
    info!("Keys: 1=Card  2=Sensors  3=Dice  Backspace=Back  Q=Quit");

    let service = Arc::new(build_service(&args));
    let running = Arc::new(AtomicBool::new(true));
    let feeder = spawn_feeder(service.clone(), running.clone());

    let bounds = screen_bounds();
    let mut manager = PageManager::new(PageId::BusinessCard, bounds);
    manager.register_page(BusinessCardPage::new(bounds, &config.profile).into());
    manager.register_page(SensorPage::new(bounds, service.clone()).into());
    manager.register_page(DicePage::new(bounds, service.clone()).into());
    manager.start();

    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));
    let output_settings = OutputSettingsBuilder::new().scale(args.scale).build();
    let mut window = Window::new("Cardsense Simulator", &output_settings);
    let mut framebuffer = FrameBuffer::new();

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = manager.draw(&mut framebuffer);
    let _ = framebuffer.flush(&mut display);
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    if keycode == Keycode::Backspace {
                        manager.go_back();
                    } else if let Some(target) = keycode_to_page(keycode) {
                        manager.navigate_to(target);
                    }
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    let touch = TouchEvent::Press(TouchPoint::new(
                        point.x.max(0) as u16,
                        point.y.max(0) as u16,
                    ));
                    if let Some(action) = manager.handle_touch(touch) {
                        info!("Touch -> {:?}", action);
                        manager.handle_action(action);
                    }
                }

                _ => {}
            }
        }

        manager.update();

        match manager.draw_dirty(&mut framebuffer) {
            Ok(true) => {
                if let Err(e) = framebuffer.flush(&mut display) {
                    error!("Flush error: {:?}", e);
                }
            }
            Ok(false) => {}
            Err(e) => error!("Draw error: {:?}", e),
        }

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    running.store(false, Ordering::Relaxed);
    feeder
        .join()
        .map_err(|_| anyhow!("sensor feeder thread panicked"))?;
    drop(manager);
    info!(
        "Simulator exiting, {} listeners left registered",
        service.listener_count()
    );
    Ok(())
}
