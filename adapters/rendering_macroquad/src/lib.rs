#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Castle Run.
//!
//! The game makes no sound, so macroquad is pulled in with default features
//! off. That leaves out the audio backend and the system sound libraries it
//! links against.

mod fps;
mod primitives;

use anyhow::{Context, Result};
use castle_run_rendering::{
    draw_list, end_screen, DrawCommand, FrameInput, Presentation, RenderingBackend, Scene,
};
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use std::{
    thread,
    time::{Duration, Instant},
};

use self::{
    fps::{FpsCounter, FpsMetrics, FrameBreakdown},
    primitives::{execute, to_macroquad_color},
};

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    target_fps: Option<u32>,
    end_screen_hold: Duration,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            target_fps: Some(60),
            end_screen_hold: Duration::from_secs(2),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Swap interval 1 when `enabled`, otherwise 0 so presentation never waits
    /// for the display.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Caps the frame rate by sleeping away the rest of each frame. `None` or zero
    /// disables the cap.
    #[must_use]
    pub fn with_target_fps(mut self, target_fps: Option<u32>) -> Self {
        self.target_fps = target_fps.filter(|fps| *fps > 0);
        self
    }

    /// Sets how long the end screen stays up before the loop returns.
    #[must_use]
    pub fn with_end_screen_hold(mut self, hold: Duration) -> Self {
        self.end_screen_hold = hold;
        self
    }
}

/// Sleeps away whatever is left of a fixed frame budget.
#[derive(Debug)]
struct FramePacer {
    budget: Option<Duration>,
    frame_start: Instant,
}

impl FramePacer {
    fn new(target_fps: Option<u32>) -> Self {
        Self {
            budget: target_fps
                .filter(|fps| *fps > 0)
                .map(|fps| Duration::from_secs(1) / fps),
            frame_start: Instant::now(),
        }
    }

    fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget
            .map_or(Duration::ZERO, |budget| budget.saturating_sub(elapsed))
    }

    fn wait(&mut self) {
        let remaining = self.remaining(self.frame_start.elapsed());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        self.frame_start = Instant::now();
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            target_fps,
            end_screen_hold,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_dimension(scene.viewport.width())
                .context("viewport width does not fit a window")?,
            window_height: window_dimension(scene.viewport.height())
                .context("viewport height does not fit a window")?,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut pacer = FramePacer::new(target_fps);

            loop {
                let input = gather_frame_input();
                if input.quit {
                    tracing::info!("quit requested");
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let simulation_start = Instant::now();
                update_scene(frame_dt, input, &mut scene);
                let simulation = simulation_start.elapsed();

                let render_start = Instant::now();
                execute(&draw_list(&scene));
                let render = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    simulation,
                    render,
                });
                if show_fps {
                    if let Some(metrics) = fps_metrics {
                        log_fps(metrics);
                    }
                }

                macroquad::window::next_frame().await;
                pacer.wait();

                if let Some(screen) = end_screen(&scene) {
                    hold_end_screen(&screen, end_screen_hold, &mut pacer).await;
                    break;
                }
            }
        });

        Ok(())
    }
}

async fn hold_end_screen(screen: &[DrawCommand], hold: Duration, pacer: &mut FramePacer) {
    tracing::debug!(hold_ms = hold.as_millis() as u64, "showing end screen");
    let shown_at = Instant::now();
    while shown_at.elapsed() < hold {
        if gather_frame_input().quit {
            break;
        }
        execute(screen);
        macroquad::window::next_frame().await;
        pacer.wait();
    }
}

fn log_fps(metrics: FpsMetrics) {
    let FpsMetrics {
        per_second,
        trailing_ten_seconds,
        avg_simulation,
        avg_render,
    } = metrics;
    tracing::info!(
        fps = f64::from(per_second),
        fps_10s = f64::from(trailing_ten_seconds),
        sim_ms = avg_simulation.as_secs_f64() * 1_000.0,
        render_ms = avg_render.as_secs_f64() * 1_000.0,
        "frame timing"
    );
}

fn window_dimension(extent: f32) -> Result<i32> {
    let rounded = extent.round();
    if !(1.0..=i32::MAX as f32).contains(&rounded) {
        anyhow::bail!("{extent} is not a usable window size");
    }
    Ok(rounded as i32)
}

fn gather_frame_input() -> FrameInput {
    frame_input_from_keys(is_key_down, is_key_pressed)
}

/// Arrow keys move, space jumps; `Escape` or `Q` quits.
fn frame_input_from_keys(
    held: impl Fn(KeyCode) -> bool,
    pressed: impl Fn(KeyCode) -> bool,
) -> FrameInput {
    FrameInput {
        left: held(KeyCode::Left),
        right: held(KeyCode::Right),
        jump: held(KeyCode::Space),
        quit: pressed(KeyCode::Escape) || pressed(KeyCode::Q),
    }
}
