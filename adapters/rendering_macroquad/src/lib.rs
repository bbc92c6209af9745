#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the Trial of Sisyphus.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, so the crate depends on macroquad without its default `audio`
//! feature. The game has no sound, so nothing is lost.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use macroquad::math::Vec2 as MacroquadVec2;
use macroquad::shapes::{draw_circle, draw_rectangle, draw_triangle};
use macroquad::text::{draw_text, measure_text};
use sisyphus_core::{PushKey, PushPress};
use sisyphus_rendering::{
    hud::{HudText, TextAnchor},
    visuals::{self, FrameVisuals, Triangle},
    Color, FrameInput, Presentation, RenderingBackend,
};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

/// Keys observed as pressed during a single frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyObservations {
    /// `Z` was pressed.
    pub push_a: bool,
    /// `X` was pressed.
    pub push_b: bool,
    /// `Space` was pressed.
    pub confirm: bool,
    /// `Escape` was pressed.
    pub quit: bool,
}

impl KeyObservations {
    fn poll() -> Self {
        Self {
            push_a: is_key_pressed(KeyCode::Z),
            push_b: is_key_pressed(KeyCode::X),
            confirm: is_key_pressed(KeyCode::Space),
            quit: is_key_pressed(KeyCode::Escape),
        }
    }

    /// Converts the observations into the frame input handed to the simulation.
    ///
    /// Both push keys share the frame timestamp `now`; `Z` is always reported
    /// before `X`.
    #[must_use]
    pub fn into_frame_input(self, now: Duration) -> FrameInput {
        let pushes = [(self.push_a, PushKey::A), (self.push_b, PushKey::B)]
            .into_iter()
            .filter(|(pressed, _)| *pressed)
            .map(|(_, key)| PushPress::new(key, now))
            .collect();

        FrameInput {
            pushes,
            confirm: self.confirm,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
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

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
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
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    simulation: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    simulation_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_simulation: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.simulation_accum += breakdown.simulation;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            let Some(removed) = self.frame_times.pop_front() else {
                break;
            };
            self.window_duration = self.window_duration.saturating_sub(removed);
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let per_second = frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let metrics = FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_simulation: self.simulation_accum / frames,
            avg_render: self.render_accum / frames,
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.simulation_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut sisyphus_rendering::Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            surface,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: surface.x as i32,
            window_height: surface.y as i32,
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

            loop {
                let keys = KeyObservations::poll();
                if keys.quit {
                    log::info!("quit requested");
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let now = Duration::from_secs_f64(macroquad::time::get_time().max(0.0));

                let simulation_start = Instant::now();
                update_scene(frame_dt, keys.into_frame_input(now), &mut scene);
                let simulation = simulation_start.elapsed();

                let render_start = Instant::now();
                macroquad::window::clear_background(background);
                draw_frame(&visuals::compose(&scene, surface), surface);
                let render = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    simulation,
                    render,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_simulation,
                        avg_render,
                    }) = fps_metrics
                    {
                        log::info!(
                            "FPS: {:.2} (10s avg: {:.2}) | sim: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            avg_simulation.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_frame(frame: &FrameVisuals, surface: Vec2) {
    for triangle in &frame.background {
        draw_filled_triangle(triangle);
    }
    for triangle in &frame.hill {
        draw_filled_triangle(triangle);
    }
    for circle in &frame.boulder {
        draw_circle(
            circle.center.x,
            circle.center.y,
            circle.radius,
            to_macroquad_color(circle.color),
        );
    }
    draw_pusher(&frame.pusher);
    if let Some(veil) = frame.veil {
        draw_rectangle(0.0, 0.0, surface.x, surface.y, to_macroquad_color(veil));
    }
    for line in &frame.hud {
        draw_hud_text(line);
    }
}

fn draw_filled_triangle(triangle: &Triangle) {
    let [a, b, c] = triangle.points;
    draw_triangle(
        to_macroquad_vec(a),
        to_macroquad_vec(b),
        to_macroquad_vec(c),
        to_macroquad_color(triangle.color),
    );
}

fn draw_pusher(corners: &[Vec2; 4]) {
    let color = to_macroquad_color(sisyphus_rendering::palette::PUSHER);
    let [a, b, c, d] = corners.map(to_macroquad_vec);
    draw_triangle(a, b, c, color);
    draw_triangle(a, c, d, color);
}

fn draw_hud_text(line: &HudText) {
    let font_size = line.size.pixels();
    let dimensions = measure_text(&line.text, None, font_size, 1.0);
    let origin = text_baseline(
        line.anchor,
        Vec2::new(dimensions.width, dimensions.height),
        dimensions.offset_y,
    );
    draw_text(
        &line.text,
        origin.x,
        origin.y,
        f32::from(font_size),
        to_macroquad_color(line.color),
    );
}

/// Left end of the baseline for a text box of `size` whose top sits `ascent` above it.
fn text_baseline(anchor: TextAnchor, size: Vec2, ascent: f32) -> Vec2 {
    match anchor {
        TextAnchor::TopLeft(point) => Vec2::new(point.x, point.y + ascent),
        TextAnchor::TopCenter(point) => Vec2::new(point.x - size.x / 2.0, point.y + ascent),
        TextAnchor::Center(point) => {
            Vec2::new(point.x - size.x / 2.0, point.y - size.y / 2.0 + ascent)
        }
    }
}

fn to_macroquad_vec(point: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(point.x, point.y)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_sixty_hertz_loop_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        let mut reports = Vec::new();

        for index in 0..120 {
            let breakdown = FrameBreakdown {
                frame: Duration::from_micros(16_667),
                simulation: Duration::from_millis(if index % 2 == 0 { 1 } else { 3 }),
                render: Duration::from_millis(4),
            };
            if let Some(metrics) = counter.record_frame(breakdown) {
                reports.push((index, metrics));
            }
        }

        assert_eq!(
            reports.iter().map(|(index, _)| *index).collect::<Vec<_>>(),
            vec![59, 119]
        );
        let (_, first) = reports[0];
        assert!((first.per_second - 60.0).abs() < 0.01);
        assert_eq!(first.avg_simulation, Duration::from_millis(2));
        assert_eq!(first.avg_render, Duration::from_millis(4));
    }

    #[test]
    fn hitch_leaves_the_trailing_average_after_ten_seconds() {
        let mut counter = FpsCounter::default();
        let frame = |millis| FrameBreakdown {
            frame: Duration::from_millis(millis),
            ..FrameBreakdown::default()
        };

        let hitch = counter
            .record_frame(frame(2_000))
            .expect("a two second frame reports at once");
        assert!((hitch.per_second - 0.5).abs() < 1e-4);

        let reports: Vec<FpsMetrics> = (0..100)
            .filter_map(|_| counter.record_frame(frame(100)))
            .collect();

        assert_eq!(reports.len(), 10);
        assert!(reports
            .iter()
            .all(|metrics| (metrics.per_second - 10.0).abs() < 1e-3));
        assert!((reports[7].trailing_ten_seconds - 8.1).abs() < 1e-3);
        assert!((reports[9].trailing_ten_seconds - 10.0).abs() < 1e-3);
    }

    #[test]
    fn fps_counter_averages_stage_durations() {
        let mut counter = FpsCounter::default();
        let frame = FrameBreakdown {
            frame: Duration::from_millis(500),
            simulation: Duration::from_millis(2),
            render: Duration::from_millis(6),
        };

        assert!(counter.record_frame(frame).is_none());
        let metrics = counter.record_frame(frame).expect("one second elapsed");

        assert_eq!(metrics.avg_simulation, Duration::from_millis(2));
        assert_eq!(metrics.avg_render, Duration::from_millis(6));
    }

    #[test]
    fn text_baseline_respects_anchor() {
        let size = Vec2::new(100.0, 20.0);

        assert_eq!(
            text_baseline(TextAnchor::TopLeft(Vec2::new(10.0, 10.0)), size, 16.0),
            Vec2::new(10.0, 26.0)
        );
        assert_eq!(
            text_baseline(TextAnchor::TopCenter(Vec2::new(400.0, 200.0)), size, 16.0),
            Vec2::new(350.0, 216.0)
        );
        assert_eq!(
            text_baseline(TextAnchor::Center(Vec2::new(400.0, 300.0)), size, 16.0),
            Vec2::new(350.0, 306.0)
        );
    }

    #[test]
    fn colors_keep_their_alpha() {
        let color = to_macroquad_color(sisyphus_rendering::palette::GAME_OVER_VEIL);

        assert!((color.a - 180.0 / 255.0).abs() < 1e-6);
        assert!((color.r - 10.0 / 255.0).abs() < 1e-6);
    }
}
