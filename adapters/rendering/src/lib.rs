#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Sisyphus adapters.

pub mod hud;
pub mod visuals;

use anyhow::Result as AnyResult;
use glam::Vec2;
use sisyphus_core::{
    BackgroundElement, BoulderState, GamePhase, HillProfile, PushPress, PusherPose, Shade,
    INITIAL_BOULDER_X, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba_u8(red, green, blue, u8::MAX)
    }

    /// Creates a color from byte RGBA values.
    #[must_use]
    pub const fn from_rgba_u8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: alpha as f32 / 255.0,
        }
    }
}

impl From<Shade> for Color {
    fn from(shade: Shade) -> Self {
        Self::from_rgb_u8(shade.red(), shade.green(), shade.blue())
    }
}

/// Fixed colors of the cave.
pub mod palette {
    use super::Color;

    /// Cave backdrop cleared every frame.
    pub const BACKGROUND: Color = Color::from_rgb_u8(10, 10, 10);
    /// Hill silhouette.
    pub const HILL: Color = Color::from_rgb_u8(75, 75, 75);
    /// Boulder body.
    pub const BOULDER: Color = Color::from_rgb_u8(100, 100, 100);
    /// Highlight drawn on the boulder.
    pub const BOULDER_SHADE: Color = Color::from_rgb_u8(140, 140, 140);
    /// Pushing character, also used for the game over headline.
    pub const PUSHER: Color = Color::from_rgb_u8(170, 170, 170);
    /// Regular HUD text.
    pub const TEXT: Color = Color::from_rgb_u8(220, 220, 220);
    /// Translucent veil drawn over the scene once the run is over.
    pub const GAME_OVER_VEIL: Color = Color::from_rgba_u8(10, 10, 10, 180);
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Push key presses observed during the frame, in the order they arrived.
    pub pushes: Vec<PushPress>,
    /// Whether the confirm key was pressed during the frame.
    pub confirm: bool,
}

/// Scene description copied out of the world every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Active game phase.
    pub phase: GamePhase,
    /// Hill the boulder rests on.
    pub hill: HillProfile,
    /// World x drawn at the left edge of the screen.
    pub camera_offset: f64,
    /// Integrated boulder state.
    pub boulder: BoulderState,
    /// Placement of the pushing character.
    pub pusher: PusherPose,
    /// Distance shown in the HUD.
    pub score: u64,
    /// Background elements ordered far to near.
    pub background: Vec<BackgroundElement>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        phase: GamePhase,
        hill: HillProfile,
        camera_offset: f64,
        boulder: BoulderState,
        pusher: PusherPose,
        score: u64,
        background: Vec<BackgroundElement>,
    ) -> Self {
        Self {
            phase,
            hill,
            camera_offset,
            boulder,
            pusher,
            score,
            background,
        }
    }

    /// Scene shown before the first world snapshot is copied in.
    #[must_use]
    pub fn at_start(hill: HillProfile) -> Self {
        Self::new(
            GamePhase::StartScreen,
            hill,
            INITIAL_BOULDER_X - SCREEN_WIDTH / 2.0,
            BoulderState::at_rest(INITIAL_BOULDER_X),
            PusherPose::behind(INITIAL_BOULDER_X, &hill),
            0,
            Vec::new(),
        )
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Size of the drawing surface in pixels.
    pub surface: Vec2,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor for the fixed-size game surface.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            surface: Vec2::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Sisyphus scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the real frame delta,
    /// per-frame input captured by the adapter, and may mutate the scene before
    /// it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_channels_are_normalised() {
        let color = Color::from_rgba_u8(255, 0, 51, 180);

        assert_eq!(color.red, 1.0);
        assert_eq!(color.green, 0.0);
        assert!((color.blue - 0.2).abs() < 1e-6);
        assert!((color.alpha - 180.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn shades_convert_to_opaque_colors() {
        let color = Color::from(Shade::from_rgb(25, 25, 25));

        assert_eq!(color, Color::from_rgb_u8(25, 25, 25));
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn start_scene_frames_the_boulder_mid_screen() {
        let scene = Scene::at_start(HillProfile::default());

        assert_eq!(scene.phase, GamePhase::StartScreen);
        assert_eq!(scene.boulder.x - scene.camera_offset, SCREEN_WIDTH / 2.0);
        assert!(scene.background.is_empty());
    }

    #[test]
    fn presentation_uses_fixed_surface() {
        let presentation = Presentation::new(
            "title",
            palette::BACKGROUND,
            Scene::at_start(HillProfile::default()),
        );

        assert_eq!(presentation.surface, Vec2::new(800.0, 600.0));
        assert_eq!(presentation.window_title, "title");
    }
}
