//! HUD text laid out per game phase.

use glam::Vec2;
use sisyphus_core::{GamePhase, WINDOW_TITLE};

use crate::{palette, Color};

const MYTH: [&str; 4] = [
    "In Greek myth, Sisyphus, a cunning king, twice cheated Death.",
    "For his hubris, Zeus condemned him to an eternal punishment:",
    "to roll a colossal boulder up a hill, only for it to roll back down",
    "each time it neared the summit, for all eternity.",
];
const OBJECTIVE: &str = "Objective: Push the boulder as far up the hill as you can.";
const CONTROLS: &str = "Controls: Alternately press 'Z' and 'X' to push.";
const START_PROMPT: &str = "Press SPACE to Begin the Trial";
const GAME_OVER_HEADLINE: &str = "The Boulder Stopped";
const RESTART_PROMPT: &str = "A new day. Press SPACE to try again.";

const SCORE_MARGIN: f32 = 10.0;
const MYTH_LINE_SPACING: f32 = 5.0;

/// Font sizes used by the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontSize {
    /// Headlines.
    Large,
    /// Start prompt.
    Medium,
    /// Score and instructions.
    Small,
    /// Story paragraph.
    ExtraSmall,
}

impl FontSize {
    /// Nominal size in pixels.
    #[must_use]
    pub const fn pixels(self) -> u16 {
        match self {
            Self::Large => 74,
            Self::Medium => 50,
            Self::Small => 36,
            Self::ExtraSmall => 28,
        }
    }

    /// Vertical advance of a single rendered line.
    #[must_use]
    pub fn line_height(self) -> f32 {
        f32::from(self.pixels()) * 0.75
    }
}

/// Reference point a text is positioned against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextAnchor {
    /// Top-left corner of the text box.
    TopLeft(Vec2),
    /// Horizontal centre of the top edge.
    TopCenter(Vec2),
    /// Centre of the text box.
    Center(Vec2),
}

/// Single HUD line.
#[derive(Clone, Debug, PartialEq)]
pub struct HudText {
    /// Text to render.
    pub text: String,
    /// Font size to render with.
    pub size: FontSize,
    /// Text color.
    pub color: Color,
    /// Placement of the text box.
    pub anchor: TextAnchor,
}

impl HudText {
    fn new(text: impl Into<String>, size: FontSize, color: Color, anchor: TextAnchor) -> Self {
        Self {
            text: text.into(),
            size,
            color,
            anchor,
        }
    }
}

/// Lines shown on top of the scene for `phase`.
#[must_use]
pub fn hud_texts(phase: GamePhase, score: u64, surface: Vec2) -> Vec<HudText> {
    let mut lines = Vec::new();
    let center_x = (surface.x / 2.0).floor();
    let center_y = (surface.y / 2.0).floor();

    if phase != GamePhase::StartScreen {
        lines.push(HudText::new(
            format!("Distance: {score}"),
            FontSize::Small,
            palette::TEXT,
            TextAnchor::TopLeft(Vec2::splat(SCORE_MARGIN)),
        ));
    }

    match phase {
        GamePhase::StartScreen => {
            let centered = |text: &str, size: FontSize, y: f32| {
                HudText::new(text, size, palette::TEXT, TextAnchor::Center(Vec2::new(center_x, y)))
            };

            lines.push(centered(WINDOW_TITLE, FontSize::Large, center_y - 180.0));
            let step = FontSize::ExtraSmall.line_height() + MYTH_LINE_SPACING;
            let mut y = center_y - 80.0;
            for line in MYTH {
                lines.push(centered(line, FontSize::ExtraSmall, y));
                y += step;
            }
            lines.push(centered(OBJECTIVE, FontSize::Small, center_y + 30.0));
            lines.push(centered(CONTROLS, FontSize::Small, center_y + 80.0));
            lines.push(centered(START_PROMPT, FontSize::Medium, center_y + 150.0));
        }
        GamePhase::GameOver => {
            let top = |text: String, size: FontSize, color: Color, y: f32| {
                HudText::new(text, size, color, TextAnchor::TopCenter(Vec2::new(center_x, y)))
            };

            lines.push(top(
                GAME_OVER_HEADLINE.to_owned(),
                FontSize::Large,
                palette::PUSHER,
                center_y - 100.0,
            ));
            lines.push(top(
                format!("Furthest Distance: {score}"),
                FontSize::Small,
                palette::TEXT,
                center_y,
            ));
            lines.push(top(
                RESTART_PROMPT.to_owned(),
                FontSize::Small,
                palette::TEXT,
                center_y + 50.0,
            ));
        }
        GamePhase::ReadyToPlay | GamePhase::Playing => {}
    }

    lines
}

/// Translucent veil covering the scene, shown only after a run ends.
#[must_use]
pub fn veil(phase: GamePhase) -> Option<Color> {
    (phase == GamePhase::GameOver).then_some(palette::GAME_OVER_VEIL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    fn texts(phase: GamePhase, score: u64) -> Vec<String> {
        hud_texts(phase, score, surface())
            .into_iter()
            .map(|line| line.text)
            .collect()
    }

    #[test]
    fn start_screen_tells_the_story_without_a_score() {
        let lines = texts(GamePhase::StartScreen, 0);

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "The Trial of Sisyphus");
        assert!(lines[1].starts_with("In Greek myth"));
        assert_eq!(lines[7], "Press SPACE to Begin the Trial");
        assert!(lines.iter().all(|line| !line.starts_with("Distance")));
    }

    #[test]
    fn active_phases_only_show_the_distance() {
        for phase in [GamePhase::ReadyToPlay, GamePhase::Playing] {
            let lines = hud_texts(phase, 17, surface());

            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0].text, "Distance: 17");
            assert_eq!(lines[0].size, FontSize::Small);
            assert_eq!(lines[0].anchor, TextAnchor::TopLeft(Vec2::new(10.0, 10.0)));
        }
    }

    #[test]
    fn game_over_reports_the_furthest_distance() {
        let lines = hud_texts(GamePhase::GameOver, 305, surface());

        assert_eq!(
            lines.iter().map(|line| line.text.as_str()).collect::<Vec<_>>(),
            vec![
                "Distance: 305",
                "The Boulder Stopped",
                "Furthest Distance: 305",
                "A new day. Press SPACE to try again.",
            ]
        );
        assert_eq!(lines[1].color, palette::PUSHER);
        assert_eq!(lines[1].anchor, TextAnchor::TopCenter(Vec2::new(400.0, 200.0)));
    }

    #[test]
    fn myth_lines_are_evenly_spaced() {
        let lines = hud_texts(GamePhase::StartScreen, 0, surface());
        let ys: Vec<f32> = lines[1..5]
            .iter()
            .map(|line| match line.anchor {
                TextAnchor::Center(point) => point.y,
                other => panic!("unexpected anchor {other:?}"),
            })
            .collect();

        assert_eq!(ys[0], 220.0);
        assert!((ys[1] - ys[0] - 26.0).abs() < 1e-4);
        assert!((ys[3] - ys[2] - 26.0).abs() < 1e-4);
    }

    #[test]
    fn veil_only_covers_game_over() {
        assert_eq!(veil(GamePhase::GameOver), Some(palette::GAME_OVER_VEIL));
        assert_eq!(veil(GamePhase::Playing), None);
        assert_eq!(FontSize::Large.pixels(), 74);
        assert_eq!(FontSize::ExtraSmall.pixels(), 28);
    }
}
