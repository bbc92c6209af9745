//! Screen-space geometry derived from a [`Scene`].
//!
//! Every function here is pure so backends only need to rasterise the
//! triangles, circles, and quads returned by [`compose`].

use glam::Vec2;
use sisyphus_core::{
    BackgroundElement, ElementKind, HillProfile, PusherPose, BOULDER_RADIUS, PUSHER_HEIGHT,
    PUSHER_WIDTH,
};

use crate::{hud, palette, Color, Scene};

/// Horizontal spacing between hill samples, in pixels.
pub const HILL_SAMPLE_STEP: f32 = 10.0;

const SHADE_OFFSET_FACTOR: f64 = 0.3;
const SHADE_RADIUS_FACTOR: f32 = 0.8;
const PUSHER_PIVOT_FACTOR: f32 = 0.4;

/// Filled triangle with a solid color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    /// Triangle corners in screen space.
    pub points: [Vec2; 3],
    /// Fill color.
    pub color: Color,
}

/// Filled circle with a solid color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    /// Centre in screen space.
    pub center: Vec2,
    /// Radius in pixels.
    pub radius: f32,
    /// Fill color.
    pub color: Color,
}

/// Everything drawn for one frame, in back to front order.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameVisuals {
    /// Background spikes that survived culling, far layers first.
    pub background: Vec<Triangle>,
    /// Hill silhouette split into triangles that reach the bottom edge.
    pub hill: Vec<Triangle>,
    /// Boulder body followed by its highlight.
    pub boulder: [Circle; 2],
    /// Rotated pusher rectangle as four corners in winding order.
    pub pusher: [Vec2; 4],
    /// HUD text for the current phase.
    pub hud: Vec<hud::HudText>,
    /// Veil drawn over the whole surface before the HUD, if any.
    pub veil: Option<Color>,
}

/// Builds every shape required to draw `scene` on a surface of `surface` pixels.
#[must_use]
pub fn compose(scene: &Scene, surface: Vec2) -> FrameVisuals {
    let camera = scene.camera_offset;
    let background = scene
        .background
        .iter()
        .filter_map(|element| {
            element_triangle(element, camera, surface).map(|points| Triangle {
                points,
                color: Color::from(element.shade()),
            })
        })
        .collect();

    let hill = hill_triangles(&hill_outline(&scene.hill, camera, surface), surface.y)
        .into_iter()
        .map(|points| Triangle {
            points,
            color: palette::HILL,
        })
        .collect();

    let angle = scene.hill.angle(scene.boulder.x);
    let boulder_center = world_to_screen(scene.boulder.x, scene.boulder.y(&scene.hill), camera);
    let boulder = [
        Circle {
            center: boulder_center,
            radius: BOULDER_RADIUS as f32,
            color: palette::BOULDER,
        },
        Circle {
            center: boulder_shade_center(boulder_center, angle),
            radius: BOULDER_RADIUS as f32 * SHADE_RADIUS_FACTOR,
            color: palette::BOULDER_SHADE,
        },
    ];

    FrameVisuals {
        background,
        hill,
        boulder,
        pusher: pusher_corners(&scene.pusher, camera),
        hud: hud::hud_texts(scene.phase, scene.score, surface),
        veil: hud::veil(scene.phase),
    }
}

/// Converts a world position to screen space for the given camera offset.
#[must_use]
pub fn world_to_screen(x: f64, y: f64, camera_offset: f64) -> Vec2 {
    Vec2::new((x - camera_offset) as f32, y as f32)
}

/// Samples the hill surface across the screen plus a small margin on each side.
///
/// Heights are clamped to `[-height, 2 * height]` of the surface so a runaway
/// hill still produces drawable coordinates.
#[must_use]
pub fn hill_outline(hill: &HillProfile, camera_offset: f64, surface: Vec2) -> Vec<Vec2> {
    let step = HILL_SAMPLE_STEP;
    let last = surface.x + step;
    let limit = f64::from(surface.y);

    let mut points = Vec::new();
    let mut screen_x = -step;
    while screen_x <= last {
        let world_y = hill.height(f64::from(screen_x) + camera_offset);
        points.push(Vec2::new(screen_x, world_y.clamp(-limit, 2.0 * limit) as f32));
        screen_x += step;
    }
    points
}

/// Splits the area below a hill outline into triangles ending at `bottom`.
#[must_use]
pub fn hill_triangles(outline: &[Vec2], bottom: f32) -> Vec<[Vec2; 3]> {
    outline
        .windows(2)
        .flat_map(|pair| {
            let (left, right) = (pair[0], pair[1]);
            let left_floor = Vec2::new(left.x, bottom);
            let right_floor = Vec2::new(right.x, bottom);
            [[left, right, right_floor], [left, right_floor, left_floor]]
        })
        .collect()
}

/// Screen-space triangle for a background element, or `None` when culled.
///
/// Stalactites hang from the top edge. Stalagmites stand on their base line,
/// which is pulled up to just below the surface, and are skipped entirely once
/// the base rises above the top edge by more than their own length.
#[must_use]
pub fn element_triangle(
    element: &BackgroundElement,
    camera_offset: f64,
    surface: Vec2,
) -> Option<[Vec2; 3]> {
    if !element.is_visible(camera_offset, f64::from(surface.x)) {
        return None;
    }

    let x = element.screen_x(camera_offset) as f32;
    let half_width = element.width() as f32 / 2.0;
    let height = element.height() as f32;

    match element.kind() {
        ElementKind::Stalagmite => {
            let base = (element.base_y() as f32).min(surface.y + height);
            if base <= -height {
                return None;
            }
            let apex = (-height).max(base - height);
            Some([
                Vec2::new(x - half_width, base),
                Vec2::new(x, apex),
                Vec2::new(x + half_width, base),
            ])
        }
        ElementKind::Stalactite => Some([
            Vec2::new(x - half_width, 0.0),
            Vec2::new(x, height),
            Vec2::new(x + half_width, 0.0),
        ]),
    }
}

/// Centre of the boulder highlight, nudged up the slope's normal.
#[must_use]
pub fn boulder_shade_center(center: Vec2, angle: f64) -> Vec2 {
    let offset = BOULDER_RADIUS * SHADE_OFFSET_FACTOR;
    let normal = angle + std::f64::consts::FRAC_PI_2;
    center + Vec2::new((offset * normal.cos()) as f32, (-offset * normal.sin()) as f32)
}

/// Corners of the pusher rectangle rotated counter-clockwise by the hill angle.
///
/// The rectangle is centred slightly above the pusher's feet so it leans into
/// the boulder rather than sinking into the hill.
#[must_use]
pub fn pusher_corners(pose: &PusherPose, camera_offset: f64) -> [Vec2; 4] {
    let feet = world_to_screen(pose.x, pose.y, camera_offset);
    let center = feet - Vec2::new(0.0, PUSHER_HEIGHT as f32 * PUSHER_PIVOT_FACTOR);
    let half = Vec2::new(PUSHER_WIDTH as f32, PUSHER_HEIGHT as f32) / 2.0;
    let (sin, cos) = (pose.angle as f32).sin_cos();
    // Screen y grows downward, so a visual counter-clockwise turn flips the sine terms.
    let rotate = |local: Vec2| {
        Vec2::new(
            local.x * cos + local.y * sin,
            -local.x * sin + local.y * cos,
        )
    };

    [
        center + rotate(Vec2::new(-half.x, -half.y)),
        center + rotate(Vec2::new(half.x, -half.y)),
        center + rotate(Vec2::new(half.x, half.y)),
        center + rotate(Vec2::new(-half.x, half.y)),
    ]
}
