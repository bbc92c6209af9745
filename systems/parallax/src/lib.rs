#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded generator that scatters decorative spikes across three depth layers.
//!
//! Layouts are a pure function of the seed, the layer specifications, the
//! hill, and the horizontal span around the run origin. Elements never move
//! after generation; parallax is applied at render time through
//! [`BackgroundElement::screen_x`].

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sisyphus_core::{BackgroundElement, ElementKind, HillProfile, LayerDepth, Shade};
use thiserror::Error;

const WORLD_WIDTH_FACTOR: f64 = 3.0;
const MAX_WORLD_WIDTH_FACTOR: f64 = 64.0;

/// Errors reported when constructing an invalid layer specification.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayerSpecError {
    /// The smallest spike length exceeds the largest.
    #[error("height range is inverted ({min}..={max})")]
    InvertedHeightRange {
        /// Requested minimum height.
        min: u32,
        /// Requested maximum height.
        max: u32,
    },
    /// The narrowest spike exceeds the widest.
    #[error("width range is inverted ({min}..={max})")]
    InvertedWidthRange {
        /// Requested minimum width.
        min: u32,
        /// Requested maximum width.
        max: u32,
    },
    /// Parallax factors outside `(0, 1]` would outrun the camera or freeze.
    #[error("parallax factor must lie in (0, 1] (received {parallax})")]
    ParallaxOutOfRange {
        /// Rejected parallax factor.
        parallax: f64,
    },
    /// Vertical jitter is expressed as a finite, non-negative magnitude.
    #[error("vertical variation must be finite and non-negative (received {variation})")]
    InvalidVariation {
        /// Rejected variation.
        variation: f64,
    },
}

/// Generation parameters for one depth layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSpec {
    depth: LayerDepth,
    count: usize,
    parallax: f64,
    shade: Shade,
    heights: RangeInclusive<u32>,
    widths: RangeInclusive<u32>,
    y_variation: f64,
}

impl LayerSpec {
    /// Creates a validated layer specification.
    ///
    /// Returns an error when a size range is inverted, the parallax factor is
    /// outside `(0, 1]`, or the vertical variation is negative or not finite.
    pub fn new(
        depth: LayerDepth,
        count: usize,
        parallax: f64,
        shade: Shade,
        heights: RangeInclusive<u32>,
        widths: RangeInclusive<u32>,
        y_variation: f64,
    ) -> Result<Self, LayerSpecError> {
        if heights.start() > heights.end() {
            return Err(LayerSpecError::InvertedHeightRange {
                min: *heights.start(),
                max: *heights.end(),
            });
        }
        if widths.start() > widths.end() {
            return Err(LayerSpecError::InvertedWidthRange {
                min: *widths.start(),
                max: *widths.end(),
            });
        }
        if !(parallax > 0.0 && parallax <= 1.0) {
            return Err(LayerSpecError::ParallaxOutOfRange { parallax });
        }
        if !(y_variation.is_finite() && y_variation >= 0.0) {
            return Err(LayerSpecError::InvalidVariation {
                variation: y_variation,
            });
        }

        Ok(Self {
            depth,
            count,
            parallax,
            shade,
            heights,
            widths,
            y_variation,
        })
    }

    /// Depth band populated by this layer.
    #[must_use]
    pub const fn depth(&self) -> LayerDepth {
        self.depth
    }

    /// Number of elements generated for this layer.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Parallax factor assigned to every element of this layer.
    #[must_use]
    pub const fn parallax(&self) -> f64 {
        self.parallax
    }

    /// Inclusive spike length bounds.
    #[must_use]
    pub fn heights(&self) -> RangeInclusive<u32> {
        self.heights.clone()
    }

    /// Inclusive spike width bounds.
    #[must_use]
    pub fn widths(&self) -> RangeInclusive<u32> {
        self.widths.clone()
    }

    /// Maximum vertical jitter applied around the hill line.
    #[must_use]
    pub const fn y_variation(&self) -> f64 {
        self.y_variation
    }

    fn far() -> Self {
        Self {
            depth: LayerDepth::Far,
            count: 15,
            parallax: 0.5,
            shade: Shade::from_rgb(25, 25, 25),
            heights: 80..=180,
            widths: 30..=60,
            y_variation: 20.0,
        }
    }

    fn mid() -> Self {
        Self {
            depth: LayerDepth::Mid,
            count: 12,
            parallax: 0.75,
            shade: Shade::from_rgb(40, 40, 40),
            heights: 60..=150,
            widths: 25..=50,
            y_variation: 15.0,
        }
    }

    fn near() -> Self {
        Self {
            depth: LayerDepth::Near,
            count: 10,
            parallax: 0.95,
            shade: Shade::from_rgb(55, 55, 55),
            heights: 50..=120,
            widths: 20..=40,
            y_variation: 10.0,
        }
    }
}

/// Configuration parameters required to construct the generator.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    layers: Vec<LayerSpec>,
    world_width_factor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            vec![LayerSpec::far(), LayerSpec::mid(), LayerSpec::near()],
            WORLD_WIDTH_FACTOR,
        )
    }
}

impl Config {
    /// Creates a configuration from layer specs ordered far to near.
    ///
    /// `world_width_factor` is the number of screen widths, centred on the run
    /// origin, that the elements are scattered across. It is clamped to
    /// `[0, 64]`; NaN collapses every element onto the origin.
    #[must_use]
    pub fn new(layers: Vec<LayerSpec>, world_width_factor: f64) -> Self {
        let world_width_factor = if world_width_factor.is_nan() {
            0.0
        } else {
            world_width_factor.clamp(0.0, MAX_WORLD_WIDTH_FACTOR)
        };

        Self {
            layers,
            world_width_factor,
        }
    }

    /// Layer specifications ordered far to near.
    #[must_use]
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Number of screen widths covered by the scattered elements.
    #[must_use]
    pub const fn world_width_factor(&self) -> f64 {
        self.world_width_factor
    }
}

/// Elements generated for a single depth layer.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundLayer {
    depth: LayerDepth,
    elements: Vec<BackgroundElement>,
}

impl BackgroundLayer {
    /// Depth band of the layer.
    #[must_use]
    pub const fn depth(&self) -> LayerDepth {
        self.depth
    }

    /// Elements scattered across the layer.
    #[must_use]
    pub fn elements(&self) -> &[BackgroundElement] {
        &self.elements
    }
}

/// Pure generator that scatters background layers from a seed.
#[derive(Debug, Default)]
pub struct Parallax {
    config: Config,
}

impl Parallax {
    /// Creates a generator using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generates every layer, far to near, for the provided seed.
    ///
    /// Elements are spread uniformly across `world_width_factor` screen widths
    /// centred on `origin_x`. Stalagmites rest on the hill line offset by the
    /// layer's vertical variation.
    #[must_use]
    pub fn generate(
        &self,
        seed: u64,
        hill: &HillProfile,
        origin_x: f64,
        screen_width: f64,
    ) -> Vec<BackgroundLayer> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let half_span = self.config.world_width_factor * screen_width / 2.0;

        self.config
            .layers
            .iter()
            .map(|spec| BackgroundLayer {
                depth: spec.depth,
                elements: (0..spec.count)
                    .map(|_| scatter_element(&mut rng, spec, hill, origin_x, half_span))
                    .collect(),
            })
            .collect()
    }
}

fn scatter_element(
    rng: &mut ChaCha8Rng,
    spec: &LayerSpec,
    hill: &HillProfile,
    origin_x: f64,
    half_span: f64,
) -> BackgroundElement {
    let initial_x = rng.gen_range(-half_span..=half_span) + origin_x;
    let height = rng.gen_range(spec.heights.clone());
    let width = rng.gen_range(spec.widths.clone());
    let kind = if rng.gen_bool(0.5) {
        ElementKind::Stalagmite
    } else {
        ElementKind::Stalactite
    };
    let jitter = rng.gen_range(-spec.y_variation..=spec.y_variation);

    BackgroundElement::new(
        spec.depth,
        kind,
        initial_x,
        hill.height(initial_x) + jitter,
        f64::from(width),
        f64::from(height),
        spec.parallax,
        spec.shade,
    )
}
