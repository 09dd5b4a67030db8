//! Reduces a block texture to a single color.

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use thiserror::Error;

use super::color::Rgba8;

/// Channels closer than this are grouped in the same bucket by [`ExtractionPolicy::Mode`].
pub const DEFAULT_TOLERANCE: u8 = 20;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to decode the texture: {0}")]
    Decode(#[from] image::ImageError),
}

/// How the pixels of a texture are summarized.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ExtractionPolicy {
    /// The most common color, with similar colors counted together.
    #[default]
    Mode,
    /// The mean of every non-transparent pixel, made opaque.
    Average,
}

impl fmt::Display for ExtractionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionPolicy::Mode => write!(f, "mode"),
            ExtractionPolicy::Average => write!(f, "average"),
        }
    }
}

impl FromStr for ExtractionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mode" => Ok(ExtractionPolicy::Mode),
            "average" => Ok(ExtractionPolicy::Average),
            other => Err(format!("unknown extraction policy '{other}'")),
        }
    }
}

/// Decodes textures and computes their representative color with a fixed policy.
#[derive(Clone, Copy, Debug)]
pub struct ColorExtractor {
    policy: ExtractionPolicy,
    tolerance: u8,
}

impl Default for ColorExtractor {
    fn default() -> Self {
        Self::new(ExtractionPolicy::default())
    }
}

impl ColorExtractor {
    pub fn new(policy: ExtractionPolicy) -> Self {
        Self {
            policy,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Sets the bucket tolerance used by [`ExtractionPolicy::Mode`].
    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn policy(&self) -> ExtractionPolicy {
        self.policy
    }

    /// Decodes an encoded image (any format `image` can guess) and returns its color.
    pub fn extract<T: AsRef<[u8]>>(&self, bytes: T) -> Result<Rgba8, ExtractError> {
        let image = image::load_from_memory(bytes.as_ref())?.to_rgba8();
        Ok(self.extract_pixels(&image))
    }

    /// Returns the color of already decoded pixels. Fully transparent images give
    /// [`Rgba8::TRANSPARENT`].
    pub fn extract_pixels(&self, image: &RgbaImage) -> Rgba8 {
        let pixels = image
            .pixels()
            .map(|&pixel| Rgba8::from(pixel))
            .filter(|pixel| !pixel.is_transparent());

        match self.policy {
            ExtractionPolicy::Mode => most_common(pixels, self.tolerance),
            ExtractionPolicy::Average => average(pixels),
        }
    }
}

fn is_similar(a: &Rgba8, b: &Rgba8, tolerance: u8) -> bool {
    let tolerance = tolerance as i16;
    (a.r as i16 - b.r as i16).abs() < tolerance
        && (a.g as i16 - b.g as i16).abs() < tolerance
        && (a.b as i16 - b.b as i16).abs() < tolerance
}

/// Groups pixels into buckets keyed by the first color that opened them and returns the key
/// of the biggest one. On a tie the bucket opened first wins.
fn most_common<I>(pixels: I, tolerance: u8) -> Rgba8
where
    I: Iterator<Item = Rgba8>,
{
    let mut buckets: Vec<(Rgba8, u32)> = Vec::new();

    for pixel in pixels {
        match buckets
            .iter_mut()
            .find(|(representative, _)| is_similar(representative, &pixel, tolerance))
        {
            Some((_, count)) => *count += 1,
            None => buckets.push((pixel, 1)),
        }
    }

    let mut best: Option<(Rgba8, u32)> = None;
    for &(color, count) in &buckets {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((color, count));
        }
    }

    best.map_or(Rgba8::TRANSPARENT, |(color, _)| color)
}

fn average<I>(pixels: I) -> Rgba8
where
    I: Iterator<Item = Rgba8>,
{
    let (mut r, mut g, mut b, mut count) = (0u64, 0u64, 0u64, 0u64);
    for pixel in pixels {
        r += pixel.r as u64;
        g += pixel.g as u64;
        b += pixel.b as u64;
        count += 1;
    }

    if count == 0 {
        return Rgba8::TRANSPARENT;
    }

    Rgba8::opaque((r / count) as u8, (g / count) as u8, (b / count) as u8)
}
