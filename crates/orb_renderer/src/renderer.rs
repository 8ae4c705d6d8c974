//! Image sampling driver.
//!
//! Each pixel is split into 2x2 cells. Every cell averages `samples`
//! tent-jittered camera rays, is clamped to [0, 1], and contributes a
//! quarter of the pixel's final color.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use orb_core::{RenderSettings, Scene, Sphere};
use orb_math::{Color, Interval, XorShiftRng};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::camera::CameraBasis;
use crate::error::{RenderError, RenderResult};
use crate::radiance::radiance;

/// Sub-pixel cells per axis.
const SUBPIXELS: u32 = RenderSettings::SUBPIXELS;

/// Weight of one cell in the pixel average.
const CELL_WEIGHT: f64 = 0.25;

/// Display gamma applied at output.
pub const GAMMA: f64 = 2.2;

/// Clamp every channel to [0, 1].
#[inline]
pub fn clamp_color(color: Color) -> Color {
    let unit = Interval::UNIT;
    Color::new(unit.clamp(color.x), unit.clamp(color.y), unit.clamp(color.z))
}

/// Gamma-encode one linear channel to 8 bits.
#[inline]
pub fn to_display_byte(linear: f64) -> u8 {
    (Interval::UNIT.clamp(linear).powf(1.0 / GAMMA) * 255.0 + 0.5) as u8
}

/// Convert a linear color to gamma-encoded 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [
        to_display_byte(color.x),
        to_display_byte(color.y),
        to_display_byte(color.z),
    ]
}

/// Estimate the color of one pixel.
///
/// `y` counts up from the bottom of the image. Draws are taken cell by cell
/// (row-major within the pixel), two for the jitter and then whatever the
/// radiance estimate needs, per sample.
pub fn render_pixel(
    spheres: &[Sphere],
    basis: &CameraBasis,
    x: u32,
    y: u32,
    samples: u32,
    rng: &mut XorShiftRng,
) -> Color {
    let mut color = Color::ZERO;
    let inv_samples = 1.0 / f64::from(samples);

    for sy in 0..SUBPIXELS {
        for sx in 0..SUBPIXELS {
            let mut cell = Color::ZERO;
            for _ in 0..samples {
                let ray = basis.sample(x, y, sx, sy, rng);
                cell = cell + radiance(spheres, &ray, 0, rng) * inv_samples;
            }
            color = color + clamp_color(cell) * CELL_WEIGHT;
        }
    }

    color
}

/// Rendered pixels, row 0 at the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y), y counted from the top.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), y counted from the top.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }
}

/// How pixels are distributed over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// One thread and one random stream, pixels in output order.
    Sequential,
    /// Buckets on the rayon pool, one random stream per pixel.
    Parallel { bucket_size: u32 },
}

impl Default for RenderMode {
    fn default() -> Self {
        RenderMode::Parallel {
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Cooperative cancellation flag, checked between pixels.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every render holding a clone of this token to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Pixels finished so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProgress {
    pub completed: usize,
    pub total: usize,
}

impl RenderProgress {
    /// Completed share in [0, 1].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// A configured render of one scene.
///
/// The scene is borrowed read-only; the random state lives inside each
/// call to [`Renderer::render`].
pub struct Renderer<'a> {
    scene: &'a Scene,
    settings: RenderSettings,
    basis: CameraBasis,
    mode: RenderMode,
    cancel: CancelToken,
}

impl<'a> Renderer<'a> {
    /// Validate inputs and set up the camera frame.
    pub fn new(scene: &'a Scene, settings: RenderSettings) -> RenderResult<Self> {
        settings.validate()?;
        scene.validate()?;

        let basis = CameraBasis::new(&scene.camera, settings.width, settings.height);
        log::debug!("Camera basis: {:?}", basis);

        Ok(Self {
            scene,
            settings,
            basis,
            mode: RenderMode::default(),
            cancel: CancelToken::new(),
        })
    }

    /// Set the threading mode.
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Render the full image.
    pub fn render(&self) -> RenderResult<ImageBuffer> {
        self.render_with_progress(&|_: RenderProgress| {})
    }

    /// Render the full image, reporting progress after each row
    /// (sequential) or bucket (parallel).
    pub fn render_with_progress(
        &self,
        progress: &(dyn Fn(RenderProgress) + Sync),
    ) -> RenderResult<ImageBuffer> {
        let s = &self.settings;
        log::info!(
            "Rendering '{}' at {}x{} with {} spp ({:?}, seed {})",
            self.scene.name,
            s.width,
            s.height,
            s.samples_per_pixel(),
            self.mode,
            s.seed
        );

        let start = Instant::now();
        let image = match self.mode {
            RenderMode::Sequential => self.render_sequential(progress)?,
            RenderMode::Parallel { bucket_size } => self.render_parallel(bucket_size, progress)?,
        };

        log::info!("Rendered in {:?}", start.elapsed());
        Ok(image)
    }

    /// Single stream, pixels in output order. This is the canonical
    /// rendering of a seed; parallel mode uses per-pixel streams instead.
    fn render_sequential(
        &self,
        progress: &(dyn Fn(RenderProgress) + Sync),
    ) -> RenderResult<ImageBuffer> {
        let (width, height) = (self.settings.width, self.settings.height);
        let total = self.settings.pixel_count();
        let mut image = ImageBuffer::new(width, height);
        let mut rng = XorShiftRng::new(self.settings.seed);

        for (i, pixel) in image.pixels.iter_mut().enumerate() {
            if self.cancel.is_cancelled() {
                log::info!("Render cancelled after {} of {} pixels", i, total);
                return Err(RenderError::Cancelled);
            }

            let x = (i % width as usize) as u32;
            let y = height - (i / width as usize) as u32 - 1;
            *pixel = render_pixel(
                &self.scene.spheres,
                &self.basis,
                x,
                y,
                self.settings.samples,
                &mut rng,
            );

            if (i + 1) % width as usize == 0 {
                progress(RenderProgress {
                    completed: i + 1,
                    total,
                });
            }
        }

        Ok(image)
    }

    fn render_parallel(
        &self,
        bucket_size: u32,
        progress: &(dyn Fn(RenderProgress) + Sync),
    ) -> RenderResult<ImageBuffer> {
        let (width, height) = (self.settings.width, self.settings.height);
        let total = self.settings.pixel_count();
        let buckets = generate_buckets(width, height, bucket_size);
        log::debug!(
            "Split image into {} buckets of up to {}px on {} threads",
            buckets.len(),
            bucket_size,
            rayon::current_num_threads()
        );

        let completed = AtomicUsize::new(0);
        let results = buckets
            .par_iter()
            .map(|bucket| -> RenderResult<BucketResult> {
                let pixels = render_bucket(
                    bucket,
                    &self.scene.spheres,
                    &self.basis,
                    &self.settings,
                    &self.cancel,
                )?;
                let done = completed.fetch_add(bucket.pixel_count(), Ordering::Relaxed)
                    + bucket.pixel_count();
                progress(RenderProgress {
                    completed: done,
                    total,
                });
                Ok(BucketResult::new(*bucket, pixels))
            })
            .collect::<RenderResult<Vec<_>>>();

        let results = match results {
            Ok(results) => results,
            Err(err) => {
                log::info!("Render stopped: {}", err);
                return Err(err);
            }
        };

        let mut image = ImageBuffer::new(width, height);
        for result in results {
            let bucket = result.bucket;
            for (i, color) in result.pixels.into_iter().enumerate() {
                let local_x = i as u32 % bucket.width;
                let local_y = i as u32 / bucket.width;
                image.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }

        Ok(image)
    }
}
