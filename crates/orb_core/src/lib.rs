//! Orb Core - scene description for the Orb sphere path tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Sphere`, `Reflectance`, `Camera`
//! - **Render settings**: image size, sample count and seed
//! - **Built-in scenes**: the Cornell box and the "wada" scene
//! - **JSON loading**: scene files deserialized with serde
//!
//! # Example
//!
//! ```ignore
//! use orb_core::{RenderSettings, Scene};
//!
//! let scene = Scene::load("scene.json")?;
//! let settings = RenderSettings::new(320, 240, 16, 12345);
//! settings.validate()?;
//! ```

pub mod error;
pub mod presets;
pub mod scene;
pub mod settings;

pub use error::{SceneError, SceneResult, SettingsError};
pub use presets::PRESET_NAMES;
pub use scene::{Camera, Reflectance, Scene, Sphere};
pub use settings::RenderSettings;
