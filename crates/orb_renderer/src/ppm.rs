//! Plain-text PPM (`P3`) output.
//!
//! Header `P3 <width> <height> 255` on one line, then one `r g b ` line per
//! pixel from the top row down. Every value is followed by a single space.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::RenderResult;
use crate::renderer::{color_to_rgb, ImageBuffer};

/// Write `image` as PPM to any writer.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: W) -> RenderResult<()> {
    let mut writer = BufWriter::new(writer);

    writeln!(writer, "P3 {} {} 255", image.width, image.height)?;
    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(writer, "{} {} {} ", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write `image` as PPM to a file, replacing it if present.
pub fn save_ppm(image: &ImageBuffer, path: impl AsRef<Path>) -> RenderResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_ppm(image, file)?;
    log::info!("Saved {}x{} image to {:?}", image.width, image.height, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{RenderMode, Renderer};
    use orb_core::{Camera, RenderSettings, Scene};
    use orb_math::{Color, Vec3};

    fn to_string(image: &ImageBuffer) -> String {
        let mut bytes = Vec::new();
        write_ppm(image, &mut bytes).expect("write to memory");
        String::from_utf8(bytes).expect("ppm is ascii")
    }

    #[test]
    fn test_single_black_pixel() {
        let image = ImageBuffer::new(1, 1);
        assert_eq!(to_string(&image), "P3 1 1 255\n0 0 0 \n");
    }

    #[test]
    fn test_rendered_black_scene_writes_black_pixel() {
        let scene = Scene::new(
            "black",
            Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.5, 0.0),
            Vec::new(),
        );

        for mode in [RenderMode::Sequential, RenderMode::Parallel { bucket_size: 4 }] {
            let image = Renderer::new(&scene, RenderSettings::new(1, 1, 1, 12345))
                .expect("valid input")
                .with_mode(mode)
                .render()
                .expect("render");
            assert_eq!(to_string(&image), "P3 1 1 255\n0 0 0 \n");
        }
    }

    #[test]
    fn test_rows_written_top_down() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Color::ONE);
        image.set(1, 1, Color::new(0.0, 1.0, 0.0));

        let text = to_string(&image);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["P3 2 2 255", "255 255 255 ", "0 0 0 ", "0 0 0 ", "0 255 0 "]
        );
    }

    #[test]
    fn test_out_of_range_channels_clamp() {
        let mut image = ImageBuffer::new(1, 1);
        image.set(0, 0, Color::new(-2.0, 7.5, 0.5));

        // 0.5^(1/2.2) * 255 + 0.5 = 186.6
        assert_eq!(to_string(&image), "P3 1 1 255\n0 255 186 \n");
    }

    #[test]
    fn test_save_ppm() {
        let path = std::env::temp_dir().join(format!("orb_ppm_test_{}.ppm", std::process::id()));
        let image = ImageBuffer::new(3, 2);

        save_ppm(&image, &path).expect("save");
        let text = std::fs::read_to_string(&path).expect("read back");
        std::fs::remove_file(&path).ok();

        assert!(text.starts_with("P3 3 2 255\n"));
        assert_eq!(text.lines().count(), 7);
    }
}
