//! Simple path tracer example.
//!
//! Renders the built-in Cornell box on all cores and saves it as PPM.

use orb_renderer::{save_ppm, RenderMode, RenderSettings, Renderer, Scene};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Orb Path Tracer - Simple Example");
    println!("================================");

    let scene = Scene::cornell_box();
    let settings = RenderSettings::new(256, 192, 16, 12345);

    println!(
        "Rendering {}x{} @ {} spp...",
        settings.width,
        settings.height,
        settings.samples_per_pixel()
    );

    let start = std::time::Instant::now();
    let image = Renderer::new(&scene, settings)?
        .with_mode(RenderMode::Parallel { bucket_size: 32 })
        .render()?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {}", filename);

    Ok(())
}
