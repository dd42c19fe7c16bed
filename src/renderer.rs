//! Used to pre-render the circle image every body is drawn with

use anyhow::{Result, anyhow};
use sfml::cpp::FBox;
use sfml::graphics::*;

/// Radius of the pre-rendered texture, sprites are scaled from it
pub const TEXTURE_RADIUS: u32 = 100;

/// Speed at which a body is drawn fully "hot"
const HOT_SPEED: f64 = 900.0;

pub fn circle(radius: u32, color: Color) -> Result<FBox<Image>> {
    let mut render_target = RenderTexture::new(radius * 2, radius * 2)
        .map_err(|e| anyhow!("failed to create render texture: {e:?}"))?;

    render_target.clear(Color::TRANSPARENT);

    let mut circle = CircleShape::new(radius as _, 200);
    circle.set_fill_color(color);
    circle.set_position((0., 0.));

    render_target.set_smooth(true);
    render_target.draw(&circle);
    render_target.display();

    render_target
        .texture()
        .copy_to_image()
        .map_err(|e| anyhow!("failed to copy circle texture: {e:?}"))
}

/// Slow bodies are blue-white, fast ones orange-red
pub fn speed_color(speed: f64) -> Color {
    let t = (speed / HOT_SPEED).clamp(0.0, 1.0);
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;

    Color::rgb(lerp(150.0, 255.0), lerp(190.0, 90.0), lerp(255.0, 40.0))
}
