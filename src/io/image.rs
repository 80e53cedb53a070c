use image::ImageBuffer;
use log::info;
use std::path::Path;

/// Saves a packed 0RGB buffer to an image file (format from the extension).
pub fn save_buffer_to_image(
    buffer: &[u32],
    width: usize,
    height: usize,
    path: &str,
) -> Result<(), String> {
    let mut img_buf = ImageBuffer::new(width as u32, height as u32);

    for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
        let color = buffer[(y as usize) * width + (x as usize)];

        let r = ((color >> 16) & 0xFF) as u8;
        let g = ((color >> 8) & 0xFF) as u8;
        let b = (color & 0xFF) as u8;
        *pixel = image::Rgb([r, g, b]);
    }

    img_buf
        .save(Path::new(path))
        .map_err(|e| format!("Failed to save image to '{}': {}", path, e))?;

    info!("Saved {}x{} image to {}", width, height, path);
    Ok(())
}
