/*!
Screenshot helper (feature `screenshot`): dump the PPU framebuffer to a
PNG file.
*/

use std::path::Path;

use crate::ppu::{NES_HEIGHT, NES_WIDTH, Ppu};

/// Write the current 256x240 RGBA framebuffer to `path` as PNG.
pub fn save_framebuffer_png<P: AsRef<Path>>(ppu: &Ppu, path: P) -> Result<(), String> {
    image::save_buffer(
        path,
        ppu.framebuffer(),
        NES_WIDTH as u32,
        NES_HEIGHT as u32,
        image::ExtendedColorType::Rgba8,
    )
    .map_err(|e| format!("failed to write PNG: {e}"))
}
