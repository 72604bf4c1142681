use std::io::Write;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::grid::LifeGrid;

const ALIVE: [u8; 4] = [255, 255, 255, 255];
const DEAD: [u8; 4] = [0, 0, 0, 255];

/// Render one generation as RGBA: alive white, dead black.
pub fn render_frame(grid: &LifeGrid) -> Vec<u8> {
    let w = grid.width();
    let h = grid.height();
    let mut rgba = vec![0u8; w * h * 4];

    rgba.par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..w {
                let color = if grid.cell(x, y) { ALIVE } else { DEAD };
                row[x * 4..x * 4 + 4].copy_from_slice(&color);
            }
        });

    rgba
}

fn to_image(grid: &LifeGrid) -> Result<RgbaImage> {
    let (w, h) = (grid.width(), grid.height());
    let invalid = || Error::InvalidDimensions { width: w, height: h };
    let w32 = u32::try_from(w).map_err(|_| invalid())?;
    let h32 = u32::try_from(h).map_err(|_| invalid())?;
    RgbaImage::from_raw(w32, h32, render_frame(grid)).ok_or_else(invalid)
}

/// Encode frames as a looping GIF.
pub fn write_gif<W: Write>(out: W, frames: &[LifeGrid], delay_ms: u32) -> Result<()> {
    let mut encoder = GifEncoder::new(out);
    encoder.set_repeat(Repeat::Infinite)?;
    let delay = Delay::from_numer_denom_ms(delay_ms, 1);
    for g in frames {
        encoder.encode_frame(Frame::from_parts(to_image(g)?, 0, 0, delay))?;
    }
    Ok(())
}

pub fn encode_gif(frames: &[LifeGrid], delay_ms: u32) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_gif(&mut buf, frames, delay_ms)?;
    Ok(buf)
}

/// Save every frame as `{dir}/{label}{i}.png`. Returns the written paths.
pub fn save_frames(dir: impl AsRef<Path>, label: &str, frames: &[LifeGrid]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    frames
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let path = dir.join(format!("{}{}.png", label, i));
            image::save_buffer(
                &path,
                &render_frame(g),
                g.width() as u32,
                g.height() as u32,
                image::ColorType::Rgba8,
            )?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::AnimationDecoder;
    use image::codecs::gif::GifDecoder;
    use std::io::Cursor;

    #[test]
    fn alive_is_white_dead_is_black() {
        let g = LifeGrid::from_rows(&["O.", ".O"]).unwrap();
        let rgba = render_frame(&g);
        assert_eq!(rgba.len(), 16);
        assert_eq!(&rgba[0..4], &ALIVE);
        assert_eq!(&rgba[4..8], &DEAD);
        assert_eq!(&rgba[8..12], &DEAD);
        assert_eq!(&rgba[12..16], &ALIVE);
    }

    #[test]
    fn gif_has_one_frame_per_generation() {
        let g = LifeGrid::from_rows(&[".....", ".....", ".OOO.", ".....", "....."]).unwrap();
        let frames = crate::simulator::run(g, 3);
        let bytes = encode_gif(&frames, 50).unwrap();
        assert_eq!(&bytes[..3], b"GIF");

        let decoder = GifDecoder::new(Cursor::new(bytes)).unwrap();
        let decoded = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(decoded.len(), 4);
        let first = decoded[0].buffer();
        assert_eq!(first.dimensions(), (5, 5));
        assert_eq!(first.get_pixel(2, 2).0, ALIVE);
        assert_eq!(first.get_pixel(2, 1).0, DEAD);
    }

    #[test]
    fn gif_frames_match_rendered_buffer() {
        let g = LifeGrid::from_rows(&["O..", ".O.", "O.O", "..."]).unwrap();
        let bytes = encode_gif(std::slice::from_ref(&g), 10).unwrap();
        let decoded = GifDecoder::new(Cursor::new(bytes))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].buffer().as_raw(), &render_frame(&g));
    }

    #[test]
    fn frames_are_numbered_pngs() {
        let dir = std::env::temp_dir().join(format!("lifegif-frames-{}", std::process::id()));
        let frames = crate::simulator::run(LifeGrid::from_rows(&["OO", "OO"]).unwrap(), 2);
        let paths = save_frames(&dir, "random", &frames).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths[2].ends_with("random2.png"));
        let back = image::open(&paths[1]).unwrap().to_rgb8();
        assert_eq!(back.dimensions(), (2, 2));
        assert_eq!(back.get_pixel(0, 0).0, [255, 255, 255]);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
