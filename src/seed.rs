use std::path::PathBuf;

use log::debug;

use crate::error::Result;
use crate::grid::LifeGrid;

/// Where generation 0 comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum InitialState {
    /// Decode an image and threshold its average luminance.
    FromImage { path: PathBuf, threshold: u8 },
    /// Independent coin flip per cell.
    Random {
        width: usize,
        height: usize,
        alive_probability: f32,
        seed: u64,
    },
}

impl InitialState {
    pub fn provide(&self) -> Result<LifeGrid> {
        match self {
            InitialState::FromImage { path, threshold } => {
                let img = image::open(path)?.to_rgb8();
                debug!(
                    "decoded {} ({}x{})",
                    path.display(),
                    img.width(),
                    img.height()
                );
                LifeGrid::from_image(&img, *threshold)
            }
            InitialState::Random {
                width,
                height,
                alive_probability,
                seed,
            } => LifeGrid::random(*width, *height, *alive_probability, *seed),
        }
    }

    /// Short tag used to name exported frames.
    pub fn label(&self) -> &'static str {
        match self {
            InitialState::FromImage { .. } => "image",
            InitialState::Random { .. } => "random",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::{Rgb, RgbImage};

    #[test]
    fn random_provider_is_seeded() {
        let src = InitialState::Random {
            width: 40,
            height: 30,
            alive_probability: 0.2,
            seed: 5,
        };
        let a = src.provide().unwrap();
        assert_eq!((a.width(), a.height()), (40, 30));
        assert_eq!(a, src.provide().unwrap());
        assert_eq!(src.label(), "random");
    }

    #[test]
    fn image_provider_thresholds() {
        let dir = std::env::temp_dir().join(format!("lifegif-seed-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("checker.png");
        let img = RgbImage::from_fn(4, 3, |x, y| {
            if (x + y) % 2 == 0 { Rgb([255, 255, 255]) } else { Rgb([10, 20, 30]) }
        });
        img.save(&path).unwrap();

        let src = InitialState::FromImage {
            path: path.clone(),
            threshold: 126,
        };
        let g = src.provide().unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!((g.width(), g.height()), (4, 3));
        assert_eq!(g.population(), 6);
        assert!(g.cell(0, 0));
        assert!(!g.cell(1, 0));
    }

    #[test]
    fn missing_image_is_an_error() {
        let src = InitialState::FromImage {
            path: PathBuf::from("/nonexistent/lifegif.png"),
            threshold: 126,
        };
        assert!(matches!(src.provide(), Err(Error::Image(_))));
    }
}
