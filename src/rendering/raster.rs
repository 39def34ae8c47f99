//! Rasterizers turn paint commands into PNG bytes.
//!
//! Export code only talks to the [`Rasterizer`] trait; [`BlockRasterizer`]
//! is the built-in software implementation.

use crate::rendering::paint::{PaintCommand, Rgba, FOREGROUND, GLYPH_ADVANCE};
use crate::rendering::Screenshot;
use crate::{Error, Result};
use image::imageops::FilterType;
use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use std::io::Cursor;
use std::path::PathBuf;

/// Renders a display list to an encoded image of exactly `width x height`.
pub trait Rasterizer {
    fn rasterize(&self, width: u32, height: u32, commands: &[PaintCommand]) -> Result<Screenshot>;
}

/// Source of logo bitmaps. Returning `None` makes the rasterizer fall back
/// to drawing the member name.
pub trait LogoLoader: Send + Sync {
    fn load(&self, src: &str) -> Option<RgbaImage>;
}

/// Loader that never finds a logo; every entry renders as text.
pub struct NoLogos;

impl LogoLoader for NoLogos {
    fn load(&self, _src: &str) -> Option<RgbaImage> {
        None
    }
}

/// Loads relative logo paths from a local directory.
///
/// Remote (`http...`) sources are not fetched.
pub struct FileLogoLoader {
    root: PathBuf,
}

impl FileLogoLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LogoLoader for FileLogoLoader {
    fn load(&self, src: &str) -> Option<RgbaImage> {
        if src.starts_with("http") {
            log::debug!("Skipping remote logo {}", src);
            return None;
        }
        let path = self.root.join(src);
        match image::open(&path) {
            Ok(img) => Some(img.to_rgba8()),
            Err(e) => {
                log::warn!("Failed to load logo {:?}: {}", path, e);
                None
            }
        }
    }
}

/// Software rasterizer: solid rectangles, block glyphs and contain-fit logos.
pub struct BlockRasterizer {
    logos: Box<dyn LogoLoader>,
}

impl BlockRasterizer {
    pub fn new(logos: Box<dyn LogoLoader>) -> Self {
        Self { logos }
    }
}

impl Default for BlockRasterizer {
    fn default() -> Self {
        Self::new(Box::new(NoLogos))
    }
}

fn fill_rect(img: &mut RgbaImage, x: i64, y: i64, w: i64, h: i64, rgba: Rgba) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w).min(img.width() as i64);
    let y1 = (y + h).min(img.height() as i64);
    let px = image::Rgba([rgba.0, rgba.1, rgba.2, rgba.3]);
    for yy in y0..y1 {
        for xx in x0..x1 {
            img.put_pixel(xx as u32, yy as u32, px);
        }
    }
}

/// Each visible character becomes a filled cell; good enough to show where
/// text lands without a font engine.
fn draw_text(img: &mut RgbaImage, x: i32, y: i32, size: f64, text: &str, rgba: Rgba) {
    let advance = size * GLYPH_ADVANCE;
    let glyph_w = (size * 0.5).round().max(1.0) as i64;
    let glyph_h = (size * 0.7).round().max(1.0) as i64;
    let top = y as i64 + (size * 0.15).round() as i64;
    for (i, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            continue;
        }
        let left = x as i64 + (i as f64 * advance).round() as i64;
        fill_rect(img, left, top, glyph_w, glyph_h, rgba);
    }
}

fn fit_contain(logo: &RgbaImage, max_w: u32, max_h: u32) -> RgbaImage {
    let (w, h) = logo.dimensions();
    if w == 0 || h == 0 {
        return RgbaImage::new(0, 0);
    }
    let scale = (max_w as f64 / w as f64).min(max_h as f64 / h as f64).min(1.0);
    let nw = ((w as f64 * scale).round() as u32).max(1);
    let nh = ((h as f64 * scale).round() as u32).max(1);
    if (nw, nh) == (w, h) {
        logo.clone()
    } else {
        image::imageops::resize(logo, nw, nh, FilterType::Triangle)
    }
}

impl Rasterizer for BlockRasterizer {
    fn rasterize(&self, width: u32, height: u32, commands: &[PaintCommand]) -> Result<Screenshot> {
        if width == 0 || height == 0 {
            return Err(Error::Export(format!("invalid surface {}x{}", width, height)));
        }
        let mut img = RgbaImage::new(width, height);

        for cmd in commands {
            match cmd {
                PaintCommand::SolidRect { x, y, width, height, rgba } => {
                    fill_rect(&mut img, *x as i64, *y as i64, *width as i64, *height as i64, *rgba);
                }
                PaintCommand::Text { x, y, size, text, rgba } => {
                    draw_text(&mut img, *x, *y, *size, text, *rgba);
                }
                PaintCommand::Image {
                    x,
                    y,
                    max_width,
                    max_height,
                    src,
                    fallback,
                    fallback_size,
                } => {
                    match self.logos.load(src) {
                        Some(logo) => {
                            let fitted = fit_contain(&logo, *max_width, *max_height);
                            let dy = (*max_height as i64 - fitted.height() as i64) / 2;
                            image::imageops::overlay(&mut img, &fitted, *x as i64, *y as i64 + dy);
                        }
                        None => draw_text(&mut img, *x, *y, *fallback_size, fallback, FOREGROUND),
                    }
                }
            }
        }

        let mut png_data = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png_data), ImageOutputFormat::Png)
            .map_err(|e| Error::Export(format!("PNG encoding failed: {}", e)))?;

        Ok(Screenshot { width, height, png_data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::paint::BACKGROUND;

    struct Checker;

    impl LogoLoader for Checker {
        fn load(&self, _src: &str) -> Option<RgbaImage> {
            Some(RgbaImage::from_pixel(200, 100, image::Rgba([255, 0, 0, 255])))
        }
    }

    fn decode(s: &Screenshot) -> RgbaImage {
        image::load_from_memory(&s.png_data).expect("decode").to_rgba8()
    }

    #[test]
    fn rasterize_returns_png_of_requested_size() {
        let cmds = vec![PaintCommand::SolidRect {
            x: 0,
            y: 0,
            width: 128,
            height: 64,
            rgba: BACKGROUND,
        }];
        let s = BlockRasterizer::default().rasterize(128, 64, &cmds).unwrap();
        assert_eq!(s.width, 128);
        assert_eq!(s.height, 64);
        assert_eq!(&s.png_data[0..8], b"\x89PNG\r\n\x1a\n");
        let img = decode(&s);
        assert_eq!(img.dimensions(), (128, 64));
        assert_eq!(img.get_pixel(5, 5).0, [0, 0, 0, 255]);
    }

    #[test]
    fn zero_surface_is_an_export_error() {
        let err = BlockRasterizer::default().rasterize(0, 10, &[]).unwrap_err();
        assert!(matches!(err, Error::Export(_)));
    }

    #[test]
    fn missing_logo_draws_fallback_text() {
        let cmds = vec![
            PaintCommand::SolidRect { x: 0, y: 0, width: 64, height: 32, rgba: BACKGROUND },
            PaintCommand::Image {
                x: 0,
                y: 0,
                max_width: 60,
                max_height: 20,
                src: "logos/missing.png".into(),
                fallback: "AB".into(),
                fallback_size: 10.0,
            },
        ];
        let img = decode(&BlockRasterizer::default().rasterize(64, 32, &cmds).unwrap());
        // first glyph cell spans x 0..5, y 2..9
        assert_eq!(img.get_pixel(1, 4).0, [255, 255, 255, 255]);
    }

    #[test]
    fn logos_are_scaled_to_fit_the_box() {
        let cmds = vec![PaintCommand::Image {
            x: 0,
            y: 0,
            max_width: 40,
            max_height: 40,
            src: "any".into(),
            fallback: "X".into(),
            fallback_size: 10.0,
        }];
        let r = BlockRasterizer::new(Box::new(Checker));
        let img = decode(&r.rasterize(50, 50, &cmds).unwrap());
        // 200x100 fits as 40x20, centred vertically at y 10..30
        assert_eq!(img.get_pixel(20, 15).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(20, 5).0[3], 0);
        assert_eq!(img.get_pixel(45, 15).0[3], 0);
    }
}
