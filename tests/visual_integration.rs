use bfc_logo_grid::rendering::raster::{BlockRasterizer, FileLogoLoader};
use bfc_logo_grid::{Dashboard, GridConfig, Member, MembersDocument, Mode, Ratio};
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bfc-logo-grid-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(dir.join("logos")).unwrap();
    dir
}

fn write_logo(dir: &std::path::Path, file: &str, w: u32, h: u32, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    img.save(dir.join("logos").join(file)).unwrap();
}

fn dashboard(dir: &std::path::Path) -> Dashboard {
    let doc = MembersDocument {
        members: vec![
            Member::new("Red Co", "founding").with_logo("logos/red.png").founding(true),
            Member::new("Green Co", "executive").with_logo("logos/green.png"),
            Member::new("No Logo Inc", "industry"),
        ],
        tiers: serde_json::Value::Null,
    };
    let config = GridConfig { export_dir: dir.to_path_buf(), ..Default::default() };
    Dashboard::new(doc, config)
}

fn count_pixels(img: &image::RgbaImage, rgba: [u8; 4]) -> usize {
    img.pixels().filter(|p| p.0 == rgba).count()
}

#[test]
fn landscape_export_draws_logos_and_text() {
    let dir = scratch_dir("landscape");
    write_logo(&dir, "red.png", 400, 100, [255, 0, 0, 255]);
    write_logo(&dir, "green.png", 50, 50, [0, 255, 0, 255]);
    let dash = dashboard(&dir);
    let raster = BlockRasterizer::new(Box::new(FileLogoLoader::new(&dir)));

    let path = dash.export_to_disk(&raster).expect("export written");
    assert_eq!(path.file_name().unwrap(), "bfc-members-landscape-tiered.png");

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (1600, 900));
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert!(count_pixels(&img, [255, 0, 0, 255]) > 0, "founding logo missing");
    assert!(count_pixels(&img, [0, 255, 0, 255]) > 0, "executive logo missing");
    assert!(count_pixels(&img, [255, 255, 255, 255]) > 0, "labels missing");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn square_export_has_square_dimensions() {
    let dir = scratch_dir("square");
    let mut dash = dashboard(&dir);
    dash.set_ratio(Ratio::Square);
    dash.set_mode(Mode::Alphabetical);

    let img = dash.export(&BlockRasterizer::default()).expect("export");
    assert_eq!(img.file_name, "bfc-members-square-alphabetical.png");
    assert_eq!((img.width, img.height), (1500, 1500));
    let decoded = image::load_from_memory(&img.png_data).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (1500, 1500));
    // no logos load, so every member falls back to its name in white
    assert!(count_pixels(&decoded, [255, 255, 255, 255]) > 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn oversized_logos_are_scaled_into_their_box() {
    let dir = scratch_dir("contain");
    write_logo(&dir, "red.png", 4000, 1000, [255, 0, 0, 255]);
    write_logo(&dir, "green.png", 10, 10, [0, 255, 0, 255]);
    let dash = dashboard(&dir);
    let raster = BlockRasterizer::new(Box::new(FileLogoLoader::new(&dir)));
    let img = dash.export(&raster).expect("export");
    let decoded = image::load_from_memory(&img.png_data).unwrap().to_rgba8();

    // Large boxes are 144x48 at scale 1.0; exports scale by 1.6
    let red = count_pixels(&decoded, [255, 0, 0, 255]);
    let max_box = ((144.0f64 * 1.6).ceil() * (48.0f64 * 1.6).ceil()) as usize;
    assert!(red > 0 && red <= max_box, "red pixels {}", red);

    let _ = std::fs::remove_dir_all(&dir);
}
