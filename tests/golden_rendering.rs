use std::fs;
use std::path::PathBuf;

use bfc_logo_grid::export::{export, ExportRequest, ExportedImage};
use bfc_logo_grid::rendering::raster::BlockRasterizer;
use bfc_logo_grid::{MembersDocument, Mode, Ratio};
use sha2::{Digest, Sha256};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

/// Digest of the decoded RGBA pixels, independent of PNG encoder settings.
fn pixel_digest(img: &ExportedImage) -> String {
    let pixels = image::load_from_memory(&img.png_data)
        .expect("decode export")
        .to_rgba8()
        .into_raw();
    hex::encode(Sha256::digest(&pixels))
}

fn check_golden(ratio: Ratio, mode: Mode) {
    let doc = MembersDocument::load("tests/fixtures/members.json").expect("read fixture");
    let request = ExportRequest::new(ratio, mode);
    let img = export(&doc.members, &request, "", &BlockRasterizer::default()).expect("export");
    assert_eq!((img.width, img.height), (request.size.width, request.size.height));

    let expected_path = golden_path(&request.file_name.replace(".png", ".sha256"));
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, format!("{}\n", pixel_digest(&img))).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(pixel_digest(&img), exp.trim(), "{} changed", request.file_name);
}

#[test]
fn golden_landscape_tiered() {
    check_golden(Ratio::Landscape, Mode::Tiered);
}

#[test]
fn golden_square_alphabetical() {
    check_golden(Ratio::Square, Mode::Alphabetical);
}
