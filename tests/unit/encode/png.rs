use super::*;
use crate::foundation::core::{Canvas, Rgba8};

#[test]
fn png_round_trips_pixels() {
    let mut frame = FrameRGBA::filled(Canvas::new(5, 3).unwrap(), Rgba8::BLACK);
    frame.set_pixel(4, 2, Rgba8::new(9, 8, 7, 6));
    let bytes = encode_png(&frame).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (5, 3));
    assert_eq!(decoded.into_raw(), frame.data);
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("captcha-forge-png-{}", std::process::id()));
    let path = dir.join("nested").join("frame.png");
    let frame = FrameRGBA::filled(Canvas::new(2, 2).unwrap(), Rgba8::DEFAULT_TEXT);
    write_png(&frame, &path).unwrap();
    assert!(path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
