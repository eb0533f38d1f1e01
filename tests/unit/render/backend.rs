use super::*;

#[test]
fn filled_frame_has_canvas_size() {
    let f = FrameRGBA::filled(Canvas::new(3, 2).unwrap(), Rgba8::BLACK);
    assert_eq!((f.width, f.height), (3, 2));
    assert_eq!(f.data.len(), 3 * 2 * 4);
    assert!(f.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn pixel_access_is_row_major_and_bounds_checked() {
    let mut f = FrameRGBA::filled(Canvas::new(4, 3).unwrap(), Rgba8::BLACK);
    f.set_pixel(3, 1, Rgba8::new(1, 2, 3, 4));
    assert_eq!(&f.data[(4 + 3) * 4..(4 + 3) * 4 + 4], &[1, 2, 3, 4]);
    assert_eq!(f.pixel(3, 1), Some(Rgba8::new(1, 2, 3, 4)));
    assert_eq!(f.pixel(4, 0), None);
    assert_eq!(f.pixel(0, 3), None);
    f.set_pixel(10, 10, Rgba8::new(9, 9, 9, 9));
}

#[test]
fn from_rgba8_checks_length() {
    assert!(FrameRGBA::from_rgba8(2, 2, vec![0; 16]).is_ok());
    assert!(matches!(
        FrameRGBA::from_rgba8(2, 2, vec![0; 15]),
        Err(CaptchaError::Render(_))
    ));
}

#[test]
fn rgb8_drops_alpha() {
    let f = FrameRGBA::from_rgba8(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    assert_eq!(f.to_rgb8(), vec![1, 2, 3, 5, 6, 7]);
    let img = f.to_rgba_image().unwrap();
    assert_eq!(img.get_pixel(1, 0).0, [5, 6, 7, 8]);
}
