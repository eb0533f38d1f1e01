use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 10,
        height: 5,
    }
}

#[test]
fn records_calls_in_order() {
    let mut c = RecordingCanvas::new(canvas(), 3.0);
    c.draw_glyph('A', Point::new(1.0, 2.0), 0.5, Rgba8::DEFAULT_TEXT)
        .unwrap();
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.curve_to((1.0, 1.0), (2.0, 2.0), (9.0, 4.0));
    c.stroke_path(&path, Rgba8::DEFAULT_STROKE).unwrap();

    assert_eq!(c.calls().len(), 2);
    assert_eq!(c.glyphs().count(), 1);
    assert_eq!(c.strokes().count(), 1);
    assert_eq!(c.line_height(), 3.0);
}

#[test]
fn finish_marks_glyph_origins_and_stroke_ends() {
    let mut c = RecordingCanvas::new(canvas(), 3.0);
    let red = Rgba8::new(255, 0, 0, 255);
    c.draw_glyph('A', Point::new(2.0, 3.0), 0.0, red).unwrap();
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.curve_to((1.0, 1.0), (2.0, 2.0), (9.0, 4.0));
    let green = Rgba8::new(0, 255, 0, 255);
    c.stroke_path(&path, green).unwrap();

    let frame = c.finish().unwrap();
    assert_eq!(frame.width, 10);
    assert_eq!(frame.height, 5);
    assert_eq!(frame.pixel(2, 3), Some(red));
    assert_eq!(frame.pixel(0, 0), Some(green));
    assert_eq!(frame.pixel(9, 4), Some(green));
    assert_eq!(frame.pixel(5, 1), Some(Rgba8::BLACK));
}

#[test]
fn out_of_range_marks_are_dropped() {
    let mut c = RecordingCanvas::new(canvas(), 3.0);
    c.draw_glyph('A', Point::new(10.0, 5.0), 0.0, Rgba8::DEFAULT_TEXT)
        .unwrap();
    c.draw_glyph('B', Point::new(-1.0, 1.0), 0.0, Rgba8::DEFAULT_TEXT)
        .unwrap();
    let frame = c.finish().unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}
