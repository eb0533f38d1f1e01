use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::random::SeededRandom;
use crate::render::recording::RecordingCanvas;

fn recording(width: u32, height: u32, line_height: f32) -> RecordingCanvas {
    RecordingCanvas::new(Canvas { width, height }, line_height)
}

#[test]
fn glyph_cell_keeps_quarter_segment_margins() {
    assert_eq!(glyph_cell(0, 75.0), (18.75, 56.25));
    assert_eq!(glyph_cell(3, 75.0), (243.75, 281.25));
}

#[test]
fn one_draw_per_character_in_order() {
    let mut canvas = recording(200, 80, 20.0);
    let mut rng = SeededRandom::from_seed(1);
    render_text(&mut canvas, "AB12", Rgba8::DEFAULT_TEXT, 60, &mut rng).unwrap();

    let chars: String = canvas.glyphs().map(|(ch, ..)| ch).collect();
    assert_eq!(chars, "AB12");
    assert_eq!(canvas.calls().len(), 4);
    assert!(
        canvas
            .glyphs()
            .all(|(_, _, _, color)| color == Rgba8::DEFAULT_TEXT)
    );
}

#[test]
fn empty_text_draws_nothing() {
    let mut canvas = recording(200, 80, 20.0);
    let mut rng = SeededRandom::from_seed(1);
    render_text(&mut canvas, "", Rgba8::DEFAULT_TEXT, 60, &mut rng).unwrap();
    assert!(canvas.calls().is_empty());
}

#[test]
fn glyphs_stay_inside_their_segments() {
    let mut rng = SeededRandom::from_seed(7);
    for _ in 0..200 {
        let mut canvas = recording(300, 100, 20.0);
        render_text(&mut canvas, "X1Y2", Rgba8::DEFAULT_TEXT, 60, &mut rng).unwrap();
        assert_eq!(canvas.glyphs().count(), 4);

        for (i, (_, origin, _, _)) in canvas.glyphs().enumerate() {
            let (min_x, max_x) = glyph_cell(i, 75.0);
            assert!(origin.x >= min_x.floor() as f64, "x={} cell={i}", origin.x);
            assert!(origin.x < max_x as f64, "x={} cell={i}", origin.x);
            assert!((20.0..80.0).contains(&origin.y), "y={}", origin.y);
            assert_eq!(origin.x.fract(), 0.0);
            assert_eq!(origin.y.fract(), 0.0);
        }
    }
}

#[test]
fn rotation_stays_within_half_rotation_bound() {
    let mut canvas = recording(100, 60, 10.0);
    let mut rng = SeededRandom::from_seed(42);
    for _ in 0..10_000 {
        render_text(&mut canvas, "A", Rgba8::DEFAULT_TEXT, 60, &mut rng).unwrap();
    }
    assert_eq!(canvas.glyphs().count(), 10_000);

    let (mut min_deg, mut max_deg) = (i64::MAX, i64::MIN);
    for (_, _, theta, _) in canvas.glyphs() {
        let deg = theta.to_degrees().round() as i64;
        assert!((-60..60).contains(&deg), "deg={deg}");
        assert!((theta.to_degrees() - deg as f64).abs() < 1e-9);
        min_deg = min_deg.min(deg);
        max_deg = max_deg.max(deg);
    }
    assert_eq!(min_deg, -60);
    assert_eq!(max_deg, 59);
}

#[test]
fn zero_half_rotation_draws_upright() {
    let mut canvas = recording(100, 60, 10.0);
    let mut rng = SeededRandom::from_seed(3);
    render_text(&mut canvas, "abc", Rgba8::DEFAULT_TEXT, 0, &mut rng).unwrap();
    assert!(canvas.glyphs().all(|(_, _, theta, _)| theta == 0.0));
}

#[test]
fn tall_font_pins_baseline_to_line_height() {
    let mut canvas = recording(100, 30, 20.0);
    let mut rng = SeededRandom::from_seed(3);
    render_text(&mut canvas, "ab", Rgba8::DEFAULT_TEXT, 10, &mut rng).unwrap();
    assert!(canvas.glyphs().all(|(_, origin, _, _)| origin.y == 20.0));
}
