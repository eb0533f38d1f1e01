use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::random::SeededRandom;
use crate::render::recording::RecordingCanvas;
use kurbo::PathEl;

#[test]
fn zero_strokes_draw_nothing() {
    let mut canvas = RecordingCanvas::new(Canvas::new(120, 40).unwrap(), 10.0);
    let mut rng = SeededRandom::from_seed(1);
    render_stroke_noise(&mut canvas, 0, Rgba8::DEFAULT_STROKE, &mut rng).unwrap();
    assert_eq!(canvas.strokes().count(), 0);
}

#[test]
fn each_stroke_is_one_cubic_inside_the_canvas() {
    let mut canvas = RecordingCanvas::new(Canvas::new(120, 40).unwrap(), 10.0);
    let mut rng = SeededRandom::from_seed(9);
    render_stroke_noise(&mut canvas, 5, Rgba8::DEFAULT_STROKE, &mut rng).unwrap();

    let strokes: Vec<_> = canvas.strokes().collect();
    assert_eq!(strokes.len(), 5);

    let inside = |p: kurbo::Point| {
        (0.0..120.0).contains(&p.x) && (0.0..40.0).contains(&p.y) && p.x.fract() == 0.0
    };
    for (path, color) in &strokes {
        assert_eq!(*color, Rgba8::DEFAULT_STROKE);
        match path.elements() {
            [PathEl::MoveTo(p0), PathEl::CurveTo(c1, c2, p3)] => {
                assert!([*p0, *c1, *c2, *p3].into_iter().all(inside));
            }
            other => panic!("unexpected path: {other:?}"),
        }
    }
    assert_ne!(strokes[0].0, strokes[1].0);
}
