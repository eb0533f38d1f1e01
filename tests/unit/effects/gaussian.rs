use super::*;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::random::SeededRandom;

/// Returns a fixed sequence of Gaussian samples.
struct ScriptedGaussian {
    samples: Vec<f64>,
    next: usize,
}

impl ScriptedGaussian {
    fn new(samples: Vec<f64>) -> Self {
        Self { samples, next: 0 }
    }
}

impl RandomSource for ScriptedGaussian {
    fn uniform_int(&mut self, lo: i32, _hi: i32) -> i32 {
        lo
    }

    fn uniform_float(&mut self, lo: f32, _hi: f32) -> f32 {
        lo
    }

    fn gaussian(&mut self) -> f64 {
        let v = self.samples[self.next % self.samples.len()];
        self.next += 1;
        v
    }

    fn alphanumeric_string(&mut self, len: usize) -> String {
        "a".repeat(len)
    }
}

fn sample_frame() -> FrameRGBA {
    let mut frame = FrameRGBA::filled(Canvas::new(3, 2).unwrap(), Rgba8::BLACK);
    frame.set_pixel(0, 0, Rgba8::new(30, 60, 90, 255));
    frame.set_pixel(1, 0, Rgba8::new(255, 255, 254, 12));
    frame.set_pixel(2, 1, Rgba8::new(10, 0, 0, 0));
    frame
}

#[test]
fn zero_sigma_is_deterministic_gray_plus_mean() {
    let mut a = sample_frame();
    let mut b = sample_frame();
    apply_gaussian_noise(&mut a, 10.4, 0.0, &mut SeededRandom::from_seed(1));
    apply_gaussian_noise(
        &mut b,
        10.4,
        0.0,
        &mut ScriptedGaussian::new(vec![3.0, -7.5, 100.0]),
    );
    assert_eq!(a, b);

    assert_eq!(a.pixel(0, 0), Some(Rgba8::new(70, 70, 70, 255)));
    // gray 254 + 10.4 clamps to 255
    assert_eq!(a.pixel(1, 0), Some(Rgba8::new(255, 255, 255, 12)));
    // gray 3 + 10.4 rounds to 13
    assert_eq!(a.pixel(2, 1), Some(Rgba8::new(13, 13, 13, 0)));
    assert_eq!(a.pixel(0, 1), Some(Rgba8::new(10, 10, 10, 255)));
}

#[test]
fn alpha_is_never_modified() {
    let original = sample_frame();
    let mut frame = original.clone();
    apply_gaussian_noise(&mut frame, 0.0, 30.0, &mut SeededRandom::from_seed(5));
    for (a, b) in original.data.chunks_exact(4).zip(frame.data.chunks_exact(4)) {
        assert_eq!(a[3], b[3]);
        assert_eq!(b[0], b[1]);
        assert_eq!(b[1], b[2]);
    }
}

#[test]
fn samples_are_drawn_column_by_column() {
    let mut frame = FrameRGBA::filled(Canvas::new(2, 2).unwrap(), Rgba8::BLACK);
    let mut rng = ScriptedGaussian::new(vec![1.0, 2.0, 3.0, 4.0]);
    apply_gaussian_noise(&mut frame, 0.0, 1.0, &mut rng);
    assert_eq!(frame.pixel(0, 0).map(|p| p.r), Some(1));
    assert_eq!(frame.pixel(0, 1).map(|p| p.r), Some(2));
    assert_eq!(frame.pixel(1, 0).map(|p| p.r), Some(3));
    assert_eq!(frame.pixel(1, 1).map(|p| p.r), Some(4));
}

#[test]
fn noisy_gray_clamps_and_rounds() {
    assert_eq!(noisy_gray(10, -50.0), 0);
    assert_eq!(noisy_gray(250, 50.0), 255);
    assert_eq!(noisy_gray(100, 0.5), 101);
    assert_eq!(noisy_gray(100, 0.49), 100);
    assert_eq!(noisy_gray(100, f64::NAN), 100);
}
