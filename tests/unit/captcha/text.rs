use super::*;
use crate::foundation::random::SeededRandom;

#[test]
fn fixed_text_length_counts_chars() {
    let src = TextSource::fixed("äb1");
    assert_eq!(src.length(), 3);
    let mut rng = SeededRandom::from_seed(0);
    assert_eq!(src.resolve(&mut rng), "äb1");
}

#[test]
fn default_generates_six_alphanumerics() {
    let src = TextSource::default();
    assert_eq!(src.length(), DEFAULT_TEXT_LENGTH);
    let mut rng = SeededRandom::from_seed(11);
    let text = src.resolve(&mut rng);
    assert_eq!(text.chars().count(), 6);
    assert!(text.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn generated_text_is_fresh_per_call() {
    let src = TextSource::generated(12);
    let mut rng = SeededRandom::from_seed(11);
    assert_ne!(src.resolve(&mut rng), src.resolve(&mut rng));
}

#[test]
fn closures_are_generators() {
    let src = TextSource::with_generator(3, |len: usize, _rng: &mut dyn RandomSource| {
        "z".repeat(len + 1)
    });
    let mut rng = SeededRandom::from_seed(0);
    assert_eq!(src.resolve(&mut rng), "zzzz");
    assert_eq!(format!("{src:?}"), "Generated { length: 3, .. }");
}
