use super::*;

const FULL: &str = r##"{
  "canvas": { "width": 300, "height": 100 },
  "font": { "path": "fonts/captcha.ttf", "family": "Captcha Sans", "style": "bold_italic", "size_px": 24 },
  "text": { "fixed": "X1Y2", "length": 9, "color": "#102030ff", "half_rotation": 45 },
  "gaussian_noise": { "enabled": true, "mean": 2.5, "sigma": 12 },
  "stroke_noise": { "enabled": true, "count": 5, "color": [1, 2, 3] },
  "animation": { "frames": 0, "delay_ms": 250, "loop": false },
  "seed": 42
}"##;

#[test]
fn minimal_config_uses_defaults() {
    let cfg = CaptchaConfig::from_json_str(r#"{ "canvas": { "width": 200, "height": 70 } }"#)
        .unwrap();
    assert_eq!(cfg, CaptchaConfig::new(Canvas::new(200, 70).unwrap()));
    assert_eq!(cfg.animation(), AnimationSpec::default());
    assert_eq!(cfg.seed, None);

    let spec = cfg.captcha_spec(FontSpec::from_bytes(vec![0u8])).unwrap();
    assert_eq!(spec.text_length(), 6);
    assert_eq!(spec.half_rotation, 60);
    assert_eq!(spec.text_color, Rgba8::DEFAULT_TEXT);
    assert!(!spec.gaussian_noise.enabled);
    assert!(!spec.stroke_noise.enabled);
}

#[test]
fn full_config_maps_onto_specs() {
    let cfg = CaptchaConfig::from_json_str(FULL).unwrap();
    assert_eq!(cfg.font.style, FontStyle::BoldItalic);
    assert_eq!(cfg.seed, Some(42));

    let spec = cfg.captcha_spec(FontSpec::from_bytes(vec![0u8])).unwrap();
    assert_eq!(spec.canvas, Canvas::new(300, 100).unwrap());
    assert_eq!(spec.text_length(), 4);
    assert_eq!(spec.text_color, Rgba8::new(0x10, 0x20, 0x30, 0xff));
    assert_eq!(spec.half_rotation, 45);
    assert_eq!(spec.gaussian_noise, GaussianNoise::new(2.5, 12.0));
    assert_eq!(
        spec.stroke_noise,
        StrokeNoise::new(5).color(Rgba8::new(1, 2, 3, 255))
    );

    let anim = cfg.animation();
    assert_eq!(anim.frame_count(), 1);
    assert_eq!(anim.delay_centis(), 25);
    assert!(!anim.looped);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = CaptchaConfig::from_json_str(
        r##"{ "canvas": { "width": 1, "height": 1 }, "text": { "colour": "#fff" } }"##,
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));
}

#[test]
fn invalid_values_fail_at_spec_time() {
    let cfg = CaptchaConfig::from_json_str(
        r#"{ "canvas": { "width": 0, "height": 10 }, "text": { "half_rotation": 10 } }"#,
    )
    .unwrap();
    let err = cfg.captcha_spec(FontSpec::from_bytes(vec![0u8])).unwrap_err();
    assert!(err.to_string().starts_with("configuration error:"));
}

#[test]
fn relative_font_path_resolves_against_config_dir() {
    let dir = std::env::temp_dir().join(format!("captcha-forge-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("captcha.json");
    std::fs::write(&path, FULL).unwrap();

    let cfg = CaptchaConfig::from_path(&path).unwrap();
    assert_eq!(
        cfg.font.path.as_deref(),
        Some(dir.join("fonts/captcha.ttf").as_path())
    );

    // The font file does not exist.
    let err = cfg.into_specs().unwrap_err();
    assert!(err.to_string().contains("captcha.ttf"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_config_file_names_the_path() {
    let err = CaptchaConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}
