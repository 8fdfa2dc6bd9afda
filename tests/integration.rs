// SPDX-License-Identifier: MPL-2.0
use wildlens::classifier::{self, VocabularySearch};
use wildlens::config::{TextSize, WindowProfile, CLASS_COUNT, TOP_K};
use wildlens::error::Error;
use wildlens::i18n::I18n;
use wildlens::media;

/// Keys every shipped locale must translate.
const CORE_KEYS: &[&str] = &[
    "window-title",
    "main-title",
    "upload-button",
    "clear-button",
    "initial-placeholder",
    "loading",
    "loading-model",
    "result-title",
    "search-placeholder",
    "wiki-button",
    "label-button",
    "searching",
    "page-not-found",
    "error-model",
    "error-unsupported-file",
];

#[test]
fn every_locale_translates_the_core_keys() {
    let mut i18n = I18n::default();
    assert!(!i18n.is_degraded());
    let locales: Vec<_> = i18n.available_locales().to_vec();
    assert!(locales.len() >= 5, "expected 5 shipped locales");

    for locale in locales {
        i18n.set_locale(locale.clone());
        for key in CORE_KEYS {
            let value = i18n.tr(key);
            assert_ne!(value, *key, "untranslated key {key} in {locale}");
        }
    }
}

#[test]
fn os_independent_cli_locale_fallback() {
    let i18n = I18n::new(Some("ko-KR".to_string()));
    assert_eq!(i18n.current_locale().to_string(), "ko");

    let i18n = I18n::new(Some("nonsense".to_string()));
    assert!(!i18n.current_locale().to_string().is_empty());
}

#[test]
fn parsed_vocabulary_finds_zebra_case_insensitively() {
    // Build a full synset file with zebra somewhere in the middle.
    let mut text = String::new();
    for i in 0..CLASS_COUNT {
        if i == 340 {
            text.push_str("n02391049 zebra\n");
        } else {
            text.push_str(&format!("n{i:08} label_{i}\n"));
        }
    }
    let labels = classifier::parse_labels(&text).expect("valid labels");
    let mut vocabulary: Vec<String> = labels.iter().map(|l| l.label.clone()).collect();
    vocabulary.sort();

    match classifier::search_vocabulary("ZEBRA", &vocabulary) {
        VocabularySearch::Found { count, preview } => {
            assert!(count >= 1);
            assert!(preview.contains(&"Zebra".to_string()));
        }
        other => panic!("expected a match, got {other:?}"),
    }
}

#[test]
fn decoded_predictions_are_ordered_and_bounded() {
    let labels: Vec<_> = (0..10)
        .map(|i| classifier::LabelEntry {
            class_id: format!("n{i:08}"),
            label: format!("Label {i}"),
        })
        .collect();
    let scores: Vec<f32> = (0..10).map(|i| ((i * 7) % 10) as f32 / 2.0).collect();

    let prediction = classifier::decode_scores(&scores, &labels, TOP_K);
    assert_eq!(prediction.entries.len(), TOP_K);
    for pair in prediction.entries.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for entry in &prediction.entries {
        assert!((0.0..=1.0).contains(&entry.score));
    }
}

#[test]
fn image_file_flows_through_decode_and_preprocess() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("photo.png");
    image_rs::RgbImage::from_pixel(48, 32, image_rs::Rgb([120, 90, 60]))
        .save(&path)
        .expect("save png");

    let frame = media::load_frame(&path).expect("decodes");
    let tensor = classifier::preprocess(&frame);
    assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
}

#[test]
fn unsupported_file_maps_to_its_error_key() {
    let err = media::load_frame(std::path::Path::new("report.pdf")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFile(_)));
    assert_eq!(err.i18n_key(), "error-unsupported-file");

    let i18n = I18n::new(Some("en".to_string()));
    assert_ne!(i18n.tr(err.i18n_key()), err.i18n_key());
}

#[test]
fn profile_cycles_visit_every_variant() {
    let mut seen = vec![TextSize::default()];
    let mut size = TextSize::default();
    for _ in 0..2 {
        size = size.next();
        seen.push(size);
    }
    assert!(seen.contains(&TextSize::Small));
    assert!(seen.contains(&TextSize::Medium));
    assert!(seen.contains(&TextSize::Large));

    let mut profiles = vec![WindowProfile::default()];
    let mut profile = WindowProfile::default();
    for _ in 0..2 {
        profile = profile.next();
        profiles.push(profile);
    }
    assert!(profiles.contains(&WindowProfile::Compact));
    assert!(profiles.contains(&WindowProfile::Standard));
    assert!(profiles.contains(&WindowProfile::Spacious));
}
