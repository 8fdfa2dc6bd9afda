// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations use the Fluent localization system. `.ftl` resources are
//! embedded into the binary and parsed once at startup; the language can be
//! switched at runtime from the toolbar.
//!
//! Locale resolution order: CLI flag, then OS locale, then English.

use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Minimal resource substituted when every embedded bundle fails to parse.
/// The UI keeps running with untranslated keys past this point.
const FALLBACK_FTL: &str = "window-title = WildLens\n";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
    /// True when the embedded translations could not be loaded and the
    /// built-in fallback resource is in use.
    degraded: bool,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None)
    }
}

impl I18n {
    pub fn new(cli_lang: Option<String>) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale_str) = filename.strip_suffix(".ftl") else {
                continue;
            };
            let Ok(locale) = locale_str.parse::<LanguageIdentifier>() else {
                eprintln!("Skipping translation file with invalid locale: {filename}");
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };
            let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
            let res = match FluentResource::try_new(source) {
                Ok(res) => res,
                Err((_, errors)) => {
                    eprintln!("Failed to parse {filename}: {errors:?}");
                    continue;
                }
            };
            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            bundle.set_use_isolating(false);
            if bundle.add_resource(res).is_err() {
                eprintln!("Failed to register translation bundle for {locale}");
                continue;
            }
            bundles.insert(locale.clone(), bundle);
            available_locales.push(locale);
        }

        available_locales.sort_by_key(ToString::to_string);

        let mut degraded = false;
        if bundles.is_empty() {
            // Resource error: degrade to a one-key English table instead of
            // aborting (the startup view surfaces a warning once).
            let locale: LanguageIdentifier = "en".parse().expect("static locale");
            let res = FluentResource::try_new(FALLBACK_FTL.to_string())
                .expect("static fallback resource");
            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            bundle.set_use_isolating(false);
            let _ = bundle.add_resource(res);
            bundles.insert(locale.clone(), bundle);
            available_locales.push(locale);
            degraded = true;
        }

        let default_locale: LanguageIdentifier = "en".parse().expect("static locale");
        let current_locale = resolve_locale(cli_lang, &available_locales)
            .unwrap_or_else(|| {
                if available_locales.contains(&default_locale) {
                    default_locale
                } else {
                    available_locales[0].clone()
                }
            });

        Self {
            bundles,
            available_locales,
            current_locale,
            degraded,
        }
    }

    /// Locales with an embedded translation bundle, sorted by code.
    pub fn available_locales(&self) -> &[LanguageIdentifier] {
        &self.available_locales
    }

    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    /// True when translations failed to load and only the built-in fallback
    /// resource is active.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    /// Looks up a translation. Missing keys degrade to the key itself so a
    /// forgotten message is visible but never fatal.
    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Looks up a translation with Fluent arguments.
    pub fn tr_with(&self, key: &str, args: &FluentArgs) -> String {
        self.format(key, Some(args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(msg) = bundle.get_message(key) {
                if let Some(pattern) = msg.value() {
                    let mut errors = vec![];
                    let value = bundle.format_pattern(pattern, args, &mut errors);
                    if errors.is_empty() {
                        return value.to_string();
                    }
                }
            }
        }
        key.to_string()
    }

    /// Primary language subtag of the active locale, used to scope
    /// encyclopedia lookups (e.g. `zh-TW` queries `zh.wikipedia.org`).
    pub fn lookup_language(&self) -> String {
        self.current_locale.language.as_str().to_string()
    }
}

fn resolve_locale(
    cli_lang: Option<String>,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    // 1. CLI flag
    if let Some(lang_str) = cli_lang {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if let Some(found) = best_match(&lang, available) {
                return Some(found);
            }
        }
    }

    // 2. OS locale
    if let Some(os_locale_str) = sys_locale::get_locale() {
        if let Ok(os_lang) = os_locale_str.parse::<LanguageIdentifier>() {
            if let Some(found) = best_match(&os_lang, available) {
                return Some(found);
            }
        }
    }

    None
}

/// Exact match first, then a match on the primary language subtag so that
/// e.g. `ja-JP` selects the bundled `ja`.
fn best_match(
    wanted: &LanguageIdentifier,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    if available.contains(wanted) {
        return Some(wanted.clone());
    }
    available
        .iter()
        .find(|candidate| candidate.language == wanted.language)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_embedded_locales() {
        let i18n = I18n::default();
        assert!(!i18n.is_degraded());
        let codes: Vec<String> = i18n
            .available_locales()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert!(codes.contains(&"en".to_string()));
        assert!(codes.contains(&"zh-TW".to_string()));
    }

    #[test]
    fn cli_flag_wins() {
        let i18n = I18n::new(Some("ja".to_string()));
        assert_eq!(i18n.current_locale().to_string(), "ja");
    }

    #[test]
    fn cli_flag_matches_primary_subtag() {
        let i18n = I18n::new(Some("ja-JP".to_string()));
        assert_eq!(i18n.current_locale().to_string(), "ja");
    }

    #[test]
    fn missing_key_degrades_to_key() {
        let i18n = I18n::new(Some("en".to_string()));
        assert_eq!(i18n.tr("no-such-key-xyzzy"), "no-such-key-xyzzy");
    }

    #[test]
    fn known_key_resolves() {
        let i18n = I18n::new(Some("en".to_string()));
        assert_ne!(i18n.tr("window-title"), "window-title");
    }

    #[test]
    fn set_locale_ignores_unknown() {
        let mut i18n = I18n::new(Some("en".to_string()));
        i18n.set_locale("xx".parse().unwrap());
        assert_eq!(i18n.current_locale().to_string(), "en");
    }

    #[test]
    fn lookup_language_strips_region() {
        let mut i18n = I18n::default();
        i18n.set_locale("zh-TW".parse().unwrap());
        assert_eq!(i18n.lookup_language(), "zh");
    }

    #[test]
    fn tr_with_formats_arguments() {
        let i18n = I18n::new(Some("en".to_string()));
        let mut args = FluentArgs::new();
        args.set("count", 4);
        args.set("preview", "Zebra, Gazelle");
        let text = i18n.tr_with("label-search-found", &args);
        assert!(text.contains('4'), "got: {text}");
        assert!(text.contains("Zebra"), "got: {text}");
    }
}
