//! Locale tags and catalog overlay file names
//!
//! Locales are `xx` (language) or `xx_YY` (language and country) tags. The
//! empty tag is the default locale, which is never written as an overlay.

use regex::Regex;
use std::sync::OnceLock;

/// Locale tags known to the editors, before pruning
const KNOWN_LOCALES: &[&str] = &[
    "ar", "ar_AE", "ar_BH", "ar_DZ", "ar_EG", "ar_IQ", "ar_JO", "ar_KW", "ar_LB", "ar_LY",
    "ar_MA", "ar_OM", "ar_QA", "ar_SA", "ar_SD", "ar_SY", "ar_TN", "ar_YE", "be", "be_BY",
    "bg", "bg_BG", "ca", "ca_ES", "cs", "cs_CZ", "da", "da_DK", "de", "de_AT", "de_CH",
    "de_DE", "de_LU", "el", "el_CY", "el_GR", "en", "en_AU", "en_CA", "en_GB", "en_IE",
    "en_IN", "en_MT", "en_NZ", "en_PH", "en_SG", "en_US", "en_ZA", "es", "es_AR", "es_BO",
    "es_CL", "es_CO", "es_CR", "es_DO", "es_EC", "es_ES", "es_GT", "es_HN", "es_MX", "es_NI",
    "es_PA", "es_PE", "es_PR", "es_PY", "es_SV", "es_US", "es_UY", "es_VE", "et", "et_EE",
    "fi", "fi_FI", "fr", "fr_BE", "fr_CA", "fr_CH", "fr_FR", "fr_LU", "ga", "ga_IE", "hi",
    "hi_IN", "hr", "hr_HR", "hu", "hu_HU", "in", "in_ID", "is", "is_IS", "it", "it_CH",
    "it_IT", "iw", "iw_IL", "ja", "ja_JP", "ko", "ko_KR", "lt", "lt_LT", "lv", "lv_LV", "mk",
    "mk_MK", "ms", "ms_MY", "mt", "mt_MT", "nl", "nl_BE", "nl_NL", "no", "no_NO", "pl",
    "pl_PL", "pt", "pt_BR", "pt_PT", "ro", "ro_RO", "ru", "ru_RU", "sk", "sk_SK", "sl",
    "sl_SI", "sq", "sq_AL", "sr", "sr_BA", "sr_CS", "sr_ME", "sr_RS", "sv", "sv_SE", "th",
    "th_TH", "tr", "tr_TR", "uk", "uk_UA", "vi", "vi_VN", "zh", "zh_CN", "zh_HK", "zh_SG",
    "zh_TW",
];

static AVAILABLE_LOCALES: OnceLock<Vec<String>> = OnceLock::new();
static SUFFIX_PATTERN: OnceLock<Regex> = OnceLock::new();

fn suffix_pattern() -> &'static Regex {
    SUFFIX_PATTERN.get_or_init(|| Regex::new("^_([a-z]{2})(_[A-Z]{2})?$").expect("valid pattern"))
}

/// Locales offered for translation, sorted by tag
///
/// A country variant is dropped when its language has no other variant, so
/// `be_BY` disappears next to `be` while every `en_*` variant stays.
pub fn available_locales() -> &'static [String] {
    AVAILABLE_LOCALES.get_or_init(|| prune_locales(KNOWN_LOCALES))
}

/// Apply the country-variant pruning rule to a list of tags
#[must_use]
pub fn prune_locales(tags: &[&str]) -> Vec<String> {
    let mut locales: Vec<String> = tags
        .iter()
        .filter(|tag| {
            let (language, country) = split_locale(tag);
            if country.is_none() {
                return true;
            }
            let sharing = tags
                .iter()
                .filter(|other| split_locale(other).0 == language)
                .count();
            sharing != 2
        })
        .map(|tag| (*tag).to_string())
        .collect();
    locales.sort();
    locales.dedup();
    locales
}

/// Split `xx_YY` into language and optional country
#[must_use]
pub fn split_locale(tag: &str) -> (&str, Option<&str>) {
    match tag.split_once('_') {
        Some((language, country)) if !country.is_empty() => (language, Some(country)),
        Some((language, _)) => (language, None),
        None => (tag, None),
    }
}

/// Check that a tag is a non-default `xx` or `xx_YY` locale
#[must_use]
pub fn is_locale_tag(tag: &str) -> bool {
    suffix_pattern().is_match(&format!("_{tag}"))
}

/// Locale of a catalog properties entry
///
/// Returns `None` when `entry_name` is not a `<family_base>*.properties` entry,
/// `Some("")` for the default catalog (and for suffixes that are not locale
/// tags), and `Some(tag)` for a locale overlay.
#[must_use]
pub fn locale_suffix<'a>(entry_name: &'a str, family_base: &str) -> Option<&'a str> {
    let middle = entry_name
        .strip_prefix(family_base)?
        .strip_suffix(".properties")?;
    if middle.is_empty() {
        return Some("");
    }
    if suffix_pattern().is_match(middle) {
        Some(&middle[1..])
    } else {
        Some("")
    }
}

/// Entry name of the catalog for `locale` (empty for the default catalog)
#[must_use]
pub fn properties_entry_name(family_base: &str, locale: &str) -> String {
    if locale.is_empty() {
        format!("{family_base}.properties")
    } else {
        format!("{family_base}_{locale}.properties")
    }
}
