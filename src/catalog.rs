//! Static catalog of languages offered in both selectors.

use serde::Serialize;

/// One selectable language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    /// English language name; used on the wire and inside prompts.
    pub code: &'static str,
    /// Human-readable label shown in the selector.
    pub label: &'static str,
}

const fn lang(code: &'static str, label: &'static str) -> LanguageOption {
    LanguageOption { code, label }
}

/// Supported languages in display order.
pub static LANGUAGES: [LanguageOption; 29] = [
    lang("English", "English"),
    lang("Spanish", "Spanish (Español)"),
    lang("French", "French (Français)"),
    lang("German", "German (Deutsch)"),
    lang("Italian", "Italian (Italiano)"),
    lang("Portuguese", "Portuguese (Português)"),
    lang("Dutch", "Dutch (Nederlands)"),
    lang("Russian", "Russian (Русский)"),
    lang("Ukrainian", "Ukrainian (Українська)"),
    lang("Polish", "Polish (Polski)"),
    lang("Turkish", "Turkish (Türkçe)"),
    lang("Arabic", "Arabic (العربية)"),
    lang("Hebrew", "Hebrew (עברית)"),
    lang("Persian", "Persian (فارسی)"),
    lang("Urdu", "Urdu (اردو)"),
    lang("Hindi", "Hindi (हिन्दी)"),
    lang("Bengali", "Bengali (বাংলা)"),
    lang("Punjabi", "Punjabi (ਪੰਜਾਬੀ)"),
    lang("Chinese", "Chinese (中文)"),
    lang("Japanese", "Japanese (日本語)"),
    lang("Korean", "Korean (한국어)"),
    lang("Vietnamese", "Vietnamese (Tiếng Việt)"),
    lang("Thai", "Thai (ไทย)"),
    lang("Indonesian", "Indonesian (Bahasa Indonesia)"),
    lang("Malay", "Malay (Bahasa Melayu)"),
    lang("Swahili", "Swahili (Kiswahili)"),
    lang("Greek", "Greek (Ελληνικά)"),
    lang("Swedish", "Swedish (Svenska)"),
    lang("Tagalog", "Tagalog"),
];

/// Language selected as source on startup and whenever the input is cleared.
pub fn default_source() -> &'static LanguageOption {
    &LANGUAGES[0]
}

/// Language selected as target on startup.
pub fn default_target() -> &'static LanguageOption {
    &LANGUAGES[1]
}

/// Looks up a catalog entry by code, ignoring surrounding whitespace and case.
///
/// This is the only gate through which free-text language names (model
/// output, request bodies) may reach a prompt or the view.
pub fn find_language(name: &str) -> Option<&'static LanguageOption> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    // Codes are ASCII, so an ASCII fold is exact here.
    LANGUAGES
        .iter()
        .find(|option| option.code.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{default_source, default_target, find_language, LANGUAGES};

    #[test]
    fn codes_are_unique() {
        let codes = LANGUAGES.iter().map(|l| l.code).collect::<HashSet<_>>();
        assert_eq!(codes.len(), LANGUAGES.len());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_language("spanish").map(|l| l.code), Some("Spanish"));
        assert_eq!(find_language("  FRENCH ").map(|l| l.code), Some("French"));
    }

    #[test]
    fn lookup_rejects_unknown_and_partial_names() {
        assert!(find_language("Klingon").is_none());
        assert!(find_language("Span").is_none());
        assert!(find_language("").is_none());
        assert!(find_language("The language is French").is_none());
    }

    #[test]
    fn defaults_are_english_to_spanish() {
        assert_eq!(default_source().code, "English");
        assert_eq!(default_target().code, "Spanish");
    }
}
