//! Internationalization module for multi-language support.
//!
//! Translations are simple `key = value` catalogues embedded at build time,
//! with `{ $name }` placeholders for arguments.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Italian,
}

impl Language {
    /// Get the language identifier string.
    pub fn id(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Italian => "it",
        }
    }

    /// Get the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Italian => "Italiano",
        }
    }

    /// Parse from a language identifier such as `it_IT` or `en-GB`.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.to_lowercase();
        if id.starts_with("en") {
            Some(Language::English)
        } else if id.starts_with("it") {
            Some(Language::Italian)
        } else {
            None
        }
    }

    /// Get all supported languages.
    pub fn all() -> &'static [Language] {
        &[Language::English, Language::Italian]
    }

    fn catalogue(&self) -> &'static str {
        match self {
            Language::English => include_str!("locales/en-US/main.ftl"),
            Language::Italian => include_str!("locales/it/main.ftl"),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Translation catalogue for every supported language.
#[derive(Debug, Clone)]
pub struct Translator {
    /// Current language
    current_language: Language,
    /// Translations per language (language -> key -> value)
    translations: HashMap<Language, HashMap<String, String>>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Language::English)
    }
}

impl Translator {
    /// Create a translator with every catalogue loaded.
    pub fn new(language: Language) -> Self {
        let translations = Language::all()
            .iter()
            .map(|lang| (*lang, parse_ftl(lang.catalogue())))
            .collect();
        Self {
            current_language: language,
            translations,
        }
    }

    pub fn language(&self) -> Language {
        self.current_language
    }

    pub fn set_language(&mut self, language: Language) {
        self.current_language = language;
    }

    /// Translate a key, falling back to English and then to the key itself.
    pub fn translate(&self, key: &str) -> String {
        [self.current_language, Language::English]
            .iter()
            .find_map(|lang| self.translations.get(lang)?.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Translate a key and substitute `{ $name }` arguments.
    pub fn translate_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        substitute(self.translate(key), args)
    }
}

fn parse_ftl(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    map
}

fn substitute(mut text: String, args: &[(&str, &str)]) -> String {
    for (name, value) in args {
        text = text.replace(&format!("{{ ${} }}", name), value);
        text = text.replace(&format!("{{${}}}", name), value);
    }
    text
}

/// Global translator.
static TRANSLATOR: OnceLock<Mutex<Translator>> = OnceLock::new();

fn translator() -> &'static Mutex<Translator> {
    TRANSLATOR.get_or_init(|| Mutex::new(Translator::default()))
}

/// Initialize translations with an explicit language id, or the system locale.
pub fn init(language: Option<&str>) -> Language {
    let lang = language
        .and_then(Language::from_id)
        .unwrap_or_else(detect_system_locale);
    set_language(lang);
    tracing::debug!("UI language set to {}", lang.id());
    lang
}

/// Translate a message by key.
pub fn t(key: &str) -> String {
    translator()
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .translate(key)
}

/// Translate a message with argument substitution.
pub fn t_args(key: &str, args: &[(&str, &str)]) -> String {
    translator()
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .translate_with_args(key, args)
}

/// Get the current language.
pub fn current_language() -> Language {
    translator()
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .language()
}

/// Set the current language.
pub fn set_language(lang: Language) {
    translator()
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .set_language(lang);
}

/// Detect the system locale and return the best matching language.
pub fn detect_system_locale() -> Language {
    sys_locale::get_locale()
        .and_then(|locale| Language::from_id(&locale))
        .unwrap_or_default()
}

/// Macro for convenient translation.
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::t($key)
    };
    ($key:expr, $($arg_name:expr => $arg_value:expr),+ $(,)?) => {
        $crate::i18n::t_args($key, &[$(($arg_name, $arg_value.to_string().as_str())),+])
    };
}
