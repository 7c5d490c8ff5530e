use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// String keys of the language packs.
pub mod keys {
    pub const APP_TITLE: &str = "general.app_title";
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_METHOD: &str = "main_menu.method";
    pub const MAIN_MENU_FIELDS: &str = "main_menu.fields";
    pub const MAIN_MENU_CONDITIONS: &str = "main_menu.conditions";
    pub const MAIN_MENU_RESULTS: &str = "main_menu.results";
    pub const MAIN_MENU_EXPORT: &str = "main_menu.export";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";

    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_FIELD_VALUE: &str = "prompt.field_value";
    pub const INVALID_SELECTION: &str = "prompt.invalid_selection";

    pub const METHOD_HEADING: &str = "method.heading";
    pub const METHOD_CURRENT: &str = "method.current";

    pub const CONDITION_HEADING: &str = "condition.heading";
    pub const CONDITION_TOGGLE_PROMPT: &str = "condition.toggle_prompt";
    pub const CONDITION_NOTE: &str = "condition.note";

    pub const FIELD_HEADING: &str = "field.heading";
    pub const GAUGE_SUMMARY: &str = "gauge.summary";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_FUEL_COST: &str = "result.fuel_cost";
    pub const RESULT_COST_PER_KM: &str = "result.cost_per_km";
    pub const RESULT_LITERS: &str = "result.liters";
    pub const RESULT_EFFICIENCY: &str = "result.efficiency";
    pub const RESULT_RENTAL: &str = "result.rental";
    pub const RESULT_TOTAL: &str = "result.total";

    pub const EXPORT_HEADING: &str = "export.heading";
    pub const EXPORT_OPTIONS: &str = "export.options";
    pub const EXPORT_BUTTON: &str = "export.button";
    pub const EXPORT_COPY_TEXT: &str = "export.copy_text";
    pub const EXPORT_SAVE_IMAGE: &str = "export.save_image";
    pub const EXPORT_SAVE_PDF: &str = "export.save_pdf";
    pub const EXPORT_COPIED: &str = "export.copied";
    pub const EXPORT_COPIED_FALLBACK: &str = "export.copied_fallback";
    pub const EXPORT_SAVED: &str = "export.saved";
    pub const EXPORT_FAILED: &str = "export.failed";
    pub const EXPORT_CANCELLED: &str = "export.cancelled";
    pub const EXPORT_PREVIEW: &str = "export.preview";
    pub const EXPORT_CLOSE: &str = "export.close";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_LANG_AUTO: &str = "settings.lang_auto";
    pub const SETTINGS_EXPORT_DIR: &str = "settings.export_dir";
    pub const SETTINGS_ALPHA: &str = "settings.alpha";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_LANG_PROMPT: &str = "settings.lang_prompt";
    pub const SETTINGS_EXPORT_DIR_PROMPT: &str = "settings.export_dir_prompt";
    pub const SETTINGS_SAVE: &str = "settings.save";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Vi,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.trim().to_lowercase().starts_with("vi") {
            Language::Vi
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en-us",
            Language::Vi => "vi-vn",
        }
    }
}

/// Runtime language bundle.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    strings: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    /// Built-in pack for the language code. Unknown codes fall back to English.
    pub fn new(lang_code: &str) -> Self {
        Self::new_with_pack(lang_code, None)
    }

    /// Language code + optional pack directory (`<dir>/<code>.toml`).
    /// Missing directories or files fall back to the built-in strings.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let lang = Language::from_code(lang_code);
        let strings = pack_dir
            .and_then(|dir| load_overrides(dir, lang.as_code()))
            .or_else(|| load_overrides("locales", lang.as_code()))
            .or_else(|| built_in_pack(lang))
            .unwrap_or_default();
        Self {
            lang,
            strings,
            fallback: built_in_pack(Language::En).unwrap_or_default(),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// Looks the key up in the active pack only.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    /// Translation with English fallback.
    pub fn t(&self, key: &str) -> String {
        self.strings
            .get(key)
            .or_else(|| self.fallback.get(key))
            .cloned()
            .unwrap_or_else(|| "[missing translation]".to_string())
    }

    /// Translation with `{name}` placeholders filled in.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

/// Replaces every `{name}` in the template.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// Resolves the language code from the CLI flag, then the config, then the system locale.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("vi") => Some("vi-vn".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "vi" => Some("vi-vn".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// Guesses the language from the system locale.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    for var in ["LANG", "LC_ALL"] {
        if let Some(code) = std::env::var(var).ok().as_deref().and_then(normalize_locale_string) {
            return Some(code);
        }
    }
    None
}

/// Reads `<dir>/<lang>.toml` if it exists.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let text = fs::read_to_string(Path::new(dir).join(format!("{lang}.toml"))).ok()?;
    flatten_pack(&text)
}

/// `[section] key = "text"` becomes `section.key`. Non-string values are skipped.
fn flatten_pack(src: &str) -> Option<HashMap<String, String>> {
    let root: toml::Table = src.parse().ok()?;
    let map: HashMap<String, String> = root
        .iter()
        .filter_map(|(section, entries)| Some((section, entries.as_table()?)))
        .flat_map(|(section, entries)| {
            entries.iter().filter_map(move |(key, text)| {
                Some((format!("{section}.{key}"), text.as_str()?.to_string()))
            })
        })
        .collect();
    (!map.is_empty()).then_some(map)
}

/// Packs compiled into the binary so it works without a locales directory.
fn built_in_pack(lang: Language) -> Option<HashMap<String, String>> {
    match lang {
        Language::En => flatten_pack(include_str!("../locales/en-us.toml")),
        Language::Vi => flatten_pack(include_str!("../locales/vi-vn.toml")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_packs_cover_every_key_of_english() {
        let en = built_in_pack(Language::En).unwrap();
        let vi = built_in_pack(Language::Vi).unwrap();
        for key in en.keys() {
            assert!(vi.contains_key(key), "vi-vn is missing {key}");
        }
    }

    #[test]
    fn translator_uses_requested_language() {
        let tr = Translator::new("vi");
        assert_eq!(tr.language(), Language::Vi);
        assert_eq!(tr.t("method.gauge"), "Vạch taplo");
        let en = Translator::new("fr");
        assert_eq!(en.language(), Language::En);
        assert_eq!(en.t("method.gauge"), "Fuel gauge");
    }

    #[test]
    fn unknown_key_is_marked() {
        assert_eq!(Translator::new("en").t("no.such.key"), "[missing translation]");
    }

    #[test]
    fn template_placeholders_are_filled() {
        let out = fill_template("{a} + {b} = {a}{b}", &[("a", "1".into()), ("b", "2".into())]);
        assert_eq!(out, "1 + 2 = 12");
    }

    #[test]
    fn pack_sections_become_dotted_keys() {
        let map = flatten_pack("[menu]\ntitle = \"Menu\"\ncount = 3\n\n[result]\ntotal = \"Total\"\n").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["menu.title"], "Menu");
        assert_eq!(map["result.total"], "Total");
        assert!(flatten_pack("not = [valid").is_none());
        assert!(flatten_pack("").is_none());
    }

    #[test]
    fn explicit_language_wins_over_config() {
        assert_eq!(resolve_language("vi", Some("en-us")), "vi-vn");
        assert_eq!(resolve_language("auto", Some("vi-VN")), "vi-vn");
    }
}
