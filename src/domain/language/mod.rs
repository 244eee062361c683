use std::collections::HashMap;

/// Static mapping between human language names and the provider's
/// language codes, plus the district coverage table used by the
/// emergency extension.
///
/// Language names are case-insensitive; codes are the provider's
/// script-qualified identifiers (e.g. "kan_Knda").
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    codes: HashMap<String, &'static str>,
    districts: HashMap<&'static str, Vec<&'static str>>,
    default_languages: Vec<String>,
}

const LANGUAGE_CODES: &[(&str, &str)] = &[
    ("kannada", "kan_Knda"),
    ("hindi", "hin_Deva"),
    ("tamil", "tam_Taml"),
    ("telugu", "tel_Telu"),
    ("marathi", "mar_Deva"),
    ("english", "eng_Latn"),
    ("bengali", "ben_Beng"),
    ("gujarati", "guj_Gujr"),
    ("malayalam", "mal_Mlym"),
    ("punjabi", "pan_Guru"),
];

const DISTRICT_LANGUAGES: &[(&str, &[&str])] = &[
    ("Bengaluru", &["kannada"]),
    ("Mumbai", &["marathi", "hindi"]),
    ("Chennai", &["tamil"]),
    ("Hyderabad", &["telugu"]),
    ("Kolkata", &["bengali", "hindi"]),
    ("Delhi", &["hindi", "punjabi"]),
    ("Ahmedabad", &["gujarati", "hindi"]),
    ("Pune", &["marathi", "hindi"]),
    ("Kochi", &["malayalam"]),
];

impl LanguageRegistry {
    pub fn new(default_languages: Vec<String>) -> Self {
        let codes = LANGUAGE_CODES
            .iter()
            .map(|(name, code)| (name.to_string(), *code))
            .collect();
        let districts = DISTRICT_LANGUAGES
            .iter()
            .map(|(district, langs)| (*district, langs.to_vec()))
            .collect();

        Self {
            codes,
            districts,
            default_languages,
        }
    }

    /// Provider code for a language name, or None for unknown languages.
    pub fn code_for(&self, language: &str) -> Option<&'static str> {
        self.codes.get(&language.to_lowercase()).copied()
    }

    pub fn is_supported(&self, language: &str) -> bool {
        self.codes.contains_key(&language.to_lowercase())
    }

    /// All registered language names, used when a submission leaves
    /// target languages unspecified.
    pub fn all_languages(&self) -> Vec<String> {
        LANGUAGE_CODES
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Target languages for a district, falling back to the configured
    /// defaults for unmapped districts.
    pub fn languages_for_district(&self, district: &str) -> Vec<String> {
        match self.districts.get(district) {
            Some(langs) => langs.iter().map(|l| l.to_string()).collect(),
            None => self.default_languages.clone(),
        }
    }

    pub fn default_languages(&self) -> &[String] {
        &self.default_languages
    }
}
