use serde::{Deserialize, Serialize};

/// Languages supported by the translation and speech endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Telugu,
    Hindi,
    Kannada,
    Tamil,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::Telugu,
            Language::Hindi,
            Language::Kannada,
            Language::Tamil,
        ]
    }

    /// Display name, also the value the translate endpoint expects
    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Telugu => "Telugu",
            Language::Hindi => "Hindi",
            Language::Kannada => "Kannada",
            Language::Tamil => "Tamil",
        }
    }

    /// ISO-639-1 code used by the text-to-speech endpoint
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Telugu => "te",
            Language::Hindi => "hi",
            Language::Kannada => "kn",
            Language::Tamil => "ta",
        }
    }

    /// BCP-47 locale for speech recognition in the Indian region
    pub fn recognition_locale(&self) -> String {
        format!("{}-IN", self.code())
    }

    pub fn from_label(label: &str) -> Option<Language> {
        Self::all()
            .iter()
            .copied()
            .find(|l| l.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Self::all()
            .iter()
            .copied()
            .find(|l| l.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
