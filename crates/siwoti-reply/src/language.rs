//! Comment language detection.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Languages with a localized prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    De,
    Fr,
    Es,
    It,
    Pt,
    Zh,
    Ja,
    Ar,
    Hi,
    Bn,
    Ru,
}

impl Language {
    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Fr => "fr",
            Self::Es => "es",
            Self::It => "it",
            Self::Pt => "pt",
            Self::Zh => "zh",
            Self::Ja => "ja",
            Self::Ar => "ar",
            Self::Hi => "hi",
            Self::Bn => "bn",
            Self::Ru => "ru",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Script tests, in priority order.
const SCRIPTS: [(Language, char, char); 6] = [
    (Language::Zh, '\u{4e00}', '\u{9fff}'),
    (Language::Ja, '\u{3040}', '\u{30ff}'),
    (Language::Ar, '\u{0600}', '\u{06ff}'),
    (Language::Hi, '\u{0900}', '\u{097f}'),
    (Language::Bn, '\u{0980}', '\u{09ff}'),
    (Language::Ru, '\u{0400}', '\u{04ff}'),
];

/// Stopword lists for the Latin-script vote, in vote order.
const STOPWORDS: [(Language, &str); 6] = [
    (Language::En, "the|and|is|are|you|this|that|with|for|not|have|was|what|but"),
    (Language::De, "der|die|das|und|ist|nicht|ein|eine|ich|du|mit|auf|sich|auch|wie"),
    (Language::Fr, "le|la|les|et|est|une|des|pas|je|vous|que|qui|dans|pour|avec"),
    (Language::Es, "el|los|las|y|es|una|por|que|con|para|pero|muy|está|como|esto"),
    (Language::It, "il|lo|gli|che|è|non|una|sono|per|con|ma|questo|della|anche"),
    (Language::Pt, "o|os|as|não|uma|com|para|você|isso|mas|muito|está|são|também"),
];

static STOPWORD_PATTERNS: LazyLock<Vec<(Language, Regex)>> = LazyLock::new(|| {
    STOPWORDS
        .iter()
        .map(|(language, words)| {
            let pattern = format!(r"(?i)\b(?:{})\b", words);
            (*language, Regex::new(&pattern).expect("valid stopword pattern"))
        })
        .collect()
});

/// Detect the language of `text`.
///
/// Script ranges are checked first and the first match wins. Otherwise each
/// Latin-script language counts its stopword hits and the strictly highest
/// count wins; ties keep the earlier language, so English wins them.
pub fn detect(text: &str) -> Language {
    for (language, start, end) in SCRIPTS {
        if text.chars().any(|c| (start..=end).contains(&c)) {
            return language;
        }
    }

    let mut best = Language::En;
    let mut best_count = 0;
    for (language, pattern) in STOPWORD_PATTERNS.iter() {
        let count = pattern.find_iter(text).count();
        if count > best_count {
            best = *language;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cjk_is_chinese() {
        assert_eq!(detect("这篇文章写得很好"), Language::Zh);
    }

    #[test]
    fn test_script_priority() {
        assert_eq!(detect("ひらがなだけ"), Language::Ja);
        // Kanji with kana still hits the CJK test first.
        assert_eq!(detect("日本語のテキスト"), Language::Zh);
        assert_eq!(detect("مرحبا بالعالم"), Language::Ar);
        assert_eq!(detect("यह एक परीक्षण है"), Language::Hi);
        assert_eq!(detect("এটি একটি পরীক্ষা"), Language::Bn);
        assert_eq!(detect("Это просто тест"), Language::Ru);
    }

    #[test]
    fn test_german_stopwords() {
        assert_eq!(detect("Das ist nicht die Wahrheit und ich sehe das auch so"), Language::De);
    }

    #[test]
    fn test_latin_votes() {
        assert_eq!(detect("Je pense que vous avez raison, mais pas pour les bonnes raisons"), Language::Fr);
        assert_eq!(detect("Esto es muy bueno pero no para todos los casos"), Language::Es);
        assert_eq!(detect("Questo non è vero, ma sono d'accordo con gli altri"), Language::It);
        assert_eq!(detect("Isso não é verdade, você também sabe disso"), Language::Pt);
        assert_eq!(detect("This is what you have been waiting for"), Language::En);
    }

    #[test]
    fn test_defaults_to_english() {
        assert_eq!(detect(""), Language::En);
        assert_eq!(detect("xyzzy plugh 12345"), Language::En);
    }

    #[test]
    fn test_code_display() {
        assert_eq!(Language::Zh.code(), "zh");
        assert_eq!(Language::Pt.to_string(), "pt");
    }
}
