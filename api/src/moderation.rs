use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::borrow::Cow;

/// Marker substituted for every banned word.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Warning shown to the author when a post is refused.
pub const PROFANITY_WARNING: &str = "Your message contains inappropriate words.";

const BANNED_WORDS: &[&str] = &[
    "abuse", "alcoholic", "asshole", "bastard", "bitch", "blacklist", "bloodsucker", "blowjob",
    "bomb", "boobs", "bullshit", "cunt", "dick", "douchebag", "dyke", "fag", "faggot", "fuck",
    "gangbang", "goddamn", "homo", "idiot", "jackass", "jerk", "kike", "lesbian",
    "masturbation", "motherfucker", "nazi", "nigger", "piss", "porn", "prick", "pussy",
    "racist", "rape", "scum", "shit", "slut", "sodomize", "spic", "tits", "twat", "whore", "wop",
];

// One whole-word pattern per banned word, in list order. Case folding and word
// boundaries are ASCII-only: "Ωshit" matches, "ſhit" does not.
static BANNED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    BANNED_WORDS
        .iter()
        .map(|word| {
            Regex::new(&format!(r"(?i-u)(?-u:\b){}(?-u:\b)", regex::escape(word)))
                .expect("Banned word pattern is valid")
        })
        .collect()
});

/// Outcome of running text through the banned-word filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moderation {
    pub cleaned_text: String,
    pub flagged: bool,
}

impl Moderation {
    pub fn is_clean(&self) -> bool {
        !self.flagged
    }
}

/// Redact every banned word in `text`.
///
/// Each word is a separate substitution pass over the output of the previous
/// one. `flagged` is set exactly when at least one substitution happened.
pub fn moderate(text: &str) -> Moderation {
    let mut cleaned = text.to_string();

    for pattern in BANNED_PATTERNS.iter() {
        if let Cow::Owned(replaced) = pattern.replace_all(&cleaned, NoExpand(REDACTION_MARKER)) {
            cleaned = replaced;
        }
    }

    let flagged = cleaned != text;
    if flagged {
        tracing::debug!("Moderation redacted banned words");
    }

    Moderation {
        cleaned_text: cleaned,
        flagged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_clean() {
        let result = moderate("");
        assert_eq!(result.cleaned_text, "");
        assert!(!result.flagged);
        assert!(result.is_clean());
    }

    #[test]
    fn test_clean_text_is_unchanged() {
        let result = moderate("Hello world, what a lovely day");
        assert_eq!(result.cleaned_text, "Hello world, what a lovely day");
        assert!(!result.flagged);
    }

    #[test]
    fn test_standalone_word_is_redacted() {
        let result = moderate("I hate this shit");
        assert_eq!(result.cleaned_text, "I hate this [REDACTED]");
        assert!(result.flagged);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let result = moderate("What an IDIOT. Idiot!");
        assert_eq!(result.cleaned_text, "What an [REDACTED]. [REDACTED]!");
        assert!(result.flagged);
    }

    #[test]
    fn test_punctuation_adjacent_word_matches() {
        assert_eq!(moderate("fuck!").cleaned_text, "[REDACTED]!");
        assert_eq!(moderate("(porn)").cleaned_text, "([REDACTED])");
        assert_eq!(moderate("jerk,jerk").cleaned_text, "[REDACTED],[REDACTED]");
    }

    #[test]
    fn test_substring_of_longer_word_is_not_flagged() {
        for text in ["Scunthorpe", "a classic bombastic tale", "jerky", "shitake", "Dickens"] {
            let result = moderate(text);
            assert!(!result.flagged, "{text} should not be flagged");
            assert_eq!(result.cleaned_text, text);
        }
    }

    #[test]
    fn test_non_ascii_letters_are_not_word_characters() {
        let result = moderate("Ωshit");
        assert!(result.flagged);
        assert_eq!(result.cleaned_text, "Ω[REDACTED]");

        let result = moderate("fuckñ");
        assert!(result.flagged);
        assert_eq!(result.cleaned_text, "[REDACTED]ñ");
    }

    #[test]
    fn test_case_folding_is_ascii_only() {
        let result = moderate("ſhit");
        assert!(!result.flagged);
        assert_eq!(result.cleaned_text, "ſhit");
    }

    #[test]
    fn test_compound_banned_word_redacted_once() {
        // "bullshit" is its own entry; "shit" no longer matches inside the marker.
        let result = moderate("total bullshit");
        assert_eq!(result.cleaned_text, "total [REDACTED]");
    }

    #[test]
    fn test_multiple_words_each_redacted() {
        let result = moderate("scum and a jackass");
        assert_eq!(result.cleaned_text, "[REDACTED] and a [REDACTED]");
        assert!(result.flagged);
    }

    #[test]
    fn test_moderation_is_deterministic() {
        let first = moderate("you bastard");
        let second = moderate("you bastard");
        assert_eq!(first, second);
    }
}
