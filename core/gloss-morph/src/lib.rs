#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::vec::Vec;

use gloss_protocol::{GrammarProfile, HighlightKey};

/// Highlight key of the source token at `index`.
///
/// The clitic surface form directly followed by a verb is the bound
/// reading; every other token keys on its raw string.
///
/// Panics if `index` is out of bounds, like slice indexing.
pub fn source_key_at<S: AsRef<str>>(
    tokens: &[S],
    index: usize,
    profile: &GrammarProfile,
) -> HighlightKey {
    let token = tokens[index].as_ref();
    let next_is_verb = tokens
        .get(index + 1)
        .map_or(false, |next| profile.is_verb(next.as_ref()));

    if !profile.clitic_form.is_empty() && token == profile.clitic_form && next_is_verb {
        HighlightKey::clitic(token)
    } else {
        HighlightKey::free(token)
    }
}

/// One key per token, in token order.
pub fn source_keys<S: AsRef<str>>(tokens: &[S], profile: &GrammarProfile) -> Vec<HighlightKey> {
    (0..tokens.len())
        .map(|i| source_key_at(tokens, i, profile))
        .collect()
}

/// Whether any token carries the bound clitic reading.
pub fn has_clitic_reading(keys: &[HighlightKey]) -> bool {
    keys.iter().any(HighlightKey::is_clitic)
}

/// Whether `form` occurs with its free reading.
pub fn has_free(keys: &[HighlightKey], form: &str) -> bool {
    first_free(keys, form).is_some()
}

pub fn first_free(keys: &[HighlightKey], form: &str) -> Option<usize> {
    keys.iter()
        .position(|key| matches!(key, HighlightKey::Free(f) if f == form))
}

/// Last free occurrence of `form`. A pronoun hovered in the translation
/// stands for exactly this token.
pub fn last_free(keys: &[HighlightKey], form: &str) -> Option<usize> {
    keys.iter()
        .rposition(|key| matches!(key, HighlightKey::Free(f) if f == form))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use proptest::prelude::*;

    fn profile() -> GrammarProfile {
        GrammarProfile {
            clitic_form: "и".to_string(),
            verbs: vec!["муд".to_string(), "ситф".to_string(), "суфғ".to_string()],
            ..GrammarProfile::default()
        }
    }

    #[test]
    fn test_clitic_before_verb() {
        let tokens = ["мтукл", "ин", "х", "и", "муд", "учу"];
        let keys = source_keys(&tokens, &profile());

        assert_eq!(keys[3], HighlightKey::clitic("и"));
        assert_eq!(keys[4], HighlightKey::free("муд"));
        assert!(has_clitic_reading(&keys));
        assert!(!has_free(&keys, "и"));
    }

    #[test]
    fn test_free_pronoun_and_clitic_in_one_sentence() {
        // "и ситф и" (He let him in)
        let tokens = ["и", "ситф", "и"];
        let keys = source_keys(&tokens, &profile());

        assert_eq!(keys[0], HighlightKey::clitic("и"));
        assert_eq!(keys[2], HighlightKey::free("и"));
        assert_eq!(first_free(&keys, "и"), Some(2));
        assert_eq!(last_free(&keys, "и"), Some(2));
    }

    #[test]
    fn test_sentence_final_clitic_form_is_free() {
        let keys = source_keys(&["муд", "и"], &profile());
        assert_eq!(keys[1], HighlightKey::free("и"));
    }

    #[test]
    fn test_empty_profile_never_binds() {
        let keys = source_keys(&["и", "муд"], &GrammarProfile::default());
        assert!(!has_clitic_reading(&keys));
    }

    proptest! {
        #[test]
        fn test_keys_preserve_surface(words in proptest::collection::vec("(и|муд|учу|с)", 0..12)) {
            let tokens: Vec<String> = words;
            let keys = source_keys(&tokens, &profile());

            prop_assert_eq!(keys.len(), tokens.len());
            for (key, token) in keys.iter().zip(&tokens) {
                prop_assert_eq!(key.form(), token.as_str());
                if key.is_clitic() {
                    prop_assert_eq!(token.as_str(), "и");
                }
            }
        }
    }
}
