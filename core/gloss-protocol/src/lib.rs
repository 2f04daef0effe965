//! Fundamental types shared by every layer of the gloss engine.
//!
//! Static data (`LexicalEntry`, `Sentence`, `GrammarProfile`, `Corpus`) is
//! archived with rkyv and, behind the `serde` feature, read from JSON.
//! Transient UI state (`ActiveSelection`) and highlight identities
//! (`HighlightKey`) never touch the archive.

pub mod error;
pub mod ids;
pub mod model;
pub mod selection;

pub use error::ConfigError;
pub use ids::{EntryId, SentenceId};
pub use model::*;
pub use selection::{ActiveSelection, HighlightKey, Side, TokenSlot};

#[cfg(test)]
mod tests {
    use super::*;
    use rkyv::{check_archived_root, to_bytes, Deserialize};

    #[test]
    fn test_surface_forms_default_to_gloss_label() {
        let bare = LexicalEntry::new("учу", "couscous");
        assert_eq!(bare.surface_forms().collect::<Vec<_>>(), vec!["couscous"]);

        let inflected = LexicalEntry::new("муд", "prepare").with_forms(&["prepare", "prepared"]);
        assert_eq!(
            inflected.surface_forms().collect::<Vec<_>>(),
            vec!["prepare", "prepared"]
        );
    }

    #[test]
    fn test_corpus_archive_validates() {
        let corpus = Corpus {
            version: 3,
            entries: vec![LexicalEntry::new("учу", "couscous").with_color("#c0392b")],
            sentences: vec![Sentence::new(2, "муд х учу", "I prepared the couscous.")],
            profile: GrammarProfile {
                clitic_form: "и".to_string(),
                verbs: vec!["муд".to_string()],
                ..GrammarProfile::default()
            },
        };

        let bytes = to_bytes::<_, 1024>(&corpus).expect("Failed to serialize Corpus");
        let archived = check_archived_root::<Corpus>(&bytes).expect("archive should validate");
        assert_eq!(archived.sentences[0].id.0, 2);

        let restored: Corpus = archived.deserialize(&mut rkyv::Infallible).unwrap();
        assert_eq!(restored, corpus);
        assert!(restored.profile.is_verb("муд"));
        assert!(!restored.profile.is_verb("учу"));
    }

    #[test]
    fn test_highlight_key_readings() {
        let free = HighlightKey::free("и");
        let clitic = HighlightKey::clitic("и");
        assert_ne!(free, clitic);
        assert_eq!(free.form(), clitic.form());
        assert!(clitic.is_clitic());
        assert_eq!(clitic.to_string(), "и=");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_optional_fields() {
        let entry: LexicalEntry =
            serde_json::from_str(r#"{"source_form": "учу", "gloss_label": "couscous"}"#).unwrap();
        assert!(entry.english_surface_forms.is_empty());
        assert!(entry.display_color.is_empty());

        let sentence: Sentence =
            serde_json::from_str(r#"{"id": 21, "source_text": "ад и рз тажра ин х"}"#).unwrap();
        assert_eq!(sentence.id, SentenceId(21));
        assert!(sentence.translation_text.is_empty());
    }

    #[test]
    fn test_slot_sides() {
        assert_eq!(TokenSlot::Source(1).side(), Side::Source);
        assert_eq!(TokenSlot::Punctuation(4).side(), Side::English);
        assert_eq!(TokenSlot::Punctuation(4).index(), 4);
    }
}
