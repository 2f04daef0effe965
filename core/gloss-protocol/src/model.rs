use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::SentenceId;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A dictionary headword: one source form and the English it glosses to.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct LexicalEntry {
    pub source_form: String,
    pub gloss_label: String,
    /// Opaque to the engine; handed back to the renderer untouched.
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_color: String,
    /// Inflected English spellings linking back to this entry.
    /// Empty means the gloss label is the only surface form.
    #[cfg_attr(feature = "serde", serde(default))]
    pub english_surface_forms: Vec<String>,
}

impl LexicalEntry {
    pub fn new(source_form: &str, gloss_label: &str) -> Self {
        Self {
            source_form: source_form.to_string(),
            gloss_label: gloss_label.to_string(),
            display_color: String::new(),
            english_surface_forms: Vec::new(),
        }
    }

    pub fn with_forms(mut self, forms: &[&str]) -> Self {
        self.english_surface_forms = forms.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.display_color = color.to_string();
        self
    }

    /// The forms registered in the English lookup table.
    pub fn surface_forms(&self) -> impl Iterator<Item = &str> + '_ {
        let fallback = self
            .english_surface_forms
            .is_empty()
            .then_some(self.gloss_label.as_str());
        self.english_surface_forms
            .iter()
            .map(String::as_str)
            .chain(fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Sentence {
    pub id: SentenceId,
    pub source_text: String,
    /// May be empty: the translation line is then simply not shown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub translation_text: String,
}

impl Sentence {
    pub fn new(id: u32, source_text: &str, translation_text: &str) -> Self {
        Self {
            id: SentenceId(id),
            source_text: source_text.to_string(),
            translation_text: translation_text.to_string(),
        }
    }
}

/// The source forms that the closed set of disambiguation rules refers to.
///
/// These are corpus data: swapping the language means swapping the profile,
/// while the English trigger words stay fixed inside the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct GrammarProfile {
    /// Third-person subject clitic; doubles as a free pronoun.
    pub clitic_form: String,
    /// A clitic directly before one of these is the bound reading.
    pub verbs: Vec<String>,
    pub first_person: String,
    /// Object-clitic-like third-person object marker.
    pub object_marker: String,
    /// Free third-person object marker competing with `object_marker`.
    pub alternate_object_marker: String,
    /// Entry that "his" glosses to.
    pub default_third_person_object: String,
    pub interrogative_future: String,
    pub declarative_future: String,
    pub let_in: String,
    pub let_out: String,
}

impl GrammarProfile {
    pub fn is_verb(&self, token: &str) -> bool {
        self.verbs.iter().any(|verb| verb == token)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Corpus {
    #[cfg_attr(feature = "serde", serde(default))]
    pub version: u32,
    pub entries: Vec<LexicalEntry>,
    pub sentences: Vec<Sentence>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub profile: GrammarProfile,
}
