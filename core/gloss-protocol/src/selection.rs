use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Highlight identity of a source token.
///
/// A surface form shared by a free pronoun and a bound clitic gets two
/// distinct keys, so the two readings light up independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "reading", content = "form", rename_all = "snake_case"))]
pub enum HighlightKey {
    Free(String),
    Clitic(String),
}

impl HighlightKey {
    pub fn free(form: &str) -> Self {
        HighlightKey::Free(form.to_string())
    }

    pub fn clitic(form: &str) -> Self {
        HighlightKey::Clitic(form.to_string())
    }

    /// The underlying surface form, which is also the dictionary key.
    pub fn form(&self) -> &str {
        match self {
            HighlightKey::Free(form) | HighlightKey::Clitic(form) => form,
        }
    }

    pub fn is_clitic(&self) -> bool {
        matches!(self, HighlightKey::Clitic(_))
    }
}

impl fmt::Display for HighlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightKey::Free(form) => f.write_str(form),
            HighlightKey::Clitic(form) => write!(f, "{form}="),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    Source,
    English,
}

/// A rendered, hoverable position inside one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "index", rename_all = "snake_case"))]
pub enum TokenSlot {
    Source(usize),
    English(usize),
    /// Trailing punctuation glyph of the English word at this index.
    Punctuation(usize),
}

impl TokenSlot {
    pub fn side(&self) -> Side {
        match self {
            TokenSlot::Source(_) => Side::Source,
            TokenSlot::English(_) | TokenSlot::Punctuation(_) => Side::English,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            TokenSlot::Source(i) | TokenSlot::English(i) | TokenSlot::Punctuation(i) => *i,
        }
    }
}

/// The one lexical item currently under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct ActiveSelection {
    pub origin: Side,
    pub source_key: HighlightKey,
    /// Normalized English word, or the literal punctuation mark.
    pub english_token: Option<String>,
}

impl ActiveSelection {
    pub fn from_source(source_key: HighlightKey, english_token: Option<String>) -> Self {
        Self {
            origin: Side::Source,
            source_key,
            english_token,
        }
    }

    pub fn from_english(source_key: HighlightKey, english_token: String) -> Self {
        Self {
            origin: Side::English,
            source_key,
            english_token: Some(english_token),
        }
    }
}
