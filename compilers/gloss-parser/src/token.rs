#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Marks split off the end of an English word.
pub const TRAILING_PUNCTUATION: [char; 3] = ['.', '?', '!'];

/// One whitespace-delimited piece of a translation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnglishToken {
    pub word: String,
    pub trailing_punctuation: Option<char>,
    /// Byte range of the whole piece, punctuation included.
    pub span: Span,
}

impl EnglishToken {
    pub fn from_piece(piece: &str, span: Span) -> Self {
        let mut chars = piece.chars();
        match chars.next_back() {
            Some(last) if TRAILING_PUNCTUATION.contains(&last) => Self {
                word: chars.as_str().to_string(),
                trailing_punctuation: Some(last),
                span,
            },
            _ => Self {
                word: piece.to_string(),
                trailing_punctuation: None,
                span,
            },
        }
    }
}
