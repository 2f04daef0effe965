use nom::{
    bytes::complete::{take_till1, take_while},
    sequence::preceded,
    IResult,
};
use crate::token::{EnglishToken, Span};

/// One maximal run of non-whitespace, skipping any whitespace before it.
fn piece(input: &str) -> IResult<&str, &str> {
    preceded(take_while(char::is_whitespace), take_till1(char::is_whitespace))(input)
}

/// Splits on runs of whitespace, keeping byte spans into `original_input`.
pub fn split_with_spans(original_input: &str) -> Vec<(Span, &str)> {
    let mut input = original_input;
    let mut result = Vec::new();

    // Fails only once nothing but whitespace is left.
    while let Ok((rest, word)) = piece(input) {
        let start = original_input.len() - rest.len() - word.len();
        result.push((Span::new(start, start + word.len()), word));
        input = rest;
    }

    result
}

/// Source side: whitespace split, punctuation kept as-is.
pub fn tokenize_source(text: &str) -> Vec<String> {
    split_with_spans(text)
        .into_iter()
        .map(|(_, word)| word.to_string())
        .collect()
}

/// English side: whitespace split, then one trailing `.`/`?`/`!` is
/// detached from each piece.
pub fn tokenize_english(text: &str) -> Vec<EnglishToken> {
    split_with_spans(text)
        .into_iter()
        .map(|(span, word)| EnglishToken::from_piece(word, span))
        .collect()
}

/// Lossy comparison key: lowercase, then drop everything outside `a-z`.
/// "Him/it" and "himit" compare equal; so do "don't" and "dont".
pub fn normalize_english(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}
