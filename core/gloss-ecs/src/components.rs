use gloss_protocol::{EntryId, SentenceId, TokenSlot};

/// What the renderer paints for this token.
#[derive(Debug, Clone)]
pub struct TokenData {
    pub text: String,
}

/// Where the token sits: sentence, side and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub sentence: SentenceId,
    pub slot: TokenSlot,
    /// Position in the overall scene, for stable output order.
    pub order: usize,
}

/// Dictionary entry behind the token, when it has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub entry: EntryId,
}

/// Marker set by the highlight system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlighted;
