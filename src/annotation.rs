use serde::{Deserialize, Serialize};

/// One token as tagged by the remote service.
///
/// `word` may be a normalized form; `original_text` is the surface text as
/// it appeared in the input. `before` and `after` carry the exact
/// whitespace and punctuation surrounding the token, which is what lets the
/// simplifier reconstruct the original text from discrete tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub word: String,
    #[serde(rename = "originalText")]
    pub original_text: String,
    pub pos: String,
    pub before: String,
    pub after: String,
}

/// A sentence as split by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub tokens: Vec<Token>,
}

/// The full annotation payload covering the input text.
///
/// Every field above is required; the service's documented shape is not
/// validated defensively anywhere else, so a payload missing one of them
/// fails here, at decode time. Extra fields (offsets, indexes) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationResponse {
    pub sentences: Vec<Sentence>,
}
