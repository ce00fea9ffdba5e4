use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::annotation::{AnnotationResponse, Sentence, Token};

/// Whitespace run introduced where two fragments join. Applied once per
/// append, first match only; never a global normalization.
static JOINED_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Output classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "NOUN")]
    Noun,
    #[serde(rename = "VERB")]
    Verb,
    #[serde(rename = "ADJ")]
    Adjective,
    /// Everything that is not a guessable word: punctuation, articles,
    /// whitespace, contraction fragments.
    #[serde(rename = "NA")]
    Filler,
}

/// One slot of the simplified sequence: a single word of a word class, or
/// an accumulated run of filler text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedToken {
    pub kind: TokenKind,
    pub value: String,
}

/// Collapse an annotation response into an alternating sequence of
/// word-class tokens and filler runs.
///
/// Word-class tokens keep their surface form untouched, one output slot per
/// raw token. All other text, including each word's surrounding whitespace
/// and punctuation, is merged into the neighboring filler runs, so no two
/// adjacent output slots are both filler. Filler values are trimmed at the
/// end; a run that trims down to the empty string keeps its slot.
pub fn simplify(response: &AnnotationResponse) -> Vec<ClassifiedToken> {
    let mut tokens = fold(response);
    for token in &mut tokens {
        if token.kind == TokenKind::Filler {
            token.value = token.value.trim().to_string();
        }
    }
    tokens
}

fn fold(response: &AnnotationResponse) -> Vec<ClassifiedToken> {
    let mut out = Vec::new();
    for sentence in response.sentences.iter().filter(|s| !is_spurious(s)) {
        for token in &sentence.tokens {
            match classify(token) {
                TokenKind::Filler => {
                    let text = format!("{}{}{}", token.before, token.word, token.after);
                    append_filler(&mut out, &text);
                }
                kind => {
                    append_filler(&mut out, &token.before);
                    out.push(ClassifiedToken {
                        kind,
                        value: token.word.clone(),
                    });
                    append_filler(&mut out, &token.after);
                }
            }
        }
    }
    out
}

fn classify(token: &Token) -> TokenKind {
    // Contraction fragments ("'s", "'re") come back tagged as verbs or
    // nouns; on their own they are not words.
    if token.word.starts_with('\'') {
        return TokenKind::Filler;
    }
    match token.pos.as_bytes().first() {
        Some(b'V') => TokenKind::Verb,
        Some(b'N') => TokenKind::Noun,
        Some(b'J') => TokenKind::Adjective,
        _ => TokenKind::Filler,
    }
}

/// Add `text` to the trailing filler run, starting a fresh run if the last
/// slot is a word. Adjacent raw tokens both carry the gap between them, so
/// each append collapses the first doubled whitespace it produced.
fn append_filler(out: &mut Vec<ClassifiedToken>, text: &str) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if last.kind == TokenKind::Filler => {
            last.value = collapse_join(&last.value, text);
        }
        _ => out.push(ClassifiedToken {
            kind: TokenKind::Filler,
            value: collapse_join("", text),
        }),
    }
}

fn collapse_join(existing: &str, text: &str) -> String {
    JOINED_WHITESPACE
        .replace(&format!("{existing}{text}"), " ")
        .into_owned()
}

/// The service reliably returns one spurious sentence whose only token is
/// an `=`; left in, it would pollute every response.
fn is_spurious(sentence: &Sentence) -> bool {
    sentence.tokens.len() == 1 && sentence.tokens[0].original_text == "="
}
