//! Heuristic "stupidity" score.

use crate::extractor::{Candidate, CandidateSet};

/// Insult and slang fragments, matched as case-insensitive substrings.
pub const LEXICON: [&str; 7] = ["lol", "wtf", "stupid", "idiot", "moron", "dumb", "nonsense"];

const SHORT_LEN: usize = 40;
const VERY_SHORT_LEN: usize = 15;
const LONG_LEN: usize = 800;
const LEXICON_WEIGHT: i32 = 3;

/// Score `text`. Higher means a more likely target.
///
/// Short texts score +2 (below 40 chars) and another +2 (below 15), every
/// lexicon occurrence adds +3, and texts over 800 chars lose 2. Substring
/// matching means "lolol" counts `lol` once and "idiotic" counts `idiot`.
pub fn score(text: &str) -> i32 {
    let text = text.trim();
    let len = text.chars().count();
    let mut score = 0;

    if len < SHORT_LEN {
        score += 2;
    }
    if len < VERY_SHORT_LEN {
        score += 2;
    }

    let lower = text.to_lowercase();
    for word in LEXICON {
        score += LEXICON_WEIGHT * lower.matches(word).count() as i32;
    }

    if len > LONG_LEN {
        score -= 2;
    }
    score
}

/// Highest-scoring candidate; ties go to the one found first.
pub fn pick_worst(candidates: &CandidateSet) -> Option<(&Candidate, i32)> {
    let mut worst: Option<(&Candidate, i32)> = None;
    for candidate in candidates {
        let score = candidate.score();
        match worst {
            Some((_, best)) if score <= best => {}
            _ => worst = Some((candidate, score)),
        }
    }
    worst
}
