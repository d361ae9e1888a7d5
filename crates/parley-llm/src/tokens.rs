//! Token count approximation
//!
//! This is not a tokenizer. It assumes roughly four characters per token,
//! which is close enough for budgeting but should not be relied on for
//! billing or hard context limits.

use crate::types::Contents;

/// Characters assumed per token
const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token count of `contents`
///
/// All text parts of every turn are joined with single spaces and the
/// character count is divided by four, rounding up.
pub fn estimate_tokens(contents: &Contents) -> u32 {
    let turns = contents.turns();
    let text = turns.iter().flat_map(|turn| turn.texts()).collect::<Vec<_>>().join(" ");

    u32::try_from(text.chars().count().div_ceil(CHARS_PER_TOKEN)).unwrap_or(u32::MAX)
}
