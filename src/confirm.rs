//! Yes/no answer handling for the pre-run confirmation.

use std::io::BufRead;

use crate::error::Result;

/// `y` or `yes` in any case, surrounding whitespace ignored. Everything else,
/// including an empty answer, declines.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Reads one answer line. End of input counts as an empty answer.
pub fn read_answer<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
