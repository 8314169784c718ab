//! User interaction utilities.

use std::io::{BufRead, Write, stdin, stdout};

/// Prompts user for confirmation on the terminal. Returns true if user
/// confirms.
pub fn confirm(prompt: &str) -> bool { confirm_with(prompt, &mut stdin().lock(), &mut stdout()) }

/// Writes `prompt` to `output` and reads one answer line from `input`.
/// Anything other than y/yes (any case) counts as no, including EOF and read
/// errors.
fn confirm_with(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> bool {
	write!(output, "{prompt} (y/N): ").ok();
	output.flush().ok();

	let mut answer = String::new();
	if input.read_line(&mut answer).is_err() {
		return false;
	}
	matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
