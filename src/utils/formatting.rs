//! String and date formatting utilities.

use chrono::NaiveDate;

/// Date format constants for consistent formatting across the application.
pub mod date_formats {
	/// Date only format: "2024-01-15"
	pub const DATE_ONLY: &str = "%Y-%m-%d";
}

/// Fallback segment for titles that leave nothing usable behind.
const UNTITLED: &str = "Untitled";

/// Escapes a display title into a single filesystem path segment.
/// Path separators become '-' so a title can never introduce extra
/// directories, and titles that would resolve to `.`/`..` or nothing at all
/// become "Untitled".
///
/// # Examples
/// ```ignore
/// assert_eq!(sanitize_path_segment("Q1/Q2 Planning"), "Q1-Q2 Planning");
/// assert_eq!(sanitize_path_segment(".."), "Untitled");
/// ```
pub fn sanitize_path_segment(title: &str) -> String {
	let segment: String = title
		.chars()
		.map(|c| match c {
			'/' | '\\' => '-',
			'\0' => ' ',
			c => c,
		})
		.collect();

	if segment.trim().is_empty() || segment.chars().all(|c| c == '.') {
		return UNTITLED.to_string();
	}
	segment
}

/// Formats a date as "2024-01-15".
pub fn format_date_only(date: &NaiveDate) -> String { date.format(date_formats::DATE_ONLY).to_string() }
