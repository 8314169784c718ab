//! Named-capture regex matching.

use std::collections::HashMap;

use regex::Regex;

/// Runs `re` against `haystack` and returns its named captures keyed by group
/// name.
///
/// Returns `None` when the pattern does not match. Named groups that did not
/// take part in the match map to an empty string, so callers can splice
/// optional groups without checking for them.
pub fn match_named(re: &Regex, haystack: &str) -> Option<HashMap<String, String>> {
	let captures = re.captures(haystack)?;
	Some(
		re.capture_names()
			.flatten()
			.map(|name| {
				let value = captures.name(name).map_or_else(String::new, |m| m.as_str().to_string());
				(name.to_string(), value)
			})
			.collect(),
	)
}
