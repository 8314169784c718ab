//! Filename and content transforms applied while migrating.

use std::{
	path::{Component, Path, PathBuf},
	sync::LazyLock,
};

use regex::Regex;

use super::match_named;

/// Org-roam node file stems look like `20230101-My_Note`; the timestamp
/// prefix is optional.
static ORG_ROAM_NODE_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(\d+-)?(?P<name>.*)$").expect("valid org-roam regex"));

/// Notion appends a space and a 32 character hex id to every exported page
/// and folder name, before the extension.
static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?P<filename>.+) [0-9a-f]{32}(?P<suffix>\..+)?$").expect("valid notion id regex")
});

/// Number of leading lines (title and breadcrumb) Notion writes into every
/// exported markdown page.
const NOTION_HEADER_LINES: usize = 2;

/// Maps an outline file name to its markdown name.
/// The numeric `<digits>-` prefix is dropped, the extension becomes `.md`
/// and underscores become spaces.
///
/// # Examples
/// ```ignore
/// assert_eq!(org_target_name("20230101-My_Note.org", "org"), "My Note.md");
/// ```
pub fn org_target_name(file_name: &str, extension: &str) -> String {
	let stem = file_name.strip_suffix(&format!(".{extension}")).unwrap_or(file_name);
	let name = match_named(&ORG_ROAM_NODE_RE, stem)
		.and_then(|mut groups| groups.remove("name"))
		.unwrap_or_else(|| stem.to_string());
	format!("{name}.md").replace('_', " ")
}

/// Removes the Notion id from every segment of an archive path and drops
/// the first segment (the export's root folder).
///
/// `Export-1a2b/Notes abcdef0123456789abcdef0123456789.md` becomes
/// `Notes.md`.
pub fn strip_path_uuid(path: &Path) -> PathBuf {
	path.components()
		.filter_map(|component| match component {
			Component::Normal(part) => Some(part.to_string_lossy()),
			_ => None,
		})
		.skip(1)
		.map(|part| match match_named(&UUID_RE, &part) {
			Some(groups) => format!("{}{}", groups["filename"], groups["suffix"]),
			None => part.into_owned(),
		})
		.collect()
}

/// Drops the title and breadcrumb lines Notion writes at the top of every
/// page. Content with fewer lines than that becomes empty.
pub fn strip_header_lines(contents: &[u8]) -> Vec<u8> {
	// TODO: rewrite relative links to other exported pages with strip_path_uuid
	contents.split(|b| *b == b'\n').skip(NOTION_HEADER_LINES).collect::<Vec<_>>().join(&b'\n')
}
