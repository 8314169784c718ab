//! Conversion of Things records into Obsidian markdown.

use chrono::{NaiveDate, TimeDelta};
use log::warn;

use super::format_date_only;
use crate::db::Task;

/// Stored start-date value known to correspond to [`START_DATE_ANCHOR_DAY`].
pub const START_DATE_ANCHOR: i64 = 132_452_480;

/// Calendar date of [`START_DATE_ANCHOR`] as (year, month, day).
pub const START_DATE_ANCHOR_DAY: (i32, u32, u32) = (2021, 1, 1);

/// Stored units per calendar day.
const UNITS_PER_DAY: i64 = 128;

/// Decodes a Things start date into a calendar date.
///
/// Things stores start dates as an integer in which every 128 units is
/// assumed to be one day. The offset from a known anchor value is added to
/// the anchor's calendar date. This is a linear heuristic and drifts for
/// dates far from the anchor.
///
/// Returns `None` only if the result falls outside chrono's date range.
pub fn decode_start_date(value: i64) -> Option<NaiveDate> {
	let (year, month, day) = START_DATE_ANCHOR_DAY;
	let anchor = NaiveDate::from_ymd_opt(year, month, day)?;
	let days = value / UNITS_PER_DAY - START_DATE_ANCHOR / UNITS_PER_DAY;
	anchor.checked_add_signed(TimeDelta::try_days(days)?)
}

/// Formats a task as an Obsidian Tasks checklist note.
///
/// Format:
/// ```markdown
/// - [ ] #task Title [scheduled:: 2024-01-15]
///
/// Notes body...
/// ```
pub fn task_to_markdown(task: &Task) -> String {
	let mut content = format!("- [ ] #task {}", task.title);

	if let Some(start_date) = task.start_date {
		match decode_start_date(start_date) {
			Some(date) => {
				content.push_str(" [scheduled:: ");
				content.push_str(&format_date_only(&date));
				content.push(']');
			}
			None => warn!("Task {} has an out of range start date {start_date}; leaving it unscheduled", task.uuid),
		}
	}

	content.push_str("\n\n");
	content.push_str(&task.notes);
	content
}

#[cfg(test)]
mod tests {
	use super::*;

	fn task(title: &str, notes: &str, start_date: Option<i64>) -> Task {
		Task {
			uuid: "t1".to_string(),
			kind: 0,
			stop_date: None,
			trashed: false,
			title: title.to_string(),
			notes: notes.to_string(),
			start_date,
			area: None,
			project: None,
			heading: None,
		}
	}

	#[test]
	fn anchor_decodes_to_anchor_day() {
		assert_eq!(decode_start_date(START_DATE_ANCHOR), NaiveDate::from_ymd_opt(2021, 1, 1));
	}

	#[test]
	fn each_128_units_is_one_day() {
		assert_eq!(decode_start_date(START_DATE_ANCHOR + 128), NaiveDate::from_ymd_opt(2021, 1, 2));
		assert_eq!(decode_start_date(START_DATE_ANCHOR + 127), NaiveDate::from_ymd_opt(2021, 1, 1));
		assert_eq!(decode_start_date(START_DATE_ANCHOR - 128), NaiveDate::from_ymd_opt(2020, 12, 31));
		assert_eq!(decode_start_date(START_DATE_ANCHOR + 128 * 365), NaiveDate::from_ymd_opt(2022, 1, 1));
	}

	#[test]
	fn zero_is_a_date_not_absent() {
		// 132452480 / 128 = 1034785 days before the anchor
		let date = decode_start_date(0).unwrap();
		assert_eq!(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap().signed_duration_since(date).num_days(), 1_034_785);
	}

	#[test]
	fn extreme_values_do_not_panic() {
		assert_eq!(decode_start_date(i64::MAX), None);
		assert_eq!(decode_start_date(i64::MIN), None);
	}

	#[test]
	fn renders_scheduled_task() {
		let markdown = task_to_markdown(&task("Call bank", "Ask about fees", Some(START_DATE_ANCHOR + 128 * 14)));
		assert_eq!(markdown, "- [ ] #task Call bank [scheduled:: 2021-01-15]\n\nAsk about fees");
	}

	#[test]
	fn renders_unscheduled_task() {
		assert_eq!(task_to_markdown(&task("Read", "", None)), "- [ ] #task Read\n\n");
	}
}
