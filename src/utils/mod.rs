//! Shared utility functions used across the import commands.

mod conversion;
mod formatting;
mod interaction;
mod matching;
mod parsing;
mod paths;
mod process;

pub use conversion::{decode_start_date, task_to_markdown};
pub use formatting::{format_date_only, sanitize_path_segment};
pub use interaction::confirm;
pub use matching::match_named;
pub use parsing::{org_target_name, strip_header_lines, strip_path_uuid};
pub use paths::{absolute_arg, has_extension};
pub use process::run_captured;
