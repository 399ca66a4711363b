use std::cmp::Ordering;

use chrono::NaiveDate;
use lexical_sort::lexical_cmp;

use crate::task::{DateAttribute, Task};

/// Formats tried, in order, when a date typed by the user is compared to another.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%b %d %Y"];

#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Compares two dates as typed by the user.
/// Dates that can be parsed come first, in chronological order.
/// The others follow in lexical order.
#[must_use]
pub fn cmp_dates(d1: &str, d2: &str) -> Ordering {
    match (parse_date(d1), parse_date(d2)) {
        (Some(d1), Some(d2)) => d1.cmp(&d2),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => lexical_cmp(d1, d2),
    }
}

/// Keeps the tasks having a date for `attribute`, sorted by that date.
/// Each task comes with its index in `tasks`; ties keep their original order.
pub fn sort_by_date<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    attribute: DateAttribute,
) -> Vec<(usize, &'a Task)> {
    let mut dated: Vec<(usize, &Task, &str)> = tasks
        .into_iter()
        .enumerate()
        .filter_map(|(index, task)| task.date(attribute).map(|date| (index, task, date)))
        .collect();
    dated.sort_by(|(_, _, d1), (_, _, d2)| cmp_dates(d1, d2));
    dated
        .into_iter()
        .map(|(index, task, _)| (index, task))
        .collect()
}
