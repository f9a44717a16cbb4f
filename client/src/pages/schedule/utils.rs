use std::{collections::BTreeMap, iter};

use chrono::{Days, Locale, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::{api::Lesson, utils::time::parse_day};

/// One selectable day in the schedule strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub date: NaiveDate,
    /// Locale short weekday name, e.g. `Wed`.
    pub day_name: String,
    /// `DD/MM`.
    pub date_label: String,
}

impl DayEntry {
    pub fn new(date: NaiveDate, locale: Locale) -> Self {
        let stamp = Utc.from_utc_datetime(&date.and_time(NaiveTime::default()));
        Self {
            date,
            day_name: stamp.format_localized("%a", locale).to_string(),
            date_label: date.format("%d/%m").to_string(),
        }
    }
}

/// `count` consecutive calendar days starting at `start`, cut short at the
/// last representable date.
pub fn generate_days(start: NaiveDate, count: usize, locale: Locale) -> Vec<DayEntry> {
    iter::successors(Some(start), |date| date.checked_add_days(Days::new(1)))
        .take(count)
        .map(|date| DayEntry::new(date, locale))
        .collect()
}

/// Lessons bucketed by calendar day. Lessons whose date cannot be read are
/// kept aside in `undated` so nothing the server sent goes missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayGroups {
    pub by_day: BTreeMap<NaiveDate, Vec<Lesson>>,
    pub undated: Vec<Lesson>,
}

impl DayGroups {
    pub fn len(&self) -> usize {
        self.by_day.values().map(Vec::len).sum::<usize>() + self.undated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Buckets lessons by calendar day, keeping server order inside each day.
pub fn group_by_day(lessons: Vec<Lesson>, tz: Tz) -> DayGroups {
    let mut groups = DayGroups::default();
    for lesson in lessons {
        match parse_day(&lesson.date, tz) {
            Some(day) => groups.by_day.entry(day).or_default().push(lesson),
            None => {
                tracing::warn!(lesson_id = %lesson.id, date = %lesson.date, "lesson has unparseable date");
                groups.undated.push(lesson);
            }
        }
    }
    groups
}
