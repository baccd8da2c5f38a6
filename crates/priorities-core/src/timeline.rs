//! Timeline view-models: month/day sections and media viewer pages.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{MediaItem, TimelineEvent};

/// Events that happened on one calendar day (UTC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySection {
    pub date: NaiveDate,
    pub label: String,
    pub events: Vec<TimelineEvent>,
}

/// Day sections that fall in one calendar month, newest day first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSection {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub days: Vec<DaySection>,
}

impl MonthSection {
    pub fn event_count(&self) -> usize {
        self.days.iter().map(|day| day.events.len()).sum()
    }
}

/// Sort events newest first and group them into month and day sections.
///
/// Events with identical timestamps keep their input order.
pub fn group_by_month<'a>(events: impl IntoIterator<Item = &'a TimelineEvent>) -> Vec<MonthSection> {
    let mut sorted: Vec<&TimelineEvent> = events.into_iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut months: Vec<MonthSection> = Vec::new();
    for event in sorted {
        let date = event.timestamp.date_naive();

        let needs_month = months
            .last()
            .is_none_or(|month| month.year != date.year() || month.month != date.month());
        if needs_month {
            months.push(MonthSection {
                year: date.year(),
                month: date.month(),
                label: date.format("%B %Y").to_string(),
                days: Vec::new(),
            });
        }
        let Some(month) = months.last_mut() else {
            continue;
        };

        let needs_day = month.days.last().is_none_or(|day| day.date != date);
        if needs_day {
            month.days.push(DaySection {
                date,
                label: date.format("%A, %B %-d").to_string(),
                events: Vec::new(),
            });
        }
        if let Some(day) = month.days.last_mut() {
            day.events.push(event.clone());
        }
    }
    months
}

/// Media viewer pages for a set of events, oldest first.
pub fn media_pages<'a>(events: impl IntoIterator<Item = &'a TimelineEvent>) -> Vec<MediaItem> {
    let mut sorted: Vec<&TimelineEvent> = events.into_iter().collect();
    sorted.sort_by_key(|event| event.timestamp);
    sorted
        .into_iter()
        .filter_map(MediaItem::from_event)
        .collect()
}

/// Index of `event_id` within `pages`, used to open the viewer on a tapped item.
pub fn page_index(pages: &[MediaItem], event_id: &str) -> Option<usize> {
    pages.iter().position(|item| item.id() == event_id)
}
