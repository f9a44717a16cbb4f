use chrono::{Days, Locale, NaiveDate};
use chrono_tz::Tz;

use super::{
    repository::ScheduleRepository,
    utils::{generate_days, group_by_day, DayEntry, DayGroups},
};
use crate::{
    api::{ApiError, Lesson},
    config::AppConfig,
    state::{ScreenScope, SessionGuard},
    utils::time::today_in_tz,
};

/// Day strip plus the per-day lesson cache for the main screen.
///
/// `loading`/`loaded` gate rendering; a loaded day with no lessons is a normal,
/// displayable state.
pub struct ScheduleViewModel {
    repo: ScheduleRepository,
    scope: ScreenScope,
    time_zone: Tz,
    locale: Locale,
    today: NaiveDate,
    days: Vec<DayEntry>,
    schedule: DayGroups,
    selected_date: NaiveDate,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
}

impl ScheduleViewModel {
    pub fn new(session: SessionGuard, config: &AppConfig) -> Self {
        let mut vm = Self::with_today(
            session,
            today_in_tz(config.time_zone),
            config.time_zone,
            config.locale,
        );
        vm.expand_window(config.schedule_window_days);
        vm
    }

    /// Starts with an empty window anchored at `today`.
    pub fn with_today(session: SessionGuard, today: NaiveDate, time_zone: Tz, locale: Locale) -> Self {
        Self {
            repo: ScheduleRepository::new(session),
            scope: ScreenScope::new(),
            time_zone,
            locale,
            today,
            days: Vec::new(),
            schedule: DayGroups::default(),
            selected_date: today,
            loading: false,
            loaded: false,
            error: None,
        }
    }

    pub fn scope(&self) -> &ScreenScope {
        &self.scope
    }

    pub fn days(&self) -> &[DayEntry] {
        &self.days
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn cached_days(&self) -> impl Iterator<Item = &NaiveDate> {
        self.schedule.by_day.keys()
    }

    /// Appends `count` days after the current window (or from today when empty).
    /// Pure date arithmetic.
    pub fn expand_window(&mut self, count: usize) -> &[DayEntry] {
        let start = match self.days.last() {
            Some(last) => last.date.checked_add_days(Days::new(1)),
            None => Some(self.today),
        };
        let from = self.days.len();
        if let Some(start) = start {
            self.days.extend(generate_days(start, count, self.locale));
        }
        &self.days[from..]
    }

    /// Fetches every lesson and replaces the whole cache with the new grouping.
    pub async fn load_schedule(&mut self) -> Result<(), ApiError> {
        self.loading = true;
        let result = self.repo.fetch_schedule().await;
        if !self.scope.is_active() {
            tracing::debug!("schedule screen dismissed; discarding response");
            return Ok(());
        }
        self.loading = false;

        match result {
            Ok(lessons) => {
                let count = lessons.len();
                self.schedule = group_by_day(lessons, self.time_zone);
                self.loaded = true;
                self.error = None;
                tracing::info!(
                    lessons = count,
                    days = self.schedule.by_day.len(),
                    undated = self.schedule.undated.len(),
                    "schedule loaded"
                );
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.surface("load schedule"));
                Err(err)
            }
        }
    }

    /// Selects `date` and returns its lessons; an uncached day yields an empty list.
    pub fn select_day(&mut self, date: NaiveDate) -> &[Lesson] {
        self.selected_date = date;
        self.lessons_for(date)
    }

    pub fn lessons_for(&self, date: NaiveDate) -> &[Lesson] {
        self.schedule
            .by_day
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Lessons whose date could not be read; shown apart from the day strip.
    pub fn undated_lessons(&self) -> &[Lesson] {
        &self.schedule.undated
    }

    pub fn selected_lessons(&self) -> &[Lesson] {
        self.lessons_for(self.selected_date)
    }

    pub async fn fetch_lesson(&self, lesson_id: &str) -> Result<Lesson, ApiError> {
        self.repo.fetch_lesson(lesson_id).await
    }
}
