// SPDX-License-Identifier: MPL-2.0
//! Provider dashboard state: the day picker and the day's schedule.

use crate::api::{Appointment, DayAvailability};
use crate::i18n::I18n;
use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Timelike, Weekday};

/// Appointments of one day split at noon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentsByPeriod {
    pub morning: Vec<Appointment>,
    pub afternoon: Vec<Appointment>,
}

impl AppointmentsByPeriod {
    /// Splits by the local hour in `tz`: before 12 is morning, the rest is
    /// afternoon. Input order is kept within each period.
    pub fn split<Tz: TimeZone>(appointments: impl IntoIterator<Item = Appointment>, tz: &Tz) -> Self {
        let (morning, afternoon) = appointments
            .into_iter()
            .partition(|a| a.date.with_timezone(tz).hour() < 12);
        Self { morning, afternoon }
    }
}

/// First appointment strictly after `now`, in list order.
pub fn next_appointment<'a, Tz: TimeZone>(
    appointments: &'a [Appointment],
    now: &DateTime<Tz>,
) -> Option<&'a Appointment> {
    appointments.iter().find(|a| a.date > *now)
}

/// Dates of `year`/`month` the provider has no free slot on.
pub fn disabled_days(year: i32, month: u32, availability: &[DayAvailability]) -> Vec<NaiveDate> {
    availability
        .iter()
        .filter(|d| !d.available)
        .filter_map(|d| NaiveDate::from_ymd_opt(year, month, d.day))
        .collect()
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "calendar-weekday-monday",
        Weekday::Tue => "calendar-weekday-tuesday",
        Weekday::Wed => "calendar-weekday-wednesday",
        Weekday::Thu => "calendar-weekday-thursday",
        Weekday::Fri => "calendar-weekday-friday",
        Weekday::Sat => "calendar-weekday-saturday",
        Weekday::Sun => "calendar-weekday-sunday",
    }
}

/// Header text for the selected day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    pub is_today: bool,
    /// e.g. "Dia 08"
    pub day: String,
    /// e.g. "Segunda-feira"
    pub weekday: String,
}

/// Day picker state.
///
/// `current_month` is always the first day of the displayed month and never
/// earlier than the month of `today`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    today: NaiveDate,
    selected: NaiveDate,
    current_month: NaiveDate,
}

impl Calendar {
    /// Opens on `today`, with `today` selected.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            selected: today,
            current_month: first_of_month(today),
        }
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    #[must_use]
    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    /// `(year, month)` to request month availability for.
    #[must_use]
    pub fn month_query(&self) -> (i32, u32) {
        (self.current_month.year(), self.current_month.month())
    }

    /// `(year, month, day)` to request the selected day's appointments for.
    #[must_use]
    pub fn day_query(&self) -> (i32, u32, u32) {
        (self.selected.year(), self.selected.month(), self.selected.day())
    }

    /// Whether `date` may be picked given the displayed month's availability.
    #[must_use]
    pub fn is_selectable(&self, date: NaiveDate, availability: &[DayAvailability]) -> bool {
        let (year, month) = self.month_query();
        !is_weekend(date) && !disabled_days(year, month, availability).contains(&date)
    }

    /// Selects `date` if it is selectable. Returns whether the selection changed.
    pub fn select_day(&mut self, date: NaiveDate, availability: &[DayAvailability]) -> bool {
        if date == self.selected || !self.is_selectable(date, availability) {
            return false;
        }
        tracing::debug!(%date, "day selected");
        self.selected = date;
        true
    }

    /// Displays the month containing `month`. Months before today's are
    /// refused. Returns whether the displayed month changed.
    pub fn change_month(&mut self, month: NaiveDate) -> bool {
        let month = first_of_month(month);
        if month < first_of_month(self.today) || month == self.current_month {
            return false;
        }
        self.current_month = month;
        true
    }

    /// Steps `delta` months forward or back from the displayed month.
    pub fn shift_month(&mut self, delta: i32) -> bool {
        let months = Months::new(delta.unsigned_abs());
        let target = if delta >= 0 {
            self.current_month.checked_add_months(months)
        } else {
            self.current_month.checked_sub_months(months)
        };
        target.is_some_and(|month| self.change_month(month))
    }

    #[must_use]
    pub fn selection_summary(&self, i18n: &I18n) -> SelectionSummary {
        SelectionSummary {
            is_today: self.selected == self.today,
            day: i18n.tr_with_args(
                "calendar-day-of-month",
                &[("day", &format!("{:02}", self.selected.day()))],
            ),
            weekday: i18n.tr(weekday_key(self.selected.weekday())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AppointmentUser;
    use crate::config::{Config, GeneralConfig};
    use chrono::{FixedOffset, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn appointment(id: &str, iso: &str) -> Appointment {
        Appointment {
            id: id.into(),
            date: DateTime::parse_from_rfc3339(iso).unwrap(),
            user: AppointmentUser {
                id: "c-1".into(),
                name: "Cliente".into(),
                avatar_url: None,
            },
        }
    }

    fn ids(appointments: &[Appointment]) -> Vec<&str> {
        appointments.iter().map(|a| a.id.as_str()).collect()
    }

    fn i18n(lang: &str) -> I18n {
        let config = Config {
            general: GeneralConfig {
                language: Some(lang.into()),
            },
            ..Config::default()
        };
        I18n::new(None, &config)
    }

    #[test]
    fn split_uses_local_hour() {
        let appointments = vec![
            appointment("a", "2020-06-08T11:00:00Z"),
            appointment("b", "2020-06-08T16:00:00Z"),
            appointment("c", "2020-06-08T14:59:00Z"),
        ];
        let brasilia = FixedOffset::west_opt(3 * 3600).unwrap();

        let local = AppointmentsByPeriod::split(appointments.clone(), &brasilia);
        assert_eq!(ids(&local.morning), ["a", "c"]);
        assert_eq!(ids(&local.afternoon), ["b"]);

        let utc = AppointmentsByPeriod::split(appointments, &Utc);
        assert_eq!(ids(&utc.morning), ["a"]);
        assert_eq!(ids(&utc.afternoon), ["b", "c"]);
    }

    #[test]
    fn noon_is_afternoon() {
        let split = AppointmentsByPeriod::split([appointment("n", "2020-06-08T12:00:00Z")], &Utc);
        assert!(split.morning.is_empty());
        assert_eq!(ids(&split.afternoon), ["n"]);
    }

    #[test]
    fn next_appointment_is_strictly_after_now() {
        let appointments = vec![
            appointment("past", "2020-06-08T09:00:00Z"),
            appointment("now", "2020-06-08T10:00:00Z"),
            appointment("later", "2020-06-08T11:00:00Z"),
        ];
        let now = DateTime::parse_from_rfc3339("2020-06-08T10:00:00Z").unwrap();

        let next = next_appointment(&appointments, &now).unwrap();
        assert_eq!(next.id, "later");

        let late = DateTime::parse_from_rfc3339("2020-06-08T18:00:00Z").unwrap();
        assert!(next_appointment(&appointments, &late).is_none());
    }

    #[test]
    fn disabled_days_lists_unavailable_dates() {
        let availability = [
            DayAvailability { day: 1, available: false },
            DayAvailability { day: 2, available: true },
            DayAvailability { day: 31, available: false },
        ];
        // June has 30 days, day 31 is dropped.
        assert_eq!(disabled_days(2020, 6, &availability), [date(2020, 6, 1)]);
    }

    #[test]
    fn weekends_and_unavailable_days_cannot_be_selected() {
        let mut calendar = Calendar::new(date(2020, 6, 8));
        let availability = [
            DayAvailability { day: 9, available: false },
            DayAvailability { day: 10, available: true },
        ];

        assert!(!calendar.select_day(date(2020, 6, 6), &availability));
        assert!(!calendar.select_day(date(2020, 6, 7), &availability));
        assert!(!calendar.select_day(date(2020, 6, 9), &availability));
        assert_eq!(calendar.selected(), date(2020, 6, 8));

        assert!(calendar.select_day(date(2020, 6, 10), &availability));
        assert!(!calendar.select_day(date(2020, 6, 10), &availability));
        assert_eq!(calendar.day_query(), (2020, 6, 10));
    }

    #[test]
    fn month_navigation_stops_at_current_month() {
        let mut calendar = Calendar::new(date(2020, 6, 8));
        assert_eq!(calendar.current_month(), date(2020, 6, 1));

        assert!(!calendar.shift_month(-1));
        assert!(!calendar.change_month(date(2020, 5, 31)));
        assert_eq!(calendar.month_query(), (2020, 6));

        assert!(calendar.shift_month(7));
        assert_eq!(calendar.month_query(), (2021, 1));
        assert!(calendar.change_month(date(2020, 6, 20)));
        assert_eq!(calendar.current_month(), date(2020, 6, 1));
    }

    #[test]
    fn summary_is_localized() {
        let mut calendar = Calendar::new(date(2020, 6, 8));

        let summary = calendar.selection_summary(&i18n("pt-BR"));
        assert!(summary.is_today);
        assert_eq!(summary.day, "Dia 08");
        assert_eq!(summary.weekday, "Segunda-feira");

        calendar.select_day(date(2020, 6, 12), &[]);
        let summary = calendar.selection_summary(&i18n("en-US"));
        assert!(!summary.is_today);
        assert_eq!(summary.day, "Day 12");
        assert_eq!(summary.weekday, "Friday");
    }
}
