use std::error::Error;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate, Weekday};

/// Delivery date as printed on an order confirmation, e.g. `Monday 5 March`.
///
/// Confirmations never carry a year, so only the weekday, day of month and month are known.
/// [`DeliveryDate::infer_year`] can place it on the calendar relative to a reference date.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct DeliveryDate {
    weekday: Weekday,
    day: u32,
    month: Month,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeliveryDateError {
    /// Not of the form `<weekday> <day> <month>`.
    Shape(String),
    UnknownWeekday(String),
    UnknownMonth(String),
    InvalidDay(String),
}

impl fmt::Display for DeliveryDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryDateError::Shape(s) => {
                write!(f, "expected '<weekday> <day> <month>', found '{}'", s)
            }
            DeliveryDateError::UnknownWeekday(s) => write!(f, "unknown weekday '{}'", s),
            DeliveryDateError::UnknownMonth(s) => write!(f, "unknown month '{}'", s),
            DeliveryDateError::InvalidDay(s) => write!(f, "invalid day of month '{}'", s),
        }
    }
}

impl Error for DeliveryDateError {}

fn days_in_month(month: Month) -> u32 {
    match month {
        Month::February => 29,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

impl DeliveryDate {
    /// Returns `None` when `day` does not exist in `month` in any year.
    pub fn new(weekday: Weekday, day: u32, month: Month) -> Option<Self> {
        if day == 0 || day > days_in_month(month) {
            return None;
        }
        Some(DeliveryDate { weekday, day, month })
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// The calendar date in `year`, provided it falls on the printed weekday.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month.number_from_month(), self.day)
            .filter(|date| date.weekday() == self.weekday)
    }

    /// Picks the matching date closest to `today`, looking one year either side.
    ///
    /// Returns `None` if the weekday matches in none of those years.
    pub fn infer_year(&self, today: NaiveDate) -> Option<NaiveDate> {
        (today.year() - 1..=today.year() + 1)
            .filter_map(|year| self.in_year(year))
            .min_by_key(|date| date.signed_duration_since(today).num_days().abs())
    }
}

impl fmt::Display for DeliveryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", weekday_name(self.weekday), self.day, self.month.name())
    }
}

impl FromStr for DeliveryDate {
    type Err = DeliveryDateError;

    /// Parses `<weekday> <day> <month>`, accepting full or abbreviated English names in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let (weekday, day, month) = match parts.as_slice() {
            [weekday, day, month] => (*weekday, *day, *month),
            _ => return Err(DeliveryDateError::Shape(s.trim().to_string())),
        };
        let weekday = weekday
            .parse::<Weekday>()
            .map_err(|_| DeliveryDateError::UnknownWeekday(weekday.to_string()))?;
        let month = month
            .parse::<Month>()
            .map_err(|_| DeliveryDateError::UnknownMonth(month.to_string()))?;
        day.parse::<u32>()
            .ok()
            .and_then(|d| DeliveryDate::new(weekday, d, month))
            .ok_or_else(|| DeliveryDateError::InvalidDay(day.to_string()))
    }
}
