//! Recurring bills and their due-date representation.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// When a recurring bill falls due.
///
/// Documents encode a monthly bill as a bare day number (`"dueDate": 5`) and a
/// one-off or explicitly scheduled bill as an ISO date (`"dueDate": "2024-08-05"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DueDate {
    DayOfMonth(u32),
    Date(NaiveDate),
}

impl DueDate {
    /// Resolves the due date for the billing month containing `today`.
    ///
    /// A day past the end of the month is clamped to the month's last day.
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match *self {
            DueDate::Date(date) => date,
            DueDate::DayOfMonth(day) => {
                let mut day = day.clamp(1, 31);
                loop {
                    if let Some(date) = NaiveDate::from_ymd_opt(today.year(), today.month(), day)
                    {
                        return date;
                    }
                    day -= 1;
                }
            }
        }
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueDate::DayOfMonth(day) => write!(f, "Monthly - {}{}", day, ordinal_suffix(*day)),
            DueDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl FromStr for DueDate {
    type Err = String;

    /// Accepts a day of month (`5`) or an ISO date (`2024-08-05`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if let Ok(day) = value.parse::<u32>() {
            return Ok(DueDate::DayOfMonth(day));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(DueDate::Date)
            .map_err(|_| format!("expected a day of month or YYYY-MM-DD, got `{}`", value))
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => value,
        RawAmount::Text(text) => text.trim().parse().unwrap_or(f64::NAN),
        RawAmount::Other(_) => f64::NAN,
    })
}

/// A bill that repeats every billing cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBill {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    /// Magnitude of the bill. Summaries use the absolute value whatever the sign.
    /// Anything that is not a number loads as NaN.
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: f64,
    pub due_date: DueDate,
    #[serde(default)]
    pub last_paid: Option<NaiveDate>,
    pub theme: String,
}

impl RecurringBill {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        due_date: DueDate,
        theme: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            amount,
            due_date,
            last_paid: None,
            theme: theme.into(),
        }
    }

    pub fn with_last_paid(mut self, date: NaiveDate) -> Self {
        self.last_paid = Some(date);
        self
    }

    /// Absolute amount; non-finite amounts contribute nothing.
    pub fn magnitude(&self) -> f64 {
        if self.amount.is_finite() {
            self.amount.abs()
        } else {
            0.0
        }
    }
}

impl Identifiable for RecurringBill {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for RecurringBill {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Themed for RecurringBill {
    fn theme(&self) -> &str {
        &self.theme
    }
}

impl Displayable for RecurringBill {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.due_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_or_date() {
        assert_eq!("5".parse::<DueDate>(), Ok(DueDate::DayOfMonth(5)));
        assert_eq!(
            "2024-08-05".parse::<DueDate>(),
            Ok(DueDate::Date(date(2024, 8, 5)))
        );
        assert!("next tuesday".parse::<DueDate>().is_err());
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_of_month_clamps_to_month_end() {
        assert_eq!(DueDate::DayOfMonth(31).resolve(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(DueDate::DayOfMonth(31).resolve(date(2023, 4, 1)), date(2023, 4, 30));
        assert_eq!(DueDate::DayOfMonth(0).resolve(date(2023, 4, 9)), date(2023, 4, 1));
    }

    #[test]
    fn absolute_date_ignores_today() {
        let due = DueDate::Date(date(2024, 8, 5));
        assert_eq!(due.resolve(date(2030, 1, 1)), date(2024, 8, 5));
    }

    #[test]
    fn due_date_parses_number_or_date() {
        let day: DueDate = serde_json::from_str("5").unwrap();
        assert_eq!(day, DueDate::DayOfMonth(5));
        let absolute: DueDate = serde_json::from_str("\"2024-08-05\"").unwrap();
        assert_eq!(absolute, DueDate::Date(date(2024, 8, 5)));
    }

    #[test]
    fn non_numeric_amounts_load_as_nan() {
        let json = r##"[
            {"name": "A", "category": "Bills", "amount": "abc", "dueDate": 1, "theme": "#277C78"},
            {"name": "B", "category": "Bills", "amount": "12.5", "dueDate": 2, "theme": "#277C78"},
            {"name": "C", "category": "Bills", "amount": null, "dueDate": 3, "theme": "#277C78"}
        ]"##;
        let bills: Vec<RecurringBill> = serde_json::from_str(json).unwrap();
        assert!(bills[0].amount.is_nan());
        assert_eq!(bills[1].amount, 12.5);
        assert!(bills[2].amount.is_nan());
        assert_eq!(bills[0].magnitude(), 0.0);
    }

    #[test]
    fn labels_use_ordinals() {
        assert_eq!(DueDate::DayOfMonth(1).to_string(), "Monthly - 1st");
        assert_eq!(DueDate::DayOfMonth(12).to_string(), "Monthly - 12th");
        assert_eq!(DueDate::DayOfMonth(23).to_string(), "Monthly - 23rd");
    }

    #[test]
    fn magnitude_ignores_sign_and_non_finite() {
        let mut bill = RecurringBill::new("Rent", "Bills", -950.0, DueDate::DayOfMonth(1), "#000");
        assert_eq!(bill.magnitude(), 950.0);
        bill.amount = f64::NAN;
        assert_eq!(bill.magnitude(), 0.0);
    }
}
