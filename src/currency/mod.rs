use chrono::{Datelike, NaiveDate};

/// Separators used when rendering numbers for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleConfig {
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

impl LocaleConfig {
    /// Picks separators from a BCP 47 tag such as `en-US` or `de-DE`.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag.split(['-', '_']).next().unwrap_or_default();
        match language.to_ascii_lowercase().as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "tr" | "id" => Self {
                decimal_separator: ',',
                grouping_separator: '.',
            },
            "fr" | "pl" | "sv" | "nb" | "fi" | "cs" => Self {
                decimal_separator: ',',
                grouping_separator: ' ',
            },
            _ => Self::default(),
        }
    }
}

/// How amounts are shown for the session currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    pub currency: String,
    pub locale: LocaleConfig,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::new("USD", "en-US")
    }
}

impl MoneyFormat {
    pub fn new(currency: &str, locale: &str) -> Self {
        Self {
            currency: currency.trim().to_ascii_uppercase(),
            locale: LocaleConfig::from_tag(locale),
        }
    }

    /// `-$1,234.50` style rendering.
    pub fn amount(&self, value: f64) -> String {
        format_currency_value(value, &self.currency, &self.locale)
    }

    /// Always carries a sign, the way transaction amounts are listed.
    pub fn signed(&self, value: f64) -> String {
        if value > 0.0 {
            format!("+{}", self.amount(value))
        } else {
            self.amount(value)
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => format!("{} ", code),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, fraction) = match body.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (body.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut out = format!("{}{}", sign, group_digits(digits, locale.grouping_separator));
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator);
        out.push_str(fraction);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_currency_value(amount: f64, code: &str, locale: &LocaleConfig) -> String {
    if !amount.is_finite() {
        return format!("{}?", symbol_for(code));
    }
    let body = format_number(locale, amount.abs(), minor_units_for(code));
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol_for(code), body)
}

/// `19 Aug 2024`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        month_label(date.month()),
        date.year()
    )
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}
