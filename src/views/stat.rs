//! Dashboard summary cards.

use serde::Serialize;

/// Headline figure of a card. Numbers are rendered with thousands separators.
#[derive(Clone, Debug, PartialEq)]
pub enum StatValue {
    Number(i64),
    Text(String),
}

impl From<i64> for StatValue {
    fn from(value: i64) -> Self {
        StatValue::Number(value)
    }
}

impl From<usize> for StatValue {
    fn from(value: usize) -> Self {
        i64::try_from(value)
            .map(StatValue::Number)
            .unwrap_or_else(|_| StatValue::Text(value.to_string()))
    }
}

impl From<&str> for StatValue {
    fn from(value: &str) -> Self {
        StatValue::Text(value.to_string())
    }
}

impl From<String> for StatValue {
    fn from(value: String) -> Self {
        StatValue::Text(value)
    }
}

/// Change indicator. The sign shown comes from `is_positive`, not from the
/// sign of `value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Trend {
    pub value: f64,
    pub label: String,
    pub is_positive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatCard {
    pub title: String,
    pub value: StatValue,
    pub description: Option<String>,
    pub trend: Option<Trend>,
}

impl StatCard {
    pub fn new(title: impl Into<String>, value: impl Into<StatValue>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            description: None,
            trend: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn render(&self) -> StatCardView {
        StatCardView {
            title: self.title.clone(),
            value: match &self.value {
                StatValue::Number(n) => format_grouped(*n),
                StatValue::Text(text) => text.clone(),
            },
            description: self.description.clone(),
            trend: self.trend.as_ref().map(TrendView::from),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrendView {
    /// Signed magnitude, e.g. `+12%`.
    pub text: String,
    pub label: String,
    pub css_class: &'static str,
}

impl From<&Trend> for TrendView {
    fn from(trend: &Trend) -> Self {
        let (sign, css_class) = if trend.is_positive {
            ('+', "text-success")
        } else {
            ('-', "text-danger")
        };
        let magnitude = (trend.value.abs() * 10.0).round() / 10.0;
        Self {
            text: format!("{sign}{magnitude}%"),
            label: trend.label.clone(),
            css_class,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatCardView {
    pub title: String,
    pub value: String,
    pub description: Option<String>,
    pub trend: Option<TrendView>,
}

/// Formats `n` with comma thousands separators: `12000` becomes `12,000`.
pub fn format_grouped(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1000), "1,000");
        assert_eq!(format_grouped(12000), "12,000");
        assert_eq!(format_grouped(1234567), "1,234,567");
        assert_eq!(format_grouped(-45210), "-45,210");
        assert_eq!(format_grouped(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn card_renders_numeric_and_text_values() {
        let card = StatCard::new("Total members", 12000_i64).with_description("All time");
        let view = card.render();
        assert_eq!(view.value, "12,000");
        assert_eq!(view.description.as_deref(), Some("All time"));
        assert!(view.trend.is_none());

        assert_eq!(StatCard::new("Status", "Open").render().value, "Open");
    }

    #[test]
    fn trend_sign_follows_is_positive_flag() {
        let up = StatCard::new("Visits", 10_i64).with_trend(Trend {
            value: 12.0,
            label: "vs previous 30 days".to_string(),
            is_positive: true,
        });
        let trend = up.render().trend.unwrap();
        assert_eq!(trend.text, "+12%");
        assert_eq!(trend.css_class, "text-success");

        let down = StatCard::new("Visits", 10_i64).with_trend(Trend {
            value: 4.5,
            label: "vs previous 30 days".to_string(),
            is_positive: false,
        });
        let trend = down.render().trend.unwrap();
        assert_eq!(trend.text, "-4.5%");
        assert_eq!(trend.css_class, "text-danger");
    }

    #[test]
    fn negative_value_with_positive_flag_prints_plus() {
        let trend = TrendView::from(&Trend {
            value: -3.0,
            label: String::new(),
            is_positive: true,
        });
        assert_eq!(trend.text, "+3%");
    }
}
