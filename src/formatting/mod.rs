//! Presentation helpers: color handling, currency and percentage
//! formatting, and the clinical display bands the dashboard uses.

use colored::*;
use std::env;
use std::io::IsTerminal;

use crate::risk::RiskBucket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormattingConfig {
    pub color: ColorMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // NO_COLOR per the no-color.org standard
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// Plain output configuration (no colors, ASCII tables)
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
        }
    }

    /// Install this configuration into the `colored` runtime.
    pub fn apply(&self) {
        match self.color {
            ColorMode::Always => colored::control::set_override(true),
            ColorMode::Never => colored::control::set_override(false),
            ColorMode::Auto => colored::control::unset_override(),
        }
    }
}

/// Currency with thousands separators; whole dollars unless the amount
/// carries cents.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let whole = (cents / 100).unsigned_abs();
    let fraction = (cents % 100).unsigned_abs();
    let sign = if cents < 0 { "-" } else { "" };

    if fraction == 0 {
        format!("{sign}${}", group_thousands(whole))
    } else {
        format!("{sign}${}.{fraction:02}", group_thousands(whole))
    }
}

pub fn format_pct(pct: f64) -> String {
    format!("{pct:.1}%")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Bucket label in the dashboard's tier palette.
pub fn bucket_colored(bucket: RiskBucket, label: &str) -> ColoredString {
    match bucket {
        RiskBucket::Low => label.green(),
        RiskBucket::Moderate => label.yellow(),
        RiskBucket::Elevated => label.truecolor(255, 165, 0),
        RiskBucket::High => label.red(),
        RiskBucket::Unclassified => label.dimmed(),
    }
}

/// Systolic blood pressure display band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BpBand {
    Normal,   // < 120 mmHg
    Elevated, // < 140 mmHg
    High,
}

pub fn bp_band(systolic: u32) -> BpBand {
    if systolic < 120 {
        BpBand::Normal
    } else if systolic < 140 {
        BpBand::Elevated
    } else {
        BpBand::High
    }
}

/// Body-mass-index display band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiBand {
    Healthy,    // <= 25
    Overweight, // <= 30
    Obese,
}

pub fn bmi_band(bmi: f64) -> BmiBand {
    if bmi > 30.0 {
        BmiBand::Obese
    } else if bmi > 25.0 {
        BmiBand::Overweight
    } else {
        BmiBand::Healthy
    }
}

/// HbA1c above 6.5% is flagged on the dashboard regardless of the scoring
/// threshold.
pub fn hba1c_flagged(hba1c: f64) -> bool {
    hba1c > 6.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(760.0), "$760");
        assert_eq!(format_currency(13654.13), "$13,654.13");
        assert_eq!(format_currency(1_250_300.0), "$1,250,300");
        assert_eq!(format_currency(-42.5), "-$42.50");
    }

    #[test]
    fn percentage_uses_one_decimal() {
        assert_eq!(format_pct(27.6), "27.6%");
        assert_eq!(format_pct(0.0), "0.0%");
    }

    #[test]
    fn bp_bands_match_dashboard_cutoffs() {
        assert_eq!(bp_band(119), BpBand::Normal);
        assert_eq!(bp_band(120), BpBand::Elevated);
        assert_eq!(bp_band(139), BpBand::Elevated);
        assert_eq!(bp_band(140), BpBand::High);
    }

    #[test]
    fn color_mode_parses_known_values() {
        assert_eq!(ColorMode::parse("auto"), Some(ColorMode::Auto));
        assert_eq!(ColorMode::parse("ALWAYS"), Some(ColorMode::Always));
        assert_eq!(ColorMode::parse("nope"), None);
    }
}
