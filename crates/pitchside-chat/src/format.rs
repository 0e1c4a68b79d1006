//! Display helpers for rendered answers

use chrono::{Datelike, NaiveDate, Utc};

/// Money amount for display; missing amounts read "Not disclosed"
pub fn format_currency(amount: Option<&str>) -> String {
    match amount.map(str::trim) {
        None | Some("") | Some("Unknown") => "Not disclosed".to_string(),
        Some(amount) if amount.contains('€') || amount.contains('$') => amount.to_string(),
        Some(amount) => format!("€{amount}"),
    }
}

/// Transfer fee for display
///
/// Bare digit runs are read as millions of euros.
pub fn format_transfer_fee(fee: Option<&str>) -> String {
    let fee = match fee.map(str::trim) {
        None | Some("") => return "Undisclosed".to_string(),
        Some(fee) => fee,
    };

    match fee.to_lowercase().as_str() {
        "free" | "loan" | "unknown" => capitalize(fee),
        _ if fee.chars().all(|c| c.is_ascii_digit()) => format!("€{fee}M"),
        _ => fee.to_string(),
    }
}

/// Join items as "a", "a and b" or "a, b, and c"
pub fn format_list<S: AsRef<str>>(items: &[S], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} {conjunction} {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{}, {conjunction} {}", head.join(", "), last.as_ref())
        }
    }
}

/// Cut text to at most `max_chars` characters, ending in "..." when cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Expand a position abbreviation to its full name
pub fn parse_position(position: &str) -> String {
    let position = position.trim();
    if position.is_empty() {
        return "Unknown".to_string();
    }

    let full = match position.to_lowercase().as_str() {
        "gk" | "goalkeeper" => "Goalkeeper",
        "cb" | "centre-back" => "Centre-Back",
        "lb" | "left-back" => "Left-Back",
        "rb" | "right-back" => "Right-Back",
        "dm" | "cdm" => "Defensive Midfielder",
        "cm" => "Central Midfielder",
        "am" | "cam" => "Attacking Midfielder",
        "lm" => "Left Midfielder",
        "rm" => "Right Midfielder",
        "lw" => "Left Winger",
        "rw" => "Right Winger",
        "cf" => "Centre-Forward",
        "st" | "striker" => "Striker",
        _ => return title_words(position),
    };
    full.to_string()
}

/// Age in whole years from a `YYYY-MM-DD` birth date
pub fn calculate_age(birth_date: &str) -> Option<u32> {
    age_on(birth_date, Utc::now().date_naive())
}

fn age_on(birth_date: &str, today: NaiveDate) -> Option<u32> {
    let birth = NaiveDate::parse_from_str(birth_date.trim(), "%Y-%m-%d").ok()?;
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// Flag emoji for a country, or a globe when unknown
pub fn flag_emoji(country: &str) -> &'static str {
    match country.trim().to_lowercase().as_str() {
        "argentina" => "🇦🇷",
        "brazil" => "🇧🇷",
        "france" => "🇫🇷",
        "spain" => "🇪🇸",
        "portugal" => "🇵🇹",
        "england" => "🏴\u{e0067}\u{e0062}\u{e0065}\u{e006e}\u{e0067}\u{e007f}",
        "germany" => "🇩🇪",
        "italy" => "🇮🇹",
        "netherlands" => "🇳🇱",
        "belgium" => "🇧🇪",
        _ => "🌍",
    }
}

/// Collapse whitespace runs to single spaces
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn title_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            word.split('-')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(None), "Not disclosed");
        assert_eq!(format_currency(Some("Unknown")), "Not disclosed");
        assert_eq!(format_currency(Some("€180.00m")), "€180.00m");
        assert_eq!(format_currency(Some("$5m")), "$5m");
        assert_eq!(format_currency(Some("50m")), "€50m");
    }

    #[test]
    fn test_format_transfer_fee() {
        assert_eq!(format_transfer_fee(None), "Undisclosed");
        assert_eq!(format_transfer_fee(Some("free")), "Free");
        assert_eq!(format_transfer_fee(Some("LOAN")), "Loan");
        assert_eq!(format_transfer_fee(Some("100")), "€100M");
        assert_eq!(format_transfer_fee(Some("€103.00m")), "€103.00m");
    }

    #[test]
    fn test_format_list() {
        let empty: [&str; 0] = [];
        assert_eq!(format_list(&empty, "and"), "");
        assert_eq!(format_list(&["Messi"], "and"), "Messi");
        assert_eq!(format_list(&["Messi", "Ronaldo"], "or"), "Messi or Ronaldo");
        assert_eq!(
            format_list(&["Messi", "Ronaldo", "Neymar"], "and"),
            "Messi, Ronaldo, and Neymar"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("éééééé", 5), "éé...");
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("CDM"), "Defensive Midfielder");
        assert_eq!(parse_position("st"), "Striker");
        assert_eq!(parse_position("second striker"), "Second Striker");
        assert_eq!(parse_position("left-wing back"), "Left-Wing Back");
        assert_eq!(parse_position(""), "Unknown");
    }

    #[test]
    fn test_age() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 23).unwrap();
        assert_eq!(age_on("1987-06-24", today), Some(36));
        assert_eq!(age_on("1987-06-23", today), Some(37));
        assert_eq!(age_on("not a date", today), None);
        assert_eq!(age_on("2030-01-01", today), None);
    }

    #[test]
    fn test_flag_and_clean_text() {
        assert_eq!(flag_emoji("Argentina"), "🇦🇷");
        assert_eq!(flag_emoji("Wakanda"), "🌍");
        assert_eq!(clean_text("  too   many\n spaces "), "too many spaces");
    }
}
