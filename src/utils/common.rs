//! Common utility functions

use chrono::NaiveDate;

/// Date format for printed documents (DD/MM/YYYY)
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format a date for a printed document
pub fn format_display_date(date: &NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Format an amount as currency: two decimals, comma thousands separators
pub fn format_money(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}

/// Wrap text to a maximum width in characters, breaking on spaces.
///
/// A single word longer than `width` is hard-split. Always returns at
/// least one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current.is_empty() {
            if word_len <= width {
                current.push_str(word);
            } else {
                hard_split(word, width, &mut lines, &mut current);
            }
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            if word_len <= width {
                current.push_str(word);
            } else {
                hard_split(word, width, &mut lines, &mut current);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split an overlong word into `width`-sized chunks; the last chunk stays
/// in `current` so following words can share its line.
fn hard_split(word: &str, width: usize, lines: &mut Vec<String>, current: &mut String) {
    let chars: Vec<char> = word.chars().collect();
    let mut start = 0;
    while start + width < chars.len() {
        lines.push(chars[start..start + width].iter().collect());
        start += width;
    }
    current.extend(&chars[start..]);
}
