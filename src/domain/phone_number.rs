//! Phone numbers as typed into the contact form.
//!
//! Only digits are meaningful. What the person sees while typing is a grouped
//! rendering of those digits (`123 456 7890`), which never changes the digit
//! sequence sent with the submission.

/// Most digits kept from the input; anything beyond is dropped silently.
pub const MAX_PHONE_DIGITS: usize = 15;
/// Fewest digits a non-empty phone number may have.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Sizes of the leading groups. Digits after them form one last group.
const GROUPS: [usize; 3] = [3, 3, 4];

/// Keep only the ASCII digits of `raw`, at most [`MAX_PHONE_DIGITS`] of them.
pub fn digits(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(MAX_PHONE_DIGITS)
        .collect()
}

/// Format `raw` for display: digits grouped 3-3-4-remainder, separated by a
/// single space.
pub fn format_grouped(raw: &str) -> String {
    let digits = digits(raw);
    let mut formatted = String::with_capacity(digits.len() + GROUPS.len());
    let mut rest = digits.as_str();

    for size in GROUPS {
        if rest.is_empty() {
            break;
        }
        let (group, tail) = rest.split_at(size.min(rest.len()));
        push_group(&mut formatted, group);
        rest = tail;
    }
    if !rest.is_empty() {
        push_group(&mut formatted, rest);
    }

    formatted
}

fn push_group(formatted: &mut String, group: &str) {
    if !formatted.is_empty() {
        formatted.push(' ');
    }
    formatted.push_str(group);
}

/// Result of checking a phone number when the person leaves the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneCheck {
    /// Nothing was typed. The field is optional, so nothing is reported.
    Empty,
    TooShort,
    Valid,
}

/// Check the digits of `raw` against [`MIN_PHONE_DIGITS`].
pub fn check(raw: &str) -> PhoneCheck {
    match digits(raw).len() {
        0 => PhoneCheck::Empty,
        n if n < MIN_PHONE_DIGITS => PhoneCheck::TooShort,
        _ => PhoneCheck::Valid,
    }
}
