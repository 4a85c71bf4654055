//! Display formatting for Polish phone numbers.

const COUNTRY_CODE: &str = "48";
const NATIONAL_LENGTH: usize = 9;

/// Formats a free-form phone string as `+48 XXX XXX XXX`.
///
/// Non-digits are dropped and a leading `48` is removed when more than nine
/// digits are present. Inputs that do not reduce to exactly nine digits are
/// returned as given.
pub fn format_phone_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let national = match digits.strip_prefix(COUNTRY_CODE) {
        Some(rest) if digits.len() > NATIONAL_LENGTH => rest,
        _ => digits.as_str(),
    };

    if national.len() != NATIONAL_LENGTH {
        return raw.to_string();
    }

    format!(
        "+{COUNTRY_CODE} {} {} {}",
        &national[0..3],
        &national[3..6],
        &national[6..9]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_country_code() {
        assert_eq!(format_phone_number("48123456789"), "+48 123 456 789");
        assert_eq!(format_phone_number("+48 600-700-800"), "+48 600 700 800");
    }

    #[test]
    fn formats_national_number() {
        assert_eq!(format_phone_number("600 700 800"), "+48 600 700 800");
    }

    #[test]
    fn nine_digits_starting_with_48_are_kept() {
        assert_eq!(format_phone_number("481234567"), "+48 481 234 567");
    }

    #[test]
    fn unformattable_input_is_returned_unchanged() {
        assert_eq!(format_phone_number("123"), "123");
        assert_eq!(format_phone_number(""), "");
        assert_eq!(format_phone_number("+1 (555) 010-9999"), "+1 (555) 010-9999");
    }
}
