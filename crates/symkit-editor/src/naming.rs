//! Helpers for generating element names.

/// Increment the last number found in `text`, or append `1` if there is none
///
/// Digits keep their surrounding text, so `"GND 41"` becomes `"GND 42"` and
/// `"99A"` becomes `"100A"`.
pub fn increment_number_in_string(text: &str) -> String {
    let bytes = text.as_bytes();
    let Some(last_digit) = bytes.iter().rposition(u8::is_ascii_digit) else {
        return format!("{}1", text);
    };
    let first_digit = bytes[..last_digit]
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |i| i + 1);

    let digits = &text[first_digit..=last_digit];
    let incremented = increment_decimal(digits);
    format!(
        "{}{}{}",
        &text[..first_digit],
        incremented,
        &text[last_digit + 1..]
    )
}

// Works on the digit string directly so arbitrarily long numbers never
// overflow.
fn increment_decimal(digits: &str) -> String {
    let mut out: Vec<u8> = digits.bytes().collect();
    for b in out.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return String::from_utf8_lossy(&out).into_owned();
        }
    }
    let mut result = String::with_capacity(out.len() + 1);
    result.push('1');
    result.push_str(&String::from_utf8_lossy(&out));
    result
}
