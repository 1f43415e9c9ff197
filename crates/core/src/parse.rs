//! Lenient numeric parsing for typed form input.
//!
//! Form text is read the way a browser reads it: leading whitespace is
//! skipped and the longest numeric prefix wins, so `"750000 RM"` is 750000 and
//! `"RM750000"` is not a number at all.

/// Longest leading decimal literal (sign, digits, fraction, exponent), or
/// `Infinity`.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let integer = count_digits(&bytes[end..]);
    end += integer;
    let mut mantissa = integer;

    if bytes.get(end) == Some(&b'.') {
        let fraction = count_digits(&bytes[end + 1..]);
        if integer > 0 || fraction > 0 {
            end += 1 + fraction;
            mantissa += fraction;
        }
    }
    if mantissa == 0 {
        return None;
    }

    // An exponent only counts when it has digits: "5e" is 5.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let digits = count_digits(&bytes[exp..]);
        if digits > 0 {
            end = exp + digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Longest leading base-10 integer.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse::<i64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
