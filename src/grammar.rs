//! Text grammars for the seven bindable kinds.
//!
//! Every parser returns a short reason string on failure. The same grammar is
//! used for declared defaults, command-line values, and environment values.

use std::time::Duration;

const INVALID: &str = "invalid syntax";
const OUT_OF_RANGE: &str = "value out of range";

const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

/// Parse a signed integer that must fit `isize`.
pub fn parse_int(text: &str) -> Result<isize, String> {
    let v = parse_signed(text)?;
    isize::try_from(v).map_err(|_| OUT_OF_RANGE.to_string())
}

pub fn parse_int64(text: &str) -> Result<i64, String> {
    let v = parse_signed(text)?;
    i64::try_from(v).map_err(|_| OUT_OF_RANGE.to_string())
}

/// Parse an unsigned integer. Signs are rejected, including `+`.
pub fn parse_uint64(text: &str) -> Result<u64, String> {
    if text.starts_with(['+', '-']) {
        return Err(INVALID.to_string());
    }
    parse_magnitude(text)
}

pub fn parse_float(text: &str) -> Result<f64, String> {
    text.parse::<f64>().map_err(|_| INVALID.to_string())
}

pub fn parse_bool(text: &str) -> Result<bool, String> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(INVALID.to_string()),
    }
}

fn parse_signed(text: &str) -> Result<i128, String> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.starts_with(['+', '-']) {
        return Err(INVALID.to_string());
    }
    let magnitude = i128::from(parse_magnitude(digits)?);
    Ok(if negative { -magnitude } else { magnitude })
}

/// Unsigned integer literal with base detection: `0x` hex, `0o` octal,
/// `0b` binary, a bare leading `0` octal, otherwise decimal.
///
/// `_` may separate digits, or follow a base prefix.
fn parse_magnitude(text: &str) -> Result<u64, String> {
    let lower = text.get(..2).map(str::to_ascii_lowercase);
    let (radix, body, prefixed) = match lower.as_deref() {
        Some("0x") => (16, &text[2..], true),
        Some("0o") => (8, &text[2..], true),
        Some("0b") => (2, &text[2..], true),
        _ if text.len() > 1 && text.starts_with('0') => (8, &text[1..], true),
        _ => (10, text, false),
    };

    if body.is_empty()
        || body.ends_with('_')
        || body.contains("__")
        || (!prefixed && body.starts_with('_'))
    {
        return Err(INVALID.to_string());
    }

    let digits: String = body.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(INVALID.to_string());
    }

    u64::from_str_radix(&digits, radix).map_err(|_| OUT_OF_RANGE.to_string())
}

/// Parse a duration such as `300ms`, `1.5h`, or `2h45m`.
///
/// A duration is a sequence of decimal magnitudes, each followed by a unit:
/// `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m`, `h`. The bare literal `0` needs
/// no unit. Negative durations are rejected unless they are zero.
pub fn parse_duration(text: &str) -> Result<Duration, String> {
    if let Some(rest) = text.strip_prefix('-') {
        let magnitude = parse_unsigned_duration(rest)?;
        return if magnitude.is_zero() {
            Ok(Duration::ZERO)
        } else {
            Err("negative durations are not supported".to_string())
        };
    }
    parse_unsigned_duration(text.strip_prefix('+').unwrap_or(text))
}

fn parse_unsigned_duration(text: &str) -> Result<Duration, String> {
    if text == "0" {
        return Ok(Duration::ZERO);
    }
    if text.is_empty() {
        return Err(format!("invalid duration {text:?}"));
    }

    let mut total: u128 = 0;
    let mut rest = text;
    while !rest.is_empty() {
        let int_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (int_part, after_int) = rest.split_at(int_end);

        let (frac_part, after_number) = match after_int.strip_prefix('.') {
            Some(after_dot) => {
                let frac_end = after_dot
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(after_dot.len());
                after_dot.split_at(frac_end)
            }
            None => ("", after_int),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(format!("invalid duration {text:?}"));
        }

        let unit_end = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, tail) = after_number.split_at(unit_end);
        let scale = match unit {
            "" => return Err(format!("missing unit in duration {text:?}")),
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => NANOS_PER_MIN,
            "h" => NANOS_PER_HOUR,
            other => return Err(format!("unknown unit {other:?} in duration {text:?}")),
        };

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| OUT_OF_RANGE.to_string())?
        };
        let mut nanos = whole
            .checked_mul(scale)
            .ok_or_else(|| OUT_OF_RANGE.to_string())?;

        // Digits past the 18th cannot affect a nanosecond count.
        let frac_digits = &frac_part[..frac_part.len().min(18)];
        if !frac_digits.is_empty() {
            let frac: u128 = frac_digits.parse().map_err(|_| INVALID.to_string())?;
            nanos += frac * scale / 10u128.pow(frac_digits.len() as u32);
        }

        total = total
            .checked_add(nanos)
            .ok_or_else(|| OUT_OF_RANGE.to_string())?;
        rest = tail;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| OUT_OF_RANGE.to_string())?;
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}

/// Render a duration in the same grammar [`parse_duration`] accepts.
///
/// Sub-second values use the largest unit below a second (`1.5µs`, `500ms`);
/// longer values are spelled as hours, minutes, and seconds (`1m30s`, `2h0m0s`).
pub fn format_duration(d: Duration) -> String {
    let n = d.as_nanos();
    if n == 0 {
        return "0s".to_string();
    }
    if n < 1_000 {
        return format!("{n}ns");
    }
    if n < 1_000_000 {
        return format!("{}µs", decimal(n, 1_000, 3));
    }
    if n < NANOS_PER_SEC {
        return format!("{}ms", decimal(n, 1_000_000, 6));
    }

    let hours = n / NANOS_PER_HOUR;
    let minutes = (n % NANOS_PER_HOUR) / NANOS_PER_MIN;
    let seconds = n % NANOS_PER_MIN;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h{minutes}m"));
    } else if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&decimal(seconds, NANOS_PER_SEC, 9));
    out.push('s');
    out
}

fn decimal(n: u128, unit: u128, width: usize) -> String {
    let whole = n / unit;
    let frac = n % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:0width$}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}
