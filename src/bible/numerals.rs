//! Chapter and verse numeral parsing.
//!
//! Historical texts cite chapters in roman numerals, often mangled by
//! typesetting or OCR: mixed case (`Xxxi`, `iX`), `u` standing in for `v`,
//! and a closing `j` for the last `i` (`iij`). Only canonical or purely
//! additive spellings are accepted, so ordinary words built from numeral
//! letters (`ill`, `civil`) never parse.

/// Parse an arabic or roman numeral token into a positive number.
pub(crate) fn parse_numeral(token: &str) -> Option<u32> {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        parse_arabic(token)
    } else {
        parse_roman(token)
    }
}

fn parse_arabic(token: &str) -> Option<u32> {
    token.parse::<u32>().ok().filter(|&n| n > 0)
}

/// Parse a roman numeral, tolerating the sloppy forms found in scanned text.
pub(crate) fn parse_roman(token: &str) -> Option<u32> {
    let normalized = normalize_roman(token)?;
    let values: Vec<u32> = normalized.bytes().map(roman_value).collect::<Option<_>>()?;

    let mut total: i64 = 0;
    for (i, &value) in values.iter().enumerate() {
        match values.get(i + 1) {
            Some(&next) if value < next => total -= i64::from(value),
            _ => total += i64::from(value),
        }
    }

    let total = u32::try_from(total).ok().filter(|&n| n > 0)?;
    let additive = values.windows(2).all(|pair| pair[0] >= pair[1]);
    (additive || to_roman(total) == normalized).then_some(total)
}

/// Lowercase and map typo substitutions onto the canonical alphabet.
fn normalize_roman(token: &str) -> Option<String> {
    let lower = token.to_ascii_lowercase();
    if !lower.bytes().any(is_roman_letter) {
        return None;
    }

    let last = lower.len().checked_sub(1)?;
    lower
        .bytes()
        .enumerate()
        .map(|(i, b)| match b {
            b if is_roman_letter(b) => Some(char::from(b)),
            b'u' => Some('v'),
            b'j' if i == last => Some('i'),
            _ => None,
        })
        .collect()
}

const fn is_roman_letter(b: u8) -> bool {
    matches!(b, b'i' | b'v' | b'x' | b'l' | b'c')
}

const fn roman_value(b: u8) -> Option<u32> {
    match b {
        b'i' => Some(1),
        b'v' => Some(5),
        b'x' => Some(10),
        b'l' => Some(50),
        b'c' => Some(100),
        _ => None,
    }
}

/// Canonical lowercase spelling of `n` using the letters up to `c`.
fn to_roman(mut n: u32) -> String {
    const TABLE: &[(u32, &str)] = &[
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];

    let mut out = String::new();
    for &(value, letters) in TABLE {
        while n >= value {
            out.push_str(letters);
            n -= value;
        }
    }
    out
}
