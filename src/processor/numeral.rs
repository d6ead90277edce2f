//! Laugh numerals.
//
//  Place tokens repeat every four decimal digits:
//
//      1s: 훠    10s: 훳    100s: 허    1000s: 헛    (10^4 is 훠 again)
//
//  A digit at one place is written as:
//
//      0    nothing
//      1-5  the place token repeated `d` times
//      6-9  "훠러" followed by the place token repeated `d - 5` times
//
//  "찢" stands for a whole group of four zero digits and "뭐꼬" in front
//  makes the number negative. Places are written from high to low and the
//  value is read as the smallest power alignment that fits every token.

pub const NEGATIVE_PREFIX: &str = "뭐꼬";
pub const ZERO_GROUP: char = '찢';
const FIVE_PREFIX: [char; 2] = ['훠', '러'];
const PLACES: [char; 4] = ['훠', '훳', '허', '헛'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    ZeroGroup,
    Digit { place: char, digit: u32 },
}

fn place_power(place: char) -> Option<i64> {
    PLACES.iter().position(|p| *p == place).map(|i| i as i64)
}

fn token_for_power(k: i64) -> char {
    PLACES[(k % 4) as usize]
}

/// Decimal integer first, laugh numeral second.
pub fn parse_number(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match text.parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => parse_laugh(text),
    }
}

pub fn parse_laugh(text: &str) -> Option<i64> {
    let mut raw = text.trim();
    if raw.is_empty() {
        return None;
    }

    let negative = match raw.strip_prefix(NEGATIVE_PREFIX) {
        Some(rest) => {
            raw = rest.trim();
            if raw.is_empty() {
                return None;
            }
            true
        }
        None => false,
    };

    let items = tokenize(raw)?;

    // A run made only of zero groups has no anchor and is rejected.
    let first_place = items.iter().find_map(|item| match item {
        Item::Digit { place, .. } => Some(*place),
        Item::ZeroGroup => None,
    })?;
    let target = place_power(first_place)?;

    let max_steps = (items.len() * 5 + 20) as i64;
    (0..max_steps)
        .find_map(|m| evaluate(&items, target + 4 * m))
        .map(|v| if negative { -v } else { v })
}

fn tokenize(raw: &str) -> Option<Vec<Item>> {
    let chars: Vec<char> = raw.chars().collect();
    let mut items = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == ZERO_GROUP {
            items.push(Item::ZeroGroup);
            i += 1;
            continue;
        }

        let has_five = chars[i..].starts_with(&FIVE_PREFIX);
        if has_five {
            i += FIVE_PREFIX.len();
            if i >= chars.len() {
                return None;
            }
        }

        let place = chars[i];
        place_power(place)?;

        let mut count = 0;
        while i < chars.len() && chars[i] == place {
            count += 1;
            i += 1;
        }

        let digit = if has_five {
            if !(1..=4).contains(&count) {
                return None;
            }
            5 + count
        } else {
            if !(1..=5).contains(&count) {
                return None;
            }
            count
        };
        items.push(Item::Digit { place, digit });
    }

    if items.is_empty() { None } else { Some(items) }
}

/// Reads `items` with the leading token at power `k0`. Fails when the
/// tokens cannot be aligned or four zero digits are skipped without a
/// zero-group token.
fn evaluate(items: &[Item], k0: i64) -> Option<i64> {
    let mut k = k0;
    let mut value: i64 = 0;
    let mut skipped = 0;

    for item in items {
        match *item {
            Item::ZeroGroup => {
                k -= 4;
                if k < 0 {
                    return None;
                }
                skipped = 0;
            }
            Item::Digit { place, digit } => {
                while k >= 0 && token_for_power(k) != place {
                    k -= 1;
                    skipped += 1;
                    if skipped >= 4 {
                        return None;
                    }
                }
                if k < 0 {
                    return None;
                }

                let scale = 10i64.checked_pow(u32::try_from(k).ok()?)?;
                value = value.checked_add(i64::from(digit).checked_mul(scale)?)?;

                k -= 1;
                skipped += 1;
                if skipped >= 4 {
                    skipped = 0;
                }
            }
        }
    }

    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Spells `n` as a laugh numeral. Only magnitudes 1..=9999 have a single
    /// unambiguous spelling without zero groups.
    fn encode_laugh(n: i64) -> Option<String> {
        let magnitude = n.checked_abs()?;
        if !(1..=9999).contains(&magnitude) {
            return None;
        }

        let mut out = String::new();
        if n < 0 {
            out.push_str(NEGATIVE_PREFIX);
        }

        let digits = magnitude.to_string();
        let len = digits.len();
        for (i, c) in digits.chars().enumerate() {
            let d = c.to_digit(10)? as usize;
            let place = PLACES[(len - 1 - i) % 4];
            match d {
                0 => {}
                1..=5 => out.extend(std::iter::repeat_n(place, d)),
                _ => {
                    out.extend(FIVE_PREFIX);
                    out.extend(std::iter::repeat_n(place, d - 5));
                }
            }
        }
        Some(out)
    }

    #[test]
    fn test_parse_laugh() {
        let test_cases = vec![
            ("훠", Some(1)),
            ("훳", Some(10)),
            ("허", Some(100)),
            ("허허", Some(200)),
            ("훠러훳훳훠훠", Some(72)),
            ("헛헛훳", Some(2010)),
            ("훠허", Some(10100)),
            ("훠헛", Some(11000)),
            ("훳헛", Some(101000)),
            ("훳찢훠", Some(100001)),
            ("헛찢훠", Some(10000001)),
            ("훠찢", Some(100000000)),
            ("뭐꼬훳", Some(-10)),
            ("찢", None),
            ("훠러", None),
            ("뭐꼬", None),
            ("훠훠훠훠훠훠", None),
            ("훠러훠훠훠훠훠", None),
            ("가나", None),
            ("", None),
        ];

        for (src, expected) in test_cases {
            assert_eq!(parse_laugh(src), expected, "parsing {src:?}");
        }
    }

    #[test]
    fn test_parse_number_prefers_decimal() {
        assert_eq!(parse_number("72"), Some(72));
        assert_eq!(parse_number(" -3 "), Some(-3));
        assert_eq!(parse_number("허훠"), Some(101));
        assert_eq!(parse_number("7a"), None);
    }

    #[test]
    fn test_encode_then_parse_agrees() {
        for n in (1..=9999).step_by(7).chain([10, 100, 1000, 9999]) {
            let spelled = encode_laugh(n).expect("in range");
            assert_eq!(parse_laugh(&spelled), Some(n), "{n} spelled {spelled}");
        }
        assert_eq!(encode_laugh(-44), Some("뭐꼬훳훳훳훳훠훠훠훠".into()));
        assert_eq!(encode_laugh(0), None);
        assert_eq!(encode_laugh(10_000), None);
    }
}
