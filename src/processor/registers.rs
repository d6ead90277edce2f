//! Register names of the register machine.
//!
//! Nine named registers come first, then 49 patterned ones spelled
//! `A가B가` for every pair of base syllables. Index order is stable.

use std::collections::HashMap;
use std::sync::OnceLock;

pub const NAMED: [&str; 9] = [
    "멘똔",
    "배털",
    "정빵",
    "애플리프트",
    "깨무이",
    "혁두",
    "턱살개구리",
    "잉진이",
    "민짜이",
];

const BASE: [&str; 7] = ["멘", "빵", "깨", "털", "두", "덜", "애"];
const GLUE: &str = "가";

pub const COUNT: usize = NAMED.len() + BASE.len() * BASE.len();

/// Register selected when a run starts.
pub const DEFAULT: usize = 0;

fn index() -> &'static HashMap<String, usize> {
    static INDEX: OnceLock<HashMap<String, usize>> = OnceLock::new();
    INDEX.get_or_init(|| {
        let patterned = BASE
            .iter()
            .flat_map(|a| BASE.iter().map(move |b| format!("{a}{GLUE}{b}{GLUE}")));
        NAMED
            .iter()
            .map(|n| n.to_string())
            .chain(patterned)
            .enumerate()
            .map(|(i, name)| (name, i))
            .collect()
    })
}

/// Index of the register spelled exactly `name`.
pub fn lookup(name: &str) -> Option<usize> {
    index().get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_layout() {
        let test_cases = vec![
            ("멘똔", Some(0)),
            ("민짜이", Some(8)),
            ("멘가멘가", Some(9)),
            ("멘가빵가", Some(10)),
            ("애가애가", Some(COUNT - 1)),
            ("멘가", None),
            ("멘똔 ", None),
        ];

        for (name, expected) in test_cases {
            assert_eq!(lookup(name), expected, "register {name}");
        }
        assert_eq!(COUNT, 58);
    }
}
