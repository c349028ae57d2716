use chumsky::{
    error::Simple,
    primitive::{
        filter,
        filter_map,
    },
    Parser,
};

/// Parses whitespace-separated two-hexdigit bytes into the raw pattern.
#[must_use]
pub fn hex_pattern() -> impl Parser<char, Vec<u8>, Error = Simple<char>> {
    let whitespace = filter(|c: &char| c.is_whitespace()).repeated();
    let byte = filter_map(|span, c: char| {
        if c.is_ascii_hexdigit() {
            Ok(c as u8)
        } else {
            Err(Simple::custom(span, format!("'{c}' is not a hexdigit")))
        }
    })
    .repeated()
    .exactly(2)
    .map(|digits| {
        let digits = String::from_utf8(digits).unwrap();
        u8::from_str_radix(&digits, 16).unwrap()
    });

    byte.separated_by(whitespace.at_least(1))
        .collect()
        .padded_by(whitespace)
}
