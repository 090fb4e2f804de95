//! Derived values: tax from selling price and display text shaping.
//!
//! Everything here is pure. Tax is never stored independently of the selling price
//! it was computed from; callers recompute it whenever that price changes.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Flat tax rate applied to the selling price.
pub const TAX_RATE: Decimal = dec!(0.05);

/// Tax owed on a selling price, rounded to two decimal places.
#[must_use]
pub fn tax_for(vendor_price: Decimal) -> Decimal {
    (vendor_price * TAX_RATE).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Upper-cases the first character of every word.
///
/// A word starts at any word character (ASCII letter, digit or underscore) that is
/// not preceded by another word character, so `"don't"` becomes `"Don'T"` and
/// `"half-plate"` becomes `"Half-Plate"`. All other characters are left untouched.
#[must_use]
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_word = false;
    for c in text.chars() {
        let is_word = is_word_char(c);
        if is_word && !prev_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}

/// Turns an upper-snake tag into a label: `"MAINS_GRAVY"` -> `"Mains Gravy"`.
#[must_use]
pub fn tag_label(tag: &str) -> String {
    tag.split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
