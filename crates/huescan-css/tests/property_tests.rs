//! Property tests for color detection, normalization and ordering.

// quickcheck hands generated inputs over by value.
#![allow(clippy::needless_pass_by_value)]

use std::cmp::Ordering;

use huescan_css::color::detect_format;
use huescan_css::rank::compare_hsla;
use huescan_css::{CanonicalColor, ColorFormat, Hsla, check_color};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

const HEX_DIGITS: &[u8] = b"0123456789abcdefABCDEF";

/// `#` followed by `len` hex digits picked by `seed`.
fn hex_token(seed: &[u8], len: usize) -> String {
    let digits: String = (0..len)
        .map(|i| {
            let pick = seed.get(i).copied().unwrap_or(0);
            char::from(HEX_DIGITS[usize::from(pick) % HEX_DIGITS.len()])
        })
        .collect();
    format!("#{digits}")
}

fn numeric(token: &str) -> Option<Hsla> {
    match check_color(token).ok()?.color {
        CanonicalColor::Numeric(hsla) => Some(hsla),
        CanonicalColor::Keyword(_) => None,
    }
}

#[quickcheck]
fn prop_three_and_six_digits_are_hex(seed: Vec<u8>, long: bool) -> bool {
    let token = hex_token(&seed, if long { 6 } else { 3 });
    detect_format(&token) == Some(ColorFormat::Hex) && check_color(&token).is_ok()
}

#[quickcheck]
fn prop_four_and_eight_digits_are_hexa(seed: Vec<u8>, long: bool) -> bool {
    let token = hex_token(&seed, if long { 8 } else { 4 });
    detect_format(&token) == Some(ColorFormat::Hexa) && check_color(&token).is_ok()
}

#[quickcheck]
fn prop_short_hex_matches_doubled_digits(seed: Vec<u8>) -> bool {
    let short = hex_token(&seed, 3);
    let long: String = short.chars().flat_map(|c| [c, c]).skip(1).collect();
    check_color(&short).map(|p| p.color.key()) == check_color(&long).map(|p| p.color.key())
}

#[quickcheck]
fn prop_hex_and_rgb_share_a_key(r: u8, g: u8, b: u8) -> bool {
    let hex = check_color(&format!("#{r:02x}{g:02x}{b:02x}"));
    let rgb = check_color(&format!("rgb({r}, {g}, {b})"));
    match (hex, rgb) {
        (Ok(hex), Ok(rgb)) => hex.color.key() == rgb.color.key(),
        _ => false,
    }
}

#[quickcheck]
fn prop_rgb_hue_stays_on_the_wheel(r: u8, g: u8, b: u8, alpha: u8) -> bool {
    let token = format!("rgba({r}, {g}, {b}, {}%)", alpha % 101);
    numeric(&token).is_some_and(|hsla| (0.0..360.0).contains(&hsla.h))
}

#[quickcheck]
fn prop_hsl_hue_wraps_onto_the_wheel(hue: i32, s: u8, l: u8) -> TestResult {
    let token = format!("hsl({hue}, {}%, {}%)", s % 101, l % 101);
    let Some(hsla) = numeric(&token) else {
        return TestResult::failed();
    };
    TestResult::from_bool((0.0..360.0).contains(&hsla.h))
}

type Channels = (f64, f64, f64, Option<f64>);

fn from_channels((h, s, l, a): Channels) -> Hsla {
    Hsla { h, s, l, a }
}

#[quickcheck]
fn prop_compare_hsla_is_antisymmetric(a: Channels, b: Channels) -> bool {
    let (a, b) = (from_channels(a), from_channels(b));
    compare_hsla(&a, &b) == compare_hsla(&b, &a).reverse()
}

#[quickcheck]
fn prop_compare_hsla_is_reflexive(h: u16, s: u8, l: u8, a: Option<u8>) -> bool {
    let color = Hsla {
        h: f64::from(h % 360),
        s: f64::from(s % 101),
        l: f64::from(l % 101),
        a: a.map(|a| f64::from(a % 11) / 10.0),
    };
    compare_hsla(&color, &color) == Ordering::Equal
}
