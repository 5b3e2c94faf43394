//! Conversion of every supported syntax into [`CanonicalColor`].
//!
//! Parsing never fails here. A component that cannot be read becomes `NaN`
//! and the caller rejects the whole color through [`CanonicalColor::is_valid`].

use super::format::function_args;
use super::{AlphaUnits, CanonicalColor, ColorFormat, Hsla, Keyword};

/// Convert a token of a known format into its canonical value.
#[must_use]
pub fn normalize(token: &str, format: ColorFormat, units: AlphaUnits) -> CanonicalColor {
    let token = token.trim().to_ascii_lowercase();

    let mut hsla = match format {
        ColorFormat::Keyword => return CanonicalColor::Keyword(keyword(&token)),
        ColorFormat::Hsl | ColorFormat::Hsla => hsla_from_function(&token),
        ColorFormat::Rgb | ColorFormat::Rgba => rgba_from_function(&token),
        ColorFormat::Hex | ColorFormat::Hexa => rgba_from_hex(&token),
    };

    if units == AlphaUnits::Percent {
        hsla.a = hsla.a.map(|a| a / 100.0);
    }

    CanonicalColor::Numeric(hsla)
}

fn keyword(token: &str) -> Keyword {
    if token.contains("currentcolor") {
        Keyword::CurrentColor
    } else {
        Keyword::Transparent
    }
}

/// Read one numeric argument, ignoring a `%` or `deg` suffix.
fn number(arg: Option<&&str>) -> f64 {
    arg.map_or(f64::NAN, |arg| {
        arg.trim()
            .replacen('%', "", 1)
            .replacen("deg", "", 1)
            .parse()
            .unwrap_or(f64::NAN)
    })
}

fn hsla_from_function(token: &str) -> Hsla {
    let Some(args) = function_args(token) else {
        return Hsla::new(f64::NAN, f64::NAN, f64::NAN);
    };

    Hsla {
        h: wrap_hue(round_half_up(number(args.first()))),
        s: round_tenth(number(args.get(1))),
        l: round_tenth(number(args.get(2))),
        a: (args.len() > 3).then(|| number(args.get(3))),
    }
}

fn rgba_from_function(token: &str) -> Hsla {
    let Some(args) = function_args(token) else {
        return Hsla::new(f64::NAN, f64::NAN, f64::NAN);
    };

    let (r, g, b) = (
        number(args.first()),
        number(args.get(1)),
        number(args.get(2)),
    );
    let a = (args.len() > 3).then(|| number(args.get(3)));
    rgb_to_hsl(r, g, b, a)
}

/// [CSS Color 4 § 5.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
///
/// "The three-digit RGB notation (#RGB) is converted into six-digit form
/// (#RRGGBB) by replicating digits, not by adding zeros." The same holds for
/// the four-digit form with alpha.
fn rgba_from_hex(token: &str) -> Hsla {
    let digits: Vec<char> = token.trim_start_matches('#').chars().collect();
    let digits: Vec<char> = if digits.len() < 5 {
        digits.iter().flat_map(|&c| [c, c]).collect()
    } else {
        digits
    };

    let byte = |i: usize| -> f64 {
        digits
            .get(i..i + 2)
            .map(|pair| pair.iter().collect::<String>())
            .and_then(|pair| u8::from_str_radix(&pair, 16).ok())
            .map_or(f64::NAN, f64::from)
    };

    let alpha = (digits.len() > 6).then(|| round_tenth(byte(6) / 255.0));
    rgb_to_hsl(byte(0), byte(2), byte(4), alpha)
}

/// RGB channels (0-255) to canonical HSLA.
///
/// Hue comes from whichever channel is largest, in 60° wedges, rounded to a
/// whole degree and wrapped into `[0, 360)`. Saturation and lightness are
/// percentages rounded to one decimal. An achromatic color has hue 0.
#[must_use]
pub fn rgb_to_hsl(r: f64, g: f64, b: f64, a: Option<f64>) -> Hsla {
    // f64::max silently drops NaN, so bad channels must be caught first.
    if !(r.is_finite() && g.is_finite() && b.is_finite()) {
        return Hsla {
            h: f64::NAN,
            s: f64::NAN,
            l: f64::NAN,
            a,
        };
    }

    let (r, g, b) = (r / 255.0, g / 255.0, b / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let wedge = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta) % 6.0
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let l = (max + min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };

    Hsla {
        h: wrap_hue(round_half_up(wedge * 60.0)),
        s: round_tenth(s * 100.0),
        l: round_tenth(l * 100.0),
        a,
    }
}

/// [CSS Color 4 § 7.1 Converting HSL Colors to sRGB](https://www.w3.org/TR/css-color-4/#hsl-to-rgb)
///
/// - hue: angle in degrees (wraps)
/// - saturation: 0.0-1.0
/// - lightness: 0.0-1.0
#[must_use]
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        5 => (c, 0.0, x),
        _ => (0.0, 0.0, 0.0),
    };

    let m = l - c / 2.0;
    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    (to_u8(r1), to_u8(g1), to_u8(b1))
}

/// Round to the nearest integer, halves toward positive infinity.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// 360 and negative hues fold back into `[0, 360)`. `NaN` stays `NaN`.
fn wrap_hue(h: f64) -> f64 {
    h.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(token: &str, format: ColorFormat, units: AlphaUnits) -> Hsla {
        match normalize(token, format, units) {
            CanonicalColor::Numeric(hsla) => hsla,
            CanonicalColor::Keyword(k) => panic!("unexpected keyword {k}"),
        }
    }

    #[test]
    fn test_red_from_every_syntax() {
        let red = Hsla::new(0.0, 100.0, 50.0);
        assert_eq!(numeric("#FF0000", ColorFormat::Hex, AlphaUnits::Fraction), red);
        assert_eq!(numeric("#f00", ColorFormat::Hex, AlphaUnits::Fraction), red);
        assert_eq!(numeric("rgb(255,0,0)", ColorFormat::Rgb, AlphaUnits::Fraction), red);
        assert_eq!(numeric("hsl(0, 100%, 50%)", ColorFormat::Hsl, AlphaUnits::Fraction), red);
        assert_eq!(numeric("hsl(360deg 100% 50%)", ColorFormat::Hsl, AlphaUnits::Fraction), red);
    }

    #[test]
    fn test_negative_wedge_wraps() {
        // Red is max and green < blue, so the raw wedge is negative.
        let hsla = rgb_to_hsl(255.0, 0.0, 128.0, None);
        assert_eq!(hsla.h, 330.0);
        assert_eq!(hsla.s, 100.0);
        assert_eq!(hsla.l, 50.0);
    }

    #[test]
    fn test_achromatic_has_zero_hue() {
        let gray = rgb_to_hsl(128.0, 128.0, 128.0, None);
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert_eq!(gray.l, 50.2);
    }

    #[test]
    fn test_hex_alpha_rounds_to_tenth() {
        let hsla = numeric("#00000080", ColorFormat::Hexa, AlphaUnits::Fraction);
        assert_eq!(hsla.a, Some(0.5));
        let short = numeric("#0008", ColorFormat::Hexa, AlphaUnits::Fraction);
        assert_eq!(short.a, Some(0.5));
        let clear = numeric("#ffffff00", ColorFormat::Hexa, AlphaUnits::Fraction);
        assert_eq!(clear.a, Some(0.0));
    }

    #[test]
    fn test_percent_alpha_is_divided() {
        let hsla = numeric("hsla(240, 100%, 50%, 50%)", ColorFormat::Hsla, AlphaUnits::Percent);
        assert_eq!(hsla, Hsla::new(240.0, 100.0, 50.0).with_alpha(0.5));
    }

    #[test]
    fn test_bad_components_are_nan() {
        assert!(!numeric("#zzz", ColorFormat::Hex, AlphaUnits::Fraction).is_valid());
        assert!(!numeric("rgb(a,b,c)", ColorFormat::Rgb, AlphaUnits::Fraction).is_valid());
        assert!(!numeric("rgb(1,,3)", ColorFormat::Rgb, AlphaUnits::Fraction).is_valid());
        assert!(!numeric("hsl", ColorFormat::Hsl, AlphaUnits::Fraction).is_valid());
        assert!(!numeric("rgba(1,2,3,x)", ColorFormat::Rgba, AlphaUnits::Fraction).is_valid());
    }

    #[test]
    fn test_keyword_passes_through() {
        assert_eq!(
            normalize("Transparent", ColorFormat::Keyword, AlphaUnits::Fraction),
            CanonicalColor::Keyword(Keyword::Transparent)
        );
        assert_eq!(
            normalize("currentColor", ColorFormat::Keyword, AlphaUnits::Fraction),
            CanonicalColor::Keyword(Keyword::CurrentColor)
        );
    }

    #[test]
    fn test_hsl_to_rgb_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), (0, 0, 255));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), (255, 255, 255));
    }
}
