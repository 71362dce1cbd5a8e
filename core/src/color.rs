use crate::value::format_number;

/// Hue, saturation and lightness as written into `--<name>-hsl`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslTriple {
    /// Whole degrees, 0..360.
    pub h: f64,
    /// Percent, one decimal.
    pub s: f64,
    /// Percent, one decimal.
    pub l: f64,
}
impl HslTriple {
    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        let cmin = r.min(g).min(b);
        let cmax = r.max(g).max(b);
        let delta = cmax - cmin;
        if [r, g, b].iter().any(|c| c.is_nan()) {
            return HslTriple {
                h: f64::NAN,
                s: f64::NAN,
                l: f64::NAN,
            };
        }

        let mut h = if delta == 0.0 {
            0.0
        } else if cmax == r {
            ((g - b) / delta) % 6.0
        } else if cmax == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        h = round_half_up(h * 60.0);
        if h < 0.0 {
            h += 360.0;
        }

        let l = (cmax + cmin) / 2.0;
        let s = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * l - 1.0).abs())
        };
        HslTriple {
            h,
            s: to_fixed_1(s * 100.0),
            l: to_fixed_1(l * 100.0),
        }
    }

    /// Converts a hex (`#rgb`, `#rrggbb`) or named CSS color.
    ///
    /// A short or long hex string with a bad digit poisons its channel with
    /// `NaN`; anything else that does not parse is treated as black.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(hex) = raw.strip_prefix('#') {
            let chars: Vec<String> = hex.chars().map(String::from).collect();
            let channels = match chars.len() {
                3 => Some([0, 1, 2].map(|i| chars[i].repeat(2))),
                6 => Some([0, 2, 4].map(|i| format!("{}{}", chars[i], chars[i + 1]))),
                _ => None,
            };
            return match channels {
                Some([r, g, b]) => Self::from_rgb(channel(&r), channel(&g), channel(&b)),
                None => Self::from_rgb(0.0, 0.0, 0.0),
            };
        }
        match csscolorparser::parse(raw) {
            Ok(color) => Self::from_rgb(color.r, color.g, color.b),
            Err(_) => Self::from_rgb(0.0, 0.0, 0.0),
        }
    }

    /// `H,S%,L%`
    pub fn to_css(&self) -> String {
        format!(
            "{},{}%,{}%",
            format_number(self.h),
            format_number(self.s),
            format_number(self.l)
        )
    }
}

fn channel(hex: &str) -> f64 {
    match u8::from_str_radix(hex, 16) {
        Ok(v) if hex.chars().all(|c| c.is_ascii_hexdigit()) => v as f64 / 255.0,
        _ => f64::NAN,
    }
}

fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// One decimal place, exact ties rounded upwards.
fn to_fixed_1(x: f64) -> f64 {
    let scaled = x * 10.0;
    let n = if (scaled - scaled.trunc()).abs() == 0.5 {
        scaled.ceil()
    } else {
        scaled.round()
    };
    n / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#FFFFFF", "0,0%,100%")]
    #[case("#000000", "0,0%,0%")]
    #[case("#FF0000", "0,100%,50%")]
    #[case("#00ff00", "120,100%,50%")]
    #[case("#0000FF", "240,100%,50%")]
    #[case("#fff", "0,0%,100%")]
    #[case("#808080", "0,0%,50.2%")]
    #[case("#ff00ff", "300,100%,50%")]
    #[case("#3b82f6", "217,91.2%,59.8%")]
    #[case("white", "0,0%,100%")]
    #[case("red", "0,100%,50%")]
    #[case("#abcd", "0,0%,0%")]
    #[case("not a color", "0,0%,0%")]
    #[case("#zzzzzz", "NaN,NaN%,NaN%")]
    fn converts(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(HslTriple::parse(raw).to_css(), expected);
    }

    #[test]
    fn negative_hue_wraps() {
        // magenta-ish red: max is r and g < b
        let hsl = HslTriple::parse("#ff0080");
        assert_eq!(hsl.h, 330.0);
    }
}
