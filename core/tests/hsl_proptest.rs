//! Hex to HSL conversion checked against csscolorparser's HSL to RGB.

use csscolorparser::Color;
use design_tokens_core::color::HslTriple;
use proptest::prelude::*;

proptest! {
    #[test]
    fn hsl_round_trips_to_rgb(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
        let hsl = HslTriple::parse(&format!("#{r:02x}{g:02x}{b:02x}"));
        prop_assert!((0.0..360.0).contains(&hsl.h));
        prop_assert!((0.0..=100.0).contains(&hsl.s));
        prop_assert!((0.0..=100.0).contains(&hsl.l));

        let back = Color::from_hsla(hsl.h, hsl.s / 100.0, hsl.l / 100.0, 1.0);
        for (original, converted) in [(r, back.r), (g, back.g), (b, back.b)] {
            let diff = (original as f64 - converted * 255.0).abs();
            prop_assert!(diff <= 3.0, "#{r:02x}{g:02x}{b:02x} -> {} -> {diff}", hsl.to_css());
        }
    }

    #[test]
    fn short_hex_matches_long_hex(r in 0u8..16, g in 0u8..16, b in 0u8..16) {
        let short = HslTriple::parse(&format!("#{r:x}{g:x}{b:x}"));
        let long = HslTriple::parse(&format!("#{r:x}{r:x}{g:x}{g:x}{b:x}{b:x}"));
        prop_assert_eq!(short, long);
    }
}
