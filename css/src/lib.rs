//! Themed stylesheets generated from the repository's token sources at
//! build time.

include!(concat!(env!("OUT_DIR"), "/stylesheets.rs"));

/// Stylesheet for a token set (`global`, `light`, ...).
pub fn stylesheet(name: &str) -> Option<&'static str> {
    STYLESHEETS
        .iter()
        .find(|(set, _)| *set == name)
        .map(|&(_, css)| css)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_set_is_embedded() {
        let names: Vec<_> = STYLESHEETS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["global", "light", "dark", "yellow"]);
        assert!(stylesheet("sepia").is_none());
    }

    #[test]
    fn global_is_scoped_to_root_without_typography() {
        let css = stylesheet("global").unwrap();
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --color-red-hsl: 0,100%,50%;\n  --color-red: hsl(var(--color-red-hsl));"));
        assert!(css.contains("  --font-size-xl: 2rem;"));
        assert!(css.contains("  --font-weight-medium: 500;"));
        assert!(!css.contains("--typography"));
    }

    #[test]
    fn themes_alias_the_global_palette() {
        let css = stylesheet("dark").unwrap();
        assert!(css.starts_with("[data-theme=\"dark\"] {\n"));
        assert!(css.contains("  --color-background-hsl: var(--color-gray-900);"));
        assert!(!css.contains("--color-white"));

        let light = stylesheet("light").unwrap();
        assert!(light.contains("  --typography-heading: var(--font-weight-bold);"));
    }
}
