use std::fmt::Write;

use super::catalog;
use super::palette::ThemePalette;

/// Render a `:root` block declaring every catalog token.
///
/// Colour tokens are emitted as bare HSL triples so site CSS can write
/// `hsl(var(--primary) / 0.5)`. Tokens missing from `palette` fall back to
/// the catalog default.
pub fn render_stylesheet(palette: &ThemePalette) -> String {
    let mut css = String::from(":root {\n");
    for variable in catalog::catalog() {
        let value = palette
            .get(variable.key)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(variable.default);
        let _ = writeln!(css, "  {}: {};", variable.css_property(), value.trim());
    }
    css.push_str("}\n");
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_every_token() {
        let css = render_stylesheet(&catalog::default_palette());
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --background: 0 0% 100%;\n"));
        assert!(css.contains("  --radius: 0.5rem;\n"));
        assert_eq!(css.matches(';').count(), catalog::catalog().len());
    }

    #[test]
    fn gaps_use_catalog_defaults() {
        let palette: ThemePalette =
            [("primary", "320 100% 55%")].into_iter().collect();
        let css = render_stylesheet(&palette);
        assert!(css.contains("--primary: 320 100% 55%;"));
        assert!(css.contains("--ring: 222.2 84% 4.9%;"));
    }
}
