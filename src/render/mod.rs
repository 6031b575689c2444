//! fontconfig XML generation.
//!
//! Each generated file is a [`preamble`], the rules, then [`SUFFIX`].

pub mod blacklist;
pub mod dual;
pub mod fpl;
pub mod noto;

use crate::paths::Mode;

/// Closes the document opened by [`preamble`].
pub const SUFFIX: &str = "</fontconfig>\n";

/// XML declaration, doctype and the "generated file" notice.
pub fn preamble(mode: Mode) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\"?>\n<!DOCTYPE fontconfig SYSTEM \"fonts.dtd\">\n\n\
         <!-- DO NOT EDIT; this file is generated by fonts-config. -->\n",
    );
    match mode {
        Mode::System => out.push_str(
            "<!-- Edit /etc/sysconfig/fonts-config and rerun fonts-config instead. -->\n",
        ),
        Mode::User => out.push_str(
            "<!-- Edit ~/.config/fontconfig/fonts-config and rerun fonts-config --user instead. -->\n",
        ),
    }
    out.push_str("\n<fontconfig>\n");
    out
}

/// Escape text for use in element content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_is_well_formed_with_suffix() {
        let doc = preamble(Mode::User) + SUFFIX;
        assert!(doc.starts_with("<?xml version=\"1.0\"?>\n"));
        assert!(doc.contains("fonts-config --user"));
        assert!(doc.ends_with("<fontconfig>\n</fontconfig>\n"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("Fira & <Mono>"), "Fira &amp; &lt;Mono&gt;");
    }
}
