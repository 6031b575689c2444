//! The emoji glyph blacklist configuration.

use fonts_config_charset::Charset;
use fonts_config_fonts::BlacklistEntry;

use super::{SUFFIX, escape, preamble};
use crate::paths::Mode;

/// Render `entries`, or `None` when there is nothing to blacklist.
///
/// Each entry becomes a scan-time rule removing its codepoints from the
/// family's charset, so fontconfig never picks that family for them.
pub fn render(entries: &[BlacklistEntry], mode: Mode) -> Option<String> {
    if entries.is_empty() {
        return None;
    }
    let mut out = preamble(mode);
    out.push_str("\t<!-- Hide emoji glyphs from text fonts and text glyphs from emoji fonts. -->\n");
    for entry in entries {
        out.push_str(&render_entry(entry));
    }
    out.push_str(SUFFIX);
    Some(out)
}

fn render_entry(entry: &BlacklistEntry) -> String {
    let mut out = String::new();
    out.push_str("\t<match target=\"scan\">\n");
    out.push_str(&format!(
        "\t\t<test name=\"family\">\n\t\t\t<string>{}</string>\n\t\t</test>\n",
        escape(&entry.family)
    ));
    out.push_str("\t\t<edit name=\"charset\" mode=\"assign\">\n\t\t\t<minus>\n");
    out.push_str("\t\t\t\t<name>charset</name>\n");
    out.push_str(&render_charset(&entry.charset));
    out.push_str("\t\t\t</minus>\n\t\t</edit>\n\t</match>\n\n");
    out
}

/// A fontconfig `<charset>` element.
pub fn render_charset(charset: &Charset) -> String {
    let mut out = String::from("\t\t\t\t<charset>\n");
    for range in charset {
        if range.start() == range.end() {
            out.push_str(&format!("\t\t\t\t\t<int>0x{:x}</int>\n", range.start()));
        } else {
            out.push_str(&format!(
                "\t\t\t\t\t<range>\n\t\t\t\t\t\t<int>0x{:x}</int>\n\t\t\t\t\t\t<int>0x{:x}</int>\n\t\t\t\t\t</range>\n",
                range.start(),
                range.end()
            ));
        }
    }
    out.push_str("\t\t\t\t</charset>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_charset_ints_and_ranges() {
        let charset: Charset = "2764 1f600..1f601".parse().unwrap();
        assert_eq!(
            render_charset(&charset),
            "\t\t\t\t<charset>\n\
             \t\t\t\t\t<int>0x2764</int>\n\
             \t\t\t\t\t<range>\n\
             \t\t\t\t\t\t<int>0x1f600</int>\n\
             \t\t\t\t\t\t<int>0x1f601</int>\n\
             \t\t\t\t\t</range>\n\
             \t\t\t\t</charset>\n"
        );
    }
}
