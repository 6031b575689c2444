//! Proportional spacing for dual width CJK fonts.
//!
//! Many Asian fonts declare themselves monospace or dual width even though
//! their Latin glyphs are half the advance of their ideographs. Forcing a
//! global advance on them garbles text, so every such family gets
//! `spacing=proportional` and `globaladvance=false`.

use std::collections::BTreeSet;

use fonts_config_fonts::{Collection, Font};

use super::{SUFFIX, escape, preamble};
use crate::paths::Mode;

/// fontconfig's `FC_DUAL` spacing.
pub const SPACING_DUAL: i32 = 90;

const CJK_LANGS: &[&str] = &["ja", "ko", "zh-cn", "zh-sg", "zh-tw", "zh-mo", "zh-hk", "zh"];

/// Dual width fonts, plus monospace and charcell bitmap fonts.
fn needs_fix(font: &Font) -> bool {
    let spaced = font.spacing == SPACING_DUAL || (font.spacing > SPACING_DUAL && !font.outline);
    spaced && font.lang.iter().any(|l| CJK_LANGS.contains(&l.as_str()))
}

/// Families whose spacing is rewritten, sorted.
pub fn dual_spacing_families(collection: &Collection) -> BTreeSet<String> {
    collection
        .iter()
        .filter(|f| needs_fix(f))
        .flat_map(|f| f.name.iter().cloned())
        .collect()
}

/// Returns `None` when no installed font needs the fix.
pub fn render(collection: &Collection, mode: Mode) -> Option<String> {
    let families = dual_spacing_families(collection);
    if families.is_empty() {
        return None;
    }
    let mut out = preamble(mode);
    out.push_str("\t<!-- Use proportional spacing for dual width CJK fonts. -->\n");
    for family in &families {
        out.push_str("\t<match target=\"font\">\n");
        out.push_str(&format!(
            "\t\t<test name=\"family\" compare=\"contains\">\n\t\t\t<string>{}</string>\n\t\t</test>\n",
            escape(family)
        ));
        out.push_str(
            "\t\t<edit name=\"spacing\" mode=\"append\">\n\t\t\t<const>proportional</const>\n\t\t</edit>\n",
        );
        out.push_str(
            "\t\t<edit name=\"globaladvance\" mode=\"append\">\n\t\t\t<bool>false</bool>\n\t\t</edit>\n",
        );
        out.push_str("\t</match>\n\n");
    }
    out.push_str(SUFFIX);
    Some(out)
}
