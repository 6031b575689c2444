//! Family preference lists for the generic families.

use fonts_config_fonts::Collection;
use fonts_config_sysconfig::Options;

use super::{SUFFIX, escape, preamble};
use crate::paths::Mode;

/// Keep the part of a family name before the first comma.
pub fn fix_family_name(name: &str) -> &str {
    name.split(',').next().unwrap_or(name).trim()
}

/// Installed families from a colon separated preference list, in order.
pub fn installed_families(list: &str, collection: &Collection) -> Vec<String> {
    let names: Vec<&str> = list
        .split(':')
        .map(fix_family_name)
        .filter(|name| !name.is_empty())
        .collect();
    let installed = collection.filter_name_list(&names);
    for name in names.iter().filter(|n| !installed.iter().any(|i| i == *n)) {
        log::debug!("Preferred family '{}' is not installed, skipping", name);
    }
    installed
}

/// Render the family preference configuration.
///
/// A system file lets a user's own file win: it marks patterns as not
/// user-preferred, includes the user file, and only applies its lists to
/// patterns the user file left alone.
pub fn render(options: &Options, collection: &Collection, mode: Mode) -> String {
    let mut out = preamble(mode);
    match mode {
        Mode::User => out.push_str(
            "\t<match target=\"pattern\">\n\t\t<edit name=\"user_preference_list\" mode=\"assign\">\n\
             \t\t\t<bool>true</bool>\n\t\t</edit>\n\t</match>\n",
        ),
        Mode::System => out.push_str(
            "\t<!-- Let user override here defined system setting. -->\n\
             \t<match target=\"pattern\">\n\t\t<edit name=\"user_preference_list\" mode=\"assign\">\n\
             \t\t\t<bool>false</bool>\n\t\t</edit>\n\t</match>\n\
             \t<include ignore_missing=\"yes\" prefix=\"xdg\">fontconfig/family-prefer.conf</include>\n",
        ),
    }
    out.push('\n');

    let lists = [
        ("sans-serif", options.prefer_sans_families.as_str()),
        ("serif", options.prefer_serif_families.as_str()),
        ("monospace", options.prefer_mono_families.as_str()),
    ];
    for (generic, list) in lists {
        let families = installed_families(list, collection);
        if families.is_empty() {
            continue;
        }
        log::info!(
            "{} {} families: {}",
            if options.force_family_preference_lists {
                "Strongly preferred"
            } else {
                "Preferred"
            },
            generic,
            families.join(", ")
        );
        out.push_str(&render_list(
            generic,
            &families,
            options.force_family_preference_lists,
            mode,
        ));
    }
    out.push_str(SUFFIX);
    out
}

fn render_list(generic: &str, families: &[String], strong: bool, mode: Mode) -> String {
    let mut out = String::new();
    if strong {
        out.push_str("\t<match>\n");
        out.push_str(&format!(
            "\t\t<test name=\"family\"><string>{}</string></test>\n",
            generic
        ));
        out.push_str("\t\t<edit name=\"family\" mode=\"prepend_first\" binding=\"strong\">\n");
        for family in families {
            out.push_str(&format!("\t\t\t<string>{}</string>\n", escape(family)));
        }
        out.push_str("\t\t</edit>\n\t</match>\n");
    } else {
        out.push_str("\t<alias>\n");
        if mode == Mode::System {
            out.push_str("\t\t<test name=\"user_preference_list\"><bool>false</bool></test>\n");
        }
        out.push_str(&format!("\t\t<family>{}</family>\n\t\t<prefer>\n", generic));
        for family in families {
            out.push_str(&format!("\t\t\t<family>{}</family>\n", escape(family)));
        }
        out.push_str("\t\t</prefer>\n\t</alias>\n");
    }
    out
}
