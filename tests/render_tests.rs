//! Tests for the generated fontconfig files.

use fonts_config::Mode;
use fonts_config::render::{SUFFIX, blacklist, dual, fpl, noto};
use fonts_config_fonts::{BlacklistEntry, Collection, Font};
use fonts_config_sysconfig::Options;

fn entry(family: &str, charset: &str) -> BlacklistEntry {
    BlacklistEntry {
        family: family.to_string(),
        charset: charset.parse().unwrap(),
    }
}

fn installed(names: &[&str]) -> Collection {
    Collection::from_fonts(names.iter().enumerate().map(|(i, name)| Font {
        name: vec![name.to_string()],
        path: format!("/fonts/{i}.ttf"),
        ..Font::default()
    }))
}

fn face(path: &str, name: &str, lang: &[&str]) -> Font {
    Font {
        name: vec![name.to_string()],
        lang: lang.iter().map(|l| l.to_string()).collect(),
        path: path.to_string(),
        outline: true,
        ..Font::default()
    }
}

fn noto_fonts() -> Collection {
    Collection::from_fonts([
        face("/f/NotoSerifArmenian-Regular.ttf", "Noto Serif Armenian", &["hy"]),
        face("/f/NotoSans-Regular.ttf", "Noto Sans", &["en", "hy"]),
        face("/f/NotoSansArmenian-Regular.ttf", "Noto Sans Armenian", &["hy"]),
        face("/f/NotoSansCJK-Regular.ttc", "Noto Sans CJK JP", &["ja"]),
        face("/f/NotoColorEmoji.ttf", "Noto Color Emoji", &["und-zsye"]),
        face("/f/DejaVuSans.ttf", "DejaVu Sans", &["hy"]),
    ])
}

#[test]
fn test_blacklist_empty_renders_nothing() {
    assert!(blacklist::render(&[], Mode::System).is_none());
}

#[test]
fn test_blacklist_entry_xml() {
    let xml =
        blacklist::render(&[entry("DejaVu Sans", "1f600..1f60a 2764")], Mode::System).unwrap();
    let expected = "\t<match target=\"scan\">\n\
                    \t\t<test name=\"family\">\n\
                    \t\t\t<string>DejaVu Sans</string>\n\
                    \t\t</test>\n\
                    \t\t<edit name=\"charset\" mode=\"assign\">\n\
                    \t\t\t<minus>\n\
                    \t\t\t\t<name>charset</name>\n\
                    \t\t\t\t<charset>\n\
                    \t\t\t\t\t<int>0x2764</int>\n\
                    \t\t\t\t\t<range>\n\
                    \t\t\t\t\t\t<int>0x1f600</int>\n\
                    \t\t\t\t\t\t<int>0x1f60a</int>\n\
                    \t\t\t\t\t</range>\n\
                    \t\t\t\t</charset>\n\
                    \t\t\t</minus>\n\
                    \t\t</edit>\n\
                    \t</match>\n";
    assert!(xml.contains(expected), "unexpected blacklist XML:\n{xml}");
    assert!(xml.starts_with("<?xml"));
    assert!(xml.ends_with(SUFFIX));
}

#[test]
fn test_blacklist_one_block_per_entry_escaped() {
    let xml = blacklist::render(
        &[entry("A & B", "1f600"), entry("C", "1f601")],
        Mode::User,
    )
    .unwrap();
    assert_eq!(xml.matches("<match target=\"scan\">").count(), 2);
    assert!(xml.contains("<string>A &amp; B</string>"));
}

#[test]
fn test_fpl_weak_alias_in_system_mode() {
    let options = Options {
        prefer_sans_families: "Noto Sans:Missing Sans:DejaVu Sans".into(),
        ..Options::default()
    };
    let fonts = installed(&["Noto Sans", "DejaVu Sans"]);
    let xml = fpl::render(&options, &fonts, Mode::System);
    assert!(xml.contains("fontconfig/family-prefer.conf</include>"));
    assert!(xml.contains(
        "\t<alias>\n\
         \t\t<test name=\"user_preference_list\"><bool>false</bool></test>\n\
         \t\t<family>sans-serif</family>\n\
         \t\t<prefer>\n\
         \t\t\t<family>Noto Sans</family>\n\
         \t\t\t<family>DejaVu Sans</family>\n\
         \t\t</prefer>\n\
         \t</alias>\n"
    ));
    assert!(!xml.contains("Missing Sans"));
    assert!(!xml.contains("<family>serif</family>"));
}

#[test]
fn test_fpl_strong_binding_in_user_mode() {
    let options = Options {
        prefer_mono_families: "Fira Mono, Regular:DejaVu Sans Mono".into(),
        force_family_preference_lists: true,
        ..Options::default()
    };
    let fonts = installed(&["Fira Mono", "DejaVu Sans Mono"]);
    let xml = fpl::render(&options, &fonts, Mode::User);
    assert!(xml.contains("<bool>true</bool>"));
    assert!(!xml.contains("<include"));
    assert!(xml.contains(
        "\t<match>\n\
         \t\t<test name=\"family\"><string>monospace</string></test>\n\
         \t\t<edit name=\"family\" mode=\"prepend_first\" binding=\"strong\">\n\
         \t\t\t<string>Fira Mono</string>\n\
         \t\t\t<string>DejaVu Sans Mono</string>\n\
         \t\t</edit>\n\
         \t</match>\n"
    ));
}

#[test]
fn test_fpl_escapes_ampersand() {
    let options = Options {
        prefer_serif_families: "Foo & Bar".into(),
        ..Options::default()
    };
    let xml = fpl::render(&options, &installed(&["Foo & Bar Serif"]), Mode::User);
    assert!(xml.contains("<family>Foo &amp; Bar</family>"));
}

#[test]
fn test_noto_default_families() {
    let xml = noto::render_default_families(&noto_fonts(), Mode::System).unwrap();
    assert!(xml.contains(
        "\t<alias>\n\
         \t\t<family>Noto Serif Armenian</family>\n\
         \t\t<default>\n\
         \t\t\t<family>serif</family>\n\
         \t\t</default>\n\
         \t</alias>\n"
    ));
    assert!(xml.contains("<family>Noto Color Emoji</family>\n\t\t<default>\n\t\t\t<family>emoji</family>"));
    assert_eq!(xml.matches("<alias>").count(), 5);
    assert!(!xml.contains("DejaVu Sans"));
    let sans = xml.find("<family>Noto Sans</family>").unwrap();
    let armenian = xml.find("<family>Noto Sans Armenian</family>").unwrap();
    assert!(sans < armenian);
    assert!(xml.ends_with(SUFFIX));
}

#[test]
fn test_noto_lang_preferences_skip_multi_script_and_cjk() {
    let prefs = noto::lang_preferences(&noto_fonts());
    assert_eq!(prefs.keys().collect::<Vec<_>>(), vec!["hy"]);
    assert_eq!(prefs["hy"].sans, vec!["Noto Sans Armenian"]);
    assert_eq!(prefs["hy"].serif, vec!["Noto Serif Armenian"]);
    assert!(prefs["hy"].monospace.is_empty());

    let xml = noto::render_lang_preferences(&noto_fonts(), Mode::User).unwrap();
    assert!(xml.contains(
        "\t<match>\n\
         \t\t<test name=\"family\">\n\
         \t\t\t<string>sans-serif</string>\n\
         \t\t</test>\n\
         \t\t<test name=\"lang\">\n\
         \t\t\t<string>hy</string>\n\
         \t\t</test>\n\
         \t\t<edit name=\"family\" mode=\"prepend\">\n\
         \t\t\t<string>Noto Sans Armenian</string>\n\
         \t\t</edit>\n\
         \t</match>\n"
    ));
    assert_eq!(xml.matches("<match>").count(), 2);
    assert!(!xml.contains("monospace"));
}

#[test]
fn test_noto_without_noto_fonts_renders_nothing() {
    let fonts = installed(&["DejaVu Sans"]);
    assert!(noto::render_default_families(&fonts, Mode::System).is_none());
    assert!(noto::render_lang_preferences(&fonts, Mode::System).is_none());
}

#[test]
fn test_dual_spacing_for_cjk_fonts_only() {
    let mut dual_width = face("/f/NotoSansMonoCJK.ttc", "Noto Sans Mono CJK JP", &["ja", "en"]);
    dual_width.spacing = dual::SPACING_DUAL;
    let mut outline_mono = face("/f/mono.ttf", "Outline Mono", &["ja"]);
    outline_mono.spacing = 100;
    let mut bitmap_mono = face("/f/wqy.pcf", "WenQuanYi Bitmap", &["zh-cn"]);
    bitmap_mono.spacing = 100;
    bitmap_mono.outline = false;
    let mut latin = face("/f/dual.ttf", "Latin Dual", &["en"]);
    latin.spacing = dual::SPACING_DUAL;
    let fonts = Collection::from_fonts([dual_width, outline_mono, bitmap_mono, latin]);

    assert_eq!(
        dual::dual_spacing_families(&fonts).into_iter().collect::<Vec<_>>(),
        vec!["Noto Sans Mono CJK JP", "WenQuanYi Bitmap"]
    );
    let xml = dual::render(&fonts, Mode::System).unwrap();
    assert!(xml.contains(
        "\t<match target=\"font\">\n\
         \t\t<test name=\"family\" compare=\"contains\">\n\
         \t\t\t<string>WenQuanYi Bitmap</string>\n\
         \t\t</test>\n\
         \t\t<edit name=\"spacing\" mode=\"append\">\n\
         \t\t\t<const>proportional</const>\n\
         \t\t</edit>\n\
         \t\t<edit name=\"globaladvance\" mode=\"append\">\n\
         \t\t\t<bool>false</bool>\n\
         \t\t</edit>\n\
         \t</match>\n"
    ));
    assert_eq!(xml.matches("<match target=\"font\">").count(), 2);

    assert!(dual::render(&installed(&["DejaVu Sans"]), Mode::System).is_none());
}
