//! Tests for parsing fontconfig tool output.

use fonts_config::fc::{is_display_font, parse_list_output, parse_scan_output};
use fonts_config_fonts::Font;

#[test]
fn test_list_output_rejects_non_display_files() {
    let output = "/usr/share/fonts/truetype/DejaVuSans.ttf\n\
                  /usr/share/fonts/misc/6x13.pcf.gz\n\
                  /usr/share/fonts/Type1/c0419bt_.pfb\n\
                  /usr/share/fonts/Type1/c0419bt_.afm\n\
                  /usr/share/fonts/truetype/fonts.dir\n\
                  /usr/share/fonts/truetype/fonts.scale\n\
                  /usr/share/fonts/misc/ter-u12n.otb\n\
                  \n\
                  /usr/share/fonts/truetype/DejaVuSans.ttf\n\
                  /usr/share/fonts/opentype/NotoColorEmoji.ttf\n";
    assert_eq!(
        parse_list_output(output),
        vec![
            "/usr/share/fonts/truetype/DejaVuSans.ttf",
            "/usr/share/fonts/opentype/NotoColorEmoji.ttf",
        ]
    );
}

#[test]
fn test_is_display_font() {
    assert!(is_display_font("/f/NotoSans-Regular.otf"));
    assert!(is_display_font("/f/wqy-zenhei.ttc"));
    assert!(!is_display_font("/f/fonts.alias"));
    assert!(!is_display_font("/f/encodings.dir"));
    assert!(!is_display_font(""));
}

#[test]
fn test_scan_output_single_face() {
    let output = "DejaVu Sans\ten|de|fr\t100\t80\t0\t0\tTrue\t20-7e a0-17f\n";
    let records = parse_scan_output(output);
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.aliases, vec!["DejaVu Sans"]);
    assert_eq!(r.languages, vec!["en", "de", "fr"]);
    assert_eq!((r.width, r.weight, r.slant, r.spacing), (100, 80, 0, 0));
    assert!(r.outline);
    assert_eq!(r.raw_charset, "20-7e a0-17f");
}

#[test]
fn test_scan_output_collection_faces() {
    let output = "WenQuanYi Zen Hei,文泉驿正黑\tzh-cn|zh-tw\t100\t80\t0\t0\tTrue\t20-7e\n\
                  WenQuanYi Zen Hei Mono,文泉驿等宽正黑\tzh-cn|zh-tw\t100\t80\t0\t100\tTrue\t20-7e\n\
                  \n";
    let records = parse_scan_output(output);
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].aliases, vec!["WenQuanYi Zen Hei Mono", "文泉驿等宽正黑"]);
    assert_eq!(records[1].spacing, 100);
}

#[test]
fn test_scan_output_missing_fields_default() {
    let records = parse_scan_output("Bitmap Font\t\t\t\t\t\tFalse\n");
    assert_eq!(records.len(), 1);
    assert!(records[0].languages.is_empty());
    assert_eq!(records[0].weight, 0);
    assert!(!records[0].outline);
    assert!(records[0].raw_charset.is_empty());
}

#[test]
fn test_scan_record_becomes_emoji_font() {
    let output = "Noto Color Emoji\tund-zsye\t100\t80\t0\t0\tTrue\t0 23 2a 30-39 a9 ae 1f600-1f64f\n";
    let record = parse_scan_output(output).remove(0);
    let font = Font::from_record("/f/NotoColorEmoji.ttf", record);
    assert!(font.is_emoji());
    assert_eq!(font.charset.to_string(), "0 23 2a 30..39 a9 ae 1f600..1f64f");
}
