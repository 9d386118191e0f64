//! Mode listing parser tests.

use dctl::modes::{current_resolution, parse_mode_list};

#[test]
fn fully_flagged_line_renders_fixed_segment_order() {
    for line in [
        "20 - 1280x832 HiDPI 60Hz 10bpc Default Native",
        "20 - 1280x832 HiDPI 60Hz 10bpc Native Default",
    ] {
        let options = parse_mode_list(line);
        assert_eq!(options.len(), 1, "line: {line}");
        let opt = &options[0];
        assert_eq!(opt.title, "1280x832 | HiDPI | 60Hz | 10bpc | Default | Native");
        assert!(!opt.is_unsafe);
    }
}

#[test]
fn current_line_is_flagged_and_excluded_from_title() {
    let options = parse_mode_list("5 - 1920x1080 60Hz 8bpc Current");
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].value, "5");
    assert_eq!(options[0].title, "1920x1080 | 60Hz | 8bpc");
    assert!(options[0].is_current);
    assert!(!options[0].is_unsafe);
}

#[test]
fn unsafe_hidpi_line() {
    let options = parse_mode_list("7 - 2560x1440 HiDPI 30Hz 10bpc Unsafe");
    assert_eq!(options[0].title, "2560x1440 | HiDPI | 30Hz | 10bpc");
    assert!(options[0].is_unsafe);
}

#[test]
fn underspecified_line_contributes_nothing() {
    assert!(parse_mode_list("9 - 1920x1080").is_empty());
}

#[test]
fn realistic_listing_round_trip() {
    let listing = "\
1 - 3440x1440 50Hz 10bpc Default
2 - 3440x1440 HiDPI 50Hz 10bpc
3 - 2560x1080 60Hz 8bpc Current
4 - 5120x2160 30Hz 8bpc Unsafe Native

garbage line
5 - 1920x1080 60Hz 8bpc";

    let options = parse_mode_list(listing);
    assert_eq!(options.len(), 5);

    // Original order preserved, including the unsafe entry in place.
    let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, ["1", "2", "3", "4", "5"]);

    // At most one current option.
    assert_eq!(options.iter().filter(|o| o.is_current).count(), 1);
    assert_eq!(current_resolution(&options), Some("2560x1080"));

    assert_eq!(options[3].title, "5120x2160 | 30Hz | 8bpc | Native");
    assert!(options[3].is_unsafe);
}

#[test]
fn empty_blob_parses_to_empty_list() {
    assert!(parse_mode_list("").is_empty());
    assert!(parse_mode_list("\n\n").is_empty());
}
