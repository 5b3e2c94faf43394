//! Integration tests for the per-run aggregator.

use std::path::Path;

use huescan_css::{Aggregator, Report, SearchMode, Swatch, extract_file};

#[test]
fn test_malformed_token_does_not_abort_file() {
    let extraction = extract_file(
        SearchMode::Colors,
        Path::new("a.css"),
        ".a { color: #zzz; }\n.b { color: #fafafa; }\n.c { color: rgb(1, 2, 3); }",
    );
    assert_eq!(extraction.rejected.len(), 1);
    assert_eq!(extraction.rejected[0].text, "#zzz");

    let mut agg = Aggregator::new(SearchMode::Colors);
    agg.add(extraction);
    let Report::Colors(report) = agg.finish(0) else {
        panic!("expected a colors report");
    };
    assert_eq!(report.colors.len(), 2);
}

#[test]
fn test_colors_aggregate_across_files() {
    let mut agg = Aggregator::new(SearchMode::Colors);
    agg.ingest(Path::new("a.css"), "a { color: #FFF; border: 1px solid #fff; }");
    agg.ingest(Path::new("b.scss"), "b { color: rgb(255, 255, 255); fill: currentColor; }");

    let Report::Colors(report) = agg.finish(0) else {
        panic!("expected a colors report");
    };
    assert_eq!(report.files_scanned, 2);
    assert_eq!(report.total, 2);

    let white = &report.colors[0];
    assert_eq!(white.display, "#FFF");
    assert_eq!(white.occurrences(), 3);
    assert_eq!(white.file_count(), 2);

    assert_eq!(report.keywords.len(), 1);
    assert_eq!(report.keywords[0].display, "currentColor");
}

#[test]
fn test_finish_filters_and_sorts() {
    let mut agg = Aggregator::new(SearchMode::Colors);
    agg.ingest(
        Path::new("a.css"),
        "a { color: #00f; color: #00f; color: #00f; color: #f00; color: #f00; color: #f00; color: #0f0; }",
    );

    let Report::Colors(report) = agg.finish(3) else {
        panic!("expected a colors report");
    };
    let shown: Vec<&str> = report.colors.iter().map(|c| c.display.as_str()).collect();
    assert_eq!(shown, ["#F00", "#00F"]);
    assert_eq!(report.total, 3);
    assert_eq!(report.filtered_out, 1);
}

#[test]
fn test_variables_do_not_cross_files() {
    let mut agg = Aggregator::new(SearchMode::Variables);
    agg.ingest(Path::new("theme.less"), "@primary: #336699;");
    agg.ingest(Path::new("page.less"), "@link: @primary;\n@gap: 4px;");

    let Report::Variables(report) = agg.finish(0) else {
        panic!("expected a variables report");
    };
    assert_eq!(report.files.len(), 2);
    let page = &report.files[1];
    assert!(page.color_variables.is_empty());
    let others: Vec<&str> = page.other_values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(others, ["@link", "@gap"]);
}

#[test]
fn test_color_variables_are_sorted() {
    let mut agg = Aggregator::new(SearchMode::Variables);
    agg.ingest(Path::new("vars.scss"), "$blue: #00f;\n$red: #f00;\n$green: #0f0;");

    let Report::Variables(report) = agg.finish(0) else {
        panic!("expected a variables report");
    };
    let names: Vec<&str> = report.files[0]
        .color_variables
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(names, ["$red", "$green", "$blue"]);
}

#[test]
fn test_report_json_shape() {
    let mut agg = Aggregator::new(SearchMode::Variables);
    agg.ingest(Path::new("v.less"), "@a: #000;\n@b: fade(@a, 50%);");
    let json = serde_json::to_value(agg.finish(0)).unwrap();

    assert_eq!(json["mode"], "variables");
    let faded = &json["files"][0]["colorVariables"][0];
    assert_eq!(faded["name"], "@b");
    assert_eq!(faded["value"]["kind"], "colorReference");
    assert_eq!(faded["value"]["target"], "@a");
    assert_eq!(faded["value"]["color"]["a"], 0.5);
}

#[test]
fn test_split_selector_list_ids_are_not_colors() {
    let mut agg = Aggregator::new(SearchMode::Colors);
    agg.ingest(Path::new("a.css"), "#add,\n#bad {\n  margin: 0;\n}\n");

    let Report::Colors(report) = agg.finish(0) else {
        panic!("expected a colors report");
    };
    assert!(report.colors.is_empty());
    assert_eq!(report.total, 0);
}

#[test]
fn test_color_entries_serialize_in_camel_case() {
    let mut agg = Aggregator::new(SearchMode::Colors);
    agg.ingest(Path::new("a.css"), "a { color: #000; }");

    let json = serde_json::to_value(agg.finish(0)).unwrap();
    let entry = &json["colors"][0];
    assert_eq!(entry["isDark"], true);
    assert_eq!(entry["display"], "#000");
    assert!(entry.get("is_dark").is_none());
}
