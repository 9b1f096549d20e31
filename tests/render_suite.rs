use std::path::Path;

use chart_svg_renderer::{
    ChartKind, ChartSpec, Dataset, RenderOptions, ThemeRegistry, render_chart,
    render_chart_by_name,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(rename = "type")]
    chart_type: String,
    theme: Option<String>,
    options: Option<RenderOptions>,
    #[serde(flatten)]
    spec: ChartSpec,
}

fn load_fixture(name: &str) -> Fixture {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    serde_json::from_str(&input).expect("fixture parse failed")
}

fn render_fixture(fixture: &Fixture) -> String {
    render_chart_by_name(
        &fixture.spec,
        &fixture.chart_type,
        fixture.theme.as_deref().unwrap_or("default"),
        &fixture.options.clone().unwrap_or_default(),
    )
}

fn count(svg: &str, class: &str) -> usize {
    svg.matches(&format!("class=\"{class}\"")).count()
}

/// Text content of every `<text>` element carrying `class`.
fn texts_with_class(svg: &str, class: &str) -> Vec<String> {
    let marker = format!("class=\"{class}\"");
    svg.match_indices(&marker)
        .filter_map(|(idx, _)| {
            let rest = &svg[idx..];
            let start = rest.find('>')? + 1;
            let end = rest.find("</text>")?;
            Some(rest[start..end].to_string())
        })
        .collect()
}

fn quarterly() -> ChartSpec {
    ChartSpec::new(["Q1", "Q2", "Q3", "Q4"])
        .with_dataset(Dataset::new("Revenue", vec![100.0, 200.0, 150.0, 300.0]))
}

fn assert_no_data_shapes(svg: &str) {
    assert_eq!(count(svg, "bar"), 0);
    assert_eq!(count(svg, "slice"), 0);
    assert_eq!(count(svg, "point"), 0);
    assert!(!svg.contains("<path"), "unexpected path in {svg}");
    assert!(!svg.contains("<rect"), "unexpected rect in {svg}");
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "area_stack.json",
        "bar_mixed_sign.json",
        "bar_quarterly.json",
        "doughnut_total.json",
        "line_trend.json",
        "pie_share.json",
        "scatter_samples.json",
    ];
    for name in candidates {
        let fixture = load_fixture(name);
        let svg = render_fixture(&fixture);
        let options = fixture.options.clone().unwrap_or_default();
        assert!(svg.starts_with("<svg"), "{name}: missing <svg");
        assert!(svg.ends_with("</svg>"), "{name}: missing </svg>");
        assert_eq!(svg.matches("<svg").count(), 1, "{name}: nested roots");
        assert!(
            svg.contains(&format!("viewBox=\"0 0 {} {}\"", options.width, options.height)),
            "{name}: wrong viewBox"
        );
        assert!(svg.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("style=\"font-family:"));
        assert!(!svg.contains("NaN") && !svg.contains("inf"), "{name}: bad number");
    }
}

#[test]
fn viewbox_tracks_requested_size_for_every_kind() {
    let options = RenderOptions::default().with_size(640, 480);
    for kind in ChartKind::ALL {
        let svg = render_chart(&quarterly(), kind, "default", &options);
        assert!(svg.contains("viewBox=\"0 0 640 480\""), "{kind}");
        assert_eq!(svg.matches("<svg").count(), 1, "{kind}");
    }
}

#[test]
fn bar_count_is_labels_times_datasets() {
    let fixture = load_fixture("bar_mixed_sign.json");
    let svg = render_fixture(&fixture);
    assert_eq!(count(&svg, "bar"), 3 * 2);
    assert!(svg.contains("fill=\"#E11D48\""));
    assert!(svg.contains("fill=\"#64748B\""));
    assert_eq!(
        texts_with_class(&svg, "value-label"),
        vec!["12.5", "-3", "-8", "6", "4", "9"]
    );
    assert_eq!(texts_with_class(&svg, "chart-title"), vec!["Net change"]);
}

#[test]
fn markers_per_dataset_match_label_count() {
    let line = render_fixture(&load_fixture("line_trend.json"));
    assert_eq!(count(&line, "point"), 5 * 2);
    assert_eq!(count(&line, "series-line"), 2);
    assert!(line.contains("stroke=\"#111827\" stroke-width=\"3.00\""));

    let scatter = render_fixture(&load_fixture("scatter_samples.json"));
    assert_eq!(count(&scatter, "point"), 6 * 2);
    assert!(!scatter.contains("<path"));
    assert!(scatter.contains("fill-opacity=\"0.70\""));
}

#[test]
fn pie_slices_and_percentages() {
    let fixture = load_fixture("pie_share.json");
    let svg = render_fixture(&fixture);
    assert_eq!(count(&svg, "slice"), 4);
    let labels = texts_with_class(&svg, "value-label");
    assert_eq!(labels, vec!["13.3%", "26.7%", "20.0%", "40.0%"]);
    let sum: f64 = labels
        .iter()
        .map(|l| l.trim_end_matches('%').parse::<f64>().unwrap())
        .sum();
    assert!((sum - 100.0).abs() < 0.2, "percentages sum to {sum}");
    // vertical legend with one entry per category
    assert_eq!(texts_with_class(&svg, "legend-label"), vec!["Q1", "Q2", "Q3", "Q4"]);
}

#[test]
fn doughnut_center_shows_total() {
    let svg = render_fixture(&load_fixture("doughnut_total.json"));
    assert_eq!(count(&svg, "slice"), 2);
    assert_eq!(texts_with_class(&svg, "center-label"), vec!["100"]);
    assert!(svg.contains("fill=\"#111827\""), "dark background");
}

#[test]
fn pie_uses_only_first_dataset() {
    let spec = quarterly().with_dataset(Dataset::new("Ignored", vec![1.0; 7]));
    let svg = render_chart(&spec, ChartKind::Doughnut, "default", &RenderOptions::default());
    assert_eq!(count(&svg, "slice"), 4);
    assert_eq!(texts_with_class(&svg, "center-label"), vec!["750"]);
}

#[test]
fn zero_total_pie_renders_zero_percent() {
    let spec = ChartSpec::new(["a", "b", "c"]).with_dataset(Dataset::new("z", vec![0.0; 3]));
    let options = RenderOptions::default().with_values(true);
    let svg = render_chart(&spec, ChartKind::Pie, "default", &options);
    assert_eq!(count(&svg, "slice"), 3);
    assert_eq!(texts_with_class(&svg, "value-label"), vec!["0.0%"; 3]);
    assert!(!svg.contains("NaN"));
}

#[test]
fn flat_data_maps_to_baseline() {
    let spec = ChartSpec::new(["a", "b"]).with_dataset(Dataset::new("flat", vec![0.0, 0.0]));
    for kind in [ChartKind::Bar, ChartKind::Line, ChartKind::Area, ChartKind::Scatter] {
        let svg = render_chart(&spec, kind, "default", &RenderOptions::default());
        assert!(!svg.contains("NaN") && !svg.contains("inf"), "{kind}");
    }
}

#[test]
fn data_quality_errors_render_diagnostics() {
    let options = RenderOptions::default();

    let svg = render_fixture(&load_fixture("empty_labels.json"));
    assert!(svg.contains("No labels provided"));
    assert_no_data_shapes(&svg);

    let no_datasets = ChartSpec::new(["a", "b"]);
    for kind in ChartKind::ALL {
        let svg = render_chart(&no_datasets, kind, "default", &options);
        assert!(svg.contains("No datasets provided"), "{kind}");
        assert_no_data_shapes(&svg);
    }

    let svg = render_chart_by_name(&quarterly(), "waterfall", "default", &options);
    assert!(svg.contains("Unsupported chart type: waterfall"));
    assert_no_data_shapes(&svg);

    let mismatch = quarterly().with_dataset(Dataset::new("short", vec![1.0]));
    let svg = render_chart(&mismatch, ChartKind::Line, "default", &options);
    assert!(svg.contains("Dataset &quot;short&quot; has 1 values but 4 labels were provided"));
    assert_no_data_shapes(&svg);
}

#[test]
fn caller_text_is_escaped() {
    let spec = ChartSpec::new(["<script>", "Tom & Jerry"])
        .with_dataset(Dataset::new("\"quoted\" <b>", vec![1.0, 2.0]));
    let options = RenderOptions::default()
        .with_title("<script>alert('x')</script>")
        .with_values(true);
    for kind in ChartKind::ALL {
        let svg = render_chart(&spec, kind, "default", &options);
        assert!(!svg.contains("<script>"), "{kind}: unescaped label");
        assert!(!svg.contains("<b>"), "{kind}: unescaped dataset name");
        assert!(svg.contains("&lt;script&gt;"), "{kind}");
        assert!(svg.contains("Tom &amp; Jerry"), "{kind}");
    }
    let diagnostic = render_chart_by_name(&spec, "<script>", "default", &options);
    assert!(!diagnostic.contains("<script>"));
}

#[test]
fn scenario_corporate_quarterly_bars() {
    let svg = render_chart(&quarterly(), ChartKind::Bar, "corporate", &RenderOptions::default());
    assert_eq!(count(&svg, "bar"), 4);
    assert_eq!(texts_with_class(&svg, "axis-label"), vec!["Q1", "Q2", "Q3", "Q4"]);
    let first = &ThemeRegistry::builtin().colors_for("corporate")[0];
    let bar_fill = format!("fill=\"{first}\"/>");
    let bars: Vec<&str> = svg.split("class=\"bar\"").skip(1).collect();
    assert!(bars.iter().all(|bar| bar.contains(&bar_fill)));
    assert_eq!(texts_with_class(&svg, "legend-label"), vec!["Revenue"]);
}

#[test]
fn scenario_empty_labels_bar() {
    let spec = ChartSpec::new(Vec::<String>::new()).with_dataset(Dataset::new("x", vec![]));
    let svg = render_chart(&spec, ChartKind::Bar, "corporate", &RenderOptions::default());
    assert!(svg.contains("No labels provided"));
    assert_eq!(count(&svg, "bar"), 0);
}

#[test]
fn legend_and_grid_can_be_hidden() {
    let options = RenderOptions::default().with_legend(false).with_grid(false);
    let svg = render_chart(&quarterly(), ChartKind::Line, "default", &options);
    assert_eq!(count(&svg, "legend"), 0);
    assert_eq!(count(&svg, "grid-line"), 0);
    assert_eq!(count(&svg, "point"), 4);
}

#[test]
fn unknown_theme_uses_default_palette() {
    let a = render_chart(&quarterly(), ChartKind::Pie, "nope", &RenderOptions::default());
    let b = render_chart(&quarterly(), ChartKind::Pie, "default", &RenderOptions::default());
    assert_eq!(a, b);
}

#[test]
fn tiny_canvas_still_renders_every_kind() {
    let spec = quarterly().with_dataset(Dataset::new("Cost", vec![-40.0, 80.0, 20.0, 10.0]));
    let options = RenderOptions::default()
        .with_size(50, 50)
        .with_title("Tiny")
        .with_values(true);
    for kind in ChartKind::ALL {
        let svg = render_chart(&spec, kind, "default", &options);
        assert_eq!(svg.matches("<svg").count(), 1, "{kind}");
        assert!(svg.contains("viewBox=\"0 0 50 50\""), "{kind}");
        assert!(!svg.contains("chart-error"), "{kind}");
        assert!(!svg.contains("NaN") && !svg.contains("inf"), "{kind}");
    }
}

#[test]
fn overflowing_range_renders_diagnostic() {
    let spec = ChartSpec::new(["a", "b"])
        .with_dataset(Dataset::new("huge", vec![f64::MAX, -f64::MAX]));
    let options = RenderOptions::default().with_values(true);
    for kind in ChartKind::ALL {
        let svg = render_chart(&spec, kind, "default", &options);
        assert!(svg.contains("Values span a range too large to plot"), "{kind}");
        assert!(!svg.contains("NaN") && !svg.contains("inf"), "{kind}");
        assert_no_data_shapes(&svg);
    }
}

#[test]
fn doughnut_center_counts_negative_values() {
    let spec = ChartSpec::new(["loss", "gain"]).with_dataset(Dataset::new("net", vec![-5.0, 10.0]));
    let svg = render_chart(&spec, ChartKind::Doughnut, "default", &RenderOptions::default());
    assert_eq!(texts_with_class(&svg, "center-label"), vec!["5"]);
}

#[test]
fn concurrent_renders_are_identical() {
    let spec = quarterly();
    let options = RenderOptions::default().with_values(true);
    let expected: Vec<String> = ChartKind::ALL
        .iter()
        .map(|&kind| render_chart(&spec, kind, "modern", &options))
        .collect();
    let (spec, options) = (&spec, &options);
    std::thread::scope(|scope| {
        let handles: Vec<_> = ChartKind::ALL
            .iter()
            .map(|&kind| scope.spawn(move || render_chart(spec, kind, "modern", options)))
            .collect();
        for (handle, expected) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}
