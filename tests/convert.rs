//! End-to-end conversion: SVG text and layer descriptors through to payloads.

use svg_caret::{
    build_document, convert_layers, convert_svg, ConvertError, ConvertOptions, Element,
    LayerInput, PointD, Warning,
};

fn pts(coords: &[(f64, f64)]) -> Vec<PointD> {
    coords.iter().map(|&c| c.into()).collect()
}

fn csv_rows(payload: &str) -> Vec<Vec<&str>> {
    payload
        .split("\r\n")
        .filter(|l| !l.is_empty())
        .map(|l| l.split(',').collect())
        .collect()
}

fn cell_rows(payload: &str) -> Vec<Vec<&str>> {
    csv_rows(payload)
        .into_iter()
        .filter(|r| r.len() > 5 && r[5].starts_with("mdplot."))
        .collect()
}

fn triangle_and_square() -> Vec<LayerInput> {
    let triangle = Element::polygon(&pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)]))
        .with_fill(Some("#ED1C24"));
    let square = Element::polygon(&pts(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]))
        .with_stroke(Some("#000000"));
    vec![LayerInput::new("1 r/l", vec![triangle, square])]
}

#[test]
fn test_round_trip_single_layer() {
    let files = convert_layers(&triangle_and_square(), &ConvertOptions::default()).unwrap();

    let cells = cell_rows(&files.cells);
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0][0], "0");
    // Centroid (3.75, 2.5) against the box center (5, 5), y flipped.
    assert_eq!(cells[0][1], "-1.25");
    assert_eq!(cells[0][2], "2.5");
    assert_eq!(cells[0][3], "0.0");
    assert_eq!(cells[0][4], "0");
    assert_eq!(cells[0][5], "mdplot.red");
    assert_eq!(cells[0][14], "mdplot");

    let lines: Vec<&str> = files.contours.lines().collect();
    assert!(lines.contains(&"tag-number-of-contours 1"));
    let data = lines.iter().position(|l| *l == "tag-BEGIN-DATA").unwrap();
    assert_eq!(lines[data + 1], "0 5 0");
    assert_eq!(lines[data + 2], "-5.0 5.0");
    assert_eq!(lines[data + 3], "-5.0 -5.0");
    assert_eq!(lines[data + 4], "5.0 -5.0");
    assert_eq!(lines[data + 5], "5.0 5.0");
    assert_eq!(lines[data + 6], "-5.0 5.0");
    assert_eq!(lines.len(), data + 7);

    let legend: Vec<&str> = csv_rows(&files.colors)
        .into_iter()
        .filter(|r| r[0].starts_with("mdplot."))
        .map(|r| r[0])
        .collect();
    assert_eq!(
        legend,
        vec!["mdplot.red", "mdplot.green", "mdplot.blue", "mdplot.yellow"]
    );
    assert!(files.warnings.is_empty());
}

#[test]
fn test_svg_round_trip_matches_layer_input() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg"
        xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
      <g inkscape:label="1 r/l">
        <polygon fill="#ed1c24" points="0,0 10,0 5,10"/>
        <polygon stroke="#000000" fill="none" points="0,0 0,10 10,10 10,0"/>
      </g>
    </svg>"##;
    let from_svg = convert_svg(svg, &ConvertOptions::default()).unwrap();
    let from_layers = convert_layers(&triangle_and_square(), &ConvertOptions::default()).unwrap();
    assert_eq!(from_svg.contours, from_layers.contours);
    assert_eq!(from_svg.cells, from_layers.cells);
    assert_eq!(from_svg.colors, from_layers.colors);
}

#[test]
fn test_arc_aborts_whole_document() {
    let svg = r##"<svg>
      <g id="_x31__r_x2F_l">
        <polygon fill="#ed1c24" points="0,0 10,0 5,10"/>
        <path stroke="#000000" d="M0,0 A5,5 0 0 1 10,0"/>
      </g>
    </svg>"##;
    let err = convert_svg(svg, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedCommand { tag: 'A' }));
}

#[test]
fn test_layers_ordered_rows_then_descending_columns() {
    let marker = |x: f64, fill: &str| {
        Element::polygon(&pts(&[(x, 0.0), (x + 1.0, 0.0), (x + 1.0, 1.0), (x, 1.0)]))
            .with_fill(Some(fill))
    };
    let layers = vec![
        LayerInput::new("2 c/l", vec![marker(0.0, "#fff200")]),
        LayerInput::new("5 c/l", vec![marker(2.0, "#0000ff")]),
        LayerInput::new("3 r/l", vec![marker(4.0, "#ed1c24")]),
    ];
    let doc = build_document(&layers, &ConvertOptions::default()).unwrap();
    let labels: Vec<&str> = doc.layers().iter().map(|l| l.label()).collect();
    assert_eq!(labels, vec!["3 r/l", "5 c/l", "2 c/l"]);

    let files = convert_layers(&layers, &ConvertOptions::default().with_spacing(2.0)).unwrap();
    let cells = cell_rows(&files.cells);
    let by_depth: Vec<(&str, &str, &str)> =
        cells.iter().map(|r| (r[3], r[4], r[5])).collect();
    assert_eq!(
        by_depth,
        vec![
            ("0.0", "0", "mdplot.red"),
            ("2.0", "1", "mdplot.blue"),
            ("4.0", "2", "mdplot.yellow"),
        ]
    );
}

#[test]
fn test_empty_layer_keeps_depth_slot() {
    let square = Element::polygon(&pts(&[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0)]));
    let layers = vec![
        LayerInput::new("1 r/l", Vec::new()),
        LayerInput::new("2 r/l", vec![square]),
    ];
    let files = convert_layers(&layers, &ConvertOptions::default()).unwrap();
    assert!(files.contours.contains("\n0 5 1\n"));
}

#[test]
fn test_empty_document() {
    let files = convert_svg("<svg/>", &ConvertOptions::default()).unwrap();
    assert!(files.contours.contains("tag-number-of-contours 0\n"));
    assert!(cell_rows(&files.cells).is_empty());
    assert!(files.warnings.is_empty());
}

#[test]
fn test_warnings_collected() {
    let short_green = Element::polyline(&pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]))
        .with_stroke(Some("#00884b"));
    let layers = vec![LayerInput::new("Layer 7", vec![short_green])];
    let files = convert_layers(&layers, &ConvertOptions::default()).unwrap();
    assert_eq!(
        files.warnings,
        vec![
            Warning::UnparseableLayerLabel {
                label: "Layer 7".to_string()
            },
            Warning::AnomalousStrokeOnContour {
                layer: "Layer 7".to_string(),
                stroke: "#00884b".to_string()
            },
        ]
    );
    assert!(files.contours.contains("tag-number-of-contours 1\n"));
}

#[test]
fn test_dropped_path_contributes_nothing() {
    let svg = r##"<svg>
      <g id="1_r_x2F_l">
        <path fill="#313185" d="M100,100 L200,100 L200,200 Z"/>
        <polygon fill="#fff200" points="0,0 2,0 2,2 0,2"/>
      </g>
    </svg>"##;
    let files = convert_svg(svg, &ConvertOptions::default()).unwrap();
    let cells = cell_rows(&files.cells);
    assert_eq!(cells.len(), 1);
    // Bounds come from the yellow centroid alone.
    assert_eq!(cells[0][1], "0.0");
    assert_eq!(cells[0][2], "0.0");
    assert!(files.contours.contains("tag-number-of-contours 0\n"));
}

fn field(row: &[&str], i: usize) -> f64 {
    row[i].parse().unwrap()
}

#[test]
fn test_curved_blue_path_centroid_in_cells() {
    let svg = r##"<svg>
      <g id="1_r_x2F_l">
        <path fill="#00aeef" d="M0,0 C0,10 10,10 10,0 Z"/>
        <polygon fill="#fff200" points="  "/>
        <polygon fill="#fff200" points="0,0 6,0 0,6"/>
      </g>
    </svg>"##;
    let files = convert_svg(svg, &ConvertOptions::default()).unwrap();
    let cells = cell_rows(&files.cells);
    assert_eq!(cells.len(), 2);
    // Blue centroid (3.75, 3.0), yellow (1.5, 1.5): box center (2.625, 2.25).
    let blue = cells.iter().find(|r| r[5] == "mdplot.blue").unwrap();
    assert!((field(blue, 1) - 1.125).abs() < 1e-9);
    assert!((field(blue, 2) + 0.75).abs() < 1e-9);
    let yellow = cells.iter().find(|r| r[5] == "mdplot.yellow").unwrap();
    assert!((field(yellow, 1) + 1.125).abs() < 1e-9);
    assert!((field(yellow, 2) - 0.75).abs() < 1e-9);
    assert!(files.contours.contains("tag-number-of-contours 0\n"));
}
