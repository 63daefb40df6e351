//! Caret output payloads: contours, cell table and color legend.
//!
//! All three render from a `FrozenDocument` and never touch classification or
//! ordering again. The contour file is plain text; the two tables are
//! comma-separated with minimal quoting, `\r\n` row endings and every row
//! padded to its section width.

use std::fmt::Write as _;

use crate::caret::FrozenDocument;
use crate::color::legend;

/// Columns in the cell table.
pub const CELL_COLUMNS: usize = 27;

/// Columns in the color legend table.
pub const COLOR_COLUMNS: usize = 9;

/// Tag written in the class-name column of every cell row.
pub const CELL_SOURCE_TAG: &str = "mdplot";

const CONTOUR_HEADER: &[&str] = &[
    "BeginHeader",
    "Caret-Version 5.61",
    "date mer feb 3 18:29:18 2010",
    "encoding ASCII",
    "pubmed_id",
    "EndHeader",
    "tag-version 1",
];

const CELL_HEADER: &[&[&str]] = &[
    &["CSVF-FILE", "0"],
    &["csvf-section-start", "header", "2"],
    &["tag", "value"],
    &["Caret-Version", "5.65"],
    &["Date", "2012-02-06T15:25:58"],
    &["comment"],
    &["encoding", "COMMA_SEPARATED_VALUE_FILE"],
    &["pubmed_id"],
    &["csvf-section-end", "header"],
    &["csvf-section-start", "Cells", "27"],
    &[
        "Cell Number",
        "X",
        "Y",
        "Z",
        "Section",
        "Name",
        "Study Number",
        "Geography",
        "Area",
        "Size",
        "Statistic",
        "Comment",
        "Structure",
        "Class Name",
        "SuMS ID Number",
        "SuMS Repeat Number",
        "SuMS Parent Cell Base ID",
        "SuMS Version Number",
        "SuMS MSLID",
        "Attribute ID",
        "Study PubMed ID",
        "Study Table Number",
        "Study Table Subheader",
        "Study Figure Number",
        "Study Figure Panel",
        "Study Page Reference Number",
        "Study Page Reference Subheader",
    ],
];

const COLOR_HEADER: &[&[&str]] = &[
    &["CSVF-FILE", "0"],
    &["csvf-section-start", "header", "2"],
    &["tag", "value", "0"],
    &["Caret-Version", "5.616"],
    &["Date", "2011-02-16T15:57:38"],
    &["comment"],
    &["encoding", "COMMA_SEPARATED_VALUE_FILE"],
    &["pubmed_id", "COMMA_SEPARATED_VALUE_FILE"],
    &["csvf-section-end", "header"],
    &["csvf-section-start", "Colors", "9"],
    &[
        "Name",
        "Red",
        "Green",
        "Blue",
        "Alpha",
        "Point-Size",
        "Line-Size",
        "Symbol",
        "SuMSColorID",
    ],
];

// ============================================================================
// Number formatting
// ============================================================================

/// Shortest round-trip decimal, keeping a `.0` on integral values.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

// ============================================================================
// CSV rows
// ============================================================================

/// Row writer with a fixed width; short rows are padded with empty fields.
struct CsvTable {
    out: String,
    width: usize,
}

impl CsvTable {
    fn new(width: usize) -> Self {
        Self {
            out: String::new(),
            width,
        }
    }

    fn row<S: AsRef<str>>(&mut self, fields: &[S]) {
        let pad = self.width.saturating_sub(fields.len());
        let all = fields.iter().map(|f| f.as_ref()).chain(std::iter::repeat("").take(pad));
        for (i, field) in all.enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            push_csv_field(&mut self.out, field);
        }
        self.out.push_str("\r\n");
    }

    fn finish(self) -> String {
        self.out
    }
}

fn push_csv_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Contour file: header with the final contour count, then one block per contour.
pub fn contours_payload(doc: &FrozenDocument) -> String {
    let mut blocks = Vec::new();
    for (index, (depth, vertices)) in doc.contours().enumerate() {
        blocks.push(format!("{} {} {}", index, vertices.len(), depth));
        for &v in vertices {
            let p = doc.to_output(v);
            blocks.push(format!("{} {}", format_float(p.x), format_float(p.y)));
        }
    }
    let count = doc.contours().count();

    let mut out = String::new();
    for line in CONTOUR_HEADER {
        out.push_str(line);
        out.push('\n');
    }
    let _ = writeln!(out, "tag-number-of-contours {}", count);
    let _ = writeln!(out, "tag-section-spacing {}", format_float(doc.spacing()));
    out.push_str("tag-BEGIN-DATA\n");
    for line in blocks {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Cell table: one row per cell with centered coordinates and depth.
pub fn cells_payload(doc: &FrozenDocument) -> String {
    let mut table = CsvTable::new(CELL_COLUMNS);
    for row in CELL_HEADER {
        table.row(*row);
    }
    for (index, (depth, cell)) in doc.cells().enumerate() {
        let p = doc.to_output(cell.centroid);
        let mut row = vec![
            index.to_string(),
            format_float(p.x),
            format_float(p.y),
            format_float(doc.depth_z(depth)),
            depth.to_string(),
            cell.class.name().to_string(),
        ];
        row.extend(std::iter::repeat(String::new()).take(8));
        row.push(CELL_SOURCE_TAG.to_string());
        table.row(&row);
    }
    table.row(&["csvf-section-end", "Cells"]);
    table.finish()
}

/// Color legend: all four classes whether or not any cell uses them.
pub fn colors_payload() -> String {
    let mut table = CsvTable::new(COLOR_COLUMNS);
    for row in COLOR_HEADER {
        table.row(*row);
    }
    for entry in legend() {
        table.row(&[
            entry.class.name().to_string(),
            entry.color.r.to_string(),
            entry.color.g.to_string(),
            entry.color.b.to_string(),
            entry.color.a.to_string(),
            format_float(entry.point_size),
            format_float(entry.line_size),
            entry.symbol.to_string(),
            String::new(),
        ]);
    }
    table.row(&["csvf-section-end", "Colors"]);
    table.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::PointD;
    use crate::caret::CaretDocument;
    use crate::element::{Element, LayerInput};

    fn pts(coords: &[(f64, f64)]) -> Vec<PointD> {
        coords.iter().map(|&c| c.into()).collect()
    }

    fn data_rows(payload: &str) -> Vec<Vec<&str>> {
        payload
            .split("\r\n")
            .filter(|l| !l.is_empty())
            .map(|l| l.split(',').collect())
            .collect()
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(6.0), "6.0");
        assert_eq!(format_float(-5.0), "-5.0");
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_csv_quoting() {
        let mut t = CsvTable::new(3);
        t.row(&["a,b", "say \"hi\""]);
        assert_eq!(t.finish(), "\"a,b\",\"say \"\"hi\"\"\",\r\n");
    }

    #[test]
    fn test_empty_document_payloads() {
        let frozen = CaretDocument::default().freeze();
        let contours = contours_payload(&frozen);
        assert!(contours.contains("tag-number-of-contours 0\n"));
        assert!(contours.contains("tag-section-spacing 6.0\n"));
        assert!(contours.ends_with("tag-BEGIN-DATA\n"));

        let cells = cells_payload(&frozen);
        let rows = data_rows(&cells);
        assert_eq!(rows.len(), CELL_HEADER.len() + 1);
        assert!(rows.iter().all(|r| r.len() == CELL_COLUMNS));
        assert_eq!(rows.last().unwrap()[0], "csvf-section-end");
    }

    #[test]
    fn test_contour_blocks() {
        let mut doc = CaretDocument::new(0.2);
        let square = Element::polygon(&pts(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]))
            .with_stroke(Some("#000000"));
        doc.add_layer(&LayerInput::new("2 r/l", vec![square.clone()])).unwrap();
        doc.add_layer(&LayerInput::new("1 r/l", vec![square])).unwrap();
        let payload = contours_payload(&doc.freeze());
        let lines: Vec<&str> = payload.lines().collect();

        assert_eq!(lines[0], "BeginHeader");
        assert_eq!(lines[7], "tag-number-of-contours 2");
        assert_eq!(lines[8], "tag-section-spacing 0.2");
        assert_eq!(lines[9], "tag-BEGIN-DATA");
        assert_eq!(lines[10], "0 5 0");
        assert_eq!(lines[11], "-5.0 5.0");
        assert_eq!(lines[12], "-5.0 -5.0");
        assert_eq!(lines[16], "1 5 1");
        assert_eq!(lines.len(), 10 + 2 * 6);
    }

    #[test]
    fn test_cell_rows() {
        let mut doc = CaretDocument::new(6.0);
        let marker = |x: f64| {
            Element::polygon(&pts(&[(x, 0.0), (x + 2.0, 0.0), (x + 2.0, 2.0), (x, 2.0)]))
                .with_fill(Some("#fff200"))
        };
        doc.add_layer(&LayerInput::new("4 c/l", vec![marker(0.0)])).unwrap();
        doc.add_layer(&LayerInput::new("9 c/l", vec![marker(10.0)])).unwrap();
        let payload = cells_payload(&doc.freeze());
        let rows = data_rows(&payload);
        let cells: Vec<&Vec<&str>> = rows
            .iter()
            .filter(|r| r[5].starts_with("mdplot."))
            .collect();

        assert_eq!(cells.len(), 2);
        // Columns descend: "9 c/l" is depth 0.
        assert_eq!(cells[0][0], "0");
        assert_eq!(cells[0][3], "0.0");
        assert_eq!(cells[0][4], "0");
        assert_eq!(cells[1][3], "6.0");
        assert_eq!(cells[1][4], "1");
        assert_eq!(cells[1][5], "mdplot.yellow");
        assert!(cells[1][6..14].iter().all(|f| f.is_empty()));
        assert_eq!(cells[1][14], CELL_SOURCE_TAG);
        assert!(rows.iter().all(|r| r.len() == CELL_COLUMNS));
    }

    #[test]
    fn test_colors_payload() {
        let payload = colors_payload();
        let rows = data_rows(&payload);
        assert!(rows.iter().all(|r| r.len() == COLOR_COLUMNS));
        assert!(payload.contains("mdplot.red,237,28,36,255,3.0,1.0,POINT,\r\n"));
        assert!(payload.contains("mdplot.green,0,136,75,255,3.0,1.0,POINT,\r\n"));
        assert!(payload.contains("mdplot.blue,49,49,133,255,3.0,1.0,POINT,\r\n"));
        assert!(payload.contains("mdplot.yellow,255,242,0,255,3.0,1.0,POINT,\r\n"));
        assert!(payload.ends_with("csvf-section-end,Colors,,,,,,,\r\n"));
    }
}
