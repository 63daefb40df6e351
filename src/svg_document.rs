//! SVG document reader.
//!
//! Turns an annotated SVG into ordered `LayerInput`s. Layers are the `<g>`
//! children of the root `<svg>`; shapes are the path, polygon and polyline
//! descendants of each group.

use roxmltree::{Document, Node};

use crate::element::{Element, LayerInput};
use crate::error::ConvertError;
use crate::path_data::{parse_path_data, parse_points};

pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";

/// Parse `text` and collect its layers in document order.
pub fn read_layers(text: &str) -> Result<Vec<LayerInput>, ConvertError> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();

    let mut layers = Vec::new();
    for group in root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "g")
    {
        let label = layer_label(group);
        let mut elements = Vec::new();
        for node in group.descendants().filter(|n| n.is_element()) {
            if let Some(element) = read_element(node)? {
                elements.push(element);
            }
        }
        log::debug!("layer '{}': {} shapes", label, elements.len());
        layers.push(LayerInput::new(label, elements));
    }
    Ok(layers)
}

fn read_element(node: Node<'_, '_>) -> Result<Option<Element>, ConvertError> {
    let element = match node.tag_name().name() {
        "path" => Element::path(parse_path_data(node.attribute("d").unwrap_or(""))?),
        "polygon" => Element::polygon(&parse_points(node.attribute("points").unwrap_or(""))?),
        "polyline" => Element::polyline(&parse_points(node.attribute("points").unwrap_or(""))?),
        _ => return Ok(None),
    };
    Ok(Some(
        element
            .with_stroke(paint(node, "stroke"))
            .with_fill(paint(node, "fill")),
    ))
}

fn layer_label(group: Node<'_, '_>) -> String {
    if let Some(label) = group.attribute((INKSCAPE_NS, "label")) {
        return label.to_string();
    }
    group.attribute("id").map(decode_layer_id).unwrap_or_default()
}

/// Presentation attribute, else the same property in the inline `style`.
fn paint<'a>(node: Node<'a, '_>, property: &str) -> Option<&'a str> {
    node.attribute(property)
        .or_else(|| node.attribute("style").and_then(|s| style_property(s, property)))
}

fn style_property<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    style.split(';').find_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        (name.trim() == property).then(|| value.trim())
    })
}

/// Undo Illustrator's id escaping: `_xHH_` becomes the character, `_` a space.
pub fn decode_layer_id(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut rest = id;
    while let Some(pos) = rest.find('_') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match decode_escape(tail) {
            Some(c) => {
                out.push(c);
                rest = &tail[5..];
            }
            None => {
                out.push(' ');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_escape(s: &str) -> Option<char> {
    let bytes = s.as_bytes();
    if bytes.len() < 5 || bytes[1] != b'x' || bytes[4] != b'_' {
        return None;
    }
    if !bytes[2].is_ascii_hexdigit() || !bytes[3].is_ascii_hexdigit() {
        return None;
    }
    let hex = s.get(2..4)?;
    let code = u8::from_str_radix(hex, 16).ok()?;
    Some(char::from(code))
}
