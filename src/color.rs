//! Cell color classes and their legend entries.
//!
//! Colors in the input are only ever compared as lower-case hex strings; the
//! `Rgba8` values here exist to write the legend file.

// ============================================================================
// Rgba8 (8-bit per channel)
// ============================================================================

/// RGBA color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BASE_MASK: u8 = u8::MAX;

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn new_opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, Self::BASE_MASK)
    }

    /// Parse `#rrggbb` (case-insensitive) into an opaque color.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new_opaque(channel(0)?, channel(2)?, channel(4)?))
    }
}

// ============================================================================
// Cell color classes
// ============================================================================

/// The four recognized cell-marker classes.
///
/// `Green` is part of the legend but no classification rule assigns it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorClass {
    Red,
    Green,
    Blue,
    Yellow,
}

impl ColorClass {
    /// Legend order.
    pub const ALL: [ColorClass; 4] = [
        ColorClass::Red,
        ColorClass::Green,
        ColorClass::Blue,
        ColorClass::Yellow,
    ];

    /// Name written in the cell table and the legend, e.g. `mdplot.red`.
    pub fn name(self) -> &'static str {
        match self {
            ColorClass::Red => "mdplot.red",
            ColorClass::Green => "mdplot.green",
            ColorClass::Blue => "mdplot.blue",
            ColorClass::Yellow => "mdplot.yellow",
        }
    }

    /// Hex value the legend swatch is drawn with.
    pub fn swatch_hex(self) -> &'static str {
        match self {
            ColorClass::Red => "#ed1c24",
            ColorClass::Green => "#00884b",
            ColorClass::Blue => "#313185",
            ColorClass::Yellow => "#fff200",
        }
    }

    pub fn swatch(self) -> Rgba8 {
        // Swatch strings are compile-time literals, all well-formed.
        Rgba8::from_hex(self.swatch_hex()).unwrap_or(Rgba8::new_opaque(0, 0, 0))
    }
}

// ============================================================================
// Legend
// ============================================================================

/// One row of the color legend file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendEntry {
    pub class: ColorClass,
    pub color: Rgba8,
    pub point_size: f64,
    pub line_size: f64,
    pub symbol: &'static str,
}

impl LegendEntry {
    pub fn for_class(class: ColorClass) -> Self {
        Self {
            class,
            color: class.swatch(),
            point_size: 3.0,
            line_size: 1.0,
            symbol: "POINT",
        }
    }
}

/// The fixed legend: every class, in legend order, used or not.
pub fn legend() -> [LegendEntry; 4] {
    ColorClass::ALL.map(LegendEntry::for_class)
}
