//! QuickTime style metadata item lists (`ilst` and its `data` values).

use crate::error::{ParseError, Result};
use crate::node::Parser;
use crate::parser::{parse_boxes, parse_boxes_with};
use crate::util::decode_language;

/// Every child of `ilst` is an item whose body is again a list of boxes.
pub fn ilst(ps: &mut Parser<'_>) -> Result<()> {
    parse_boxes_with(ps, &mut |_, ps| parse_boxes(ps).map(drop)).map(drop)
}

const WELL_KNOWN_TYPES: &[(u32, &str)] = &[
    (0, "reserved"),
    (1, "UTF-8"),
    (2, "UTF-16"),
    (3, "S/JIS"),
    (4, "UTF-8 sort"),
    (5, "UTF-16 sort"),
    (13, "JPEG"),
    (14, "PNG"),
    (21, "BE Signed Integer"),
    (22, "BE Unsigned Integer"),
    (23, "BE Float32"),
    (24, "BE Float64"),
    (27, "BMP"),
    (28, "QuickTime Metadata atom"),
    (65, "8-bit Signed Integer"),
    (66, "BE 16-bit Signed Integer"),
    (67, "BE 32-bit Signed Integer"),
    (70, "BE PointF32"),
    (71, "BE DimensionsF32"),
    (72, "BE RectF32"),
    (74, "BE 64-bit Signed Integer"),
    (75, "8-bit Unsigned Integer"),
    (76, "BE 16-bit Unsigned Integer"),
    (77, "BE 32-bit Unsigned Integer"),
    (78, "BE 64-bit Unsigned Integer"),
    (79, "AffineTransformF64"),
];

pub fn well_known_type(code: u32) -> Option<&'static str> {
    WELL_KNOWN_TYPES
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, name)| name)
}

/// Country codes are either two Latin-1 letters or a small index.
fn render_country(raw: u16) -> String {
    let [hi, lo] = raw.to_be_bytes();
    if hi == 0 {
        return lo.to_string();
    }
    format!("{:?}", [hi as char, lo as char].iter().collect::<String>())
}

fn render_language(raw: u16) -> String {
    let [hi, lo] = raw.to_be_bytes();
    if hi == 0 {
        return lo.to_string();
    }
    decode_language(raw).unwrap_or_else(|| format!("{raw:#06x}"))
}

pub fn data(ps: &mut Parser<'_>) -> Result<()> {
    let type_byte = ps.u8()?;
    let desc = (type_byte == 0).then(|| "well known type".to_string());
    ps.field_default_desc("type_indicator_byte", type_byte, 0, desc)?;
    let type_code = ps.uint(3)? as u32;
    let desc = well_known_type(type_code).map(str::to_string);
    ps.field_default_desc("type_indicator_type", type_code, 1, desc)?;

    let country = ps.u16()?;
    ps.field_default_as("country_indicator", country, 0, |&c| render_country(c))?;
    let language = ps.u16()?;
    ps.field_default_as("language_indicator", language, 0, |&l| render_language(l))?;

    if type_byte == 0 && type_code == 1 {
        // left unread on failure so the recovery dump still shows it
        let text = std::str::from_utf8(ps.peek_rest()).map_err(|e| ParseError::invalid("UTF-8 value", e))?;
        ps.read_rest();
        return ps.field("value", format!("{text:?}"));
    }
    ps.print("value =")?;
    ps.in_object(|ps| ps.dump_rest())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_rendering() {
        assert_eq!(render_country(0x0005), "5");
        assert_eq!(render_country(u16::from_be_bytes(*b"US")), "\"US\"");
        assert_eq!(render_language(0x0003), "3");
        // packed "eng"
        assert_eq!(render_language(0x15c7), "eng");
    }

    #[test]
    fn type_names() {
        assert_eq!(well_known_type(1), Some("UTF-8"));
        assert_eq!(well_known_type(99), None);
    }
}
