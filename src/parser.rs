use crate::boxes::{BoxHeader, SizeKind};
use crate::cursor::ByteCursor;
use crate::error::{ParseError, Result};
use crate::known_boxes;
use crate::node::Parser;
use log::{debug, trace};

/// Decode one box header at the cursor.
///
/// Resolves the `0` (to end of container) and `1` (64-bit largesize) length
/// sentinels and reads the extended type of `uuid` boxes. The returned
/// header is checked against the bytes left in the enclosing region, but the
/// body itself is left unread.
pub fn read_box_header(c: &mut ByteCursor<'_>) -> Result<BoxHeader> {
    let start = c.offset();
    let available = c.remaining() as u64;
    if available < 8 {
        return Err(ParseError::InvalidFraming(format!(
            "{available} bytes left, too short for a box header"
        )));
    }

    let size32 = c.u32()?;
    let typ = c.fourcc()?;
    if !typ.is_printable() {
        return Err(ParseError::InvalidFraming(format!(
            "non-printable box type {}",
            hex::encode(typ.0)
        )));
    }

    let (size, size_kind) = match size32 {
        0 => (available, SizeKind::ToEnd),
        1 => (c.u64()?, SizeKind::Large),
        n => (n as u64, SizeKind::Compact),
    };
    let uuid = if &typ.0 == b"uuid" { Some(c.uuid()?) } else { None };
    let header_size = c.offset() - start;
    trace!("box {typ} at {start:#x}: size {size} ({size_kind:?}), header {header_size}");

    let hdr = BoxHeader {
        size,
        typ,
        uuid,
        header_size,
        start,
        size_kind,
    };
    if size < header_size {
        return Err(ParseError::InvalidFraming(format!(
            "{typ} box size {size} smaller than its {header_size} byte header"
        )));
    }
    if size > available {
        return Err(ParseError::TruncatedBox {
            typ: hdr.key(),
            expected: size,
            available,
        });
    }
    Ok(hdr)
}

/// One report line for a box header.
fn header_line(ps: &Parser<'_>, hdr: &BoxHeader) -> String {
    let opts = ps.options();
    let style = ps.style();
    let mut line = style.bold(&format!("[{}]", hdr.key()));
    if opts.show_descriptions {
        if let Some(info) = known_boxes::lookup_key(&hdr.key()) {
            line.push(' ');
            line.push_str(&style.dim(&format!("{} ({}, {})", info.name, info.kind, info.family)));
        }
    }
    if opts.show_offsets {
        line.push_str(&format!(" {:#x} - {:#x}", hdr.start, hdr.end()));
    }
    if opts.show_lengths {
        line.push_str(&format!(" ({})", hdr.body_len()));
    }
    line
}

/// Walk a region as a sequence of sibling boxes, running `contents` on each
/// body inside its own recovery boundary.
///
/// Framing errors are not recovered here: they propagate to the enclosing
/// node, which then dumps whatever is left of the region. The headers of the
/// boxes walked so far are appended to `out` as they complete.
pub fn walk_boxes(
    ps: &mut Parser<'_>,
    out: &mut Vec<BoxHeader>,
    contents: &mut dyn FnMut(&BoxHeader, &mut Parser<'_>) -> Result<()>,
) -> Result<()> {
    while !ps.is_empty() {
        let hdr = read_box_header(ps)?;
        ps.print(header_line(ps, &hdr))?;
        // `size - header_size` fits: it was checked against the region length.
        let body = hdr.body_len() as usize;
        ps.nested(body, |sub| {
            sub.handle_errors(|sub| {
                contents(&hdr, sub)?;
                sub.expect_end()
            })
        })?;
        out.push(hdr);
    }
    Ok(())
}

/// Parse the rest of the node as boxes, dispatching each to the registry.
pub fn parse_boxes(ps: &mut Parser<'_>) -> Result<Vec<BoxHeader>> {
    parse_boxes_with(ps, &mut parse_contents)
}

/// Like [`parse_boxes`], with a caller supplied body parser.
pub fn parse_boxes_with(
    ps: &mut Parser<'_>,
    contents: &mut dyn FnMut(&BoxHeader, &mut Parser<'_>) -> Result<()>,
) -> Result<Vec<BoxHeader>> {
    let mut out = Vec::new();
    walk_boxes(ps, &mut out, contents)?;
    Ok(out)
}

/// Default body dispatch: registered handler, then pure container, then a
/// raw hex dump.
pub fn parse_contents(hdr: &BoxHeader, ps: &mut Parser<'_>) -> Result<()> {
    let key = hdr.key();
    if let Some(handler) = ps.dissector().registry().get(&key) {
        debug!("{key} at {:#x}: handler {}", hdr.start, handler.name());
        return handler.parse(ps);
    }
    if hdr.uuid.is_none() && known_boxes::is_container(hdr.typ) {
        debug!("{key} at {:#x}: container", hdr.start);
        parse_boxes(ps)?;
        return Ok(());
    }
    debug!("{key} at {:#x}: no handler, dumping {} bytes", hdr.start, ps.remaining());
    ps.dump_rest()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(typ: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut v = ((8 + body.len()) as u32).to_be_bytes().to_vec();
        v.extend_from_slice(typ);
        v.extend_from_slice(body);
        v
    }

    #[test]
    fn compact_header() {
        let data = boxed(b"free", &[0; 4]);
        let mut c = ByteCursor::at(&data, 100);
        let h = read_box_header(&mut c).unwrap();
        assert_eq!(h.size, 12);
        assert_eq!(h.header_size, 8);
        assert_eq!(h.start, 100);
        assert_eq!(h.body_start(), 108);
        assert_eq!(h.size_kind, SizeKind::Compact);
    }

    #[test]
    fn size_zero_runs_to_end() {
        let mut data = 0u32.to_be_bytes().to_vec();
        data.extend_from_slice(b"mdat");
        data.extend_from_slice(&[7; 20]);
        let h = read_box_header(&mut ByteCursor::new(&data)).unwrap();
        assert_eq!(h.size, 28);
        assert_eq!(h.size_kind, SizeKind::ToEnd);
    }

    #[test]
    fn rejects_short_and_unprintable() {
        let data = [0, 0, 0, 4, b'f', b'r', b'e', b'e'];
        assert!(matches!(
            read_box_header(&mut ByteCursor::new(&data)),
            Err(ParseError::InvalidFraming(_))
        ));
        let data = [0, 0, 0, 8, 0, 1, 2, 3];
        assert!(matches!(
            read_box_header(&mut ByteCursor::new(&data)),
            Err(ParseError::InvalidFraming(_))
        ));
    }

    #[test]
    fn oversized_box_is_truncated() {
        let mut data = boxed(b"free", &[0; 4]);
        data[3] = 40;
        assert!(matches!(
            read_box_header(&mut ByteCursor::new(&data)),
            Err(ParseError::TruncatedBox { expected: 40, available: 12, .. })
        ));
    }
}
