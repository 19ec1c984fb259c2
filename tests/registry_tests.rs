use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mp4dissect::fullbox::parse_fullbox;
use mp4dissect::{BoxKey, Dissector, FourCC, Options, Output, Parser, Registry, Result, default_registry};

fn boxed(typ: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&((8 + body.len()) as u32).to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(body);
    v
}

fn plain_options() -> Options {
    Options {
        show_offsets: false,
        show_lengths: false,
        show_descriptions: false,
        ..Options::default()
    }
}

fn run(registry: Registry, data: &[u8]) -> String {
    let dx = Dissector::with_output(plain_options(), Output::buffer())
        .unwrap()
        .with_registry(registry);
    dx.dissect(data).unwrap();
    dx.output().take_string()
}

fn key(code: &[u8; 4]) -> BoxKey {
    BoxKey::FourCC(FourCC(*code))
}

#[test]
fn custom_handler_is_dispatched() {
    let registry = Registry::new().with_handler(
        key(b"xtst"),
        "xtst",
        Box::new(|ps: &mut Parser<'_>| -> Result<()> {
            let v = ps.u16()?;
            ps.field("answer", v)
        }),
    );
    let text = run(registry, &boxed(b"xtst", &42u16.to_be_bytes()));
    assert_eq!(text, "[xtst]\n    answer = 42\n");
}

#[test]
fn handler_leaving_bytes_is_flagged() {
    let registry = Registry::new().with_handler(
        key(b"xtst"),
        "xtst",
        Box::new(|ps: &mut Parser<'_>| -> Result<()> {
            ps.u16()?;
            Ok(())
        }),
    );
    let text = run(registry, &boxed(b"xtst", &[0, 1, 0xca, 0xfe]));
    assert!(text.contains("    ERROR: 2 bytes of trailing data"), "{text}");
    assert!(text.contains("ca fe"), "{text}");
}

#[test]
fn partially_read_bit_group_is_an_error() {
    let registry = Registry::new().with_handler(
        key(b"bits"),
        "bits",
        Box::new(|ps: &mut Parser<'_>| -> Result<()> {
            ps.bits(1, |ps, br| ps.field("high", br.read(4)?))
        }),
    );
    let text = run(registry, &boxed(b"bits", &[0xa5]));
    assert!(text.contains("    high = 10"), "{text}");
    assert!(text.contains("    ERROR: 4 bits left unread in bit group"), "{text}");
}

#[test]
fn unregistered_types_fall_back() {
    // moov is a container, `abcd` is unknown
    let mut data = boxed(b"moov", &boxed(b"abcd", b"hi"));
    data.extend(boxed(b"mdat", &[]));
    let text = run(Registry::new(), &data);
    let dump = format!("        68 69{}hi", " ".repeat(48));
    assert_eq!(text, format!("[moov]\n    [abcd]\n{dump}\n[mdat]\n"));
}

#[test]
fn default_flags_are_elided() {
    let mut body = vec![0, 0, 0, 0];
    body.extend_from_slice(&7u32.to_be_bytes());
    let data = boxed(b"mfhd", &body);

    let text = run(default_registry(), &data);
    assert_eq!(text, "[mfhd]\n    sequence_number = 7\n");

    let opts = Options {
        show_defaults: true,
        ..plain_options()
    };
    let dx = Dissector::with_output(opts, Output::buffer()).unwrap();
    dx.dissect(&data).unwrap();
    assert_eq!(
        dx.output().take_string(),
        "[mfhd]\n    version = 0\n    flags = 0x000000\n    sequence_number = 7\n"
    );
}

#[test]
fn unknown_flags_warn_but_parse() {
    let mut body = vec![0, 0, 0, 4];
    body.extend_from_slice(&7u32.to_be_bytes());
    let text = run(default_registry(), &boxed(b"mfhd", &body));
    assert!(text.contains("    flags = 0x000004\n"), "{text}");
    assert!(text.contains("    WARNING: unknown flags set: 0x000004\n"), "{text}");
    assert!(text.contains("    sequence_number = 7\n"), "{text}");
}

#[test]
fn fullbox_version_is_checked() {
    let registry = Registry::new().with_handler(
        key(b"vers"),
        "vers",
        Box::new(|ps: &mut Parser<'_>| -> Result<()> { parse_fullbox(ps).map(drop) }),
    );
    let text = run(registry, &boxed(b"vers", &[1, 0, 0, 0]));
    assert!(text.contains("ERROR: unsupported version 1 (max supported: 0)"), "{text}");
}

#[test]
fn tables_are_capped() {
    let mut body = vec![0, 0, 0, 0];
    body.extend_from_slice(&10u32.to_be_bytes());
    for i in 0..10u32 {
        body.extend_from_slice(&(i * 100).to_be_bytes());
    }
    let opts = Options {
        max_rows: 3,
        ..plain_options()
    };
    let dx = Dissector::with_output(opts, Output::buffer()).unwrap();
    dx.dissect(&boxed(b"stco", &body)).unwrap();
    let text = dx.output().take_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6, "{text}");
    assert_eq!(lines[1], "    entry_count = 10");
    assert_eq!(lines[2], "    [chunk     1] offset = 0x000000");
    assert_eq!(lines[5], "    ...");
}

#[test]
fn stsc_chunks_must_increase() {
    let mut body = vec![0, 0, 0, 0];
    body.extend_from_slice(&2u32.to_be_bytes());
    for entry in [[3u32, 5, 1], [2, 5, 1]] {
        for v in entry {
            body.extend_from_slice(&v.to_be_bytes());
        }
    }
    let text = run(default_registry(), &boxed(b"stsc", &body));
    assert!(text.contains("ERROR: invalid first_chunk: 2 not after previous 3"), "{text}");
}

#[test]
fn rows_past_the_cap_are_not_formatted() {
    let formatted = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&formatted);
    let registry = Registry::new().with_handler(
        key(b"xtst"),
        "xtst",
        Box::new(move |ps: &mut Parser<'_>| -> Result<()> {
            for i in 0..100u64 {
                ps.row(i, || {
                    counter.fetch_add(1, Ordering::Relaxed);
                    format!("row {i}")
                })?;
            }
            ps.rows_end(100)
        }),
    );
    let text = run(registry, &boxed(b"xtst", &[]));
    assert_eq!(formatted.load(Ordering::Relaxed), 7, "{text}");
    assert!(text.ends_with("    row 6\n    ...\n"), "{text}");
}
