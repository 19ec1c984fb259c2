use mp4dissect::{Dissector, Options, Output};

fn boxed(typ: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&((8 + body.len()) as u32).to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(body);
    v
}

fn run(data: &[u8]) -> String {
    let opts = Options {
        show_offsets: false,
        show_lengths: false,
        ..Options::default()
    };
    let dx = Dissector::with_output(opts, Output::buffer()).unwrap();
    dx.dissect(data).unwrap();
    dx.output().take_string()
}

fn words(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

#[test]
fn trun_accumulates_time_and_offset() {
    let mut body = vec![0, 0, 0x03, 0x01];
    body.extend(words(&[2]));
    body.extend_from_slice(&(-8i32).to_be_bytes());
    body.extend(words(&[1000, 500, 1000, 700]));
    let text = run(&boxed(b"trun", &body));

    assert!(text.contains("    flags = 0x000301\n"), "{text}");
    assert!(text.contains("    sample_count = 2\n"), "{text}");
    assert!(text.contains("[sample    0] time=      0 +  1000, offset=      0x0 +   500\n"), "{text}");
    assert!(text.contains("[sample    1] time=   1000 +  1000, offset=    0x1f4 +   700\n"), "{text}");
    assert!(!text.contains("WARNING"), "{text}");
}

#[test]
fn ctts_version_1_offsets_are_signed() {
    let mut body = vec![1, 0, 0, 0];
    body.extend(words(&[1, 3]));
    body.extend_from_slice(&(-5i32).to_be_bytes());
    let text = run(&boxed(b"ctts", &body));
    assert!(text.contains("sample_count =     3, sample_offset =    -5\n"), "{text}");
    assert!(text.contains("[samples =      3]\n"), "{text}");
}

#[test]
fn stts_totals() {
    let mut body = vec![0, 0, 0, 0];
    body.extend(words(&[2, 100, 1024, 1, 512]));
    let text = run(&boxed(b"stts", &body));
    assert!(text.contains("[entry   1] [sample =    101, time = 102400]"), "{text}");
    assert!(text.ends_with("    [samples =    101, time = 102912]\n"), "{text}");
}

#[test]
fn pssh_names_the_protection_system() {
    let mut body = vec![0, 0, 0, 0];
    body.extend_from_slice(&[
        0xed, 0xef, 0x8b, 0xa9, 0x79, 0xd6, 0x4a, 0xce, 0xa3, 0xc8, 0x27, 0xdc, 0xd5, 0x1d, 0x21, 0xed,
    ]);
    body.extend(words(&[2]));
    body.extend_from_slice(b"ab");
    let text = run(&boxed(b"pssh", &body));
    assert!(
        text.contains("SystemID = edef8ba9-79d6-4ace-a3c8-27dcd51d21ed (Widevine Content Protection)\n"),
        "{text}"
    );
    assert!(text.contains("    Data =\n        61 62 "), "{text}");
}

#[test]
fn ilst_items_hold_data_boxes() {
    let mut data_body = vec![0, 0, 0, 1];
    data_body.extend_from_slice(&[0, 0, 0, 0]);
    data_body.extend_from_slice(b"Hello");
    let item = boxed(&[0xa9, b'n', b'a', b'm'], &boxed(b"data", &data_body));
    let text = run(&boxed(b"ilst", &item));

    assert!(text.contains("    [\u{a9}nam]\n"), "{text}");
    assert!(text.contains("            value = \"Hello\"\n"), "{text}");
    // well known UTF-8 type and empty locale are defaults
    assert!(!text.contains("type_indicator"), "{text}");
    assert!(!text.contains("country_indicator"), "{text}");
}

#[test]
fn avcc_parameter_sets() {
    let mut body = vec![1, 0x64, 0x00, 0x1f, 0xff, 0xe1];
    body.extend_from_slice(&3u16.to_be_bytes());
    body.extend_from_slice(&[0x67, 0x64, 0x00]);
    body.push(1);
    body.extend_from_slice(&2u16.to_be_bytes());
    body.extend_from_slice(&[0x68, 0xee]);
    // high profile trailer: 4:2:0, 8 bit, no SPS extensions
    body.extend_from_slice(&[0xfd, 0xf8, 0xf8, 0x00]);
    let text = run(&boxed(b"avcC", &body));

    assert!(text.contains("profile / compat / level = 64001f\n"), "{text}");
    assert!(text.contains("lengthSizeMinusOne = 3\n"), "{text}");
    assert!(text.contains("- SPS: 676400\n"), "{text}");
    assert!(text.contains("- PPS: 68ee\n"), "{text}");
    assert!(text.contains("chroma_format = 1\n"), "{text}");
    assert!(!text.contains("ERROR"), "{text}");
    assert!(!text.contains("WARNING"), "{text}");
}

#[test]
fn invalid_utf8_value_is_still_dumped() {
    let mut data_body = vec![0, 0, 0, 1];
    data_body.extend_from_slice(&[0, 0, 0, 0]);
    data_body.extend_from_slice(&[0xff, 0xfe, 0x41]);
    let item = boxed(&[0xa9, b'n', b'a', b'm'], &boxed(b"data", &data_body));
    let text = run(&boxed(b"ilst", &item));

    assert!(text.contains("ERROR: invalid UTF-8 value"), "{text}");
    assert!(text.contains("ff fe 41"), "{text}");
}

#[test]
fn mdhd_language_is_named() {
    let mut body = vec![0, 0, 0, 0];
    body.extend(words(&[0, 0, 90000, 180000]));
    body.extend_from_slice(&0x15c7u16.to_be_bytes()); // "eng"
    body.extend_from_slice(&[0, 0]);
    let text = run(&boxed(b"mdhd", &body));

    assert!(text.contains("    timescale = 90000\n"), "{text}");
    assert!(text.contains("    language = eng (English)\n"), "{text}");
    assert!(!text.contains("WARNING"), "{text}");
}

#[test]
fn trun_without_per_sample_fields_has_no_rows() {
    let mut body = vec![0, 0, 0x00, 0x01];
    body.extend(words(&[u32::MAX]));
    body.extend_from_slice(&16i32.to_be_bytes());
    let text = run(&boxed(b"trun", &body));

    assert!(text.contains("    sample_count = 4294967295\n"), "{text}");
    assert!(text.contains("    data_offset = 0x10\n"), "{text}");
    assert!(!text.contains("[sample"), "{text}");
    assert!(!text.contains("ERROR"), "{text}");
}
