use mp4dissect::{Dissector, Options, Output};

fn boxed(typ: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&((8 + body.len()) as u32).to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(body);
    v
}

fn hdlr(handler_type: &[u8; 4]) -> Vec<u8> {
    let mut body = vec![0; 8]; // version, flags, pre_defined
    body.extend_from_slice(handler_type);
    body.extend_from_slice(&[0; 12]);
    body.extend_from_slice(b"test\0");
    boxed(b"hdlr", &body)
}

fn stsd(entries: &[Vec<u8>]) -> Vec<u8> {
    let mut body = vec![0, 0, 0, 0];
    body.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    for e in entries {
        body.extend_from_slice(e);
    }
    boxed(b"stsd", &body)
}

fn sample_entry_prefix() -> Vec<u8> {
    let mut v = vec![0; 6];
    v.extend_from_slice(&1u16.to_be_bytes()); // data_reference_index
    v
}

fn avc1(width: u16, height: u16) -> Vec<u8> {
    let mut body = sample_entry_prefix();
    body.extend_from_slice(&[0; 16]);
    body.extend_from_slice(&width.to_be_bytes());
    body.extend_from_slice(&height.to_be_bytes());
    body.extend_from_slice(&0x0048_0000u32.to_be_bytes());
    body.extend_from_slice(&0x0048_0000u32.to_be_bytes());
    body.extend_from_slice(&0u32.to_be_bytes());
    body.extend_from_slice(&1u16.to_be_bytes()); // frame_count
    let mut name = [0u8; 32];
    name[0] = 3;
    name[1..4].copy_from_slice(b"x26");
    body.extend_from_slice(&name);
    body.extend_from_slice(&0x18u16.to_be_bytes());
    body.extend_from_slice(&(-1i16).to_be_bytes());
    boxed(b"avc1", &body)
}

fn mp4a(sample_rate: u16) -> Vec<u8> {
    let mut body = sample_entry_prefix();
    body.extend_from_slice(&[0; 8]);
    body.extend_from_slice(&2u16.to_be_bytes()); // channelcount
    body.extend_from_slice(&16u16.to_be_bytes()); // samplesize
    body.extend_from_slice(&[0; 4]);
    body.extend_from_slice(&((sample_rate as u32) << 16).to_be_bytes());
    boxed(b"mp4a", &body)
}

/// trak / mdia / {hdlr, minf / stbl / stsd}
fn track(handler: Option<&[u8; 4]>, entry: Vec<u8>) -> Vec<u8> {
    let stbl = boxed(b"stbl", &stsd(&[entry]));
    let minf = boxed(b"minf", &stbl);
    let mut mdia_body = handler.map(hdlr).unwrap_or_default();
    mdia_body.extend(minf);
    boxed(b"trak", &boxed(b"mdia", &mdia_body))
}

fn run(data: &[u8]) -> String {
    let opts = Options {
        show_offsets: false,
        show_lengths: false,
        show_descriptions: false,
        ..Options::default()
    };
    let dx = Dissector::with_output(opts, Output::buffer()).unwrap();
    dx.dissect(data).unwrap();
    dx.output().take_string()
}

#[test]
fn sample_entries_follow_the_track_handler() {
    let mut moov = track(Some(b"vide"), avc1(640, 480));
    moov.extend(track(Some(b"soun"), mp4a(44100)));
    let text = run(&boxed(b"moov", &moov));

    assert!(text.contains("handler_type = \"vide\", name = \"test\\0\""), "{text}");
    assert!(text.contains("size = 640 x 480\n"), "{text}");
    assert!(text.contains("compressorname = \"x26\"\n"), "{text}");
    assert!(text.contains("samplerate = 44100\n"), "{text}");
    assert!(!text.contains("ERROR"), "{text}");
    assert!(!text.contains("WARNING"), "{text}");
}

#[test]
fn handler_does_not_leak_into_the_next_track() {
    let mut moov = track(Some(b"vide"), avc1(640, 480));
    moov.extend(track(None, avc1(320, 240)));
    let text = run(&boxed(b"moov", &moov));

    assert!(text.contains("size = 640 x 480\n"), "{text}");
    assert!(!text.contains("size = 320 x 240"), "{text}");
    // the second entry is only known by its common fields
    assert_eq!(text.matches("data_reference_index = 1").count(), 2, "{text}");
}

#[test]
fn meta_handler_stays_inside_meta() {
    let mut meta_body = vec![0, 0, 0, 0];
    meta_body.extend(hdlr(b"mdir"));
    let mut mdia_body = hdlr(b"vide");
    mdia_body.extend(boxed(b"meta", &meta_body));
    let stbl = boxed(b"stbl", &stsd(&[avc1(640, 480)]));
    mdia_body.extend(boxed(b"minf", &stbl));
    let text = run(&boxed(b"trak", &boxed(b"mdia", &mdia_body)));

    assert!(text.contains("size = 640 x 480\n"), "{text}");
}

#[test]
fn stsd_entry_count_mismatch() {
    let mut body = vec![0, 0, 0, 0];
    body.extend_from_slice(&2u32.to_be_bytes());
    body.extend(mp4a(48000));
    let mut mdia_body = hdlr(b"soun");
    mdia_body.extend(boxed(b"stsd", &body));
    let text = run(&boxed(b"trak", &boxed(b"mdia", &mdia_body)));

    assert!(text.contains("samplerate = 48000\n"), "{text}");
    assert!(text.contains("ERROR: invalid entry_count: 2, but 1 boxes present"), "{text}");
}

#[test]
fn data_handler_under_minf_keeps_the_media_handler() {
    // QuickTime layout: minf carries its own data handler `alis`
    let mut minf_body = hdlr(b"alis");
    minf_body.extend(boxed(b"stbl", &stsd(&[avc1(640, 480)])));
    let mut mdia_body = hdlr(b"vide");
    mdia_body.extend(boxed(b"minf", &minf_body));
    let text = run(&boxed(b"trak", &boxed(b"mdia", &mdia_body)));

    assert!(text.contains("handler_type = \"alis\""), "{text}");
    assert!(text.contains("size = 640 x 480\n"), "{text}");
    assert!(!text.contains("ERROR"), "{text}");
}

#[test]
fn meta_in_trak_before_mdia_does_not_set_the_handler() {
    let mut meta_body = vec![0, 0, 0, 0];
    meta_body.extend(hdlr(b"soun"));
    let mut trak_body = boxed(b"meta", &meta_body);
    let stbl = boxed(b"stbl", &stsd(&[avc1(640, 480)]));
    let mut mdia_body = hdlr(b"vide");
    mdia_body.extend(boxed(b"minf", &stbl));
    trak_body.extend(boxed(b"mdia", &mdia_body));
    let text = run(&boxed(b"trak", &trak_body));

    assert!(text.contains("size = 640 x 480\n"), "{text}");
    assert!(!text.contains("samplerate"), "{text}");
}

#[test]
fn only_the_first_mdia_handler_counts() {
    let mut mdia_body = hdlr(b"vide");
    mdia_body.extend(hdlr(b"soun"));
    let stbl = boxed(b"stbl", &stsd(&[avc1(640, 480)]));
    mdia_body.extend(boxed(b"minf", &stbl));
    let text = run(&boxed(b"trak", &boxed(b"mdia", &mdia_body)));

    assert!(text.contains("size = 640 x 480\n"), "{text}");
}
