use mp4dissect::descriptors::{DEFAULT, DescriptorFn};
use mp4dissect::{DescriptorRegistry, Dissector, Namespace, Options, Output, Parser, RegistryError, Result};

fn boxed(typ: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&((8 + body.len()) as u32).to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(body);
    v
}

fn options() -> Options {
    Options {
        show_offsets: false,
        show_lengths: false,
        ..Options::default()
    }
}

fn dissect(dx: &Dissector, data: &[u8]) -> String {
    dx.dissect(data).unwrap();
    dx.output().take_string()
}

fn standard() -> Dissector {
    Dissector::with_output(options(), Output::buffer()).unwrap()
}

fn read_a(ps: &mut Parser<'_>) -> Result<()> {
    let v = ps.u8()?;
    ps.field("a", v)
}

fn read_b(ps: &mut Parser<'_>) -> Result<()> {
    let v = ps.u8()?;
    ps.field("b", v)
}

fn read_root(ps: &mut Parser<'_>) -> Result<()> {
    let v = ps.u8()?;
    ps.field("root", v)
}

fn chain_namespace() -> Namespace {
    Namespace::new(DEFAULT)
        .root("Root")
        .class(0x21, "A", "Root")
        .class(0x22, "B", "A")
}

fn custom(handlers: &[(&str, DescriptorFn)]) -> Dissector {
    let registry = DescriptorRegistry::new(vec![chain_namespace()], handlers).unwrap();
    Dissector::with_output(options(), Output::buffer())
        .unwrap()
        .with_descriptors(registry)
}

#[test]
fn leaf_without_handler_reaches_nearest_handled_ancestor() {
    let dx = custom(&[("A", read_a)]);
    let text = dissect(&dx, &boxed(b"m4ds", &[0x22, 0x02, 0x07, 0x09]));
    assert!(text.contains("    [0x22] B -> A -> Root\n"), "{text}");
    assert!(text.contains("        a = 7\n"), "{text}");
    assert!(!text.contains("root ="), "{text}");
    // what the handler leaves is dumped
    assert!(text.contains("        09 "), "{text}");
}

#[test]
fn chain_stops_at_first_ancestor_without_handler() {
    let dx = custom(&[("B", read_b), ("Root", read_root)]);
    let text = dissect(&dx, &boxed(b"m4ds", &[0x22, 0x02, 0x07, 0x09]));
    assert!(text.contains("        b = 7\n"), "{text}");
    assert!(!text.contains("root ="), "{text}");
}

#[test]
fn handlers_run_most_specific_first() {
    let dx = custom(&[("B", read_b), ("A", read_a), ("Root", read_root)]);
    let text = dissect(&dx, &boxed(b"m4ds", &[0x22, 0x03, 1, 2, 3]));
    assert!(text.contains("        b = 1\n        a = 2\n        root = 3\n"), "{text}");
}

#[test]
fn unassigned_tags_are_labelled() {
    let dx = standard();
    // 0x70 falls in the extension range, 0xC5 is user private in the extension range too
    let text = dissect(&dx, &boxed(b"m4ds", &[0x70, 0x00, 0xC5, 0x00, 0x15, 0x00]));
    assert!(
        text.contains("[0x70] reserved for ISO use -> ExtensionDescriptor -> BaseDescriptor\n"),
        "{text}"
    );
    assert!(text.contains("[0xc5] user private -> ExtensionDescriptor -> BaseDescriptor\n"), "{text}");
    assert!(text.contains("[0x15] reserved for ISO use\n"), "{text}");
}

#[test]
fn non_minimal_size_is_flagged() {
    let dx = standard();
    let mut body = vec![0x05, 0x80, 0x80, 0x05];
    body.extend_from_slice(&[1, 2, 3, 4, 5]);
    body.extend_from_slice(&[0x05, 0x01, 0xff]);
    let text = dissect(&dx, &boxed(b"m4ds", &body));
    assert!(
        text.contains("[0x05] DecoderSpecificInfo -> BaseDescriptor (3 length bytes)\n"),
        "{text}"
    );
    assert!(text.contains("01 02 03 04  05"), "{text}");
    assert!(text.contains("[0x05] DecoderSpecificInfo -> BaseDescriptor\n"), "{text}");
}

#[test]
fn size_over_32_bits_is_a_framing_error() {
    let dx = standard();
    let text = dissect(&dx, &boxed(b"m4ds", &[0x05, 0xff, 0xff, 0xff, 0xff, 0x7f]));
    assert!(
        text.contains("ERROR: invalid framing: descriptor size exceeds 32 bits after 5 bytes"),
        "{text}"
    );
}

#[test]
fn forbidden_tags() {
    let dx = standard();
    let text = dissect(&dx, &boxed(b"m4ds", &[0x00, 0x00]));
    assert!(text.contains("ERROR: invalid framing: forbidden descriptor tag 0x00"), "{text}");
}

fn aac_esds() -> Vec<u8> {
    let mut body = vec![0, 0, 0, 0];
    body.extend_from_slice(&[0x03, 25, 0x00, 0x01, 0x00]);
    // DecoderConfigDescriptor: AAC, audio stream
    body.extend_from_slice(&[0x04, 17, 0x40, 0x15, 0x00, 0x00, 0x00]);
    body.extend_from_slice(&128_000u32.to_be_bytes());
    body.extend_from_slice(&128_000u32.to_be_bytes());
    body.extend_from_slice(&[0x05, 0x02, 0x12, 0x10]);
    // SLConfigDescriptor, predefined MP4
    body.extend_from_slice(&[0x06, 0x01, 0x02]);
    boxed(b"esds", &body)
}

#[test]
fn esds_with_aac_config() {
    let dx = standard();
    let text = dissect(&dx, &aac_esds());
    let expected = [
        "[esds] ESDBox (FullBox, ISO/IEC 14496-14)",
        "        [0x03] ES_Descriptor -> BaseDescriptor",
        "            ES_ID = 1",
        "            streamPriority = 0",
        "            [0x04] DecoderConfigDescriptor -> BaseDescriptor",
        "                objectTypeIndication = 0x40 (AAC)",
        "                streamType = 0x05 (AudioStream)",
        "                upStream = false",
        "                bufferSizeDB = 0",
        "                maxBitrate = 128000",
        "                avgBitrate = 128000",
        "                [0x05] DecoderSpecificInfo -> BaseDescriptor",
        "            [0x06] SLConfigDescriptor -> BaseDescriptor",
        "                predefined = 2 (Reserved for use in MP4 files)",
    ];
    for line in expected {
        assert!(text.contains(&format!("{line}\n")), "missing {line:?} in\n{text}");
    }
    assert!(!text.contains("ERROR"), "{text}");
    assert!(!text.contains("WARNING"), "{text}");
}

#[test]
fn unexpected_tag_warns_and_still_parses() {
    let dx = standard();
    let mut body = vec![0, 0, 0, 0];
    body.extend_from_slice(&[0x0e, 0x04, 0, 0, 0, 2]);
    let text = dissect(&dx, &boxed(b"esds", &body));
    assert!(text.contains("WARNING: expected descriptor tag 0x03, found 0x0e"), "{text}");
    assert!(text.contains("Track_ID = 2"), "{text}");
}

#[test]
fn invalid_object_type_is_recovered_locally() {
    let dx = standard();
    let mut body = vec![0x04, 13, 0x00, 0x15];
    body.extend_from_slice(&[0; 11]);
    body.extend_from_slice(&[0x06, 0x01, 0x02]);
    let text = dissect(&dx, &boxed(b"m4ds", &body));
    assert!(text.contains("ERROR: invalid objectTypeIndication: 0x00 (forbidden)"), "{text}");
    assert!(text.contains("predefined = 2"), "{text}");
}

#[test]
fn namespace_validation() {
    let no_handlers: &[(&str, DescriptorFn)] = &[];

    let two_roots = Namespace::new(DEFAULT).root("R1").root("R2");
    assert!(matches!(
        DescriptorRegistry::new(vec![two_roots], no_handlers),
        Err(RegistryError::RootCount { found: 2, .. })
    ));

    let dup_tag = Namespace::new(DEFAULT)
        .root("R")
        .class(1, "X", "R")
        .class(1, "Y", "R");
    assert!(matches!(
        DescriptorRegistry::new(vec![dup_tag], no_handlers),
        Err(RegistryError::DuplicateTag { tag: 1, .. })
    ));

    let dangling = Namespace::new(DEFAULT).root("R").class(1, "X", "Nope");
    assert!(matches!(
        DescriptorRegistry::new(vec![dangling], no_handlers),
        Err(RegistryError::UnknownBase { .. })
    ));

    assert_eq!(
        DescriptorRegistry::new(vec![chain_namespace()], &[("Zed", read_a)]).err(),
        Some(RegistryError::UnknownHandler("Zed".to_string()))
    );
}
