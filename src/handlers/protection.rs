//! Common encryption boxes.

use crate::error::Result;
use crate::fullbox::{FullBoxRules, parse_fullbox_with};
use crate::node::Parser;

pub fn frma(ps: &mut Parser<'_>) -> Result<()> {
    let data_format = ps.fourcc()?;
    ps.field("data_format", format!("{data_format:?}"))
}

pub fn schm(ps: &mut Parser<'_>) -> Result<()> {
    let (_, flags) = parse_fullbox_with(ps, FullBoxRules::default().known_flags(1))?;
    let scheme_type = ps.fourcc()?;
    ps.field("scheme_type", format!("{scheme_type:?}"))?;
    let scheme_version = ps.u32()?;
    ps.field("scheme_version", format!("{scheme_version:#x}"))?;
    if flags & 1 != 0 {
        let uri = ps.string()?;
        ps.field("scheme_uri", format!("{uri:?}"))?;
    }
    Ok(())
}

pub fn tenc(ps: &mut Parser<'_>) -> Result<()> {
    let (version, _) = parse_fullbox_with(ps, FullBoxRules::default().max_version(1))?;
    let reserved_1 = ps.u8()?;
    ps.reserved("reserved_1", reserved_1, 0)?;
    if version > 0 {
        ps.bits(1, |ps, br| {
            ps.field("default_crypt_byte_block", br.read(4)?)?;
            ps.field("default_skip_byte_block", br.read(4)?)
        })?;
    } else {
        let reserved_2 = ps.u8()?;
        ps.reserved("reserved_2", reserved_2, 0)?;
    }
    let is_protected = ps.u8()?;
    ps.field("default_isProtected", is_protected)?;
    let iv_size = ps.u8()?;
    ps.field("default_Per_Sample_IV_Size", iv_size)?;
    let kid = ps.read(16)?;
    ps.field("default_KID", hex::encode(kid))?;
    if is_protected == 1 && iv_size == 0 {
        let len = ps.u8()? as usize;
        let iv = ps.read(len)?;
        ps.field("default_constant_IV", hex::encode(iv))?;
    }
    Ok(())
}

/// DASH-IF registered content protection system identifiers.
const PROTECTION_SYSTEMS: &[(&str, &str)] = &[
    ("6dd8b3c3-45f4-4a68-bf3a-64168d01a4a6", "ABV DRM (MoDRM)"),
    ("f239e769-efa3-4850-9c16-a903c6932efb", "Adobe Primetime DRM version 4"),
    ("616c7469-6361-7374-2d50-726f74656374", "Alticast"),
    ("94ce86fb-07ff-4f43-adb8-93d2fa968ca2", "Apple FairPlay"),
    ("279fe473-512c-48fe-ade8-d176fee6b40f", "Arris Titanium"),
    ("3d5e6d35-9b9a-41e8-b843-dd3c6e72c42c", "ChinaDRM"),
    ("3ea8778f-7742-4bf9-b18b-e834b2acbd47", "Clear Key AES-128"),
    ("be58615b-19c4-4684-88b3-c8c57e99e957", "Clear Key SAMPLE-AES"),
    ("e2719d58-a985-b3c9-781a-b030af78d30e", "Clear Key DASH-IF"),
    ("644fe7b5-260f-4fad-949a-0762ffb054b4", "CMLA (OMA DRM)"),
    ("37c33258-7b99-4c7e-b15d-19af74482154", "Commscope Titanium V3"),
    ("45d481cb-8fe0-49c0-ada9-ab2d2455b2f2", "CoreCrypt"),
    ("dcf4e3e3-62f1-5818-7ba6-0a6fe33ff3dd", "DigiCAP SmartXess"),
    ("35bf197b-530e-42d7-8b65-1b4bf415070f", "DivX DRM Series 5"),
    ("80a6be7e-1448-4c37-9e70-d5aebe04c8d2", "Irdeto Content Protection"),
    ("5e629af5-38da-4063-8977-97ffbd9902d4", "Marlin Adaptive Streaming Simple Profile V1.0"),
    ("9a04f079-9840-4286-ab92-e65be0885f95", "Microsoft PlayReady"),
    ("6a99532d-869f-5922-9a91-113ab7b1e2f3", "MobiTV DRM"),
    ("adb41c24-2dbf-4a6d-958b-4457c0d27b95", "Nagra MediaAccess PRM 3.0"),
    ("1f83e1e8-6ee9-4f0d-ba2f-5ec4e3ed1a66", "SecureMedia"),
    ("992c46e6-c437-4899-b6a0-50fa91ad0e39", "SecureMedia SteelKnot"),
    ("a68129d3-575b-4f1a-9cba-3223846cf7c3", "Synamedia/Cisco/NDS VideoGuard DRM"),
    ("aa11967f-cc01-4a4a-8e99-c5d3dddfea2d", "Unitend DRM (UDRM)"),
    ("9a27dd82-fde2-4725-8cbc-4234aa06ec09", "Verimatrix VCAS"),
    ("b4413586-c58c-ffb0-94a5-d4896c1af6c3", "Viaccess-Orca DRM (VODRM)"),
    ("793b7956-9f94-4946-a942-23e7ef7e44b4", "VisionCrypt"),
    ("1077efec-c0b2-4d02-ace3-3c1e52e2fb4b", "W3C Common PSSH box"),
    ("edef8ba9-79d6-4ace-a3c8-27dcd51d21ed", "Widevine Content Protection"),
];

pub fn protection_system_name(system_id: &str) -> Option<&'static str> {
    PROTECTION_SYSTEMS
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(system_id))
        .map(|&(_, name)| name)
}

pub fn pssh(ps: &mut Parser<'_>) -> Result<()> {
    let (version, _) = parse_fullbox_with(ps, FullBoxRules::default().max_version(1))?;
    let system_id = ps.uuid()?.to_string();
    let name = protection_system_name(&system_id).map(str::to_string);
    ps.field_desc("SystemID", &system_id, name)?;
    if version > 0 {
        let kid_count = ps.u32()?;
        for _ in 0..kid_count {
            let kid = ps.read(16)?;
            ps.print(format!("- KID: {}", hex::encode(kid)))?;
        }
    }
    let len = ps.u32()? as usize;
    let data = ps.read(len)?;
    ps.print("Data =")?;
    ps.in_object(|ps| ps.hexdump(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_ids_match_case_insensitively() {
        assert_eq!(
            protection_system_name("EDEF8BA9-79D6-4ACE-A3C8-27DCD51D21ED"),
            Some("Widevine Content Protection")
        );
        assert_eq!(protection_system_name("00000000-0000-0000-0000-000000000000"), None);
    }
}
