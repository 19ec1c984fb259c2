use crate::boxes::{BoxKey, FourCC};

/// Static description of a well known box type.
///
/// Shown next to the box type when descriptions are on; it never changes
/// how a box is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxInfo {
    /// Class name from the defining standard, e.g. `FileTypeBox`.
    pub name: &'static str,
    /// Syntax the class extends (`Box`, `FullBox`, `VisualSampleEntry`...).
    pub kind: &'static str,
    /// Standard that defines the box.
    pub family: &'static str,
}

#[rustfmt::skip]
static BOX_TABLE: &[(&[u8; 4], &str, &str, &str)] = &[
    // ISO/IEC 14496-12 (ISO base media file format)
    (b"ftyp", "FileTypeBox", "Box", "ISO/IEC 14496-12"),
    (b"mdat", "MediaDataBox", "Box", "ISO/IEC 14496-12"),
    (b"pdin", "ProgressiveDownloadInfoBox", "FullBox", "ISO/IEC 14496-12"),
    (b"moov", "MovieBox", "Box", "ISO/IEC 14496-12"),
    (b"mvhd", "MovieHeaderBox", "FullBox", "ISO/IEC 14496-12"),
    (b"trak", "TrackBox", "Box", "ISO/IEC 14496-12"),
    (b"tkhd", "TrackHeaderBox", "FullBox", "ISO/IEC 14496-12"),
    (b"tref", "TrackReferenceBox", "Box", "ISO/IEC 14496-12"),
    (b"mdia", "MediaBox", "Box", "ISO/IEC 14496-12"),
    (b"mdhd", "MediaHeaderBox", "FullBox", "ISO/IEC 14496-12"),
    (b"hdlr", "HandlerBox", "FullBox", "ISO/IEC 14496-12"),
    (b"minf", "MediaInformationBox", "Box", "ISO/IEC 14496-12"),
    (b"nmhd", "NullMediaHeaderBox", "FullBox", "ISO/IEC 14496-12"),
    (b"elng", "ExtendedLanguageBox", "FullBox", "ISO/IEC 14496-12"),
    (b"stbl", "SampleTableBox", "Box", "ISO/IEC 14496-12"),
    (b"btrt", "BitRateBox", "Box", "ISO/IEC 14496-12"),
    (b"stsd", "SampleDescriptionBox", "FullBox", "ISO/IEC 14496-12"),
    (b"stdp", "DegradationPriorityBox", "FullBox", "ISO/IEC 14496-12"),
    (b"stts", "TimeToSampleBox", "FullBox", "ISO/IEC 14496-12"),
    (b"ctts", "CompositionOffsetBox", "FullBox", "ISO/IEC 14496-12"),
    (b"cslg", "CompositionToDecodeBox", "FullBox", "ISO/IEC 14496-12"),
    (b"stss", "SyncSampleBox", "FullBox", "ISO/IEC 14496-12"),
    (b"stsh", "ShadowSyncSampleBox", "FullBox", "ISO/IEC 14496-12"),
    (b"sdtp", "SampleDependencyTypeBox", "FullBox", "ISO/IEC 14496-12"),
    (b"edts", "EditBox", "Box", "ISO/IEC 14496-12"),
    (b"elst", "EditListBox", "FullBox", "ISO/IEC 14496-12"),
    (b"dinf", "DataInformationBox", "Box", "ISO/IEC 14496-12"),
    (b"url ", "DataEntryUrlBox", "FullBox", "ISO/IEC 14496-12"),
    (b"urn ", "DataEntryUrnBox", "FullBox", "ISO/IEC 14496-12"),
    (b"dref", "DataReferenceBox", "FullBox", "ISO/IEC 14496-12"),
    (b"stsz", "SampleSizeBox", "FullBox", "ISO/IEC 14496-12"),
    (b"stz2", "CompactSampleSizeBox", "FullBox", "ISO/IEC 14496-12"),
    (b"stsc", "SampleToChunkBox", "FullBox", "ISO/IEC 14496-12"),
    (b"stco", "ChunkOffsetBox", "FullBox", "ISO/IEC 14496-12"),
    (b"co64", "ChunkLargeOffsetBox", "FullBox", "ISO/IEC 14496-12"),
    (b"padb", "PaddingBitsBox", "FullBox", "ISO/IEC 14496-12"),
    (b"subs", "SubSampleInformationBox", "FullBox", "ISO/IEC 14496-12"),
    (b"saiz", "SampleAuxiliaryInformationSizesBox", "FullBox", "ISO/IEC 14496-12"),
    (b"saio", "SampleAuxiliaryInformationOffsetsBox", "FullBox", "ISO/IEC 14496-12"),
    (b"mvex", "MovieExtendsBox", "Box", "ISO/IEC 14496-12"),
    (b"mehd", "MovieExtendsHeaderBox", "FullBox", "ISO/IEC 14496-12"),
    (b"trex", "TrackExtendsBox", "FullBox", "ISO/IEC 14496-12"),
    (b"moof", "MovieFragmentBox", "Box", "ISO/IEC 14496-12"),
    (b"mfhd", "MovieFragmentHeaderBox", "FullBox", "ISO/IEC 14496-12"),
    (b"traf", "TrackFragmentBox", "Box", "ISO/IEC 14496-12"),
    (b"tfhd", "TrackFragmentHeaderBox", "FullBox", "ISO/IEC 14496-12"),
    (b"trun", "TrackRunBox", "FullBox", "ISO/IEC 14496-12"),
    (b"mfra", "MovieFragmentRandomAccessBox", "Box", "ISO/IEC 14496-12"),
    (b"tfra", "TrackFragmentRandomAccessBox", "FullBox", "ISO/IEC 14496-12"),
    (b"mfro", "MovieFragmentRandomAccessOffsetBox", "FullBox", "ISO/IEC 14496-12"),
    (b"tfdt", "TrackFragmentBaseMediaDecodeTimeBox", "FullBox", "ISO/IEC 14496-12"),
    (b"leva", "LevelAssignmentBox", "FullBox", "ISO/IEC 14496-12"),
    (b"trep", "TrackExtensionPropertiesBox", "FullBox", "ISO/IEC 14496-12"),
    (b"assp", "AlternativeStartupSequencePropertiesBox", "FullBox", "ISO/IEC 14496-12"),
    (b"sbgp", "SampleToGroupBox", "FullBox", "ISO/IEC 14496-12"),
    (b"sgpd", "SampleGroupDescriptionBox", "FullBox", "ISO/IEC 14496-12"),
    (b"udta", "UserDataBox", "Box", "ISO/IEC 14496-12"),
    (b"cprt", "CopyrightBox", "FullBox", "ISO/IEC 14496-12"),
    (b"tsel", "TrackSelectionBox", "FullBox", "ISO/IEC 14496-12"),
    (b"kind", "KindBox", "FullBox", "ISO/IEC 14496-12"),
    (b"meta", "MetaBox", "FullBox", "ISO/IEC 14496-12"),
    (b"xml ", "XMLBox", "FullBox", "ISO/IEC 14496-12"),
    (b"bxml", "BinaryXMLBox", "FullBox", "ISO/IEC 14496-12"),
    (b"iloc", "ItemLocationBox", "FullBox", "ISO/IEC 14496-12"),
    (b"pitm", "PrimaryItemBox", "FullBox", "ISO/IEC 14496-12"),
    (b"ipro", "ItemProtectionBox", "FullBox", "ISO/IEC 14496-12"),
    (b"fdel", "FDItemInfoExtension", "ItemInfoExtension", "ISO/IEC 14496-12"),
    (b"infe", "ItemInfoEntry", "FullBox", "ISO/IEC 14496-12"),
    (b"iinf", "ItemInfoBox", "FullBox", "ISO/IEC 14496-12"),
    (b"meco", "AdditionalMetadataContainerBox", "Box", "ISO/IEC 14496-12"),
    (b"mere", "MetaboxRelationBox", "FullBox", "ISO/IEC 14496-12"),
    (b"idat", "ItemDataBox", "Box", "ISO/IEC 14496-12"),
    (b"iref", "ItemReferenceBox", "FullBox", "ISO/IEC 14496-12"),
    (b"sinf", "ProtectionSchemeInfoBox", "Box", "ISO/IEC 14496-12"),
    (b"frma", "OriginalFormatBox", "Box", "ISO/IEC 14496-12"),
    (b"schm", "SchemeTypeBox", "FullBox", "ISO/IEC 14496-12"),
    (b"schi", "SchemeInformationBox", "Box", "ISO/IEC 14496-12"),
    (b"paen", "PartitionEntry", "Box", "ISO/IEC 14496-12"),
    (b"fiin", "FDItemInformationBox", "FullBox", "ISO/IEC 14496-12"),
    (b"fpar", "FilePartitionBox", "FullBox", "ISO/IEC 14496-12"),
    (b"fecr", "FECReservoirBox", "FullBox", "ISO/IEC 14496-12"),
    (b"segr", "FDSessionGroupBox", "Box", "ISO/IEC 14496-12"),
    (b"gitn", "GroupIdToNameBox", "FullBox", "ISO/IEC 14496-12"),
    (b"fire", "FileReservoirBox", "FullBox", "ISO/IEC 14496-12"),
    (b"strk", "SubTrack", "Box", "ISO/IEC 14496-12"),
    (b"stri", "SubTrackInformation", "FullBox", "ISO/IEC 14496-12"),
    (b"strd", "SubTrackDefinition", "Box", "ISO/IEC 14496-12"),
    (b"stsg", "SubTrackSampleGroupBox", "FullBox", "ISO/IEC 14496-12"),
    (b"rinf", "RestrictedSchemeInfoBox", "Box", "ISO/IEC 14496-12"),
    (b"stvi", "StereoVideoBox", "FullBox", "ISO/IEC 14496-12"),
    (b"sidx", "SegmentIndexBox", "FullBox", "ISO/IEC 14496-12"),
    (b"ssix", "SubsegmentIndexBox", "FullBox", "ISO/IEC 14496-12"),
    (b"prft", "ProducerReferenceTimeBox", "FullBox", "ISO/IEC 14496-12"),
    (b"icpv", "IncompleteAVCSampleEntry", "VisualSampleEntry", "ISO/IEC 14496-12"),
    (b"cinf", "CompleteTrackInfoBox", "Box", "ISO/IEC 14496-12"),
    (b"rtp ", "rtpmoviehintinformation", "Box", "ISO/IEC 14496-12"),
    (b"tims", "timescaleentry", "Box", "ISO/IEC 14496-12"),
    (b"tsro", "timeoffset", "Box", "ISO/IEC 14496-12"),
    (b"snro", "sequenceoffset", "Box", "ISO/IEC 14496-12"),
    (b"srtp", "SrtpHintSampleEntry", "SampleEntry", "ISO/IEC 14496-12"),
    (b"srpp", "SRTPProcessBox", "FullBox", "ISO/IEC 14496-12"),
    (b"hnti", "trackhintinformation", "Box", "ISO/IEC 14496-12"),
    (b"sdp ", "rtptracksdphintinformation", "Box", "ISO/IEC 14496-12"),
    (b"hinf", "hintstatisticsbox", "Box", "ISO/IEC 14496-12"),
    (b"trpy", "hintBytesSent", "Box", "ISO/IEC 14496-12"),
    (b"nump", "hintPacketsSent", "Box", "ISO/IEC 14496-12"),
    (b"tpyl", "hintBytesSent", "Box", "ISO/IEC 14496-12"),
    (b"totl", "hintBytesSent", "Box", "ISO/IEC 14496-12"),
    (b"npck", "hintPacketsSent", "Box", "ISO/IEC 14496-12"),
    (b"tpay", "hintBytesSent", "Box", "ISO/IEC 14496-12"),
    (b"maxr", "hintmaxrate", "Box", "ISO/IEC 14496-12"),
    (b"dmed", "hintmediaBytesSent", "Box", "ISO/IEC 14496-12"),
    (b"dimm", "hintimmediateBytesSent", "Box", "ISO/IEC 14496-12"),
    (b"drep", "hintrepeatedBytesSent", "Box", "ISO/IEC 14496-12"),
    (b"tmin", "hintminrelativetime", "Box", "ISO/IEC 14496-12"),
    (b"tmax", "hintmaxrelativetime", "Box", "ISO/IEC 14496-12"),
    (b"pmax", "hintlargestpacket", "Box", "ISO/IEC 14496-12"),
    (b"dmax", "hintlongestpacket", "Box", "ISO/IEC 14496-12"),
    (b"payt", "hintpayloadID", "Box", "ISO/IEC 14496-12"),
    (b"fdp ", "FDHintSampleEntry", "SampleEntry", "ISO/IEC 14496-12"),
    (b"fdsa", "FDsample", "Box", "ISO/IEC 14496-12"),
    (b"fdpa", "FDpacketBox", "Box", "ISO/IEC 14496-12"),
    (b"extr", "ExtraDataBox", "Box", "ISO/IEC 14496-12"),
    (b"feci", "FECInformationBox", "Box", "ISO/IEC 14496-12"),
    (b"rm2t", "MPEG2TSReceptionSampleEntry", "MPEG2TSSampleEntry", "ISO/IEC 14496-12"),
    (b"sm2t", "MPEG2TSServerSampleEntry", "MPEG2TSSampleEntry", "ISO/IEC 14496-12"),
    (b"tPAT", "PATBox", "Box", "ISO/IEC 14496-12"),
    (b"tPMT", "PMTBox", "Box", "ISO/IEC 14496-12"),
    (b"tOD ", "ODBox", "Box", "ISO/IEC 14496-12"),
    (b"tsti", "TSTimingBox", "Box", "ISO/IEC 14496-12"),
    (b"istm", "InitialSampleTimeBox", "Box", "ISO/IEC 14496-12"),
    (b"pm2t", "ProtectedMPEG2TransportStreamSampleEntry", "MPEG2TransportStreamSampleEntry", "ISO/IEC 14496-12"),
    (b"rrtp", "ReceivedRtpHintSampleEntry", "SampleEntry", "ISO/IEC 14496-12"),
    (b"tssy", "timestampsynchrony", "Box", "ISO/IEC 14496-12"),
    (b"rssr", "ReceivedSsrcBox", "Box", "ISO/IEC 14496-12"),
    (b"rtpx", "rtphdrextTLV", "Box", "ISO/IEC 14496-12"),
    (b"rcsr", "receivedCSRC", "Box", "ISO/IEC 14496-12"),
    (b"rsrp", "ReceivedSrtpHintSampleEntry", "SampleEntry", "ISO/IEC 14496-12"),
    (b"ccid", "ReceivedCryptoContextIdBox", "Box", "ISO/IEC 14496-12"),
    (b"sroc", "RolloverCounterBox", "Box", "ISO/IEC 14496-12"),
    (b"roll", "AudioRollRecoveryEntry", "AudioSampleGroupEntry", "ISO/IEC 14496-12"),
    (b"prol", "AudioPreRollEntry", "AudioSampleGroupEntry", "ISO/IEC 14496-12"),
    (b"rash", "RateShareEntry", "SampleGroupDescriptionEntry", "ISO/IEC 14496-12"),
    (b"alst", "AlternativeStartupEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-12"),
    (b"rap ", "VisualRandomAccessEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-12"),
    (b"tele", "TemporalLevelEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-12"),
    (b"sap ", "SAPEntry", "SampleGroupDescriptionEntry", "ISO/IEC 14496-12"),
    (b"vmhd", "VideoMediaHeaderBox", "FullBox", "ISO/IEC 14496-12"),
    (b"pasp", "PixelAspectRatioBox", "Box", "ISO/IEC 14496-12"),
    (b"clap", "CleanApertureBox", "Box", "ISO/IEC 14496-12"),
    (b"colr", "ColourInformationBox", "Box", "ISO/IEC 14496-12"),
    (b"smhd", "SoundMediaHeaderBox", "FullBox", "ISO/IEC 14496-12"),
    (b"srat", "SamplingRateBox", "FullBox", "ISO/IEC 14496-12"),
    (b"chnl", "ChannelLayout", "FullBox", "ISO/IEC 14496-12"),
    (b"dmix", "DownMixInstructions", "FullBox", "ISO/IEC 14496-12"),
    (b"tlou", "TrackLoudnessInfo", "LoudnessBaseBox", "ISO/IEC 14496-12"),
    (b"alou", "AlbumLoudnessInfo", "LoudnessBaseBox", "ISO/IEC 14496-12"),
    (b"ludt", "LoudnessBox", "Box", "ISO/IEC 14496-12"),
    (b"metx", "XMLMetaDataSampleEntry", "MetaDataSampleEntry", "ISO/IEC 14496-12"),
    (b"txtC", "TextConfigBox", "FullBox", "ISO/IEC 14496-12"),
    (b"mett", "TextMetaDataSampleEntry", "MetaDataSampleEntry", "ISO/IEC 14496-12"),
    (b"uri ", "URIBox", "FullBox", "ISO/IEC 14496-12"),
    (b"uriI", "URIInitBox", "FullBox", "ISO/IEC 14496-12"),
    (b"urim", "URIMetaSampleEntry", "MetaDataSampleEntry", "ISO/IEC 14496-12"),
    (b"hmhd", "HintMediaHeaderBox", "FullBox", "ISO/IEC 14496-12"),
    (b"stxt", "SimpleTextSampleEntry", "PlainTextSampleEntry", "ISO/IEC 14496-12"),
    (b"sthd", "SubtitleMediaHeaderBox", "FullBox", "ISO/IEC 14496-12"),
    (b"stpp", "XMLSubtitleSampleEntry", "SubtitleSampleEntry", "ISO/IEC 14496-12"),
    (b"sbtt", "TextSubtitleSampleEntry", "SubtitleSampleEntry", "ISO/IEC 14496-12"),
    (b"free", "FreeSpaceBox", "Box", "ISO/IEC 14496-12"),
    (b"skip", "FreeSpaceBox", "Box", "ISO/IEC 14496-12"),

    // ISO/IEC 14496-14 (MP4 file format)
    (b"iods", "ObjectDescriptorBox", "FullBox", "ISO/IEC 14496-14"),
    (b"esds", "ESDBox", "FullBox", "ISO/IEC 14496-14"),
    (b"mp4v", "MP4VisualSampleEntry", "VisualSampleEntry", "ISO/IEC 14496-14"),
    (b"mp4a", "MP4AudioSampleEntry", "AudioSampleEntry", "ISO/IEC 14496-14"),
    (b"mp4s", "MpegSampleEntry", "SampleEntry", "ISO/IEC 14496-14"),

    // ISO/IEC 14496-15 (NAL unit structured video)
    (b"avcC", "AVCConfigurationBox", "Box", "ISO/IEC 14496-15"),
    (b"m4ds", "MPEG4ExtensionDescriptorsBox", "Box", "ISO/IEC 14496-15"),
    (b"avc1", "AVCSampleEntry", "VisualSampleEntry", "ISO/IEC 14496-15"),
    (b"avc3", "AVCSampleEntry", "VisualSampleEntry", "ISO/IEC 14496-15"),
    (b"avc2", "AVC2SampleEntry", "VisualSampleEntry", "ISO/IEC 14496-15"),
    (b"avc4", "AVC2SampleEntry", "VisualSampleEntry", "ISO/IEC 14496-15"),
    (b"avcp", "AVCParameterSampleEntry", "VisualSampleEntry", "ISO/IEC 14496-15"),
    (b"avss", "AVCSubSequenceEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-15"),
    (b"avll", "AVCLayerEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-15"),
    (b"svcC", "SVCConfigurationBox", "Box", "ISO/IEC 14496-15"),
    (b"seib", "ScalabilityInformationSEIBox", "Box", "ISO/IEC 14496-15"),
    (b"svcP", "SVCPriorityAssignmentBox", "Box", "ISO/IEC 14496-15"),
    (b"svc1", "SVCSampleEntry", "VisualSampleEntry", "ISO/IEC 14496-15"),
    (b"svc2", "SVCSampleEntry", "VisualSampleEntry", "ISO/IEC 14496-15"),
    (b"tiri", "TierInfoBox", "Box", "ISO/IEC 14496-15"),
    (b"tibr", "TierBitRateBox", "Box", "ISO/IEC 14496-15"),
    (b"svpr", "PriorityRangeBox", "Box", "ISO/IEC 14496-15"),
    (b"svop", "SVCDependencyRangeBox", "Box", "ISO/IEC 14496-15"),
    (b"svip", "InitialParameterSetBox", "Box", "ISO/IEC 14496-15"),
    (b"rrgn", "RectRegionBox", "Box", "ISO/IEC 14496-15"),
    (b"buff", "BufferingBox", "Box", "ISO/IEC 14496-15"),
    (b"ldep", "TierDependencyBox", "Box", "ISO/IEC 14496-15"),
    (b"iroi", "IroiInfoBox", "Box", "ISO/IEC 14496-15"),
    (b"tran", "TranscodingInfoBox", "Box", "ISO/IEC 14496-15"),
    (b"scif", "ScalableGroupEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-15"),
    (b"mvif", "MultiviewGroupEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-15"),
    (b"scnm", "ScalableNALUMapEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-15"),
    (b"dtrt", "DecodeRetimingEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-15"),
    (b"vipr", "ViewPriorityEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-15"),
    (b"sstl", "SVCSubTrackLayerBox", "FullBox", "ISO/IEC 14496-15"),
    (b"mstv", "MVCSubTrackViewBox", "FullBox", "ISO/IEC 14496-15"),
    (b"stti", "SubTrackTierBox", "FullBox", "ISO/IEC 14496-15"),
    (b"stmg", "MVCSubTrackMultiviewGroupBox", "FullBox", "ISO/IEC 14496-15"),
    (b"svmC", "SVCMetadataSampleConfigBox", "FullBox", "ISO/IEC 14496-15"),
    (b"qlif", "SVCPriorityLayerInfoBox", "Box", "ISO/IEC 14496-15"),
    (b"svcM", "SVCMetadataSampleEntry", "MetadataSampleEntry", "ISO/IEC 14496-15"),
    (b"icam", "IntrinsicCameraParametersBox", "FullBox", "ISO/IEC 14496-15"),
    (b"ecam", "ExtrinsicCameraParametersBox", "FullBox", "ISO/IEC 14496-15"),
    (b"vwid", "ViewIdentifierBox", "FullBox", "ISO/IEC 14496-15"),
    (b"mvcC", "MVCConfigurationBox", "Box", "ISO/IEC 14496-15"),
    (b"vsib", "ViewScalabilityInformationSEIBox", "Box", "ISO/IEC 14496-15"),
    (b"mvcg", "MultiviewGroupBox", "FullBox", "ISO/IEC 14496-15"),
    (b"swtc", "MultiviewGroupRelationBox", "FullBox", "ISO/IEC 14496-15"),
    (b"vwdi", "MultiviewSceneInfoBox", "Box", "ISO/IEC 14496-15"),
    (b"mvcP", "MVCViewPriorityAssignmentBox", "Box", "ISO/IEC 14496-15"),
    (b"hvcC", "HEVCConfigurationBox", "Box", "ISO/IEC 14496-15"),
    (b"hvc1", "HEVCSampleEntry", "VisualSampleEntry", "ISO/IEC 14496-15"),
    (b"hev1", "HEVCSampleEntry", "VisualSampleEntry", "ISO/IEC 14496-15"),
    (b"sync", "SyncSampleEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-15"),
    (b"tscl", "TemporalLayerEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-15"),
    (b"tsas", "TemporalSubLayerEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-15"),
    (b"stsa", "StepwiseTemporalLayerEntry", "VisualSampleGroupEntry", "ISO/IEC 14496-15"),
    (b"sdep", "SampleDependencyBox", "FullBox", "ISO/IEC 14496-15"),
    (b"seii", "SeiInformationBox", "Box", "ISO/IEC 14496-15"),
    (b"mvci", "MultiviewInformationBox", "FullBox", "ISO/IEC 14496-15"),
    (b"mvra", "MultiviewRelationAttributeBox", "FullBox", "ISO/IEC 14496-15"),

    // ISO/IEC 23001-7 (common encryption)
    (b"seig", "CencSampleEncryptionInformationGroupEntry", "SampleGroupEntry", "ISO/IEC 23001-7"),
    (b"senc", "SampleEncryptionBox", "FullBox", "ISO/IEC 23001-7"),
    (b"pssh", "ProtectionSystemSpecificHeaderBox", "FullBox", "ISO/IEC 23001-7"),
    (b"tenc", "TrackEncryptionBox", "FullBox", "ISO/IEC 23001-7"),

    // ISO/IEC 23008-12 (HEIF)
    (b"ccst", "CodingConstraintsBox", "FullBox", "ISO/IEC 23008-12"),
    (b"vsmi", "VisualSampleToMetadataItemEntry", "VisualSampleGroupEntry", "ISO/IEC 23008-12"),
    (b"mint", "MetadataIntegrityBox", "FullBox", "ISO/IEC 23008-12"),

    // Opus in ISOBMFF
    (b"Opus", "OpusSampleEntry", "AudioSampleEntry", "Opus"),
    (b"dOps", "OpusSpecificBox", "Box", "Opus"),

    // AV1 ISOBMFF binding
    (b"av01", "AV1SampleEntry", "VisualSampleEntry", "AV1"),
    (b"av1C", "AV1CodecConfigurationBox", "Box", "AV1"),
    (b"av1f", "AV1ForwardKeyFrameSampleGroupEntry", "VisualSampleGroupEntry", "AV1"),
    (b"av1m", "AV1MultiFrameSampleGroupEntry", "VisualSampleGroupEntry", "AV1"),
    (b"av1s", "AV1SwitchFrameSampleGroupEntry", "VisualSampleGroupEntry", "AV1"),
    (b"av1M", "AV1MetadataSampleGroupEntry", "VisualSampleGroupEntry", "AV1"),

    // MP4RA
    (b"ID32", "ID3v2Box", "FullBox", "MP4RA"),

    // QuickTime file format
    (b"styp", "SegmentTypeBox", "Box", "ISO/IEC 14496-12"),
    (b"wide", "WideBox", "Box", "QTFF"),
    (b"ilst", "MetadataItemListBox", "Box", "QTFF"),
    (b"data", "MetadataValueBox", "Box", "QTFF"),
];

pub fn lookup(typ: FourCC) -> Option<BoxInfo> {
    BOX_TABLE
        .iter()
        .find(|(cc, ..)| **cc == typ.0)
        .map(|&(_, name, kind, family)| BoxInfo { name, kind, family })
}

pub fn lookup_key(key: &BoxKey) -> Option<BoxInfo> {
    match key {
        BoxKey::FourCC(cc) => lookup(*cc),
        BoxKey::Uuid(_) => None,
    }
}

/// Boxes whose body is nothing but a sequence of child boxes.
pub fn is_container(typ: FourCC) -> bool {
    matches!(
        &typ.0,
        b"moov"
            | b"trak"
            | b"mdia"
            | b"minf"
            | b"dinf"
            | b"stbl"
            | b"mvex"
            | b"moof"
            | b"traf"
            | b"mfra"
            | b"meco"
            | b"edts"
            | b"udta"
            | b"sinf"
            | b"schi"
            | b"ipro"
            | b"iprp"
            | b"ipco"
            | b"tref"
            | b"rinf"
            | b"srpp"
            | b"strk"
            | b"strd"
    )
}
