// Unit tests for domain models

#[cfg(test)]
mod tests {
    use crate::domain::errors::*;
    use crate::domain::model::*;

    const SAMPLE_MANIFEST: &str = r#"[
        {
            "original": "videoA.mp4",
            "clips": [
                { "start": "00:05:00", "end": "00:06:20" },
                { "start": "00:10:00", "end": "00:31:56", "sha256_checksum": "abc123" }
            ]
        },
        {
            "original": "nested/videoB.mkv",
            "clips": []
        }
    ]"#;

    #[test]
    fn test_timecode_parse_valid() {
        let time = Timecode::parse("01:02:03").unwrap();
        assert_eq!(time.as_seconds(), 3723);
        assert_eq!(Timecode::parse("00:00:00").unwrap().as_seconds(), 0);
        assert_eq!(Timecode::parse("99:59:59").unwrap().as_seconds(), 359_999);
    }

    #[test]
    fn test_timecode_parse_invalid() {
        assert!(Timecode::parse("invalid").is_err());
        assert!(Timecode::parse("1:02:03").is_err()); // Missing leading zero
        assert!(Timecode::parse("01:02").is_err());
        assert!(Timecode::parse("01:60:00").is_err());
        assert!(Timecode::parse("01:00:60").is_err());
        assert!(Timecode::parse("01:00:00.5").is_err());
        assert!(Timecode::parse("+1:00:00").is_err());
        assert!(Timecode::parse("").is_err());
    }

    #[test]
    fn test_timecode_display_roundtrip() {
        let time = Timecode::from_components(1, 2, 3);
        assert_eq!(time.to_string(), "01:02:03");
        assert_eq!("00:06:20".parse::<Timecode>().unwrap().to_string(), "00:06:20");
    }

    #[test]
    fn test_timecode_ordering_matches_lexical() {
        let a = Timecode::parse("00:09:59").unwrap();
        let b = Timecode::parse("00:10:00").unwrap();
        assert!(a < b);
        assert!("00:09:59" < "00:10:00");
    }

    #[test]
    fn test_clip_range_rejects_reversed_and_empty() {
        assert!(ClipRange::parse("00:00:10", "00:00:20").is_ok());
        assert!(matches!(
            ClipRange::parse("00:00:20", "00:00:10"),
            Err(DomainError::InvalidRange { .. })
        ));
        assert!(matches!(
            ClipRange::parse("00:00:10", "00:00:10"),
            Err(DomainError::InvalidRange { .. })
        ));
        assert!(matches!(
            ClipRange::parse("0:00:10", "00:00:20"),
            Err(DomainError::InvalidTimecode(_))
        ));
    }

    #[test]
    fn test_clip_range_duration() {
        let range = ClipRange::parse("00:05:00", "00:06:20").unwrap();
        assert_eq!(range.duration_seconds(), 80);
    }

    #[test]
    fn test_manifest_parse_sample() {
        let manifest = Manifest::from_json_str(SAMPLE_MANIFEST).unwrap();
        assert_eq!(manifest.entries.len(), 2);
        assert_eq!(manifest.clip_count(), 2);

        let entry = manifest.entry("videoA.mp4").unwrap();
        assert_eq!(entry.clips[0].start, "00:05:00");
        assert_eq!(entry.clips[0].sha256_checksum, None);
        assert_eq!(entry.clips[1].sha256_checksum.as_deref(), Some("abc123"));
        assert!(manifest.entry("videoC.mp4").is_none());
    }

    #[test]
    fn test_manifest_parse_missing_fields() {
        let missing_original = r#"[{ "clips": [] }]"#;
        assert!(matches!(
            Manifest::from_json_str(missing_original),
            Err(DomainError::Parse(_))
        ));

        let missing_end = r#"[{ "original": "a.mp4", "clips": [{ "start": "00:00:01" }] }]"#;
        let err = Manifest::from_json_str(missing_end).unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
        assert!(err.to_string().contains("end"));

        let missing_clips = r#"[{ "original": "a.mp4" }]"#;
        assert!(Manifest::from_json_str(missing_clips).is_err());
    }

    #[test]
    fn test_manifest_parse_rejects_non_array() {
        assert!(Manifest::from_json_str(r#"{ "original": "a.mp4" }"#).is_err());
        assert!(Manifest::from_json_str("").is_err());
    }

    #[test]
    fn test_manifest_parse_rejects_duplicate_originals() {
        let duplicated = r#"[
            { "original": "a.mp4", "clips": [] },
            { "original": "a.mp4", "clips": [] }
        ]"#;
        let err = Manifest::from_json_str(duplicated).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_manifest_legacy_checksum_placeholder_is_absent() {
        let legacy = r#"[{ "original": "a.mp4", "clips": [
            { "start": "00:00:01", "end": "00:00:02", "sha256_checksum": "none" },
            { "start": "00:00:03", "end": "00:00:04", "sha256_checksum": null },
            { "start": "00:00:05", "end": "00:00:06", "sha256_checksum": "" }
        ] }]"#;
        let manifest = Manifest::from_json_str(legacy).unwrap();
        assert!(manifest.entries[0]
            .clips
            .iter()
            .all(|clip| clip.sha256_checksum.is_none()));
    }

    #[test]
    fn test_manifest_roundtrip_preserves_order() {
        let manifest = Manifest::from_json_str(SAMPLE_MANIFEST).unwrap();
        let serialized = manifest.to_json_string().unwrap();
        let reloaded = Manifest::from_json_str(&serialized).unwrap();
        assert_eq!(manifest, reloaded);
        assert_eq!(reloaded.entries[1].original, "nested/videoB.mkv");
    }

    #[test]
    fn test_manifest_serialization_omits_absent_checksum() {
        let mut manifest = Manifest::new();
        manifest.add_clip("a.mp4", "00:00:01", "00:00:02").unwrap();
        let serialized = manifest.to_json_string().unwrap();
        assert!(!serialized.contains("sha256_checksum"));
        assert!(serialized.ends_with("]\n"));
        assert!(serialized.contains("\n    {"));
    }

    #[test]
    fn test_add_clip_creates_entry_on_empty_manifest() {
        let mut manifest = Manifest::new();
        let outcome = manifest
            .add_clip("videoC.mp4", "00:00:10", "00:00:20")
            .unwrap();

        assert_eq!(
            outcome,
            AddOutcome::Added {
                clip_index: 0,
                entry_created: true
            }
        );
        assert_eq!(manifest.entries.len(), 1);
        assert_eq!(manifest.entries[0].original, "videoC.mp4");
        assert_eq!(
            manifest.entries[0].clips,
            vec![ClipSpec::new("00:00:10", "00:00:20")]
        );
    }

    #[test]
    fn test_add_clip_appends_last_and_keeps_existing_indices() {
        let mut manifest = Manifest::from_json_str(SAMPLE_MANIFEST).unwrap();
        let before = manifest.entries[0].clips.clone();

        let outcome = manifest
            .add_clip("videoA.mp4", "00:00:01", "00:00:02")
            .unwrap();

        assert_eq!(
            outcome,
            AddOutcome::Added {
                clip_index: 2,
                entry_created: false
            }
        );
        assert_eq!(&manifest.entries[0].clips[..2], &before[..]);
        assert_eq!(manifest.entries.len(), 2);
    }

    #[test]
    fn test_add_clip_new_entry_goes_to_end() {
        let mut manifest = Manifest::from_json_str(SAMPLE_MANIFEST).unwrap();
        manifest.add_clip("videoZ.mp4", "00:00:01", "00:00:02").unwrap();
        assert_eq!(manifest.entries.last().unwrap().original, "videoZ.mp4");
    }

    #[test]
    fn test_add_clip_duplicate_range_is_not_appended() {
        let mut manifest = Manifest::from_json_str(SAMPLE_MANIFEST).unwrap();
        let outcome = manifest
            .add_clip("videoA.mp4", "00:05:00", "00:06:20")
            .unwrap();
        assert_eq!(outcome, AddOutcome::Duplicate { clip_index: 0 });
        assert_eq!(manifest.entries[0].clips.len(), 2);
    }

    #[test]
    fn test_add_clip_validates_input() {
        let mut manifest = Manifest::new();
        assert!(manifest.add_clip("a.mp4", "00:00:20", "00:00:10").is_err());
        assert!(manifest.add_clip("a.mp4", "0:0:1", "00:00:10").is_err());
        assert!(manifest.add_clip("", "00:00:01", "00:00:10").is_err());
        assert!(manifest.is_empty());
    }
}
