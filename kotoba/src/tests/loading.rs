use std::fs::File;
use std::io::Write;

use crate::common::DICTIONARY_MAGIC;
use crate::dictionary::SystemLexicon;
use crate::dictionary::lexicon::map::trie::DoubleArrayUnit;
use crate::errors::KotobaError;
use crate::test_utils::{SysDicParts, TestEntry, build_matrix, build_sysdic, entry};
use crate::{Dictionary, Tokenizer};

fn entries() -> Vec<TestEntry> {
    vec![
        entry("東京", 1, 1, 10, "名詞,固有名詞,地名"),
        entry("東京都", 2, 2, 5, "名詞,固有名詞,地名"),
        entry("都", 3, 3, 20, "名詞,普通名詞,一般"),
        entry("京都", 1, 2, 8, "名詞,固有名詞,地名"),
        entry("京都", 3, 1, 9, "名詞,固有名詞,人名"),
    ]
}

fn restamp(bytes: &mut [u8]) {
    let magic = DICTIONARY_MAGIC ^ bytes.len() as u32;
    bytes[..4].copy_from_slice(&magic.to_le_bytes());
}

#[test]
fn test_load_header() {
    let bytes = build_sysdic(&entries(), 4, 4);
    let lexicon = SystemLexicon::from_bytes(&bytes).unwrap();

    let header = lexicon.header();
    assert_eq!(header.magic ^ DICTIONARY_MAGIC, bytes.len() as u32);
    assert_eq!(header.version, 102);
    assert_eq!(header.lexicon_size, 5);
    assert_eq!(header.left_size, 4);
    assert_eq!(header.right_size, 4);
    assert_eq!(header.tokens_size, 5 * 16);
    assert_eq!(lexicon.charset(), "UTF-8");
    assert_eq!(lexicon.num_tokens(), 5);
    assert_eq!(lexicon.num_units() * 8, header.double_array_size as usize);
}

#[test]
fn test_lookup_groups() {
    let lexicon = SystemLexicon::from_bytes(&build_sysdic(&entries(), 4, 4)).unwrap();

    let found: Vec<_> = lexicon
        .common_prefix_iterator("京都府".as_bytes())
        .map(|m| (m.record.left_id, m.record.weight, m.end_byte))
        .collect();
    assert_eq!(found, vec![(1, 8, 6), (3, 9, 6)]);

    let found: Vec<_> = lexicon
        .common_prefix_iterator("東京都".as_bytes())
        .map(|m| {
            let feature = lexicon.feature(m.record.feature_offset).unwrap();
            (m.end_byte, String::from_utf8_lossy(feature).into_owned())
        })
        .collect();
    assert_eq!(
        found,
        vec![
            (6, "名詞,固有名詞,地名".to_string()),
            (9, "名詞,固有名詞,地名".to_string()),
        ]
    );
}

#[test]
fn test_corrupted_magic() {
    let mut bytes = build_sysdic(&entries(), 4, 4);
    bytes[0] ^= 0x01;
    assert!(matches!(
        SystemLexicon::from_bytes(&bytes),
        Err(KotobaError::InvalidFormat(_))
    ));
}

#[test]
fn test_wrong_version() {
    let bytes = SysDicParts::new(&entries(), 4, 4).to_bytes_with(101, 0);
    assert!(matches!(
        SystemLexicon::from_bytes(&bytes),
        Err(KotobaError::InvalidFormat(_))
    ));
}

#[test]
fn test_trailing_bytes() {
    let bytes = SysDicParts::new(&entries(), 4, 4).to_bytes_with(102, 4);
    assert!(matches!(
        SystemLexicon::from_bytes(&bytes),
        Err(KotobaError::InvalidFormat(_))
    ));
}

#[test]
fn test_truncated() {
    let bytes = build_sysdic(&entries(), 4, 4);
    for len in [3, 20, 60, bytes.len() - 1] {
        let mut truncated = bytes[..len].to_vec();
        if len >= 4 {
            restamp(&mut truncated);
        }
        assert!(
            matches!(
                SystemLexicon::from_bytes(&truncated),
                Err(KotobaError::InvalidFormat(_))
            ),
            "len = {len}"
        );
    }
}

#[test]
fn test_connection_id_out_of_range() {
    let bytes = build_sysdic(&[entry("a", 5, 1, 0, "x")], 4, 4);
    assert!(matches!(
        SystemLexicon::from_bytes(&bytes),
        Err(KotobaError::OutOfRange(_))
    ));

    let bytes = build_sysdic(&[entry("a", 1, 5, 0, "x")], 4, 4);
    assert!(matches!(
        SystemLexicon::from_bytes(&bytes),
        Err(KotobaError::OutOfRange(_))
    ));

    // Ids equal to the declared sizes are accepted.
    let bytes = build_sysdic(&[entry("a", 4, 4, 0, "x")], 4, 4);
    assert!(SystemLexicon::from_bytes(&bytes).is_ok());
}

#[test]
fn test_feature_offset_out_of_range() {
    let mut parts = SysDicParts::new(&[entry("a", 1, 1, 0, "x")], 4, 4);
    let features_size = parts.features.len() as u32;
    parts.tokens[8..12].copy_from_slice(&features_size.to_le_bytes());
    assert!(matches!(
        SystemLexicon::from_bytes(&parts.to_bytes()),
        Err(KotobaError::OutOfRange(_))
    ));
}

#[test]
fn test_trie_group_out_of_range() {
    let mut parts = SysDicParts::new(&entries(), 4, 4);
    let index = parts.units.len();
    parts
        .units
        .push(DoubleArrayUnit::new(-1 - ((4 << 8) | 2), index as u32));
    assert!(matches!(
        SystemLexicon::from_bytes(&parts.to_bytes()),
        Err(KotobaError::OutOfRange(_))
    ));
}

#[test]
fn test_matrix_too_small() {
    let sysdic = build_sysdic(&entries(), 4, 4);
    let matrix = build_matrix(2, 2, &[]);
    assert!(matches!(
        Dictionary::from_bytes(&sysdic, &matrix),
        Err(KotobaError::OutOfRange(_))
    ));

    let matrix = build_matrix(3, 3, &[]);
    assert!(Dictionary::from_bytes(&sysdic, &matrix).is_ok());
}

#[test]
fn test_from_readers() {
    let sysdic = build_sysdic(&entries(), 4, 4);
    let matrix = build_matrix(4, 4, &[]);
    let dict = Dictionary::from_readers(sysdic.as_slice(), matrix.as_slice()).unwrap();
    assert_eq!(dict.charset(), "UTF-8");
    assert_eq!(dict.lexicon().num_tokens(), 5);
}

#[test]
fn test_from_paths() {
    let dir = tempfile::tempdir().unwrap();
    let sysdic = build_sysdic(&entries(), 4, 4);
    let matrix = build_matrix(4, 4, &[]);

    let sysdic_path = dir.path().join("sys.dic.gz");
    let mut enc = flate2::write::GzEncoder::new(
        File::create(&sysdic_path).unwrap(),
        flate2::Compression::default(),
    );
    enc.write_all(&sysdic).unwrap();
    enc.finish().unwrap();

    let matrix_path = dir.path().join("matrix.bin.zst");
    std::fs::write(&matrix_path, zstd::encode_all(matrix.as_slice(), 0).unwrap()).unwrap();

    let plain_path = dir.path().join("sys.dic");
    std::fs::write(&plain_path, &sysdic).unwrap();

    let tokenizer = Tokenizer::new(Dictionary::from_paths(&sysdic_path, &matrix_path).unwrap());
    let surfaces: Vec<_> = tokenizer
        .parse("東京都")
        .unwrap()
        .iter()
        .map(|m| m.surface().to_string())
        .collect();
    assert_eq!(surfaces, vec!["東京都"]);

    assert!(Dictionary::from_paths(&plain_path, &matrix_path).is_ok());
    assert!(matches!(
        Dictionary::from_paths(dir.path().join("missing.dic"), &matrix_path),
        Err(KotobaError::InvalidArgument(_))
    ));
}
