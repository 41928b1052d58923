use bstr::BString;
use git_hash::{ObjectId, OID_LEN};
use git_object::{
    decode, encode, tree_id, FileMode, ObjectError, TreeBuilder, TreeCursor, TreeEntry,
};

fn entry(path: &str, mode: FileMode, seq: u32) -> TreeEntry {
    TreeEntry::new(mode, path, ObjectId::from_sequence(seq))
}

fn sample() -> Vec<TreeEntry> {
    vec![
        entry("README.md", FileMode::Regular, 1),
        entry("bin", FileMode::Tree, 2),
        entry("run.sh", FileMode::Executable, 3),
        entry("src", FileMode::Tree, 4),
        entry("current", FileMode::Symlink, 5),
        entry("vendor", FileMode::Gitlink, 6),
        entry("weird", FileMode::Unknown(0o100664), 7),
    ]
}

fn encode_all(entries: &[TreeEntry]) -> Vec<u8> {
    encode(entries.iter().map(TreeEntry::to_ref)).unwrap()
}

/// Byte length of each record in `entries`' encoding.
fn record_lengths(entries: &[TreeEntry]) -> Vec<usize> {
    entries
        .iter()
        .map(|e| e.mode.as_bytes().len() + 1 + e.path.len() + 1 + OID_LEN)
        .collect()
}

#[test]
fn roundtrip_preserves_every_field() {
    let entries = sample();
    let buf = encode_all(&entries);
    assert_eq!(decode(&buf).unwrap(), entries);
}

#[test]
fn encoder_does_not_sort() {
    let entries = vec![
        entry("c", FileMode::Regular, 1),
        entry("a", FileMode::Regular, 2),
        entry("b", FileMode::Regular, 3),
    ];
    let decoded = decode(&encode_all(&entries)).unwrap();
    let paths: Vec<&BString> = decoded.iter().map(|e| &e.path).collect();
    assert_eq!(paths, ["c", "a", "b"]);
}

#[test]
fn cursor_needs_one_advance_per_entry() {
    let entries = sample();
    let buf = encode_all(&entries);

    let mut cursor = TreeCursor::open(&buf).unwrap();
    let mut advances = 0;
    while let Some(current) = cursor.current() {
        assert_eq!(*current, entries[advances]);
        cursor.advance().unwrap();
        advances += 1;
    }
    assert_eq!(advances, entries.len());
    assert!(cursor.current().is_none());
    assert!(cursor.remaining().is_empty());
}

#[test]
fn advance_past_end_is_idempotent() {
    let entries = sample();
    let buf = encode_all(&entries[..1]);
    let mut cursor = TreeCursor::open(&buf).unwrap();
    for _ in 0..3 {
        cursor.advance().unwrap();
        assert!(cursor.is_terminal());
    }
}

#[test]
fn truncating_inside_last_object_id_is_detected() {
    let entries = sample();
    let buf = encode_all(&entries);

    for cut in 1..OID_LEN {
        let truncated = &buf[..buf.len() - cut];
        let mut cursor = TreeCursor::open(truncated).unwrap();
        for _ in 0..entries.len() - 2 {
            cursor.advance().unwrap();
        }
        assert_eq!(*cursor.current().unwrap(), entries[entries.len() - 2]);
        let err = cursor.advance().unwrap_err();
        assert!(
            matches!(err, ObjectError::TruncatedRecord { .. }),
            "cut {cut}: {err}"
        );
    }
}

#[test]
fn truncating_anywhere_inside_last_record_is_detected() {
    let entries = sample();
    let buf = encode_all(&entries);
    let last = *record_lengths(&entries).last().unwrap();

    for cut in 1..last {
        let truncated = &buf[..buf.len() - cut];
        let err = decode(truncated).unwrap_err();
        assert!(
            matches!(err, ObjectError::TruncatedRecord { .. }),
            "cut {cut}: {err}"
        );
    }
}

#[test]
fn truncating_at_record_boundary_gives_shorter_tree() {
    let entries = sample();
    let buf = encode_all(&entries);

    let mut end = 0;
    for (n, len) in record_lengths(&entries).into_iter().enumerate() {
        end += len;
        let decoded = decode(&buf[..end]).unwrap();
        assert_eq!(decoded, entries[..=n]);
    }
}

#[test]
fn builder_and_encode_agree() {
    let entries = sample();
    let mut builder = TreeBuilder::with_capacity(entries.len());
    for e in &entries {
        builder.push(e.to_ref()).unwrap();
    }
    assert_eq!(builder.len(), entries.len());
    assert_eq!(builder.finish(), encode_all(&entries));
}

#[test]
fn tree_id_depends_on_content() {
    let entries = sample();
    let a = tree_id(&encode_all(&entries)).unwrap();
    let b = tree_id(&encode_all(&entries[1..])).unwrap();
    assert_ne!(a, b);
    assert_eq!(a, tree_id(&encode_all(&entries)).unwrap());
}

#[test]
fn zero_padded_mode_is_rejected() {
    let mut buf = b"0100644 a\0".to_vec();
    buf.extend_from_slice(ObjectId::from_sequence(1).as_bytes());
    let err = decode(&buf).unwrap_err();
    assert!(matches!(err, ObjectError::MalformedMode { offset: 0, ref mode } if mode == "0100644"));
}

#[test]
fn decoded_tree_reencodes_byte_for_byte() {
    let buf = encode_all(&sample());
    let decoded = decode(&buf).unwrap();
    let reencoded = encode_all(&decoded);
    assert_eq!(reencoded, buf);
    assert_eq!(tree_id(&reencoded).unwrap(), tree_id(&buf).unwrap());
}
