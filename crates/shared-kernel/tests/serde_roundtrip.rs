// crates/shared-kernel/tests/serde_roundtrip.rs
use notestat_shared_kernel::{DocumentId, LineCount, WordCount};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Wrapper {
    document: DocumentId,
    lines: LineCount,
    words: WordCount,
}

#[test]
fn json_roundtrip() {
    let original = Wrapper {
        document: DocumentId::from("notes/a.md"),
        lines: LineCount::from(42),
        words: WordCount::from(7),
    };
    let json = serde_json::to_string(&original).expect("serializes");
    assert_eq!(json, r#"{"document":"notes/a.md","lines":42,"words":7}"#);
    let decoded: Wrapper = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(decoded, original);
}
