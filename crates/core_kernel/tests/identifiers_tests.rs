//! Identifier newtype tests

use core_kernel::{ClaimId, DecisionId, DocumentId, MemberId};
use uuid::Uuid;

#[test]
fn test_new_generates_unique_ids() {
    assert_ne!(ClaimId::new(), ClaimId::new());
    assert_ne!(MemberId::new(), MemberId::new());
}

#[test]
fn test_new_v7_is_time_ordered() {
    let first = ClaimId::new_v7();
    std::thread::sleep(std::time::Duration::from_millis(1));
    let second = ClaimId::new_v7();
    assert!(Uuid::from(first) < Uuid::from(second));
}

#[test]
fn test_prefixed_display_roundtrips() {
    for _ in 0..10 {
        let id = DecisionId::new();
        let display = id.to_string();
        assert!(display.starts_with("DEC-"));
        let parsed: DecisionId = display.parse().unwrap();
        assert_eq!(id, parsed);
    }
}

#[test]
fn test_bare_uuid_string_parses() {
    let uuid = Uuid::new_v4();
    let parsed: MemberId = uuid.to_string().parse().unwrap();
    assert_eq!(*parsed.as_uuid(), uuid);
}

#[test]
fn test_garbage_fails_to_parse() {
    assert!("not-a-uuid".parse::<ClaimId>().is_err());
    assert!("CLM-not-a-uuid".parse::<ClaimId>().is_err());
}

#[test]
fn test_types_share_uuids_but_not_strings() {
    // Same underlying UUID, distinct display forms
    let uuid = Uuid::new_v4();
    let claim = ClaimId::from_uuid(uuid);
    let document = DocumentId::from_uuid(uuid);
    assert_eq!(claim.as_uuid(), document.as_uuid());
    assert_ne!(claim.to_string(), document.to_string());
}

#[test]
fn test_uuid_conversions() {
    let uuid = Uuid::new_v4();
    let id: ClaimId = uuid.into();
    let back: Uuid = id.into();
    assert_eq!(uuid, back);
}

#[test]
fn test_json_serializes_as_bare_uuid() {
    let id = ClaimId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    let decoded: ClaimId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, decoded);
}
