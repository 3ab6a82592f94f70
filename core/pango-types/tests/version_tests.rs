use pango_types::Version;
use proptest::prelude::*;
use std::str::FromStr;

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn parse_full_version() {
    let v = Version::parse("10.1.3").unwrap();
    assert_eq!(v.numeric(), (10, 1, 3));
    assert_eq!(v.suffix(), "");
}

#[test]
fn parse_with_hotfix_suffix() {
    let v = Version::parse("9.0.3-h3").unwrap();
    assert_eq!(v.numeric(), (9, 0, 3));
    assert_eq!(v.suffix(), "h3");
}

#[test]
fn parse_missing_patch_is_zero() {
    let v = Version::from_str("8.1").unwrap();
    assert_eq!(v, Version::new(8, 1, 0));
}

#[test]
fn parse_rejects_garbage() {
    assert!(Version::parse("").is_err());
    assert!(Version::parse("nine").is_err());
    assert!(Version::parse("9").is_err());
    assert!(Version::parse("9.0.0.1").is_err());
    assert!(Version::parse("9.x.0").is_err());
}

#[test]
fn display_includes_suffix_only_when_present() {
    assert_eq!(Version::new(9, 0, 0).to_string(), "9.0.0");
    assert_eq!(Version::new(9, 1, 2).with_suffix("b1").to_string(), "9.1.2-b1");
}

#[test]
fn serde_uses_string_form() {
    let v = Version::new(10, 2, 4).with_suffix("h2");
    let json = serde_json::to_string(&v).unwrap();
    assert_eq!(json, "\"10.2.4-h2\"");
    let back: Version = serde_json::from_str(&json).unwrap();
    assert_eq!(back, v);
}

#[test]
fn serde_rejects_invalid_string() {
    let result: Result<Version, _> = serde_json::from_str("\"not-a-version\"");
    assert!(result.is_err());
}

// ── Comparison ───────────────────────────────────────────────────

#[test]
fn gte_boundary_at_nine() {
    let threshold = Version::new(9, 0, 0);
    assert!(Version::new(9, 0, 0).gte(&threshold));
    assert!(!Version::new(8, 9, 9).gte(&threshold));
    assert!(Version::new(9, 0, 1).gte(&threshold));
    assert!(Version::new(10, 0, 0).gte(&threshold));
}

#[test]
fn gte_ignores_suffix() {
    let threshold = Version::new(9, 0, 0);
    assert!(Version::new(9, 0, 0).with_suffix("b1").gte(&threshold));
    assert!(!Version::new(8, 1, 22).with_suffix("h1").gte(&threshold));
}

#[test]
fn default_is_zero() {
    assert_eq!(Version::default().numeric(), (0, 0, 0));
}

proptest! {
    #[test]
    fn gte_matches_tuple_ordering(
        a in (0u32..20, 0u32..20, 0u32..20),
        b in (0u32..20, 0u32..20, 0u32..20),
    ) {
        let va = Version::new(a.0, a.1, a.2);
        let vb = Version::new(b.0, b.1, b.2);
        prop_assert_eq!(va.gte(&vb), a >= b);
    }

    #[test]
    fn display_parses_back(major in 0u32..100, minor in 0u32..100, patch in 0u32..100) {
        let v = Version::new(major, minor, patch);
        prop_assert_eq!(Version::parse(&v.to_string()).unwrap(), v);
    }
}
