/// Tests for GlProfile

use super::*;

fn desktop(major: u32, minor: u32) -> GlVersion {
    GlVersion::new(GlApi::Desktop, major, minor)
}

fn es(major: u32, minor: u32) -> GlVersion {
    GlVersion::new(GlApi::Es, major, minor)
}

// ============================================================================
// Tests: Names
// ============================================================================

#[test]
fn test_names_round_trip() {
    for profile in GlProfile::ALL {
        assert_eq!(GlProfile::from_name(profile.name()), Some(profile));
    }
    assert_eq!(GlProfile::from_name("GL5"), None);
}

#[test]
fn test_rank_follows_all_order() {
    assert_eq!(GlProfile::GL4bc.rank(), 0);
    assert!(GlProfile::GL3.rank() < GlProfile::GL2.rank());
    assert!(GlProfile::GLES3.rank() < GlProfile::GLES1.rank());
}

// ============================================================================
// Tests: Native availability
// ============================================================================

#[test]
fn test_core_context_excludes_compatibility_profiles() {
    let v = desktop(4, 6);
    assert!(GlProfile::GL4.is_native_to(&v, false));
    assert!(GlProfile::GL3.is_native_to(&v, false));
    assert!(!GlProfile::GL4bc.is_native_to(&v, false));
    assert!(!GlProfile::GL2.is_native_to(&v, false));
}

#[test]
fn test_compatibility_context_provides_everything_up_to_its_version() {
    let v = desktop(3, 3);
    assert!(GlProfile::GL3bc.is_native_to(&v, true));
    assert!(GlProfile::GL3.is_native_to(&v, true));
    assert!(GlProfile::GL2.is_native_to(&v, true));
    assert!(!GlProfile::GL4.is_native_to(&v, true));
}

#[test]
fn test_legacy_desktop_only_gl2() {
    let v = desktop(2, 1);
    assert!(GlProfile::GL2.is_native_to(&v, true));
    assert!(!GlProfile::GL3.is_native_to(&v, true));
}

#[test]
fn test_es_families() {
    assert!(GlProfile::GLES3.is_native_to(&es(3, 2), false));
    assert!(GlProfile::GLES2.is_native_to(&es(3, 2), false));
    assert!(!GlProfile::GLES1.is_native_to(&es(3, 2), false));
    assert!(GlProfile::GLES1.is_native_to(&es(1, 1), false));
    assert!(!GlProfile::GLES2.is_native_to(&es(1, 1), false));
}

#[test]
fn test_api_mismatch_is_never_native() {
    assert!(!GlProfile::GLES2.is_native_to(&desktop(4, 6), true));
    assert!(!GlProfile::GL2.is_native_to(&es(3, 2), true));
}
