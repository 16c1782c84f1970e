use super::*;

const BODY: &[u8] = br#"{"schemaVersion":2,"mediaType":"application/vnd.docker.distribution.manifest.v2+json"}"#;

#[test]
fn test_manifest_keeps_bytes_verbatim() {
    let manifest = Manifest::new(BODY.to_vec(), Some(MANIFEST_V2_MEDIA_TYPE));
    assert_eq!(manifest.bytes(), BODY);
    assert_eq!(manifest.len(), BODY.len());
    assert!(!manifest.is_empty());
}

#[test]
fn test_manifest_digest_matches_bytes() {
    let manifest = Manifest::new(BODY.to_vec(), None);
    assert_eq!(manifest.digest(), &Digest::of_bytes(BODY));
}

#[test]
fn test_manifest_media_type_defaults_to_v2() {
    assert_eq!(
        Manifest::new(Vec::new(), None).media_type(),
        MANIFEST_V2_MEDIA_TYPE
    );
    assert_eq!(
        Manifest::new(Vec::new(), Some("  ")).media_type(),
        MANIFEST_V2_MEDIA_TYPE
    );
}

#[test]
fn test_manifest_media_type_is_echoed() {
    let oci = "application/vnd.oci.image.manifest.v1+json";
    assert_eq!(Manifest::new(BODY.to_vec(), Some(oci)).media_type(), oci);
}

#[test]
fn test_manifest_empty_body() {
    let manifest = Manifest::new(Vec::new(), None);
    assert!(manifest.is_empty());
    assert_eq!(
        manifest.digest().hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}
