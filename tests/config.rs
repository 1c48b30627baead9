use assert_matches::assert_matches;

use aadr_curator::config::{ConfigLoader, TRANSCONTINENTAL_NOTE};
use aadr_curator::error::AadrError;

#[test]
fn resolve_from_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("aadr-curator.json");
    std::fs::write(
        &path,
        r#"{
            "annotation": "data/v62.0_1240k_public.anno",
            "output": "aadr_noRefPresent_v62.csv",
            "expected_rows": 17629,
            "region_exceptions": [
                {
                    "list": "data/Asia_Siberia_list.csv",
                    "region": "Asia",
                    "sub_region": "Siberia"
                }
            ]
        }"#,
    )
    .unwrap();

    let resolved = ConfigLoader::resolve(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(resolved.annotation.as_str(), "data/v62.0_1240k_public.anno");
    assert_eq!(resolved.expected_rows, Some(17629));
    assert_eq!(resolved.coordinate_fixes, None);
    assert_eq!(resolved.region_exceptions[0].region, "Asia");
    assert_eq!(resolved.region_exceptions[0].note, TRANSCONTINENTAL_NOTE);
}

#[test]
fn resolve_missing_explicit_path() {
    let err = ConfigLoader::resolve(Some("no/such/config.json")).unwrap_err();
    assert_matches!(err, AadrError::ConfigRead(_));
}

#[test]
fn resolve_malformed_json() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = ConfigLoader::resolve(Some(path.to_str().unwrap())).unwrap_err();
    assert_matches!(err, AadrError::ConfigParse(_));
}
