//! Verify decoding and mapping against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes a simulated response and either the domain
//! values it must map to or the error it must produce.

use pokedex_core::fetcher::decode_response;
use pokedex_core::mapper::{map_detail, map_page};
use pokedex_core::{CatalogPage, DetailRecord, FetchError, HttpResponse, NoLocalization};

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
    }
}

fn assert_expected_error(name: &str, expected: &serde_json::Value, err: FetchError) {
    match expected.as_str().unwrap() {
        "DataFetchFailure" => assert!(
            matches!(err, FetchError::DataFetchFailure(_)),
            "{name}: expected DataFetchFailure, got {err:?}"
        ),
        "DecodingFailure" => assert!(
            matches!(err, FetchError::DecodingFailure(_)),
            "{name}: expected DecodingFailure, got {err:?}"
        ),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = decode_response::<CatalogPage>(simulated(case));

        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, expected_error, result.unwrap_err());
            continue;
        }

        let items = map_page(&result.unwrap(), &NoLocalization);
        let expected = case["expected_result"].as_array().unwrap();
        assert_eq!(items.len(), expected.len(), "{name}: item count");
        for (item, want) in items.iter().zip(expected) {
            assert_eq!(u64::from(item.id), want["id"].as_u64().unwrap(), "{name}: id");
            assert_eq!(item.display_name, want["display_name"].as_str().unwrap(), "{name}: display_name");
            assert_eq!(item.image_url.as_str(), want["image_url"].as_str().unwrap(), "{name}: image_url");
        }
    }
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[test]
fn detail_test_vectors() {
    let raw = include_str!("../../test-vectors/detail.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = decode_response::<DetailRecord>(simulated(case));

        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, expected_error, result.unwrap_err());
            continue;
        }

        let detail = map_detail(&result.unwrap(), &NoLocalization).unwrap();
        let want = &case["expected_result"];
        assert_eq!(u64::from(detail.id), want["id"].as_u64().unwrap(), "{name}: id");
        assert_eq!(detail.localized_name, want["localized_name"].as_str().unwrap(), "{name}: localized_name");
        assert_eq!(detail.display_height(), want["display_height"].as_str().unwrap(), "{name}: height");
        assert_eq!(detail.display_weight(), want["display_weight"].as_str().unwrap(), "{name}: weight");
        assert_eq!(
            detail.primary_type.map(|t| t.as_str()),
            want["primary_type"].as_str(),
            "{name}: primary_type"
        );
        assert_eq!(detail.image_url.as_str(), want["image_url"].as_str().unwrap(), "{name}: image_url");
    }
}
