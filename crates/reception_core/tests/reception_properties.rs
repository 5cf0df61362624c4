//! End-to-end behaviour of the reception core through its public API.
//!
//! Uses the in-memory record store and recording fakes for the upstream
//! registry and the scan-count source.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use reception_core::booking::{
    ArrivalOutcome, ArrivalType, BookingKey, BookingRecord, BookingService, DedupWindow,
    InMemoryRecordStore,
};
use reception_core::matching::{
    is_current, validate, IdentityQuery, MatchService, MatchedIdentity, ValidationOutcome,
};
use reception_core::ports::{IdentitySearchGateway, RawScanCount, ScanCountSource};
use reception_core::scan::{ScanCountAggregator, ScanCountEntry};
use reception_core::{ReceptionError, Result};

// ============================================================================
// FAKES
// ============================================================================

struct CountingGateway {
    calls: AtomicUsize,
    results: Vec<MatchedIdentity>,
}

#[async_trait]
impl IdentitySearchGateway for CountingGateway {
    async fn search(&self, _query: &IdentityQuery) -> Result<Vec<MatchedIdentity>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.clone())
    }
}

struct CountingScanSource {
    calls: AtomicUsize,
    response: Vec<RawScanCount>,
}

#[async_trait]
impl ScanCountSource for CountingScanSource {
    async fn counts(
        &self,
        _event_type: &str,
        _from: NaiveDate,
        _to: NaiveDate,
        _person_identifiers: &[String],
    ) -> Result<Vec<RawScanCount>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

fn error_pairs(outcome: ValidationOutcome) -> Vec<(String, String)> {
    match outcome {
        ValidationOutcome::Valid => vec![],
        ValidationOutcome::Invalid(errors) => errors
            .into_iter()
            .map(|e| (e.field, e.message))
            .collect(),
    }
}

fn pair(field: &str, message: &str) -> (String, String) {
    (field.to_string(), message.to_string())
}

// ============================================================================
// IDENTITY MATCH RULES
// ============================================================================

#[test]
fn no_identifying_field_yields_three_errors_regardless_of_first_name() {
    let expected = vec![
        pair("lastName", "Last name is required"),
        pair("pncNumber", "PNC number is required"),
        pair("prisonNumber", "Last name is required"),
    ];
    for query in [
        IdentityQuery::default(),
        IdentityQuery::default().with_first_name("Sam"),
    ] {
        assert_eq!(error_pairs(validate(&query)), expected);
    }
}

#[test]
fn dob_without_last_name_regardless_of_other_fields() {
    let dob = NaiveDate::from_ymd_opt(1980, 6, 15).unwrap();
    let expected = vec![pair(
        "lastName",
        "Last name need to be provided together with DoB",
    )];
    for query in [
        IdentityQuery::default().with_date_of_birth(dob),
        IdentityQuery::default()
            .with_date_of_birth(dob)
            .with_first_name("Sam"),
        IdentityQuery::default()
            .with_date_of_birth(dob)
            .with_pnc_number("01/23456A")
            .with_prison_number("A1234AA"),
    ] {
        assert_eq!(error_pairs(validate(&query)), expected);
    }
}

#[test]
fn first_name_without_last_name_or_dob() {
    let query = IdentityQuery::default()
        .with_first_name("Sam")
        .with_prison_number("A1234AA");
    assert_eq!(
        error_pairs(validate(&query)),
        vec![pair(
            "lastName",
            "Last name need to be provided together with first name"
        )]
    );
}

#[test]
fn scenario_name_and_dob_is_valid() {
    let query: IdentityQuery = serde_json::from_value(serde_json::json!({
        "lastName": "Smith",
        "dateOfBirth": "1971-02-01",
        "firstName": "Sam"
    }))
    .unwrap();
    assert_eq!(validate(&query), ValidationOutcome::Valid);
}

#[test]
fn scenario_prison_number_only_is_valid() {
    let query = IdentityQuery::default().with_prison_number("A1234AA");
    assert_eq!(validate(&query), ValidationOutcome::Valid);
}

#[tokio::test]
async fn match_service_never_searches_with_invalid_query() {
    let gateway = Arc::new(CountingGateway {
        calls: AtomicUsize::new(0),
        results: vec![],
    });
    let service = MatchService::new(gateway.clone());

    let err = service
        .match_identity(&IdentityQuery::default().with_first_name("Sam"))
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), 400);
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn match_service_empty_registry_response_is_empty_list() {
    let gateway = Arc::new(CountingGateway {
        calls: AtomicUsize::new(0),
        results: vec![],
    });
    let matches = MatchService::new(gateway.clone())
        .match_identity(&IdentityQuery::default().with_pnc_number("01/23456A"))
        .await
        .unwrap();
    assert!(matches.is_empty());
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// CURRENT-PRISONER CLASSIFIER
// ============================================================================

#[test]
fn classifier_truth_table() {
    assert!(!is_current(None));
    assert!(!is_current(Some("INACTIVE OUT")));
    assert!(is_current(Some("ACTIVE IN")));
    assert!(is_current(Some("INACTIVE TRN")));
}

// ============================================================================
// BOOKING DEDUPLICATION
// ============================================================================

fn stored_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 14, 30, 0).unwrap()
}

fn key() -> BookingKey {
    BookingKey::new("MDI", "movement-42", "A1234AA", "900001")
}

async fn service_with_one_booking() -> BookingService {
    let service = BookingService::new(Arc::new(InMemoryRecordStore::new()));
    service
        .record_booking(BookingRecord::new(
            key(),
            ArrivalType::NewToPrison,
            stored_at(),
        ))
        .await
        .unwrap();
    service
}

#[tokio::test]
async fn window_around_stored_timestamp_finds_record() {
    let service = service_with_one_booking().await;
    let window = DedupWindow::new(
        stored_at() - Duration::days(1),
        stored_at() + Duration::days(1),
    )
    .unwrap();

    let found = service.check_duplicate(&key(), &window).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].timestamp, stored_at());
}

#[tokio::test]
async fn window_entirely_before_or_after_is_empty() {
    let service = service_with_one_booking().await;
    let before = DedupWindow::new(
        stored_at() - Duration::days(2),
        stored_at() - Duration::seconds(1),
    )
    .unwrap();
    let after = DedupWindow::new(
        stored_at() + Duration::seconds(1),
        stored_at() + Duration::days(2),
    )
    .unwrap();

    assert!(service.check_duplicate(&key(), &before).await.unwrap().is_empty());
    assert!(service.check_duplicate(&key(), &after).await.unwrap().is_empty());
}

#[tokio::test]
async fn confirm_arrival_skips_reported_twice_movement() {
    let service = service_with_one_booking().await;
    let retry = BookingRecord::new(
        key(),
        ArrivalType::NewToPrison,
        stored_at() + Duration::minutes(5),
    );

    let outcome = service
        .confirm_arrival(retry, Duration::hours(1))
        .await
        .unwrap();
    assert!(matches!(outcome, ArrivalOutcome::AlreadyRecorded(ref r) if r.len() == 1));

    let roll_call = service
        .roll_call(stored_at().date_naive(), "MDI")
        .await
        .unwrap();
    assert_eq!(roll_call.len(), 1);
}

// ============================================================================
// SCAN-LIMIT AGGREGATOR
// ============================================================================

#[tokio::test]
async fn aggregate_empty_input_without_calling_source() {
    let source = Arc::new(CountingScanSource {
        calls: AtomicUsize::new(0),
        response: vec![],
    });
    let entries = ScanCountAggregator::new(source.clone())
        .aggregate(2024, &[])
        .await
        .unwrap();
    assert!(entries.is_empty());
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn aggregate_zero_fills_in_input_order() {
    let source = Arc::new(CountingScanSource {
        calls: AtomicUsize::new(0),
        response: vec![RawScanCount {
            person_identifier: "A".into(),
            count: 3,
        }],
    });
    let entries = ScanCountAggregator::new(source)
        .aggregate(2024, &["A".to_string(), "B".to_string()])
        .await
        .unwrap();
    assert_eq!(
        entries,
        vec![
            ScanCountEntry {
                person_identifier: "A".into(),
                count: 3
            },
            ScanCountEntry {
                person_identifier: "B".into(),
                count: 0
            },
        ]
    );
}

#[test]
fn error_kinds_are_distinct() {
    let not_found = ReceptionError::NotFound("booking".into());
    let validation = ReceptionError::Validation(vec![]);
    assert_ne!(not_found.kind(), validation.kind());
}
