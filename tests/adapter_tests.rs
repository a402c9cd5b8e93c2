//! Adapter tests: delivery order, at-most-once delivery, the error
//! taxonomy, and recovery from malformed order items.

use denpyo::adapter;
use denpyo::document::CutDirective;
use denpyo::error::{DenpyoError, ErrorKind};
use denpyo::json_api::PrintRequest;
use denpyo::printer::PrinterConfig;
use denpyo::transport::{MemorySink, OutputSink, SinkCall, WriterSink};
use pretty_assertions::assert_eq;

fn request(json: &str) -> PrintRequest {
    PrintRequest::from_json(json).unwrap()
}

fn print(json: &str, sink: &mut MemorySink) -> Result<adapter::PrintReport, DenpyoError> {
    adapter::print(&request(json), &PrinterConfig::MP_B20, sink)
}

/// Counts calls and fails every `send`.
#[derive(Default)]
struct FlakySink {
    sends: usize,
    cuts: usize,
}

impl OutputSink for FlakySink {
    fn send(&mut self, _: &str) -> denpyo::error::Result<()> {
        self.sends += 1;
        Err(DenpyoError::Output("printer offline".into()))
    }

    fn cut(&mut self, _: CutDirective) -> denpyo::error::Result<()> {
        self.cuts += 1;
        Ok(())
    }
}

// ============================================================================
// DELIVERY
// ============================================================================

#[test]
fn test_text_then_cut_once_each() {
    let mut sink = MemorySink::new();
    print(r#"{"kind": "order-slip", "tableName": "B2"}"#, &mut sink).unwrap();

    assert_eq!(sink.calls.len(), 2);
    match (&sink.calls[0], &sink.calls[1]) {
        (SinkCall::Send(text), SinkCall::Cut(cut)) => {
            assert!(text.contains("会計伝票"));
            assert!(text.ends_with("\n\n\n"));
            assert_eq!(*cut, CutDirective::partial());
        }
        other => panic!("unexpected call order {:?}", other),
    }
}

#[test]
fn test_sink_receives_exact_document_text() {
    let json = r#"{"kind": "receipt", "roundedTotal": 8000}"#;
    let composed = adapter::compose_request(&request(json), &PrinterConfig::MP_B20).unwrap();

    let mut sink = MemorySink::new();
    print(json, &mut sink).unwrap();
    assert_eq!(sink.text(), composed.document.text());
}

#[test]
fn test_send_failure_skips_cut_and_never_retries() {
    let mut sink = FlakySink::default();
    let err = adapter::print(
        &request(r#"{"kind": "text", "text": "x"}"#),
        &PrinterConfig::MP_B20,
        &mut sink,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Output);
    assert_eq!(err.to_string(), "Output error: printer offline");
    assert_eq!(sink.sends, 1);
    assert_eq!(sink.cuts, 0);
}

#[test]
fn test_cut_failure_is_output_error() {
    let mut sink = MemorySink::failing_cut("cutter jammed");
    let err = print(r#"{"kind": "text", "text": "x"}"#, &mut sink).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Output);
    assert_eq!(sink.calls.len(), 1);
}

#[test]
fn test_writer_sink_bytes() {
    let document = adapter::compose_request(
        &request(r#"{"kind": "text", "text": "OK"}"#),
        &PrinterConfig::MP_B20,
    )
    .unwrap()
    .document;

    let mut sink = WriterSink::new(Vec::new());
    adapter::deliver(&document, &mut sink).unwrap();
    assert_eq!(sink.into_inner(), b"OK\n\n\n\x1dV\x01".to_vec());
}

// ============================================================================
// ERROR TAXONOMY
// ============================================================================

#[test]
fn test_errors_are_classified_before_delivery() {
    let cases = [
        (r#"{"kind": "text"}"#, ErrorKind::Validation),
        (r#"{"kind": "receipt", "roundedTotal": -1}"#, ErrorKind::Validation),
        (r#"{"kind": "receipt", "paymentCard": -100}"#, ErrorKind::Validation),
        (
            r#"{"kind": "order-slip", "roundingUnit": 100, "roundingMethod": 3}"#,
            ErrorKind::Configuration,
        ),
        (r#"{"kind": "receipt", "cardFeeRate": -10}"#, ErrorKind::Configuration),
    ];

    for (json, kind) in cases {
        let mut sink = MemorySink::new();
        let err = print(json, &mut sink).unwrap_err();
        assert_eq!(err.kind(), kind, "{}", json);
        assert!(sink.calls.is_empty(), "{} reached the sink", json);
    }
}

#[test]
fn test_out_of_range_amounts_fail_before_delivery() {
    let cases = [
        r#"{"kind": "receipt", "subtotal": 9223372036854775807, "serviceTax": 1}"#,
        r#"{"kind": "order-slip", "subtotal": -9223372036854775808, "consumptionTax": -1}"#,
        r#"{"kind": "receipt", "roundedTotal": 1000000000000000000, "cardFeeRate": 100}"#,
        r#"{"kind": "order-slip", "roundedTotal": 9223372036854775807, "cardFeeRate": 1}"#,
    ];

    for json in cases {
        let mut sink = MemorySink::new();
        let err = print(json, &mut sink).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{}", json);
        assert!(sink.calls.is_empty(), "{} reached the sink", json);
    }
}

#[test]
fn test_unparseable_request_is_validation() {
    for json in ["", "null", r#"{"kind": "coupon"}"#, r#"{"text": "no kind"}"#] {
        let err = PrintRequest::from_json(json).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{:?}", json);
    }
}

#[test]
fn test_unknown_profile_is_configuration() {
    let err = PrinterConfig::by_name("tm-t88").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

// ============================================================================
// ITEM RECOVERY
// ============================================================================

#[test]
fn test_one_malformed_item_among_three() {
    let json = r#"{
        "kind": "order-slip",
        "orderItems": [
            {"name": "ビール", "quantity": 2, "price": 900},
            {"name": "焼酎", "quantity": 1},
            {"name": "ウーロン茶", "price": 500}
        ]
    }"#;

    let mut sink = MemorySink::new();
    let report = print(json, &mut sink).unwrap();

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].index, 1);
    assert!(report.diagnostics[0].reason.contains("price"));

    let text = sink.text();
    assert!(text.contains("ビール\n  2 × ¥900 = ¥1,800\n"));
    assert!(text.contains("ウーロン茶\n  1 × ¥500 = ¥500\n"));
    assert!(!text.contains("焼酎"));
    assert_eq!(text.matches(" × ").count(), 2);
}

#[test]
fn test_diagnostic_becomes_item_parse_error() {
    let composition = adapter::compose_request(
        &request(r#"{"kind": "receipt", "orderItems": [42]}"#),
        &PrinterConfig::MP_B20,
    )
    .unwrap();
    let err: DenpyoError = composition.diagnostics[0].clone().into();
    assert_eq!(err.kind(), ErrorKind::ItemParse);
}
