//! Usage Ledger Tests

use sgw_domain::ports::infrastructure::UsageRecorder;
use sgw_domain::value_objects::{ErrorKind, GenerationResult, Usage};
use sgw_infrastructure::usage::{NullUsageRecorder, UsageLedger};

fn success(tokens_in: u64, tokens_out: u64, cost: Option<f64>) -> GenerationResult {
    GenerationResult::success(
        "Hi".to_string(),
        None,
        Usage {
            tokens_in,
            tokens_out,
            latency_ms: 100,
            cost_usd: cost,
        },
    )
}

#[test]
fn test_ledger_aggregates_per_provider() {
    let ledger = UsageLedger::new();
    ledger.record("openai", &success(100, 20, Some(0.01)));
    ledger.record("openai", &success(50, 10, Some(0.005)));
    ledger.record(
        "openai",
        &GenerationResult::failure(ErrorKind::RateLimitExceeded, "slow down", Usage::zero(2)),
    );
    ledger.record("ollama", &success(10, 5, None));

    let totals = ledger.totals("openai").expect("openai recorded");
    assert_eq!(totals.requests, 3);
    assert_eq!(totals.successes, 2);
    assert_eq!(totals.failures, 1);
    assert_eq!(totals.tokens_in, 150);
    assert_eq!(totals.tokens_out, 30);
    assert!((totals.cost_usd - 0.015).abs() < 1e-9);
    assert_eq!(totals.total_latency_ms, 202);

    let entry = ledger.entry("openai").expect("entry");
    assert_eq!(entry.failures_by_kind.get("RATE_LIMIT_EXCEEDED"), Some(&1));
    assert!(entry.last_used.is_some());

    let ollama = ledger.totals("ollama").expect("ollama recorded");
    assert_eq!(ollama.cost_usd, 0.0);

    assert!(ledger.totals("anthropic").is_none());
    assert_eq!(ledger.grand_total().requests, 4);
    assert_eq!(ledger.entries().len(), 2);
}

#[test]
fn test_null_recorder_keeps_nothing() {
    let recorder = NullUsageRecorder;
    recorder.record("openai", &success(1, 1, None));
    assert!(recorder.totals("openai").is_none());
}
