//! Test utilities for sgw-application tests
//!
//! Lightweight in-test implementations of the domain ports so selection,
//! retries and health aggregation can be exercised without network I/O.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sgw_application::use_cases::ProviderHandle;
use sgw_domain::error::{Error, Result};
use sgw_domain::ports::infrastructure::{
    CircuitBreaker, CircuitBreakerSnapshot, RateLimiter, RateLimiterSnapshot, UsageRecorder,
    UsageTotals,
};
use sgw_domain::ports::providers::{
    HealthProbe, PromptFormat, ProviderCall, ProviderResponse, TextGenerationProvider,
};
use sgw_domain::value_objects::{GenerationResult, ProviderSettings};

/// Breaker with a fixed open flag that counts what it is told
#[derive(Default)]
pub struct CountingBreaker {
    open: AtomicBool,
    successes: AtomicU32,
    failures: AtomicU32,
}

impl CountingBreaker {
    pub fn closed() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn open() -> Arc<Self> {
        let breaker = Self::default();
        breaker.open.store(true, Ordering::SeqCst);
        Arc::new(breaker)
    }

    pub fn successes(&self) -> u32 {
        self.successes.load(Ordering::SeqCst)
    }

    pub fn failures(&self) -> u32 {
        self.failures.load(Ordering::SeqCst)
    }
}

impl CircuitBreaker for CountingBreaker {
    fn is_circuit_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::SeqCst);
    }

    fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    fn snapshot(&self) -> CircuitBreakerSnapshot {
        CircuitBreakerSnapshot {
            failure_count: self.failures(),
            success_count: self.successes(),
            is_open: self.is_circuit_open(),
            last_failure_ms_ago: None,
            error_rate_threshold: 0.2,
            min_sample: 5,
            cooldown_ms: 60_000,
        }
    }
}

/// Limiter that always gives the same answer
pub struct FixedLimiter {
    admit: bool,
}

impl FixedLimiter {
    pub fn admitting() -> Arc<Self> {
        Arc::new(Self { admit: true })
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self { admit: false })
    }
}

impl RateLimiter for FixedLimiter {
    fn can_make_request(&self, _key: &str) -> bool {
        self.admit
    }

    fn snapshot(&self) -> RateLimiterSnapshot {
        RateLimiterSnapshot {
            limit: 0,
            window_secs: 60,
            tracked_keys: 0,
        }
    }
}

/// How a scripted provider answers health probes
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum HealthScript {
    Healthy,
    Failing,
    Hanging,
}

/// Provider replaying queued outcomes; answers "ok" once the queue is empty
pub struct ScriptedProvider {
    name: String,
    format: PromptFormat,
    outcomes: Mutex<VecDeque<Result<ProviderResponse>>>,
    calls: Mutex<Vec<ProviderCall>>,
    health: HealthScript,
}

impl ScriptedProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            format: PromptFormat::Flat,
            outcomes: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            health: HealthScript::Healthy,
        }
    }

    pub fn with_format(mut self, format: PromptFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_health(mut self, health: HealthScript) -> Self {
        self.health = health;
        self
    }

    pub fn then(self, outcome: Result<ProviderResponse>) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    pub fn then_text(self, text: &str) -> Self {
        self.then(Ok(text_response(text)))
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

pub fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        text: Some(text.to_string()),
        ..Default::default()
    }
}

#[async_trait]
impl TextGenerationProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        &self.name
    }

    fn prompt_format(&self) -> PromptFormat {
        self.format
    }

    async fn generate(&self, call: &ProviderCall) -> Result<ProviderResponse> {
        self.calls.lock().unwrap().push(call.clone());
        let next = self.outcomes.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(text_response("ok")))
    }

    async fn check_health(&self) -> Result<HealthProbe> {
        match self.health {
            HealthScript::Healthy => Ok(HealthProbe::default()),
            HealthScript::Failing => Err(Error::network("connection refused")),
            HealthScript::Hanging => {
                std::future::pending::<()>().await;
                Ok(HealthProbe::default())
            }
        }
    }

    fn stats(&self) -> serde_json::Value {
        serde_json::json!({ "provider": self.name })
    }
}

/// Usage recorder keeping every recorded result
#[derive(Default)]
pub struct RecordingUsage {
    records: Mutex<Vec<(String, GenerationResult)>>,
}

impl RecordingUsage {
    pub fn records(&self) -> Vec<(String, GenerationResult)> {
        self.records.lock().unwrap().clone()
    }
}

impl UsageRecorder for RecordingUsage {
    fn record(&self, provider: &str, result: &GenerationResult) {
        self.records
            .lock()
            .unwrap()
            .push((provider.to_string(), result.clone()));
    }

    fn totals(&self, provider: &str) -> Option<UsageTotals> {
        let records = self.records.lock().unwrap();
        let mine: Vec<_> = records.iter().filter(|(p, _)| p == provider).collect();
        if mine.is_empty() {
            return None;
        }
        Some(UsageTotals {
            requests: mine.len() as u64,
            successes: mine.iter().filter(|(_, r)| r.ok).count() as u64,
            failures: mine.iter().filter(|(_, r)| !r.ok).count() as u64,
            ..Default::default()
        })
    }
}

/// Handle over a scripted provider with a closed counting breaker
pub fn scripted_handle(
    name: &str,
    settings: ProviderSettings,
    provider: Arc<ScriptedProvider>,
) -> (ProviderHandle, Arc<CountingBreaker>) {
    let breaker = CountingBreaker::closed();
    let handle = ProviderHandle::new(
        name,
        settings,
        Ok(provider as Arc<dyn TextGenerationProvider>),
        breaker.clone(),
        FixedLimiter::admitting(),
    );
    (handle, breaker)
}

/// Handle whose adapter failed to initialize
pub fn broken_handle(name: &str, settings: ProviderSettings, error: &str) -> ProviderHandle {
    ProviderHandle::new(
        name,
        settings,
        Err(error.to_string()),
        CountingBreaker::closed(),
        FixedLimiter::admitting(),
    )
}

/// Hosted settings with an inline key so the provider is enabled
pub fn hosted(model: &str) -> ProviderSettings {
    ProviderSettings::hosted(model).with_api_key("sk-test")
}
