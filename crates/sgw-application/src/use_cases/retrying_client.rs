//! Retrying Client
//!
//! Runs one `generate` request end to end: provider selection, breaker and
//! rate-limit gates, clamping, prompt construction, bounded retries,
//! sanitization and usage metering.

use std::sync::Arc;
use std::time::Duration;

use sgw_domain::constants::{DEFAULT_TEMPERATURE, MAX_BACKOFF_MS};
use sgw_domain::error::Error;
use sgw_domain::ports::infrastructure::UsageRecorder;
use sgw_domain::ports::providers::{
    PromptFormat, ProviderCall, ProviderResponse, TextGenerationProvider,
};
use sgw_domain::value_objects::{ErrorKind, GenerationRequest, GenerationResult, Usage};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::provider_registry::{ProviderHandle, ProviderRegistry};
use crate::domain_services::{GuardrailedPromptBuilder, OutputSanitizer, UsageMeter};

/// Name results are recorded under when no provider could be selected
pub const UNRESOLVED_PROVIDER: &str = "unresolved";

/// Clamp a requested temperature into [0, 1]
pub fn clamp_temperature(temperature: f64) -> f64 {
    if temperature.is_nan() {
        DEFAULT_TEMPERATURE
    } else {
        temperature.clamp(0.0, 1.0)
    }
}

/// Clamp a requested token budget to the provider ceiling; 0 means the ceiling
pub fn clamp_max_tokens(requested: u32, ceiling: u32) -> u32 {
    if requested == 0 {
        ceiling
    } else {
        requested.min(ceiling)
    }
}

/// Sleep before the attempt following failed attempt `attempt` (0-based)
pub fn backoff_delay(backoff_ms: u64, attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt);
    Duration::from_millis(backoff_ms.saturating_mul(factor).min(MAX_BACKOFF_MS))
}

/// Outcome of the attempt loop before it becomes a result
enum CallOutcome {
    Success(ProviderResponse),
    Failed(ErrorKind, String),
    TimedOut,
}

/// Orchestrates a single suggestion request
pub struct RetryingClient {
    registry: Arc<ProviderRegistry>,
    sanitizer: OutputSanitizer,
    meter: UsageMeter,
    recorder: Arc<dyn UsageRecorder>,
}

impl RetryingClient {
    /// Create a client
    pub fn new(
        registry: Arc<ProviderRegistry>,
        sanitizer: OutputSanitizer,
        meter: UsageMeter,
        recorder: Arc<dyn UsageRecorder>,
    ) -> Self {
        Self {
            registry,
            sanitizer,
            meter,
            recorder,
        }
    }

    /// Produce one suggestion; every outcome is returned as a result
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let started = Instant::now();

        let handle = match self.registry.resolve(request.provider_name.as_deref()) {
            Ok(handle) => handle,
            Err(error) => {
                warn!(
                    conversation_id = %request.conversation_id,
                    error = %error,
                    "No provider available for request"
                );
                let result =
                    GenerationResult::failure(error.kind(), error.to_string(), elapsed(started));
                self.recorder.record(UNRESOLVED_PROVIDER, &result);
                return result;
            }
        };

        let model = handle.resolve_model(request.model.as_deref());
        let result = self
            .generate_with(&handle, &model, request, started)
            .await
            .with_provider(handle.name(), Some(model));

        self.recorder.record(handle.name(), &result);
        result
    }

    async fn generate_with(
        &self,
        handle: &ProviderHandle,
        model: &str,
        request: &GenerationRequest,
        started: Instant,
    ) -> GenerationResult {
        let provider = handle.name();

        if handle.breaker().is_circuit_open() {
            warn!(provider, "Circuit breaker open, skipping provider call");
            return GenerationResult::failure(
                ErrorKind::CircuitBreakerOpen,
                format!("Circuit breaker is open for provider '{provider}'"),
                elapsed(started),
            );
        }

        if !handle.limiter().can_make_request(&request.conversation_id) {
            warn!(
                provider,
                conversation_id = %request.conversation_id,
                "Rate limit exceeded"
            );
            return GenerationResult::failure(
                ErrorKind::RateLimitExceeded,
                format!(
                    "Rate limit of {} requests per minute exceeded for conversation '{}'",
                    handle.settings().rate_limit_per_minute,
                    request.conversation_id
                ),
                elapsed(started),
            );
        }

        let Some(adapter) = handle.adapter() else {
            return GenerationResult::failure(
                ErrorKind::ProviderUnavailable,
                handle
                    .init_error()
                    .unwrap_or("provider adapter is not available")
                    .to_string(),
                elapsed(started),
            );
        };

        let call = self.prepare_call(handle, adapter.as_ref(), model, request);
        let deadline = request
            .max_latency_ms
            .map(|ms| started + Duration::from_millis(ms));

        match self.call_with_retries(handle, adapter.as_ref(), &call, deadline).await {
            CallOutcome::Success(response) => {
                let sanitized = self
                    .sanitizer
                    .sanitize(response.text.as_deref(), handle.settings().max_output_length);
                let latency_ms = elapsed_ms(started);
                let usage = self.meter.measure(
                    &call,
                    &response,
                    handle.settings().self_hosted,
                    latency_ms,
                );
                info!(
                    provider,
                    model,
                    latency_ms,
                    tokens_in = usage.tokens_in,
                    tokens_out = usage.tokens_out,
                    "Suggestion generated"
                );
                GenerationResult::success(sanitized.text, sanitized.structured_payload, usage)
            }
            CallOutcome::Failed(kind, message) => {
                GenerationResult::failure(kind, message, elapsed(started))
            }
            CallOutcome::TimedOut => {
                warn!(provider, "Caller deadline exceeded");
                GenerationResult::failure(
                    ErrorKind::Timeout,
                    format!(
                        "Deadline of {} ms exceeded",
                        request.max_latency_ms.unwrap_or_default()
                    ),
                    elapsed(started),
                )
            }
        }
    }

    fn prepare_call(
        &self,
        handle: &ProviderHandle,
        adapter: &dyn TextGenerationProvider,
        model: &str,
        request: &GenerationRequest,
    ) -> ProviderCall {
        let settings = handle.settings();
        let temperature = clamp_temperature(request.temperature);
        let max_tokens = clamp_max_tokens(request.max_tokens, settings.max_tokens_out);
        let turns = request.conversation();

        let (prompt, messages) = match adapter.prompt_format() {
            PromptFormat::Flat => (
                Some(GuardrailedPromptBuilder::build(
                    &turns,
                    &request.policy,
                    max_tokens,
                )),
                Vec::new(),
            ),
            PromptFormat::Messages => (
                None,
                GuardrailedPromptBuilder::messages(&turns, &request.policy, max_tokens),
            ),
        };

        ProviderCall {
            model: model.to_string(),
            prompt,
            messages,
            temperature,
            max_tokens,
            stop: settings.stop.clone(),
        }
    }

    async fn call_with_retries(
        &self,
        handle: &ProviderHandle,
        adapter: &dyn TextGenerationProvider,
        call: &ProviderCall,
        deadline: Option<Instant>,
    ) -> CallOutcome {
        let provider = handle.name();
        let settings = handle.settings();
        let max_attempts = settings.max_retries.saturating_add(1);
        let mut last_error: Option<Error> = None;

        for attempt in 0..max_attempts {
            let outcome = match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline, adapter.generate(call)).await {
                        Ok(outcome) => outcome,
                        Err(_) => return CallOutcome::TimedOut,
                    }
                }
                None => adapter.generate(call).await,
            };

            let error = match outcome {
                Ok(response) => {
                    handle.breaker().record_success();
                    debug!(provider, attempt = attempt + 1, "Provider call succeeded");
                    return CallOutcome::Success(response);
                }
                Err(error) => error,
            };

            if let Error::ProviderUnavailable { .. } = error {
                warn!(provider, error = %error, "Provider unavailable");
                return CallOutcome::Failed(ErrorKind::ProviderUnavailable, error.to_string());
            }

            if !error.is_retryable() {
                handle.breaker().record_failure();
                warn!(provider, error = %error, "Provider call failed with non-retryable error");
                return CallOutcome::Failed(error.kind(), error.to_string());
            }

            warn!(
                provider,
                attempt = attempt + 1,
                max_attempts,
                error = %error,
                "Provider call failed"
            );

            if attempt + 1 < max_attempts {
                let delay = backoff_delay(settings.backoff_ms, attempt);
                match deadline {
                    Some(deadline) => {
                        let sleep = tokio::time::sleep(delay);
                        if tokio::time::timeout_at(deadline, sleep).await.is_err() {
                            return CallOutcome::TimedOut;
                        }
                    }
                    None => tokio::time::sleep(delay).await,
                }
            }
            last_error = Some(error);
        }

        handle.breaker().record_failure();
        let message = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "provider call failed".to_string());
        warn!(provider, max_attempts, error = %message, "Retries exhausted");
        CallOutcome::Failed(ErrorKind::ProviderError, message)
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn elapsed(started: Instant) -> Usage {
    Usage::zero(elapsed_ms(started))
}
