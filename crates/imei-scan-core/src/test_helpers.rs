//! Test helpers for imei-scan-core unit tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use imei_scan_types::protocol::{
    Candidate, Content, GeminiRole, GenerateContentRequest, GenerateContentResponse, Part,
};
use imei_scan_types::{ScanError, ScanResult};

use crate::upstream::client::ProviderClient;

/// Provider stub that replays scripted answers in order and records every payload.
///
/// Running out of answers yields a transport error.
pub struct ScriptedProvider {
    answers: Mutex<VecDeque<ScanResult<GenerateContentResponse>>>,
    payloads: Mutex<Vec<GenerateContentRequest>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(answers: Vec<ScanResult<GenerateContentResponse>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            payloads: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn payloads(&self) -> Vec<GenerateContentRequest> {
        self.payloads.lock().expect("payload lock").clone()
    }
}

#[async_trait]
impl ProviderClient for ScriptedProvider {
    async fn generate_content(
        &self,
        _api_key: &str,
        payload: &GenerateContentRequest,
    ) -> ScanResult<GenerateContentResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().expect("payload lock").push(payload.clone());
        self.answers.lock().expect("answer lock").pop_front().unwrap_or_else(|| {
            Err(ScanError::Transport { message: "no scripted answer left".to_string() })
        })
    }
}

/// A one-candidate response whose only part is `text`.
pub fn text_response(text: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content { role: Some(GeminiRole::Model), parts: vec![Part::text(text)] }),
            finish_reason: Some("STOP".to_string()),
        }],
        usage_metadata: None,
    }
}
