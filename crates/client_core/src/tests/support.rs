//! Shared fakes: a scripted gateway and recording views.

use std::sync::Mutex;

use async_trait::async_trait;
use shared::protocol::{ListResponse, SubmitResponse};
use tokio::sync::oneshot;

use crate::{
    admin::{AdminView, RenderedRow},
    error::GatewayError,
    submission::{Field, FormState, StatusKind, SubmissionView},
    CandidaturaGateway, GatewayReply,
};

pub type SubmitReply = Result<GatewayReply<SubmitResponse>, GatewayError>;
pub type ListReply = Result<GatewayReply<ListResponse>, GatewayError>;

pub struct FakeGateway {
    submit_reply: SubmitReply,
    list_reply: ListReply,
    pub submitted: Mutex<Vec<FormState>>,
    pub tokens: Mutex<Vec<String>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl FakeGateway {
    pub fn for_submit(reply: SubmitReply) -> Self {
        Self {
            submit_reply: reply,
            list_reply: Err(GatewayError::Network("unscripted".to_string())),
            submitted: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
        }
    }

    pub fn for_list(reply: ListReply) -> Self {
        Self {
            submit_reply: Err(GatewayError::Network("unscripted".to_string())),
            list_reply: reply,
            submitted: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
        }
    }

    /// Makes the next request block until the returned sender fires.
    pub fn gated(self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let gateway = Self {
            gate: Mutex::new(Some(rx)),
            ..self
        };
        (gateway, tx)
    }

    async fn wait_for_gate(&self) {
        let gate = self.gate.lock().expect("gate lock").take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

#[async_trait]
impl CandidaturaGateway for FakeGateway {
    async fn submit(&self, form: &FormState) -> SubmitReply {
        self.submitted.lock().expect("submitted lock").push(form.clone());
        self.wait_for_gate().await;
        self.submit_reply.clone()
    }

    async fn list_candidaturas(&self, token: &str) -> ListReply {
        self.tokens.lock().expect("tokens lock").push(token.to_string());
        self.wait_for_gate().await;
        self.list_reply.clone()
    }
}

#[derive(Default)]
pub struct RecordingSubmissionView {
    pub statuses: Mutex<Vec<(StatusKind, String)>>,
    pub field_errors: Mutex<Vec<(Field, String)>>,
    pub cleared_fields: Mutex<Vec<Field>>,
    pub clear_all_count: Mutex<usize>,
    pub submit_enabled_calls: Mutex<Vec<bool>>,
    pub reset_count: Mutex<usize>,
}

impl RecordingSubmissionView {
    pub fn last_status(&self) -> Option<(StatusKind, String)> {
        self.statuses.lock().expect("statuses lock").last().cloned()
    }

    pub fn errors_for(&self, field: Field) -> Vec<String> {
        self.field_errors
            .lock()
            .expect("field_errors lock")
            .iter()
            .filter(|(recorded, _)| *recorded == field)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl SubmissionView for RecordingSubmissionView {
    fn status(&self, kind: StatusKind, message: &str) {
        self.statuses
            .lock()
            .expect("statuses lock")
            .push((kind, message.to_string()));
    }

    fn field_error(&self, field: Field, message: &str) {
        self.field_errors
            .lock()
            .expect("field_errors lock")
            .push((field, message.to_string()));
    }

    fn field_error_cleared(&self, field: Field) {
        self.cleared_fields
            .lock()
            .expect("cleared_fields lock")
            .push(field);
    }

    fn all_errors_cleared(&self) {
        *self.clear_all_count.lock().expect("clear_all lock") += 1;
    }

    fn submit_enabled(&self, enabled: bool) {
        self.submit_enabled_calls
            .lock()
            .expect("submit_enabled lock")
            .push(enabled);
    }

    fn form_reset(&self) {
        *self.reset_count.lock().expect("reset lock") += 1;
    }
}

#[derive(Default)]
pub struct RecordingAdminView {
    pub statuses: Mutex<Vec<String>>,
    pub placeholders: Mutex<Vec<String>>,
    pub row_batches: Mutex<Vec<Vec<RenderedRow>>>,
}

impl RecordingAdminView {
    pub fn last_status(&self) -> Option<String> {
        self.statuses.lock().expect("statuses lock").last().cloned()
    }

    pub fn last_placeholder(&self) -> Option<String> {
        self.placeholders
            .lock()
            .expect("placeholders lock")
            .last()
            .cloned()
    }
}

impl AdminView for RecordingAdminView {
    fn status(&self, message: &str) {
        self.statuses
            .lock()
            .expect("statuses lock")
            .push(message.to_string());
    }

    fn placeholder(&self, message: &str) {
        self.placeholders
            .lock()
            .expect("placeholders lock")
            .push(message.to_string());
    }

    fn rows(&self, rows: &[RenderedRow]) {
        self.row_batches
            .lock()
            .expect("row_batches lock")
            .push(rows.to_vec());
    }
}
