//! Submission form controller: synchronous field/file validation followed by
//! one multipart POST, reporting progress through an injected view.

use std::{collections::BTreeMap, sync::Arc};

use shared::protocol::SubmitResponse;
use tokio::sync::Mutex;
use tracing::warn;

use crate::{
    error::{FetchFailure, GatewayError, SUBMIT_MESSAGES},
    CandidaturaGateway, GatewayReply,
};

/// Upper bound for an attached résumé, in bytes.
pub const MAX_FILE_BYTES: usize = 1024 * 1024;
/// Extensions the backend accepts, compared case-insensitively against the
/// substring after the final dot.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

pub const MSG_REQUIRED: &str = "Campo obrigatório";
pub const MSG_FILE_MISSING: &str = "Selecione um arquivo (.pdf, .doc, .docx) até 1MB";
pub const MSG_FILE_EXTENSION: &str = "Extensão inválida. Use .pdf, .doc ou .docx";
pub const MSG_FILE_TOO_LARGE: &str = "Arquivo excede 1MB";
pub const MSG_FIX_FIELDS: &str = "Preencha os campos obrigatórios corretamente.";
pub const MSG_SENDING: &str = "Enviando...";
pub const MSG_SENT_DEFAULT: &str = "Candidatura enviada com sucesso!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Nome,
    Email,
    Telefone,
    Cargo,
    Escolaridade,
    Observacoes,
    Arquivo,
}

impl Field {
    /// Fields that must carry a non-blank value before submission.
    pub const REQUIRED: [Field; 5] = [
        Field::Nome,
        Field::Email,
        Field::Telefone,
        Field::Cargo,
        Field::Escolaridade,
    ];

    /// Name of the corresponding multipart form part.
    pub fn wire_name(self) -> &'static str {
        match self {
            Field::Nome => "nome",
            Field::Email => "email",
            Field::Telefone => "telefone",
            Field::Cargo => "cargo",
            Field::Escolaridade => "escolaridade",
            Field::Observacoes => "observacoes",
            Field::Arquivo => "arquivo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Values for one submission attempt; cleared only after a confirmed send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub cargo: String,
    pub escolaridade: String,
    pub observacoes: String,
    pub arquivo: Option<AttachedFile>,
}

impl FormState {
    fn text_value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Nome => Some(&self.nome),
            Field::Email => Some(&self.email),
            Field::Telefone => Some(&self.telefone),
            Field::Cargo => Some(&self.cargo),
            Field::Escolaridade => Some(&self.escolaridade),
            Field::Observacoes => Some(&self.observacoes),
            Field::Arquivo => None,
        }
    }

    fn set_text_value(&mut self, field: Field, value: String) {
        match field {
            Field::Nome => self.nome = value,
            Field::Email => self.email = value,
            Field::Telefone => self.telefone = value,
            Field::Cargo => self.cargo = value,
            Field::Escolaridade => self.escolaridade = value,
            Field::Observacoes => self.observacoes = value,
            // The attachment goes through attach_file/clear_file.
            Field::Arquivo => {}
        }
    }
}

pub type ValidationErrors = BTreeMap<Field, &'static str>;

/// Recomputes the full error set from scratch; earlier passes leave no trace.
pub fn validate(form: &FormState) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in Field::REQUIRED {
        let blank = form
            .text_value(field)
            .map_or(true, |value| value.trim().is_empty());
        if blank {
            errors.insert(field, MSG_REQUIRED);
        }
    }
    match &form.arquivo {
        None => {
            errors.insert(Field::Arquivo, MSG_FILE_MISSING);
        }
        Some(file) => {
            if !has_allowed_extension(&file.filename) {
                errors.insert(Field::Arquivo, MSG_FILE_EXTENSION);
            } else if file.bytes.len() > MAX_FILE_BYTES {
                errors.insert(Field::Arquivo, MSG_FILE_TOO_LARGE);
            }
        }
    }
    errors
}

fn has_allowed_extension(filename: &str) -> bool {
    filename.rsplit_once('.').is_some_and(|(_, extension)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Neutral,
    Success,
    Error,
}

/// Rendering surface for the submission page.
pub trait SubmissionView: Send + Sync {
    fn status(&self, kind: StatusKind, message: &str);
    fn field_error(&self, field: Field, message: &str);
    fn field_error_cleared(&self, field: Field);
    fn all_errors_cleared(&self);
    fn submit_enabled(&self, enabled: bool);
    fn form_reset(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another attempt is still in flight; nothing was done.
    Busy,
    /// Validation failed; errors were reported per field and no request left.
    Invalid,
    /// The backend confirmed the submission; the form was reset.
    Sent,
    /// The attempt failed; the form keeps its values.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

struct ControllerState {
    form: FormState,
    errors: ValidationErrors,
    phase: Phase,
}

pub struct SubmissionController {
    gateway: Arc<dyn CandidaturaGateway>,
    view: Arc<dyn SubmissionView>,
    state: Mutex<ControllerState>,
}

impl SubmissionController {
    pub fn new(gateway: Arc<dyn CandidaturaGateway>, view: Arc<dyn SubmissionView>) -> Self {
        Self {
            gateway,
            view,
            state: Mutex::new(ControllerState {
                form: FormState::default(),
                errors: ValidationErrors::new(),
                phase: Phase::Idle,
            }),
        }
    }

    /// Records a field edit. Any error on that field clears immediately,
    /// without waiting for the next validation pass.
    pub async fn set_field(&self, field: Field, value: impl Into<String> + Send) {
        let mut state = self.state.lock().await;
        state.form.set_text_value(field, value.into());
        if state.errors.remove(&field).is_some() {
            self.view.field_error_cleared(field);
        }
    }

    pub async fn attach_file(&self, file: AttachedFile) {
        let mut state = self.state.lock().await;
        state.form.arquivo = Some(file);
        if state.errors.remove(&Field::Arquivo).is_some() {
            self.view.field_error_cleared(Field::Arquivo);
        }
    }

    pub async fn clear_file(&self) {
        let mut state = self.state.lock().await;
        state.form.arquivo = None;
        if state.errors.remove(&Field::Arquivo).is_some() {
            self.view.field_error_cleared(Field::Arquivo);
        }
    }

    pub async fn form(&self) -> FormState {
        self.state.lock().await.form.clone()
    }

    /// One full attempt: validate, then submit if the form is clean.
    pub async fn submit(&self) -> SubmitOutcome {
        let form = {
            let mut state = self.state.lock().await;
            if state.phase != Phase::Idle {
                return SubmitOutcome::Busy;
            }
            state.phase = Phase::Validating;
            state.errors.clear();
            self.view.all_errors_cleared();

            let errors = validate(&state.form);
            if !errors.is_empty() {
                for (field, message) in &errors {
                    self.view.field_error(*field, message);
                }
                state.errors = errors;
                state.phase = Phase::Idle;
                self.view.status(StatusKind::Error, MSG_FIX_FIELDS);
                return SubmitOutcome::Invalid;
            }

            state.phase = Phase::Submitting;
            state.form.clone()
        };

        self.view.submit_enabled(false);
        self.view.status(StatusKind::Neutral, MSG_SENDING);

        let reply = self.gateway.submit(&form).await;
        let outcome = match classify(reply) {
            Ok(mensagem) => {
                {
                    let mut state = self.state.lock().await;
                    state.form = FormState::default();
                    state.phase = Phase::Idle;
                }
                self.view.form_reset();
                self.view.status(
                    StatusKind::Success,
                    mensagem.as_deref().unwrap_or(MSG_SENT_DEFAULT),
                );
                SubmitOutcome::Sent
            }
            Err(failure) => {
                if let FetchFailure::Network(reason) = &failure {
                    warn!(error = %reason, "submission request failed");
                }
                self.state.lock().await.phase = Phase::Idle;
                self.view
                    .status(StatusKind::Error, &failure.user_message(&SUBMIT_MESSAGES));
                SubmitOutcome::Failed
            }
        };

        // Hand the control back on every terminal path, parseable body or not.
        self.view.submit_enabled(true);
        outcome
    }
}

fn classify(
    reply: Result<GatewayReply<SubmitResponse>, GatewayError>,
) -> Result<Option<String>, FetchFailure> {
    let reply = match reply {
        Ok(reply) => reply,
        Err(GatewayError::Network(reason)) => return Err(FetchFailure::Network(reason)),
    };
    let http_success = reply.is_http_success();
    match reply.body {
        Some(body) if http_success && body.ok => Ok(body.mensagem),
        Some(body) => Err(FetchFailure::Api {
            server_message: body.error,
        }),
        None => Err(FetchFailure::Api {
            server_message: None,
        }),
    }
}
