//! Admin listing controller: token-gated fetch of submission records and
//! their rendering into display-safe table rows.

use std::sync::Arc;

use shared::{
    domain::{Candidatura, CandidaturaId},
    protocol::ListResponse,
};
use tokio::sync::Mutex;
use tracing::error;
use url::form_urlencoded;

use crate::{
    error::{FetchFailure, GatewayError, ADMIN_MESSAGES},
    CandidaturaGateway, GatewayReply,
};

pub const MSG_TOKEN_PROMPT: &str = "Informe o token.";
pub const MSG_LOADING: &str = "Carregando…";
pub const MSG_NO_RECORDS: &str = "Nenhuma candidatura encontrada.";

/// One record prepared for display: free text escaped, timestamp reformatted,
/// download link carrying the operator's token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: CandidaturaId,
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub cargo: String,
    pub escolaridade: String,
    pub enviado_em: String,
    pub download_href: String,
    pub ip: String,
}

/// Rendering surface for the admin page. `placeholder` stands in for the
/// whole table body; `rows` replaces it with real records.
pub trait AdminView: Send + Sync {
    fn status(&self, message: &str);
    fn placeholder(&self, message: &str);
    fn rows(&self, rows: &[RenderedRow]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A load is still outstanding; this trigger was ignored.
    Busy,
    /// No token was supplied; the operator was prompted instead.
    MissingToken,
    /// Records were fetched and rendered; carries the record count.
    Loaded(usize),
    /// The fetch failed; a placeholder explains why.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Loading,
}

pub struct AdminListController {
    gateway: Arc<dyn CandidaturaGateway>,
    view: Arc<dyn AdminView>,
    phase: Mutex<Phase>,
}

impl AdminListController {
    pub fn new(gateway: Arc<dyn CandidaturaGateway>, view: Arc<dyn AdminView>) -> Self {
        Self {
            gateway,
            view,
            phase: Mutex::new(Phase::Idle),
        }
    }

    /// Fetches and renders the listing. Only ever triggered by an explicit
    /// operator action; never on its own.
    pub async fn load(&self, token: &str) -> LoadOutcome {
        let token = token.trim();
        if token.is_empty() {
            self.view.status(MSG_TOKEN_PROMPT);
            return LoadOutcome::MissingToken;
        }

        {
            let mut phase = self.phase.lock().await;
            if *phase == Phase::Loading {
                return LoadOutcome::Busy;
            }
            *phase = Phase::Loading;
        }

        self.view.status(MSG_LOADING);
        self.view.placeholder(MSG_LOADING);

        let reply = self.gateway.list_candidaturas(token).await;
        *self.phase.lock().await = Phase::Idle;

        match classify(reply) {
            Ok(records) => {
                if records.is_empty() {
                    self.view.placeholder(MSG_NO_RECORDS);
                } else {
                    let rendered: Vec<RenderedRow> = records
                        .iter()
                        .map(|record| render_row(record, token))
                        .collect();
                    self.view.rows(&rendered);
                }
                self.view
                    .status(&format!("Carregado: {} registro(s).", records.len()));
                LoadOutcome::Loaded(records.len())
            }
            Err(failure) => {
                if let FetchFailure::Network(reason) = &failure {
                    error!(error = %reason, "listing request failed");
                }
                let message = failure.user_message(&ADMIN_MESSAGES);
                self.view.status(&message);
                self.view.placeholder(&message);
                LoadOutcome::Failed
            }
        }
    }
}

/// Classification follows the page's priority order: 401 beats other HTTP
/// failures, which beat an application-level `ok: false`.
fn classify(
    reply: Result<GatewayReply<ListResponse>, GatewayError>,
) -> Result<Vec<Candidatura>, FetchFailure> {
    let reply = match reply {
        Ok(reply) => reply,
        Err(GatewayError::Network(reason)) => return Err(FetchFailure::Network(reason)),
    };
    if reply.status == 401 {
        return Err(FetchFailure::Auth);
    }
    if !reply.is_http_success() {
        return Err(FetchFailure::Http {
            status: reply.status,
        });
    }
    match reply.body {
        Some(body) if body.ok => Ok(body.rows.unwrap_or_default()),
        _ => Err(FetchFailure::Api {
            server_message: None,
        }),
    }
}

pub fn render_row(record: &Candidatura, token: &str) -> RenderedRow {
    RenderedRow {
        id: record.id,
        nome: escape_html(&record.nome),
        email: escape_html(&record.email),
        telefone: escape_html(&record.telefone),
        cargo: escape_html(&record.cargo),
        escolaridade: escape_html(&record.escolaridade),
        enviado_em: escape_html(&format_enviado_em(&record.enviado_em)),
        download_href: download_href(record.id, token),
        ip: escape_html(&record.ip),
    }
}

/// `2024-01-02T10:00:00Z` becomes `2024-01-02 10:00:00`.
pub fn format_enviado_em(raw: &str) -> String {
    let spaced = raw.replacen('T', " ", 1);
    match spaced.strip_suffix('Z') {
        Some(stripped) => stripped.to_string(),
        None => spaced,
    }
}

/// Records come from untrusted submitters; every free-text cell is escaped
/// before it may reach markup.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Authenticated per-record download link, opened by the host in a new
/// browsing context.
pub fn download_href(id: CandidaturaId, token: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(token.as_bytes()).collect();
    format!("/api/download/{}?token={encoded}", id.0)
}
