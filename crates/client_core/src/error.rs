//! Failure taxonomy for backend exchanges, plus the curated status messages
//! shown for each kind. Raw errors never reach a view; they are classified
//! here and logged where diagnostics matter.

use thiserror::Error;

/// The request never completed. Everything that did complete, including HTTP
/// errors, arrives as a `GatewayReply` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("request did not complete: {0}")]
    Network(String),
}

/// How a finished exchange failed, in classification priority order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// HTTP 401; the operator needs a new token.
    #[error("token rejected (HTTP 401)")]
    Auth,
    /// Any other non-success HTTP status.
    #[error("unexpected HTTP status {status}")]
    Http { status: u16 },
    /// HTTP success with `ok: false`, or a body that did not parse.
    #[error("api reported failure")]
    Api { server_message: Option<String> },
    /// The request never completed.
    #[error("network failure: {0}")]
    Network(String),
}

/// Default status text per failure kind, one table per screen. A
/// server-supplied message wins over the default where the kind carries one.
pub struct MessageTable {
    pub auth: &'static str,
    pub http: &'static str,
    pub api: &'static str,
    pub network: &'static str,
}

pub const SUBMIT_MESSAGES: MessageTable = MessageTable {
    auth: "Falha no envio.",
    http: "Falha no envio.",
    api: "Falha no envio.",
    network: "Erro de rede. Tente novamente.",
};

pub const ADMIN_MESSAGES: MessageTable = MessageTable {
    auth: "Token inválido.",
    http: "Erro ao buscar dados.",
    api: "Falha na API.",
    network: "Erro de rede.",
};

impl FetchFailure {
    pub fn user_message(&self, table: &MessageTable) -> String {
        match self {
            FetchFailure::Auth => table.auth.to_string(),
            FetchFailure::Http { .. } => table.http.to_string(),
            FetchFailure::Api {
                server_message: Some(message),
            } => message.clone(),
            FetchFailure::Api {
                server_message: None,
            } => table.api.to_string(),
            FetchFailure::Network(_) => table.network.to_string(),
        }
    }
}
