use serde::{Deserialize, Serialize};

use crate::domain::Candidatura;

/// Body returned by `POST /submit`.
///
/// `ok` and the HTTP status together decide success; `mensagem` carries the
/// server's success text and `error` its failure text, both optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensagem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body returned by `GET /api/candidaturas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Candidatura>>,
}
