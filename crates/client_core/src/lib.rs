//! Client library for the résumé submission service: the submission form and
//! admin listing controllers, and the HTTP gateway they talk through. The
//! backend itself (storage, auth, file serving) lives elsewhere and is only
//! reached through the contracts modeled here.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::protocol::{ListResponse, SubmitResponse};

use crate::error::GatewayError;

pub mod admin;
pub mod error;
pub mod submission;

pub use admin::{AdminListController, AdminView, LoadOutcome, RenderedRow};
pub use submission::{
    AttachedFile, Field, FormState, StatusKind, SubmissionController, SubmissionView,
    SubmitOutcome,
};

/// Raw result of one backend exchange: the HTTP status plus the decoded body,
/// or `None` when the body did not parse. Turning this into a user-facing
/// outcome is the controllers' job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReply<T> {
    pub status: u16,
    pub body: Option<T>,
}

impl<T> GatewayReply<T> {
    pub fn is_http_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP seam between the controllers and the backend.
#[async_trait]
pub trait CandidaturaGateway: Send + Sync {
    async fn submit(&self, form: &FormState) -> Result<GatewayReply<SubmitResponse>, GatewayError>;
    async fn list_candidaturas(
        &self,
        token: &str,
    ) -> Result<GatewayReply<ListResponse>, GatewayError>;
}

/// reqwest-backed gateway against a live backend.
pub struct HttpGateway {
    http: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    async fn read_reply<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<GatewayReply<T>, GatewayError> {
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| GatewayError::Network(err.to_string()))?;
        Ok(GatewayReply {
            status,
            body: serde_json::from_slice(&bytes).ok(),
        })
    }
}

#[async_trait]
impl CandidaturaGateway for HttpGateway {
    async fn submit(&self, form: &FormState) -> Result<GatewayReply<SubmitResponse>, GatewayError> {
        let mut multipart = reqwest::multipart::Form::new()
            .text("nome", form.nome.clone())
            .text("email", form.email.clone())
            .text("telefone", form.telefone.clone())
            .text("cargo", form.cargo.clone())
            .text("escolaridade", form.escolaridade.clone())
            .text("observacoes", form.observacoes.clone());
        if let Some(file) = &form.arquivo {
            let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                .file_name(file.filename.clone());
            multipart = multipart.part("arquivo", part);
        }

        let response = self
            .http
            .post(format!("{}/submit", self.base_url))
            .multipart(multipart)
            .send()
            .await
            .map_err(|err| GatewayError::Network(err.to_string()))?;
        Self::read_reply(response).await
    }

    async fn list_candidaturas(
        &self,
        token: &str,
    ) -> Result<GatewayReply<ListResponse>, GatewayError> {
        let response = self
            .http
            .get(format!("{}/api/candidaturas", self.base_url))
            .query(&[("token", token)])
            .send()
            .await
            .map_err(|err| GatewayError::Network(err.to_string()))?;
        Self::read_reply(response).await
    }
}

#[cfg(test)]
mod tests;
