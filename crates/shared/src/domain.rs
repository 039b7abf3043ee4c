use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);
    };
}

id_newtype!(CandidaturaId);

/// One résumé submission as the listing endpoint returns it.
///
/// The backend owns these records; the client only displays them. Fields the
/// backend may add later are ignored, and absent text fields fall back to
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidatura {
    pub id: CandidaturaId,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefone: String,
    #[serde(default)]
    pub cargo: String,
    #[serde(default)]
    pub escolaridade: String,
    /// Timestamp string as stored by the backend, e.g. `2024-01-02T10:00:00Z`.
    #[serde(default)]
    pub enviado_em: String,
    #[serde(default)]
    pub ip: String,
}
