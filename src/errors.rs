use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;

/// Erreurs remontées par les services vers les handlers HTTP.
///
/// Les erreurs de validation et de règle métier portent un message
/// actionnable renvoyé tel quel au client. Les erreurs internes
/// (base de données, PDF, export) sont journalisées en détail et
/// converties en 500 générique.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Interdit(String),

    #[error("{0}")]
    Introuvable(String),

    /// Violation d'une règle métier (solde de congés insuffisant,
    /// table non autorisée à l'export, action non reconnue...)
    #[error("{0}")]
    Regle(String),

    #[error("erreur base de données: {0}")]
    BaseDeDonnees(#[from] DbErr),

    #[error("erreur lors de la génération du PDF: {0}")]
    Pdf(String),

    #[error("erreur lors de l'export de la base de données: {0}")]
    Export(String),

    #[error("{0}")]
    Interne(String),
}

impl ApiError {
    pub fn introuvable(quoi: &str, id: i32) -> Self {
        ApiError::Introuvable(format!("{} {} introuvable.", quoi, id))
    }

    fn est_interne(&self) -> bool {
        matches!(
            self,
            ApiError::BaseDeDonnees(_) | ApiError::Pdf(_) | ApiError::Export(_) | ApiError::Interne(_)
        )
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Regle(_) => StatusCode::BAD_REQUEST,
            ApiError::Interdit(_) => StatusCode::FORBIDDEN,
            ApiError::Introuvable(_) => StatusCode::NOT_FOUND,
            ApiError::BaseDeDonnees(_)
            | ApiError::Pdf(_)
            | ApiError::Export(_)
            | ApiError::Interne(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Le détail des erreurs internes ne sort jamais vers le client
        let message = if self.est_interne() {
            tracing::error!("{}", self);
            "Une erreur interne est survenue.".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "status": "error",
            "message": message,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuts_http() {
        assert_eq!(
            ApiError::Validation("champ manquant".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Regle("solde insuffisant".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Interdit("permission refusée".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::introuvable("Congé", 42).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Pdf("police illisible".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_introuvable() {
        let e = ApiError::introuvable("Employé", 7);
        assert_eq!(e.to_string(), "Employé 7 introuvable.");
    }
}
