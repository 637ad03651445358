use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Client-facing texts for user errors.
pub mod messages {
    pub const REQUIRED_FIELDS: &str = "Le nom d'utilisateur et l'email sont requis";
    pub const INVALID_EMAIL: &str = "Format d'email invalide";
    pub const INVALID_USERNAME_LENGTH: &str =
        "Le nom d'utilisateur doit contenir entre 3 et 50 caractères";
    pub const NO_FIELDS: &str = "Aucun champ à mettre à jour";
    pub const NOT_FOUND: &str = "Utilisateur non trouvé";
    pub const DUPLICATE_USERNAME: &str = "Ce nom d'utilisateur existe déjà";
    pub const DUPLICATE_EMAIL: &str = "Cet email existe déjà";

    pub const CREATED: &str = "Utilisateur créé avec succès";
    pub const UPDATED: &str = "Utilisateur mis à jour avec succès";
    pub const DELETED: &str = "Utilisateur supprimé avec succès";
}

#[derive(Debug, Error)]
pub enum UserError {
    /// Carries one of the [`messages`] validation texts
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No fields to update")]
    NoFieldsProvided,

    #[error("User not found: {0}")]
    NotFound(i32),

    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    #[error("Email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub(crate) fn validation(message: &str) -> Self {
        UserError::Validation(message.to_string())
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::NoFieldsProvided => AppError::BadRequest(messages::NO_FIELDS.to_string()),
            UserError::NotFound(_) => AppError::NotFound(messages::NOT_FOUND.to_string()),
            UserError::DuplicateUsername(_) => {
                AppError::Conflict(messages::DUPLICATE_USERNAME.to_string())
            }
            UserError::DuplicateEmail(_) => {
                AppError::Conflict(messages::DUPLICATE_EMAIL.to_string())
            }
            UserError::Storage(msg) => AppError::internal(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::validation(messages::INVALID_EMAIL), StatusCode::BAD_REQUEST),
            (UserError::NoFieldsProvided, StatusCode::BAD_REQUEST),
            (UserError::NotFound(7), StatusCode::NOT_FOUND),
            (UserError::DuplicateUsername("bob".into()), StatusCode::CONFLICT),
            (UserError::DuplicateEmail("bob@x.com".into()), StatusCode::CONFLICT),
            (
                UserError::Storage("connection reset".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let app: AppError = err.into();
            assert_eq!(app.status(), expected);
        }
    }

    #[test]
    fn test_conflict_messages() {
        match AppError::from(UserError::DuplicateEmail("a@b.co".into())) {
            AppError::Conflict(msg) => assert_eq!(msg, messages::DUPLICATE_EMAIL),
            other => panic!("unexpected {:?}", other),
        }
        match AppError::from(UserError::DuplicateUsername("bob".into())) {
            AppError::Conflict(msg) => assert_eq!(msg, messages::DUPLICATE_USERNAME),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_storage_keeps_detail_out_of_error_text() {
        match AppError::from(UserError::Storage("pool timed out".into())) {
            AppError::Internal { error, detail } => {
                assert_eq!(error, "Erreur interne du serveur");
                assert_eq!(detail, "pool timed out");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
