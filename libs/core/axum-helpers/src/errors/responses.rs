//! Reusable OpenAPI responses for the error envelope.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Invalid id, body or field values",
    content_type = "application/json",
    example = json!({
        "success": false,
        "error": "Format d'email invalide"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "error": "Utilisateur non trouvé"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unique constraint violated",
    content_type = "application/json",
    example = json!({
        "success": false,
        "error": "Cet email existe déjà"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error (message only present in development)",
    content_type = "application/json",
    example = json!({
        "success": false,
        "error": "Erreur interne du serveur"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
