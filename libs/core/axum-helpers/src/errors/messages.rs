//! Client-facing messages shared by every route.

pub const ROUTE_NOT_FOUND: &str = "Route non trouvée";
pub const INVALID_ID: &str = "ID invalide";
pub const INVALID_JSON: &str = "Corps de requête JSON invalide";
pub const INTERNAL_ERROR: &str = "Erreur interne du serveur";
pub const DB_CONNECTION_ERROR: &str = "Erreur de connexion à la base de données";
pub const DB_CONNECTION_OK: &str = "Connexion à la base de données réussie";
pub const SERVICE_UNAVAILABLE: &str = "Service indisponible";
