use serde::{Deserialize, Serialize};

/// Body of `POST /admin/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdminLogin {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    #[serde(rename = "id_admin")]
    pub id: i64,
    #[serde(rename = "nama_admin")]
    pub name: String,
    pub username: String,
}

/// Successful `POST /admin/login`. Bad credentials come back as a 401.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    pub success: bool,
    /// JWT for the admin-only endpoints.
    pub token: String,
    pub admin: Admin,
    #[serde(default)]
    pub message: String,
}
