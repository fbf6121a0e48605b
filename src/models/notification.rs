use serde::{Deserialize, Serialize};

/// Notification sent to a reporter, e.g. when someone finds their item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "id_notifikasi")]
    pub id: i64,
    #[serde(rename = "id_laporan", default)]
    pub report_id: Option<i64>,
    #[serde(rename = "pesan")]
    pub message: String,
    #[serde(rename = "status_baca")]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}
