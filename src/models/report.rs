use serde::{Deserialize, Serialize};

/// Lifecycle status of a report as the backend names it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    #[serde(rename = "Aktif")]
    Active,
    #[serde(rename = "Selesai")]
    Resolved,
    #[serde(rename = "Dihapus")]
    Deleted,
    /// Any status string this client does not know. Never matches a filter.
    #[serde(other)]
    Unknown,
}

impl ReportStatus {
    /// Statuses offered as list filters, in display order.
    pub const FILTERS: [ReportStatus; 3] = [
        ReportStatus::Active,
        ReportStatus::Resolved,
        ReportStatus::Deleted,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Active => "Aktif",
            ReportStatus::Resolved => "Selesai",
            ReportStatus::Deleted => "Dihapus",
            ReportStatus::Unknown => "Tidak diketahui",
        }
    }
}

impl Default for ReportStatus {
    fn default() -> Self {
        ReportStatus::Active
    }
}

/// A lost-item report as returned by `GET /laporan/mine`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "id_laporan")]
    pub id: i64,
    #[serde(rename = "judul_laporan")]
    pub title: String,
    #[serde(rename = "deskripsi", default)]
    pub description: Option<String>,
    #[serde(rename = "id_kategori", default)]
    pub category_id: Option<i64>,
    #[serde(rename = "kategori_nama", default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub status: ReportStatus,

    // Location
    #[serde(rename = "lokasi_hilang", default)]
    pub lost_location: Option<String>,
    #[serde(rename = "lokasi", default)]
    pub location: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "tanggal_hilang", default)]
    pub lost_date: Option<String>,

    // Contact
    #[serde(rename = "nama_pelapor", default)]
    pub reporter_name: Option<String>,
    #[serde(rename = "kontak_pelapor", default)]
    pub reporter_phone: Option<String>,
    #[serde(rename = "email_pelapor", default)]
    pub reporter_email: Option<String>,

    #[serde(rename = "foto_url", default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Report {
    /// Location line shown on a card: the reporter's free text, else the
    /// city/province label computed by the backend.
    pub fn display_location(&self) -> Option<&str> {
        self.lost_location
            .as_deref()
            .or(self.location.as_deref())
            .filter(|l| !l.trim().is_empty())
    }
}

/// Set the status of every report with `id`. Returns whether one matched.
pub fn apply_status(reports: &mut [Report], id: i64, status: ReportStatus) -> bool {
    let mut matched = false;
    for report in reports.iter_mut().filter(|r| r.id == id) {
        report.status = status;
        matched = true;
    }
    matched
}

/// Body of `POST /laporan`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewReport {
    #[serde(rename = "nama_pelapor")]
    pub reporter_name: String,
    #[serde(rename = "kontak_pelapor", skip_serializing_if = "Option::is_none")]
    pub reporter_phone: Option<String>,
    #[serde(rename = "email_pelapor", skip_serializing_if = "Option::is_none")]
    pub reporter_email: Option<String>,
    #[serde(rename = "judul_laporan")]
    pub title: String,
    #[serde(rename = "deskripsi", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "lokasi_hilang", skip_serializing_if = "Option::is_none")]
    pub lost_location: Option<String>,
    #[serde(rename = "id_kota", skip_serializing_if = "Option::is_none")]
    pub city_id: Option<i64>,
    #[serde(rename = "tanggal_hilang", skip_serializing_if = "Option::is_none")]
    pub lost_date: Option<String>,
    #[serde(rename = "id_kategori", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(rename = "foto_url", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Response of `POST /laporan`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatedReport {
    #[serde(rename = "id_laporan")]
    pub id: i64,
    pub token_cookie: String,
    #[serde(rename = "nama_pelapor")]
    pub reporter_name: String,
    #[serde(rename = "judul_laporan")]
    pub title: String,
    pub status: ReportStatus,
}

/// Optional filters of `GET /laporan`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportFilters {
    pub status: Option<ReportStatus>,
    pub category_id: Option<i64>,
    pub province_id: Option<i64>,
    pub city_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "id_kategori")]
    pub id: i64,
    #[serde(rename = "nama_kategori")]
    pub name: String,
}

#[cfg(test)]
pub(crate) fn sample_report(id: i64, status: ReportStatus) -> Report {
    Report {
        id,
        title: format!("Dompet hilang #{}", id),
        description: Some("Dompet coklat".to_string()),
        category_id: Some(2),
        category_name: Some("Dompet".to_string()),
        status,
        lost_location: Some("Stasiun Bogor".to_string()),
        location: None,
        latitude: Some(-6.595),
        longitude: Some(106.79),
        lost_date: Some("2026-10-01".to_string()),
        reporter_name: Some("Rina".to_string()),
        reporter_phone: Some("08123456789".to_string()),
        reporter_email: None,
        photo_url: None,
        created_at: Some("2026-10-02T08:00:00".to_string()),
    }
}

/// Arbitrary reports: unset optionals, unknown statuses and non-ASCII text.
#[cfg(test)]
pub(crate) fn arb_report() -> impl proptest::strategy::Strategy<Value = Report> {
    use proptest::option::of;
    use proptest::prelude::*;

    fn text() -> impl Strategy<Value = String> {
        "\\PC{0,24}"
    }
    fn status() -> impl Strategy<Value = ReportStatus> {
        prop_oneof![
            Just(ReportStatus::Active),
            Just(ReportStatus::Resolved),
            Just(ReportStatus::Deleted),
            Just(ReportStatus::Unknown),
        ]
    }
    // Three decimals, so the JSON text converts back to the same f64.
    fn coordinate() -> impl Strategy<Value = f64> {
        (-180_000i32..=180_000).prop_map(|v| f64::from(v) / 1000.0)
    }

    (
        (any::<i64>(), text(), of(text()), of(any::<i64>()), of(text()), status()),
        (of(text()), of(text()), of(coordinate()), of(coordinate()), of(text())),
        (of(text()), of(text()), of(text()), of(text()), of(text())),
    )
        .prop_map(
            |(
                (id, title, description, category_id, category_name, status),
                (lost_location, location, latitude, longitude, lost_date),
                (reporter_name, reporter_phone, reporter_email, photo_url, created_at),
            )| Report {
                id,
                title,
                description,
                category_id,
                category_name,
                status,
                lost_location,
                location,
                latitude,
                longitude,
                lost_date,
                reporter_name,
                reporter_phone,
                reporter_email,
                photo_url,
                created_at,
            },
        )
}
