/// Backend base URL
/// Set at compile time:
/// - Development: http://localhost:8000 (default)
/// - Production: via the BACKEND_URL env var
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// localStorage key of the "my reports" snapshot.
pub const REPORT_CACHE_KEY: &str = "my_laporan_cache_v1";

/// localStorage key of the offline action queue.
pub const ACTION_QUEUE_KEY: &str = "laporan_action_queue_v1";

/// Default snapshot lifetime.
pub const DEFAULT_CACHE_TTL_DAYS: i64 = 30;
/// Upper bound for a configured TTL (about a century).
pub const MAX_CACHE_TTL_DAYS: i64 = 36_500;

// User-facing notices
pub const NOTICE_OFFLINE_DATA: &str = "Menampilkan data lokal (offline)";
pub const NOTICE_FETCH_FAILED: &str = "Gagal mengambil laporan";
pub const NOTICE_MARK_FOUND_QUEUED: &str =
    "Anda sedang offline atau server bermasalah. Perubahan akan dikirim ulang saat online.";
pub const NOTICE_DELETE_QUEUED: &str =
    "Anda sedang offline atau server bermasalah. Penghapusan akan dikirim ulang saat online.";
