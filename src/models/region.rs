use serde::{Deserialize, Serialize};

/// Entry of `GET /wilayah/provinsi`, sorted by name server-side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Province {
    #[serde(rename = "id_provinsi")]
    pub id: i64,
    #[serde(rename = "nama_provinsi")]
    pub name: String,
}

/// Entry of `GET /wilayah/kota/{id_provinsi}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(rename = "id_kota")]
    pub id: i64,
    #[serde(rename = "nama_kota")]
    pub name: String,
}
