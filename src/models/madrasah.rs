// src/models/madrasah.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// Data master madrasah sebagaimana tersimpan di tabel 'madrasah'.
// status_aktif memakai 0/1 mengikuti kontrak lama.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Madrasah {
    pub id_madrasah: i32,
    pub nama_madrasah: String,
    pub npsn: String,
    pub nsm: Option<String>,
    pub alamat: Option<String>,
    pub desa: Option<String>,
    pub kecamatan: Option<String>,
    pub kabupaten: Option<String>,
    pub provinsi: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub status_aktif: i16,
    pub nama_kepala: Option<String>,
    pub nip_kepala: Option<String>,
    pub no_telp: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Identitas ringkas untuk disematkan pada daftar laporan masuk.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MadrasahRingkas {
    pub id_madrasah: i32,
    pub nama_madrasah: String,
    pub npsn: String,
    pub alamat: Option<String>,
    pub kecamatan: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MadrasahPayload {
    #[validate(length(min = 1, message = "Nama madrasah wajib diisi."))]
    pub nama_madrasah: String,
    #[validate(length(min = 1, message = "NPSN wajib diisi."))]
    pub npsn: String,
    pub nsm: Option<String>,
    pub alamat: Option<String>,
    pub desa: Option<String>,
    pub kecamatan: Option<String>,
    pub kabupaten: Option<String>,
    pub provinsi: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    #[validate(range(min = 0, max = 1, message = "Status aktif harus 0 atau 1."))]
    #[serde(default = "status_aktif_default")]
    pub status_aktif: i16,
    pub nama_kepala: Option<String>,
    pub nip_kepala: Option<String>,
    pub no_telp: Option<String>,
    #[validate(email(message = "Alamat email tidak valid."))]
    pub email: Option<String>,
}

fn status_aktif_default() -> i16 {
    1
}

// Pembaruan profil oleh operator; status_aktif tetap wewenang admin.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProfilMadrasahPayload {
    #[validate(length(min = 1, message = "Nama madrasah wajib diisi."))]
    pub nama_madrasah: String,
    #[validate(length(min = 1, message = "NPSN wajib diisi."))]
    pub npsn: String,
    pub nsm: Option<String>,
    pub alamat: Option<String>,
    pub desa: Option<String>,
    pub kecamatan: Option<String>,
    pub kabupaten: Option<String>,
    pub provinsi: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub nama_kepala: Option<String>,
    pub nip_kepala: Option<String>,
    pub no_telp: Option<String>,
    #[validate(email(message = "Alamat email tidak valid."))]
    pub email: Option<String>,
}

// Penyaringan daftar master: nama substring tanpa memperhatikan kapital,
// NPSN substring apa adanya, status_aktif sama persis.
pub fn saring_madrasah(daftar: Vec<Madrasah>, cari: &str, status: Option<i16>) -> Vec<Madrasah> {
    let cari_kecil = cari.to_lowercase();
    daftar
        .into_iter()
        .filter(|m| {
            let cocok_teks =
                m.nama_madrasah.to_lowercase().contains(&cari_kecil) || m.npsn.contains(cari);
            let cocok_status = match status {
                None => true,
                Some(s) => m.status_aktif == s,
            };
            cocok_teks && cocok_status
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn madrasah(nama: &str, npsn: &str, aktif: i16) -> Madrasah {
        Madrasah {
            id_madrasah: 1,
            nama_madrasah: nama.to_string(),
            npsn: npsn.to_string(),
            nsm: None,
            alamat: None,
            desa: None,
            kecamatan: None,
            kabupaten: None,
            provinsi: None,
            latitude: None,
            longitude: None,
            status_aktif: aktif,
            nama_kepala: None,
            nip_kepala: None,
            no_telp: None,
            email: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn saring_nama_dan_npsn() {
        let daftar = vec![
            madrasah("MI NURUL HUDA", "69995016", 1),
            madrasah("RA AL ITTIHAD", "69995017", 1),
        ];
        assert_eq!(saring_madrasah(daftar.clone(), "ittihad", None).len(), 1);
        assert_eq!(saring_madrasah(daftar.clone(), "69995016", None).len(), 1);
        assert_eq!(saring_madrasah(daftar, "", None).len(), 2);
    }

    #[test]
    fn saring_status_aktif() {
        let daftar = vec![
            madrasah("MI NURUL HUDA", "69995016", 1),
            madrasah("MI TUTUP", "69995018", 0),
        ];
        let aktif = saring_madrasah(daftar.clone(), "", Some(1));
        assert_eq!(aktif.len(), 1);
        assert_eq!(aktif[0].status_aktif, 1);

        let nonaktif = saring_madrasah(daftar.clone(), "", Some(0));
        assert_eq!(nonaktif.len(), 1);

        // Komutatif terhadap sumbu teks.
        let a = saring_madrasah(saring_madrasah(daftar.clone(), "mi", None), "", Some(1));
        let b = saring_madrasah(saring_madrasah(daftar, "", Some(1)), "mi", None);
        assert_eq!(
            a.iter().map(|m| m.npsn.clone()).collect::<Vec<_>>(),
            b.iter().map(|m| m.npsn.clone()).collect::<Vec<_>>()
        );
    }
}
