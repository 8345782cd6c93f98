// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::laporan::{LaporanMasuk, StatusLaporan};

// Progres pengumpulan per kecamatan untuk dashboard admin.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct KecamatanProgress {
    pub kecamatan: String,
    pub total_madrasah: i64,
    pub laporan_masuk: i64,
    pub percentage: i32,
}

// Baris agregat per kecamatan hasil query GROUP BY.
#[derive(Debug, FromRow)]
pub struct KecamatanCount {
    pub kecamatan: String,
    pub total_madrasah: i64,
    pub laporan_masuk: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminStats {
    pub total_madrasah: i64,
    pub laporan_masuk: i64,
    pub terverifikasi: i64,
    pub perlu_revisi: i64,
    pub recent_submissions: Vec<LaporanMasuk>,
    pub kecamatan_progress: Vec<KecamatanProgress>,
}

// Baris rekapitulasi kabupaten: satu laporan per baris beserta
// total siswa/guru/keuangan hasil agregasi bagian-bagiannya.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RecapRow {
    pub id_laporan: i32,
    pub nama_madrasah: String,
    pub npsn: String,
    pub kecamatan: Option<String>,
    pub bulan_tahun: NaiveDate,
    pub status_laporan: StatusLaporan,
    pub total_siswa: i64,
    pub total_guru: i64,
    pub total_keuangan: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OperatorDashboard {
    pub status_terakhir: String,
    pub total_siswa: i64,
    pub total_guru: i64,
    pub laporan: Vec<crate::models::laporan::Laporan>,
}

// Persentase bulat dengan penjaga pembagi nol; total 0 dibaca 0%.
pub fn persentase(masuk: i64, total: i64) -> i32 {
    if total <= 0 {
        return 0;
    }
    ((masuk as f64 / total as f64) * 100.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persentase_dengan_penjaga_nol() {
        assert_eq!(persentase(0, 0), 0);
        assert_eq!(persentase(5, 0), 0);
        assert_eq!(persentase(0, 10), 0);
        assert_eq!(persentase(7, 10), 70);
        assert_eq!(persentase(1, 3), 33);
        assert_eq!(persentase(2, 3), 67);
        assert_eq!(persentase(10, 10), 100);
    }
}
