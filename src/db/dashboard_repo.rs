// src/db/dashboard_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{KecamatanCount, RecapRow},
};

// Ringkasan hitungan untuk kartu statistik admin.
#[derive(Debug, sqlx::FromRow)]
pub struct RingkasanCounts {
    pub total_madrasah: i64,
    pub laporan_masuk: i64,
    pub terverifikasi: i64,
    pub perlu_revisi: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub struct TotalBagian {
    pub total_siswa: i64,
    pub total_guru: i64,
}

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Empat hitungan dalam satu transaksi supaya angka-angka kartu
    // berasal dari snapshot yang sama.
    pub async fn hitung_ringkasan(&self) -> Result<RingkasanCounts, AppError> {
        let mut tx = self.pool.begin().await?;

        let total_madrasah =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM madrasah WHERE status_aktif = 1")
                .fetch_one(&mut *tx)
                .await?;

        let laporan_masuk = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM laporan \
             WHERE status_laporan <> 'draft' \
               AND date_trunc('month', bulan_tahun) = date_trunc('month', CURRENT_DATE)",
        )
        .fetch_one(&mut *tx)
        .await?;

        let terverifikasi = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM laporan \
             WHERE status_laporan = 'verified' \
               AND date_trunc('month', bulan_tahun) = date_trunc('month', CURRENT_DATE)",
        )
        .fetch_one(&mut *tx)
        .await?;

        let perlu_revisi = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM laporan \
             WHERE status_laporan = 'revisi' \
               AND date_trunc('month', bulan_tahun) = date_trunc('month', CURRENT_DATE)",
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(RingkasanCounts {
            total_madrasah,
            laporan_masuk,
            terverifikasi,
            perlu_revisi,
        })
    }

    // Jumlah madrasah aktif dan laporan bulan berjalan per kecamatan.
    pub async fn progres_kecamatan(&self) -> Result<Vec<KecamatanCount>, AppError> {
        let rows = sqlx::query_as::<_, KecamatanCount>(
            "SELECT COALESCE(m.kecamatan, '-') AS kecamatan, \
                    COUNT(DISTINCT m.id_madrasah) AS total_madrasah, \
                    COUNT(l.id_laporan) AS laporan_masuk \
             FROM madrasah m \
             LEFT JOIN laporan l ON l.id_madrasah = m.id_madrasah \
               AND l.status_laporan <> 'draft' \
               AND date_trunc('month', l.bulan_tahun) = date_trunc('month', CURRENT_DATE) \
             WHERE m.status_aktif = 1 \
             GROUP BY COALESCE(m.kecamatan, '-') \
             ORDER BY 1",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // Baris rekapitulasi kabupaten: agregasi bagian per laporan terkirim.
    pub async fn rekap(&self) -> Result<Vec<RecapRow>, AppError> {
        let rows = sqlx::query_as::<_, RecapRow>(
            "SELECT l.id_laporan, m.nama_madrasah, m.npsn, m.kecamatan, l.bulan_tahun, \
                    l.status_laporan, \
                    COALESCE((SELECT SUM(COALESCE(s.jumlah_lk, 0) + COALESCE(s.jumlah_pr, 0) \
                                + COALESCE(s.mutasi_masuk, 0) - COALESCE(s.mutasi_keluar, 0)) \
                              FROM laporan_siswa s WHERE s.id_laporan = l.id_laporan), 0)::BIGINT \
                        AS total_siswa, \
                    (SELECT COUNT(*) FROM laporan_guru g WHERE g.id_laporan = l.id_laporan \
                        AND LOWER(COALESCE(g.mutasi_status, '')) <> 'keluar')::BIGINT \
                        AS total_guru, \
                    COALESCE((SELECT SUM(COALESCE(k.volume, 0)::NUMERIC \
                                * COALESCE(k.harga_satuan, 0)) \
                              FROM laporan_keuangan k WHERE k.id_laporan = l.id_laporan), 0) \
                        AS total_keuangan \
             FROM laporan l \
             JOIN madrasah m ON m.id_madrasah = l.id_madrasah \
             WHERE l.status_laporan <> 'draft' \
             ORDER BY l.bulan_tahun DESC, m.nama_madrasah",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // Total siswa/guru satu laporan, untuk kartu dashboard operator.
    pub async fn total_bagian(&self, id_laporan: i32) -> Result<TotalBagian, AppError> {
        let total = sqlx::query_as::<_, TotalBagian>(
            "SELECT \
                COALESCE((SELECT SUM(COALESCE(s.jumlah_lk, 0) + COALESCE(s.jumlah_pr, 0) \
                            + COALESCE(s.mutasi_masuk, 0) - COALESCE(s.mutasi_keluar, 0)) \
                          FROM laporan_siswa s WHERE s.id_laporan = $1), 0)::BIGINT AS total_siswa, \
                (SELECT COUNT(*) FROM laporan_guru g WHERE g.id_laporan = $1 \
                    AND LOWER(COALESCE(g.mutasi_status, '')) <> 'keluar')::BIGINT AS total_guru",
        )
        .bind(id_laporan)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}
