// src/db/laporan_repo.rs

use sqlx::{PgConnection, PgPool};

use crate::{
    common::error::AppError,
    models::laporan::{
        GuruRow, KeuanganRow, Laporan, LaporanMasuk, MobilerRow, RekapPersonalRow, SarprasRow,
        SiswaRow,
    },
};

const KOLOM_LAPORAN: &str = "id_laporan, id_madrasah, bulan_tahun, status_laporan, \
     catatan_revisi, submitted_at, created_at, updated_at";

// Jumlah baris tiap bagian, dipakai untuk pemeriksaan kelengkapan
// sebelum laporan dikirim.
#[derive(Debug, sqlx::FromRow)]
pub struct BagianCounts {
    pub siswa: i64,
    pub rekap_personal: i64,
    pub guru: i64,
    pub sarpras: i64,
    pub mobiler: i64,
    pub keuangan: i64,
}

#[derive(Clone)]
pub struct LaporanRepository {
    pool: PgPool,
}

impl LaporanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id_laporan: i32) -> Result<Option<Laporan>, AppError> {
        let laporan = sqlx::query_as::<_, Laporan>(&format!(
            "SELECT {KOLOM_LAPORAN} FROM laporan WHERE id_laporan = $1"
        ))
        .bind(id_laporan)
        .fetch_optional(&self.pool)
        .await?;
        Ok(laporan)
    }

    pub async fn list_by_madrasah(&self, id_madrasah: i32) -> Result<Vec<Laporan>, AppError> {
        let daftar = sqlx::query_as::<_, Laporan>(&format!(
            "SELECT {KOLOM_LAPORAN} FROM laporan WHERE id_madrasah = $1 ORDER BY bulan_tahun DESC"
        ))
        .bind(id_madrasah)
        .fetch_all(&self.pool)
        .await?;
        Ok(daftar)
    }

    // Daftar validasi admin: semua laporan yang sudah pernah dikirim
    // (draft tidak ikut), beserta identitas madrasahnya.
    pub async fn list_masuk(&self) -> Result<Vec<LaporanMasuk>, AppError> {
        let daftar = sqlx::query_as::<_, LaporanMasuk>(
            "SELECT l.id_laporan, l.bulan_tahun, l.status_laporan, l.submitted_at, l.updated_at, \
                    m.id_madrasah, m.nama_madrasah, m.npsn, m.alamat, m.kecamatan \
             FROM laporan l \
             JOIN madrasah m ON m.id_madrasah = l.id_madrasah \
             WHERE l.status_laporan <> 'draft' \
             ORDER BY l.updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(daftar)
    }

    pub async fn recent_masuk(&self, batas: i64) -> Result<Vec<LaporanMasuk>, AppError> {
        let daftar = sqlx::query_as::<_, LaporanMasuk>(
            "SELECT l.id_laporan, l.bulan_tahun, l.status_laporan, l.submitted_at, l.updated_at, \
                    m.id_madrasah, m.nama_madrasah, m.npsn, m.alamat, m.kecamatan \
             FROM laporan l \
             JOIN madrasah m ON m.id_madrasah = l.id_madrasah \
             WHERE l.status_laporan <> 'draft' \
             ORDER BY l.updated_at DESC \
             LIMIT $1",
        )
        .bind(batas)
        .fetch_all(&self.pool)
        .await?;
        Ok(daftar)
    }

    // Membuat laporan baru berstatus draft dan menanam baris template
    // tiap bagian dalam satu transaksi.
    pub async fn create(
        &self,
        id_madrasah: i32,
        bulan_tahun: chrono::NaiveDate,
        siswa: &[SiswaRow],
        rekap_personal: &[RekapPersonalRow],
        sarpras: &[SarprasRow],
        mobiler: &[MobilerRow],
    ) -> Result<Laporan, AppError> {
        let mut tx = self.pool.begin().await?;

        let laporan = sqlx::query_as::<_, Laporan>(&format!(
            "INSERT INTO laporan (id_madrasah, bulan_tahun) VALUES ($1, $2) \
             RETURNING {KOLOM_LAPORAN}"
        ))
        .bind(id_madrasah)
        .bind(bulan_tahun)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::LaporanSudahAda;
                }
            }
            e.into()
        })?;

        Self::insert_siswa(&mut tx, laporan.id_laporan, siswa).await?;
        Self::insert_rekap_personal(&mut tx, laporan.id_laporan, rekap_personal).await?;
        Self::insert_sarpras(&mut tx, laporan.id_laporan, sarpras).await?;
        Self::insert_mobiler(&mut tx, laporan.id_laporan, mobiler).await?;

        tx.commit().await?;
        Ok(laporan)
    }

    pub async fn hitung_bagian(&self, id_laporan: i32) -> Result<BagianCounts, AppError> {
        let counts = sqlx::query_as::<_, BagianCounts>(
            "SELECT \
                (SELECT COUNT(*) FROM laporan_siswa WHERE id_laporan = $1) AS siswa, \
                (SELECT COUNT(*) FROM laporan_rekap_personal WHERE id_laporan = $1) AS rekap_personal, \
                (SELECT COUNT(*) FROM laporan_guru WHERE id_laporan = $1) AS guru, \
                (SELECT COUNT(*) FROM laporan_sarpras WHERE id_laporan = $1) AS sarpras, \
                (SELECT COUNT(*) FROM laporan_mobiler WHERE id_laporan = $1) AS mobiler, \
                (SELECT COUNT(*) FROM laporan_keuangan WHERE id_laporan = $1) AS keuangan",
        )
        .bind(id_laporan)
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }

    // ---
    // Pengambilan isi bagian. Urutan baris mengikuti urutan simpan.
    // ---

    pub async fn get_siswa(&self, id_laporan: i32) -> Result<Vec<SiswaRow>, AppError> {
        let rows = sqlx::query_as::<_, SiswaRow>(
            "SELECT kelas, jumlah_rombel, jumlah_lk, jumlah_pr, mutasi_masuk, mutasi_keluar, \
             keterangan FROM laporan_siswa WHERE id_laporan = $1 ORDER BY id",
        )
        .bind(id_laporan)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_rekap_personal(
        &self,
        id_laporan: i32,
    ) -> Result<Vec<RekapPersonalRow>, AppError> {
        let rows = sqlx::query_as::<_, RekapPersonalRow>(
            "SELECT keadaan, jumlah_lk, jumlah_pr, mutasi_masuk, mutasi_keluar, keterangan \
             FROM laporan_rekap_personal WHERE id_laporan = $1 ORDER BY id",
        )
        .bind(id_laporan)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_guru(&self, id_laporan: i32) -> Result<Vec<GuruRow>, AppError> {
        let rows = sqlx::query_as::<_, GuruRow>(
            "SELECT nama_guru, nip_nik, lp, status_pegawai, jabatan, pendidikan_terakhir, \
             sertifikasi, jumlah_jam, mutasi_status, keterangan \
             FROM laporan_guru WHERE id_laporan = $1 ORDER BY id",
        )
        .bind(id_laporan)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_sarpras(&self, id_laporan: i32) -> Result<Vec<SarprasRow>, AppError> {
        let rows = sqlx::query_as::<_, SarprasRow>(
            "SELECT jenis_aset, luas, kondisi_baik, kondisi_rusak_ringan, kondisi_rusak_berat, \
             kekurangan, perlu_rehab, keterangan \
             FROM laporan_sarpras WHERE id_laporan = $1 ORDER BY id",
        )
        .bind(id_laporan)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_mobiler(&self, id_laporan: i32) -> Result<Vec<MobilerRow>, AppError> {
        let rows = sqlx::query_as::<_, MobilerRow>(
            "SELECT nama_barang, jumlah_total, kondisi_baik, kondisi_rusak_ringan, \
             kondisi_rusak_berat, kekurangan, keterangan \
             FROM laporan_mobiler WHERE id_laporan = $1 ORDER BY id",
        )
        .bind(id_laporan)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_keuangan(&self, id_laporan: i32) -> Result<Vec<KeuanganRow>, AppError> {
        let rows = sqlx::query_as::<_, KeuanganRow>(
            "SELECT uraian_kegiatan, volume, satuan, harga_satuan \
             FROM laporan_keuangan WHERE id_laporan = $1 ORDER BY id",
        )
        .bind(id_laporan)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---
    // Simpan bagian: isi lama diganti seluruhnya dalam satu transaksi,
    // urutan array klien dipertahankan lewat urutan insert.
    // ---

    pub async fn replace_siswa(
        &self,
        id_laporan: i32,
        rows: &[SiswaRow],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM laporan_siswa WHERE id_laporan = $1")
            .bind(id_laporan)
            .execute(&mut *tx)
            .await?;
        Self::insert_siswa(&mut tx, id_laporan, rows).await?;
        Self::sentuh_laporan(&mut tx, id_laporan).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn replace_rekap_personal(
        &self,
        id_laporan: i32,
        rows: &[RekapPersonalRow],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM laporan_rekap_personal WHERE id_laporan = $1")
            .bind(id_laporan)
            .execute(&mut *tx)
            .await?;
        Self::insert_rekap_personal(&mut tx, id_laporan, rows).await?;
        Self::sentuh_laporan(&mut tx, id_laporan).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn replace_guru(&self, id_laporan: i32, rows: &[GuruRow]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM laporan_guru WHERE id_laporan = $1")
            .bind(id_laporan)
            .execute(&mut *tx)
            .await?;
        for r in rows {
            sqlx::query(
                "INSERT INTO laporan_guru (id_laporan, nama_guru, nip_nik, lp, status_pegawai, \
                 jabatan, pendidikan_terakhir, sertifikasi, jumlah_jam, mutasi_status, keterangan) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
            )
            .bind(id_laporan)
            .bind(&r.nama_guru)
            .bind(&r.nip_nik)
            .bind(&r.lp)
            .bind(&r.status_pegawai)
            .bind(&r.jabatan)
            .bind(&r.pendidikan_terakhir)
            .bind(r.sertifikasi)
            .bind(r.jumlah_jam)
            .bind(&r.mutasi_status)
            .bind(&r.keterangan)
            .execute(&mut *tx)
            .await?;
        }
        Self::sentuh_laporan(&mut tx, id_laporan).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn replace_sarpras(
        &self,
        id_laporan: i32,
        rows: &[SarprasRow],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM laporan_sarpras WHERE id_laporan = $1")
            .bind(id_laporan)
            .execute(&mut *tx)
            .await?;
        Self::insert_sarpras(&mut tx, id_laporan, rows).await?;
        Self::sentuh_laporan(&mut tx, id_laporan).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn replace_mobiler(
        &self,
        id_laporan: i32,
        rows: &[MobilerRow],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM laporan_mobiler WHERE id_laporan = $1")
            .bind(id_laporan)
            .execute(&mut *tx)
            .await?;
        Self::insert_mobiler(&mut tx, id_laporan, rows).await?;
        Self::sentuh_laporan(&mut tx, id_laporan).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn replace_keuangan(
        &self,
        id_laporan: i32,
        rows: &[KeuanganRow],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM laporan_keuangan WHERE id_laporan = $1")
            .bind(id_laporan)
            .execute(&mut *tx)
            .await?;
        for r in rows {
            sqlx::query(
                "INSERT INTO laporan_keuangan (id_laporan, uraian_kegiatan, volume, satuan, \
                 harga_satuan) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(id_laporan)
            .bind(&r.uraian_kegiatan)
            .bind(r.volume)
            .bind(&r.satuan)
            .bind(r.harga_satuan)
            .execute(&mut *tx)
            .await?;
        }
        Self::sentuh_laporan(&mut tx, id_laporan).await?;
        tx.commit().await?;
        Ok(())
    }

    // ---
    // Transisi status. Semua UPDATE dijaga status saat ini sehingga
    // transisi ganda (klik dobel, dua admin bersamaan) hanya satu yang
    // menang; pemanggil membaca rows_affected.
    // ---

    pub async fn kirim(&self, id_laporan: i32) -> Result<bool, AppError> {
        let res = sqlx::query(
            "UPDATE laporan SET status_laporan = 'submitted', submitted_at = NOW(), \
             updated_at = NOW() \
             WHERE id_laporan = $1 AND status_laporan IN ('draft', 'revisi')",
        )
        .bind(id_laporan)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    pub async fn verifikasi(&self, id_laporan: i32) -> Result<bool, AppError> {
        let res = sqlx::query(
            "UPDATE laporan SET status_laporan = 'verified', updated_at = NOW() \
             WHERE id_laporan = $1 AND status_laporan = 'submitted'",
        )
        .bind(id_laporan)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    pub async fn minta_revisi(
        &self,
        id_laporan: i32,
        catatan: Option<&str>,
    ) -> Result<bool, AppError> {
        let res = sqlx::query(
            "UPDATE laporan SET status_laporan = 'revisi', catatan_revisi = $2, \
             updated_at = NOW() \
             WHERE id_laporan = $1 AND status_laporan = 'submitted'",
        )
        .bind(id_laporan)
        .bind(catatan)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    // ---
    // Helper insert per bagian, dipakai oleh create() dan replace_*().
    // ---

    async fn insert_siswa(
        conn: &mut PgConnection,
        id_laporan: i32,
        rows: &[SiswaRow],
    ) -> Result<(), AppError> {
        for r in rows {
            sqlx::query(
                "INSERT INTO laporan_siswa (id_laporan, kelas, jumlah_rombel, jumlah_lk, \
                 jumlah_pr, mutasi_masuk, mutasi_keluar, keterangan) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(id_laporan)
            .bind(&r.kelas)
            .bind(r.jumlah_rombel)
            .bind(r.jumlah_lk)
            .bind(r.jumlah_pr)
            .bind(r.mutasi_masuk)
            .bind(r.mutasi_keluar)
            .bind(&r.keterangan)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn insert_rekap_personal(
        conn: &mut PgConnection,
        id_laporan: i32,
        rows: &[RekapPersonalRow],
    ) -> Result<(), AppError> {
        for r in rows {
            sqlx::query(
                "INSERT INTO laporan_rekap_personal (id_laporan, keadaan, jumlah_lk, jumlah_pr, \
                 mutasi_masuk, mutasi_keluar, keterangan) VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(id_laporan)
            .bind(&r.keadaan)
            .bind(r.jumlah_lk)
            .bind(r.jumlah_pr)
            .bind(r.mutasi_masuk)
            .bind(r.mutasi_keluar)
            .bind(&r.keterangan)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn insert_sarpras(
        conn: &mut PgConnection,
        id_laporan: i32,
        rows: &[SarprasRow],
    ) -> Result<(), AppError> {
        for r in rows {
            sqlx::query(
                "INSERT INTO laporan_sarpras (id_laporan, jenis_aset, luas, kondisi_baik, \
                 kondisi_rusak_ringan, kondisi_rusak_berat, kekurangan, perlu_rehab, keterangan) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(id_laporan)
            .bind(&r.jenis_aset)
            .bind(&r.luas)
            .bind(r.kondisi_baik)
            .bind(r.kondisi_rusak_ringan)
            .bind(r.kondisi_rusak_berat)
            .bind(r.kekurangan)
            .bind(r.perlu_rehab)
            .bind(&r.keterangan)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn insert_mobiler(
        conn: &mut PgConnection,
        id_laporan: i32,
        rows: &[MobilerRow],
    ) -> Result<(), AppError> {
        for r in rows {
            sqlx::query(
                "INSERT INTO laporan_mobiler (id_laporan, nama_barang, jumlah_total, \
                 kondisi_baik, kondisi_rusak_ringan, kondisi_rusak_berat, kekurangan, keterangan) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(id_laporan)
            .bind(&r.nama_barang)
            .bind(r.jumlah_total)
            .bind(r.kondisi_baik)
            .bind(r.kondisi_rusak_ringan)
            .bind(r.kondisi_rusak_berat)
            .bind(r.kekurangan)
            .bind(&r.keterangan)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn sentuh_laporan(conn: &mut PgConnection, id_laporan: i32) -> Result<(), AppError> {
        sqlx::query("UPDATE laporan SET updated_at = NOW() WHERE id_laporan = $1")
            .bind(id_laporan)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
