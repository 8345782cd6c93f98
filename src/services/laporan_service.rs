// src/services/laporan_service.rs

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{LaporanRepository, MadrasahRepository},
    models::laporan::{
        BagianLaporan, Laporan, LaporanDetail, LaporanMasuk, MobilerRow, RekapPersonalRow,
        SarprasRow, SiswaRow, saring_laporan_masuk, saring_laporan_operator,
    },
};

// Baris template yang ditanam saat laporan dibuat. Kolom pertama tiap
// tabel dirender statis oleh form, jadi barisnya harus sudah ada;
// baris tambahan masuk lewat simpan bagian (ganti seluruh array).
const TEMPLATE_KELAS: &[&str] = &["KELOMPOK A", "KELOMPOK B"];
const TEMPLATE_KEADAAN: &[&str] = &[
    "KEPALA MADRASAH",
    "GURU PNS",
    "GURU NON PNS",
    "TENAGA KEPENDIDIKAN",
    "PENJAGA MADRASAH",
];
const TEMPLATE_JENIS_ASET: &[&str] = &["RUANG KELAS", "RUANG KANTOR", "RUANG GURU", "TOILET"];
const TEMPLATE_NAMA_BARANG: &[&str] = &["MEJA SISWA", "KURSI SISWA", "PAPAN TULIS", "LEMARI"];

#[derive(Clone)]
pub struct LaporanService {
    laporan_repo: LaporanRepository,
    madrasah_repo: MadrasahRepository,
}

impl LaporanService {
    pub fn new(laporan_repo: LaporanRepository, madrasah_repo: MadrasahRepository) -> Self {
        Self {
            laporan_repo,
            madrasah_repo,
        }
    }

    // ---
    // Sisi operator
    // ---

    pub async fn daftar_operator(
        &self,
        id_madrasah: i32,
        cari: &str,
        status: Option<&str>,
    ) -> Result<Vec<Laporan>, AppError> {
        let daftar = self.laporan_repo.list_by_madrasah(id_madrasah).await?;
        Ok(saring_laporan_operator(daftar, cari, status))
    }

    pub async fn buat(
        &self,
        id_madrasah: i32,
        bulan_tahun: NaiveDate,
    ) -> Result<Laporan, AppError> {
        let siswa: Vec<SiswaRow> = TEMPLATE_KELAS
            .iter()
            .map(|kelas| SiswaRow {
                kelas: kelas.to_string(),
                jumlah_rombel: None,
                jumlah_lk: None,
                jumlah_pr: None,
                mutasi_masuk: None,
                mutasi_keluar: None,
                keterangan: None,
            })
            .collect();
        let rekap_personal: Vec<RekapPersonalRow> = TEMPLATE_KEADAAN
            .iter()
            .map(|keadaan| RekapPersonalRow {
                keadaan: keadaan.to_string(),
                jumlah_lk: None,
                jumlah_pr: None,
                mutasi_masuk: None,
                mutasi_keluar: None,
                keterangan: None,
            })
            .collect();
        let sarpras: Vec<SarprasRow> = TEMPLATE_JENIS_ASET
            .iter()
            .map(|jenis| SarprasRow {
                jenis_aset: jenis.to_string(),
                luas: None,
                kondisi_baik: None,
                kondisi_rusak_ringan: None,
                kondisi_rusak_berat: None,
                kekurangan: None,
                perlu_rehab: None,
                keterangan: None,
            })
            .collect();
        let mobiler: Vec<MobilerRow> = TEMPLATE_NAMA_BARANG
            .iter()
            .map(|nama| MobilerRow {
                nama_barang: nama.to_string(),
                jumlah_total: None,
                kondisi_baik: None,
                kondisi_rusak_ringan: None,
                kondisi_rusak_berat: None,
                kekurangan: None,
                keterangan: None,
            })
            .collect();

        self.laporan_repo
            .create(id_madrasah, bulan_tahun, &siswa, &rekap_personal, &sarpras, &mobiler)
            .await
    }

    pub async fn detail_operator(
        &self,
        id_laporan: i32,
        id_madrasah: i32,
    ) -> Result<LaporanDetail, AppError> {
        let laporan = self.ambil_milik(id_laporan, id_madrasah).await?;
        self.rakit_detail(laporan).await
    }

    pub async fn simpan_bagian(
        &self,
        id_laporan: i32,
        id_madrasah: i32,
        bagian: BagianLaporan,
    ) -> Result<(), AppError> {
        let laporan = self.ambil_milik(id_laporan, id_madrasah).await?;
        if !laporan.status_laporan.dapat_diedit() {
            return Err(AppError::LaporanTerkunci(laporan.status_laporan));
        }

        match &bagian {
            BagianLaporan::Siswa(rows) => {
                for r in rows {
                    r.validate()?;
                }
                self.laporan_repo.replace_siswa(id_laporan, rows).await?;
            }
            BagianLaporan::RekapPersonal(rows) => {
                for r in rows {
                    r.validate()?;
                }
                self.laporan_repo
                    .replace_rekap_personal(id_laporan, rows)
                    .await?;
            }
            BagianLaporan::Guru(rows) => {
                for r in rows {
                    r.validate()?;
                }
                self.laporan_repo.replace_guru(id_laporan, rows).await?;
            }
            BagianLaporan::Sarpras(rows) => {
                for r in rows {
                    r.validate()?;
                }
                self.laporan_repo.replace_sarpras(id_laporan, rows).await?;
            }
            BagianLaporan::Mobiler(rows) => {
                for r in rows {
                    r.validate()?;
                }
                self.laporan_repo.replace_mobiler(id_laporan, rows).await?;
            }
            BagianLaporan::Keuangan(rows) => {
                for r in rows {
                    r.validate()?;
                }
                self.laporan_repo.replace_keuangan(id_laporan, rows).await?;
            }
        }

        tracing::info!(
            id_laporan,
            bagian = bagian.nama(),
            "Bagian laporan disimpan"
        );
        Ok(())
    }

    // Kirim laporan: sekali jalan, dijaga konfirmasi di sisi klien dan
    // status di sisi database. Bagian wajib harus sudah terisi.
    pub async fn kirim(&self, id_laporan: i32, id_madrasah: i32) -> Result<(), AppError> {
        let laporan = self.ambil_milik(id_laporan, id_madrasah).await?;
        if !laporan.status_laporan.dapat_dikirim() {
            return Err(AppError::LaporanTerkunci(laporan.status_laporan));
        }

        let counts = self.laporan_repo.hitung_bagian(id_laporan).await?;
        let mut kosong: Vec<String> = Vec::new();
        if counts.siswa == 0 {
            kosong.push("data siswa".to_string());
        }
        if counts.rekap_personal == 0 {
            kosong.push("rekap personal".to_string());
        }
        if counts.sarpras == 0 {
            kosong.push("sarpras".to_string());
        }
        if counts.mobiler == 0 {
            kosong.push("mobiler".to_string());
        }
        if counts.keuangan == 0 {
            kosong.push("keuangan".to_string());
        }
        if !kosong.is_empty() {
            return Err(AppError::LaporanBelumLengkap(kosong));
        }

        if !self.laporan_repo.kirim(id_laporan).await? {
            // Kalah balapan dengan transisi lain; laporkan status terkini.
            let terbaru = self
                .laporan_repo
                .find_by_id(id_laporan)
                .await?
                .ok_or(AppError::LaporanTidakDitemukan)?;
            return Err(AppError::LaporanTerkunci(terbaru.status_laporan));
        }

        tracing::info!(id_laporan, id_madrasah, "Laporan dikirim untuk validasi");
        Ok(())
    }

    // ---
    // Sisi admin
    // ---

    pub async fn daftar_masuk(
        &self,
        cari: &str,
        status: Option<&str>,
    ) -> Result<Vec<LaporanMasuk>, AppError> {
        let daftar = self.laporan_repo.list_masuk().await?;
        Ok(saring_laporan_masuk(daftar, cari, status))
    }

    pub async fn detail_admin(&self, id_laporan: i32) -> Result<LaporanDetail, AppError> {
        let laporan = self
            .laporan_repo
            .find_by_id(id_laporan)
            .await?
            .ok_or(AppError::LaporanTidakDitemukan)?;
        self.rakit_detail(laporan).await
    }

    pub async fn verifikasi(&self, id_laporan: i32) -> Result<(), AppError> {
        let laporan = self
            .laporan_repo
            .find_by_id(id_laporan)
            .await?
            .ok_or(AppError::LaporanTidakDitemukan)?;
        if !laporan.status_laporan.menunggu_validasi() {
            return Err(AppError::BelumMenungguValidasi(laporan.status_laporan));
        }

        if !self.laporan_repo.verifikasi(id_laporan).await? {
            let terbaru = self
                .laporan_repo
                .find_by_id(id_laporan)
                .await?
                .ok_or(AppError::LaporanTidakDitemukan)?;
            return Err(AppError::BelumMenungguValidasi(terbaru.status_laporan));
        }

        tracing::info!(id_laporan, "Laporan diterima (verified)");
        Ok(())
    }

    pub async fn minta_revisi(
        &self,
        id_laporan: i32,
        catatan: Option<&str>,
    ) -> Result<(), AppError> {
        let laporan = self
            .laporan_repo
            .find_by_id(id_laporan)
            .await?
            .ok_or(AppError::LaporanTidakDitemukan)?;
        if !laporan.status_laporan.menunggu_validasi() {
            return Err(AppError::BelumMenungguValidasi(laporan.status_laporan));
        }

        if !self.laporan_repo.minta_revisi(id_laporan, catatan).await? {
            let terbaru = self
                .laporan_repo
                .find_by_id(id_laporan)
                .await?
                .ok_or(AppError::LaporanTidakDitemukan)?;
            return Err(AppError::BelumMenungguValidasi(terbaru.status_laporan));
        }

        tracing::info!(id_laporan, "Laporan dikembalikan untuk revisi");
        Ok(())
    }

    // ---
    // Helper
    // ---

    // Laporan hanya boleh diakses operator madrasah pemiliknya.
    async fn ambil_milik(&self, id_laporan: i32, id_madrasah: i32) -> Result<Laporan, AppError> {
        let laporan = self
            .laporan_repo
            .find_by_id(id_laporan)
            .await?
            .ok_or(AppError::LaporanTidakDitemukan)?;
        if laporan.id_madrasah != id_madrasah {
            return Err(AppError::AksesDitolak);
        }
        Ok(laporan)
    }

    async fn rakit_detail(&self, laporan: Laporan) -> Result<LaporanDetail, AppError> {
        let madrasah = self
            .madrasah_repo
            .find_ringkas(laporan.id_madrasah)
            .await?
            .ok_or(AppError::MadrasahTidakDitemukan)?;
        let id = laporan.id_laporan;
        Ok(LaporanDetail::baru(
            laporan,
            madrasah,
            self.laporan_repo.get_siswa(id).await?,
            self.laporan_repo.get_rekap_personal(id).await?,
            self.laporan_repo.get_guru(id).await?,
            self.laporan_repo.get_sarpras(id).await?,
            self.laporan_repo.get_mobiler(id).await?,
            self.laporan_repo.get_keuangan(id).await?,
        ))
    }
}
