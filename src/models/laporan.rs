// src/models/laporan.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::format::format_rupiah;
use crate::models::madrasah::MadrasahRingkas;

// Siklus hidup laporan: draft -> submitted -> {verified | revisi},
// revisi -> submitted (kirim ulang), verified final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_laporan", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusLaporan {
    Draft,
    Submitted,
    Revisi,
    Verified,
}

impl StatusLaporan {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLaporan::Draft => "draft",
            StatusLaporan::Submitted => "submitted",
            StatusLaporan::Revisi => "revisi",
            StatusLaporan::Verified => "verified",
        }
    }

    // Operator hanya boleh mengubah isi laporan pada status draft/revisi.
    pub fn dapat_diedit(&self) -> bool {
        matches!(self, StatusLaporan::Draft | StatusLaporan::Revisi)
    }

    pub fn dapat_dikirim(&self) -> bool {
        self.dapat_diedit()
    }

    // Validasi admin (terima/revisi) hanya berlaku untuk laporan terkirim.
    pub fn menunggu_validasi(&self) -> bool {
        matches!(self, StatusLaporan::Submitted)
    }
}

impl std::fmt::Display for StatusLaporan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Record laporan bulanan sebagaimana tersimpan di tabel 'laporan'
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Laporan {
    pub id_laporan: i32,
    pub id_madrasah: i32,
    pub bulan_tahun: NaiveDate,
    pub status_laporan: StatusLaporan,
    pub catatan_revisi: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BuatLaporanPayload {
    pub bulan_tahun: NaiveDate,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct MintaRevisiPayload {
    #[validate(length(max = 1000, message = "Catatan revisi terlalu panjang."))]
    pub catatan: Option<String>,
}

// ---
// Baris bagian laporan. Field numerik sengaja Option: nilai kosong tetap
// tampil kosong di form, tetapi dihitung 0 saat penjumlahan.
// ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate, FromRow, ToSchema)]
pub struct SiswaRow {
    #[validate(length(min = 1, message = "Kelas wajib diisi."))]
    pub kelas: String,
    #[validate(range(min = 0, message = "Jumlah rombel tidak boleh negatif."))]
    pub jumlah_rombel: Option<i32>,
    #[validate(range(min = 0, message = "Jumlah siswa tidak boleh negatif."))]
    pub jumlah_lk: Option<i32>,
    #[validate(range(min = 0, message = "Jumlah siswa tidak boleh negatif."))]
    pub jumlah_pr: Option<i32>,
    #[validate(range(min = 0, message = "Mutasi tidak boleh negatif."))]
    pub mutasi_masuk: Option<i32>,
    #[validate(range(min = 0, message = "Mutasi tidak boleh negatif."))]
    pub mutasi_keluar: Option<i32>,
    pub keterangan: Option<String>,
}

impl SiswaRow {
    // Total akhir baris: lk + pr + masuk - keluar
    pub fn total(&self) -> i32 {
        self.jumlah_lk.unwrap_or(0) + self.jumlah_pr.unwrap_or(0)
            + self.mutasi_masuk.unwrap_or(0)
            - self.mutasi_keluar.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, FromRow, ToSchema)]
pub struct RekapPersonalRow {
    #[validate(length(min = 1, message = "Keadaan wajib diisi."))]
    pub keadaan: String,
    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif."))]
    pub jumlah_lk: Option<i32>,
    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif."))]
    pub jumlah_pr: Option<i32>,
    #[validate(range(min = 0, message = "Mutasi tidak boleh negatif."))]
    pub mutasi_masuk: Option<i32>,
    #[validate(range(min = 0, message = "Mutasi tidak boleh negatif."))]
    pub mutasi_keluar: Option<i32>,
    pub keterangan: Option<String>,
}

impl RekapPersonalRow {
    pub fn total(&self) -> i32 {
        self.jumlah_lk.unwrap_or(0) + self.jumlah_pr.unwrap_or(0)
            + self.mutasi_masuk.unwrap_or(0)
            - self.mutasi_keluar.unwrap_or(0)
    }
}

// Satu baris per individu, sesuai tabel data_guru.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, FromRow, ToSchema)]
pub struct GuruRow {
    #[validate(length(min = 1, message = "Nama guru wajib diisi."))]
    pub nama_guru: String,
    pub nip_nik: Option<String>,
    pub lp: Option<String>,
    pub status_pegawai: Option<String>,
    pub jabatan: Option<String>,
    pub pendidikan_terakhir: Option<String>,
    pub sertifikasi: Option<bool>,
    #[validate(range(min = 0, message = "Jumlah jam tidak boleh negatif."))]
    pub jumlah_jam: Option<i32>,
    pub mutasi_status: Option<String>,
    pub keterangan: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, FromRow, ToSchema)]
pub struct SarprasRow {
    #[validate(length(min = 1, message = "Jenis aset wajib diisi."))]
    pub jenis_aset: String,
    pub luas: Option<String>,
    #[validate(range(min = 0, message = "Kondisi tidak boleh negatif."))]
    pub kondisi_baik: Option<i32>,
    #[validate(range(min = 0, message = "Kondisi tidak boleh negatif."))]
    pub kondisi_rusak_ringan: Option<i32>,
    #[validate(range(min = 0, message = "Kondisi tidak boleh negatif."))]
    pub kondisi_rusak_berat: Option<i32>,
    #[validate(range(min = 0, message = "Kekurangan tidak boleh negatif."))]
    pub kekurangan: Option<i32>,
    #[validate(range(min = 0, message = "Perlu rehab tidak boleh negatif."))]
    pub perlu_rehab: Option<i32>,
    pub keterangan: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, FromRow, ToSchema)]
pub struct MobilerRow {
    #[validate(length(min = 1, message = "Nama barang wajib diisi."))]
    pub nama_barang: String,
    #[validate(range(min = 0, message = "Jumlah tidak boleh negatif."))]
    pub jumlah_total: Option<i32>,
    #[validate(range(min = 0, message = "Kondisi tidak boleh negatif."))]
    pub kondisi_baik: Option<i32>,
    #[validate(range(min = 0, message = "Kondisi tidak boleh negatif."))]
    pub kondisi_rusak_ringan: Option<i32>,
    #[validate(range(min = 0, message = "Kondisi tidak boleh negatif."))]
    pub kondisi_rusak_berat: Option<i32>,
    #[validate(range(min = 0, message = "Kekurangan tidak boleh negatif."))]
    pub kekurangan: Option<i32>,
    pub keterangan: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, FromRow, ToSchema)]
pub struct KeuanganRow {
    #[validate(length(min = 1, message = "Uraian kegiatan wajib diisi."))]
    pub uraian_kegiatan: String,
    #[validate(range(min = 0, message = "Volume tidak boleh negatif."))]
    pub volume: Option<i32>,
    pub satuan: Option<String>,
    pub harga_satuan: Option<Decimal>,
}

impl KeuanganRow {
    // Total baris: volume x harga satuan
    pub fn total(&self) -> Decimal {
        Decimal::from(self.volume.unwrap_or(0)) * self.harga_satuan.unwrap_or(Decimal::ZERO)
    }
}

// Isi bagian yang dikirim operator; tiap varian membawa array barisnya
// sendiri dan dipetakan ke endpoint simpan masing-masing.
#[derive(Debug)]
pub enum BagianLaporan {
    Siswa(Vec<SiswaRow>),
    RekapPersonal(Vec<RekapPersonalRow>),
    Guru(Vec<GuruRow>),
    Sarpras(Vec<SarprasRow>),
    Mobiler(Vec<MobilerRow>),
    Keuangan(Vec<KeuanganRow>),
}

impl BagianLaporan {
    pub fn nama(&self) -> &'static str {
        match self {
            BagianLaporan::Siswa(_) => "siswa",
            BagianLaporan::RekapPersonal(_) => "rekap_personal",
            BagianLaporan::Guru(_) => "guru",
            BagianLaporan::Sarpras(_) => "sarpras",
            BagianLaporan::Mobiler(_) => "mobiler",
            BagianLaporan::Keuangan(_) => "keuangan",
        }
    }
}

// ---
// Rekap kolom (footer tabel). Semua field None saat tidak ada baris,
// supaya klien merendernya kosong, bukan 0.
// ---

#[derive(Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct RekapKolom {
    pub jumlah_lk: Option<i64>,
    pub jumlah_pr: Option<i64>,
    pub mutasi_masuk: Option<i64>,
    pub mutasi_keluar: Option<i64>,
    pub total: Option<i64>,
}

impl RekapKolom {
    fn dari_iter<I>(baris: I) -> Self
    where
        I: Iterator<Item = (i32, i32, i32, i32)>,
    {
        let mut lk = 0i64;
        let mut pr = 0i64;
        let mut masuk = 0i64;
        let mut keluar = 0i64;
        let mut kosong = true;
        for (b_lk, b_pr, b_masuk, b_keluar) in baris {
            kosong = false;
            lk += i64::from(b_lk);
            pr += i64::from(b_pr);
            masuk += i64::from(b_masuk);
            keluar += i64::from(b_keluar);
        }
        if kosong {
            return Self::default();
        }
        Self {
            jumlah_lk: Some(lk),
            jumlah_pr: Some(pr),
            mutasi_masuk: Some(masuk),
            mutasi_keluar: Some(keluar),
            // Footer total = jumlah total turunan tiap baris.
            total: Some(lk + pr + masuk - keluar),
        }
    }

    pub fn dari_siswa(rows: &[SiswaRow]) -> Self {
        Self::dari_iter(rows.iter().map(|r| {
            (
                r.jumlah_lk.unwrap_or(0),
                r.jumlah_pr.unwrap_or(0),
                r.mutasi_masuk.unwrap_or(0),
                r.mutasi_keluar.unwrap_or(0),
            )
        }))
    }

    pub fn dari_rekap_personal(rows: &[RekapPersonalRow]) -> Self {
        Self::dari_iter(rows.iter().map(|r| {
            (
                r.jumlah_lk.unwrap_or(0),
                r.jumlah_pr.unwrap_or(0),
                r.mutasi_masuk.unwrap_or(0),
                r.mutasi_keluar.unwrap_or(0),
            )
        }))
    }
}

pub fn total_keuangan(rows: &[KeuanganRow]) -> Decimal {
    rows.iter().map(KeuanganRow::total).sum()
}

// Laporan lengkap dengan seluruh bagiannya. Konvensi penamaan array
// mengikuti kolom tabel: data_siswa, data_guru, dst.
#[derive(Debug, Serialize, ToSchema)]
pub struct LaporanDetail {
    #[serde(flatten)]
    pub laporan: Laporan,
    pub madrasah: MadrasahRingkas,
    pub data_siswa: Vec<SiswaRow>,
    pub data_rekap_personal: Vec<RekapPersonalRow>,
    pub data_guru: Vec<GuruRow>,
    pub data_sarpras: Vec<SarprasRow>,
    pub data_mobiler: Vec<MobilerRow>,
    pub data_keuangan: Vec<KeuanganRow>,
    pub rekap_siswa: RekapKolom,
    pub rekap_personal: RekapKolom,
    pub total_keuangan: Decimal,
    pub total_keuangan_format: String,
}

impl LaporanDetail {
    pub fn baru(
        laporan: Laporan,
        madrasah: MadrasahRingkas,
        data_siswa: Vec<SiswaRow>,
        data_rekap_personal: Vec<RekapPersonalRow>,
        data_guru: Vec<GuruRow>,
        data_sarpras: Vec<SarprasRow>,
        data_mobiler: Vec<MobilerRow>,
        data_keuangan: Vec<KeuanganRow>,
    ) -> Self {
        let rekap_siswa = RekapKolom::dari_siswa(&data_siswa);
        let rekap_personal = RekapKolom::dari_rekap_personal(&data_rekap_personal);
        let total = total_keuangan(&data_keuangan);
        Self {
            laporan,
            madrasah,
            data_siswa,
            data_rekap_personal,
            data_guru,
            data_sarpras,
            data_mobiler,
            data_keuangan,
            rekap_siswa,
            rekap_personal,
            total_keuangan: total,
            total_keuangan_format: format_rupiah(total),
        }
    }
}

// Entri daftar validasi admin: laporan beserta identitas madrasahnya.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct LaporanMasuk {
    pub id_laporan: i32,
    pub bulan_tahun: NaiveDate,
    pub status_laporan: StatusLaporan,
    pub submitted_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub madrasah: MadrasahRingkas,
}

impl LaporanMasuk {
    fn cocok(&self, cari: &str, status: Option<&str>) -> bool {
        let cari_kecil = cari.to_lowercase();
        let cocok_teks = self
            .madrasah
            .nama_madrasah
            .to_lowercase()
            .contains(&cari_kecil)
            || self.madrasah.npsn.contains(cari);
        let cocok_status = match status {
            None | Some("") => true,
            Some(s) => self.status_laporan.as_str() == s,
        };
        cocok_teks && cocok_status
    }
}

// Penyaringan daftar validasi: teks substring tanpa memperhatikan huruf
// besar/kecil pada nama (NPSN apa adanya), status harus sama persis.
pub fn saring_laporan_masuk(
    daftar: Vec<LaporanMasuk>,
    cari: &str,
    status: Option<&str>,
) -> Vec<LaporanMasuk> {
    daftar
        .into_iter()
        .filter(|l| l.cocok(cari, status))
        .collect()
}

// Penyaringan daftar laporan milik operator: teks dicocokkan ke kunci
// bulan (YYYY-MM-DD), status sama persis.
pub fn saring_laporan_operator(
    daftar: Vec<Laporan>,
    cari: &str,
    status: Option<&str>,
) -> Vec<Laporan> {
    daftar
        .into_iter()
        .filter(|l| {
            let cocok_teks = l.bulan_tahun.to_string().contains(cari);
            let cocok_status = match status {
                None | Some("") => true,
                Some(s) => l.status_laporan.as_str() == s,
            };
            cocok_teks && cocok_status
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn siswa(lk: Option<i32>, pr: Option<i32>, masuk: Option<i32>, keluar: Option<i32>) -> SiswaRow {
        SiswaRow {
            kelas: "KELOMPOK A".to_string(),
            jumlah_rombel: Some(1),
            jumlah_lk: lk,
            jumlah_pr: pr,
            mutasi_masuk: masuk,
            mutasi_keluar: keluar,
            keterangan: None,
        }
    }

    fn masuk(nama: &str, npsn: &str, status: StatusLaporan) -> LaporanMasuk {
        LaporanMasuk {
            id_laporan: 1,
            bulan_tahun: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            status_laporan: status,
            submitted_at: None,
            updated_at: Utc::now(),
            madrasah: MadrasahRingkas {
                id_madrasah: 1,
                nama_madrasah: nama.to_string(),
                npsn: npsn.to_string(),
                alamat: None,
                kecamatan: None,
            },
        }
    }

    #[test]
    fn total_baris_siswa() {
        assert_eq!(siswa(Some(19), Some(19), Some(0), Some(0)).total(), 38);
        assert_eq!(siswa(Some(10), Some(9), Some(3), Some(2)).total(), 20);
    }

    #[test]
    fn field_kosong_dihitung_nol() {
        assert_eq!(siswa(Some(19), None, None, None).total(), 19);
        assert_eq!(siswa(None, None, None, None).total(), 0);
    }

    #[test]
    fn rekap_kolom_menjumlahkan_semua_baris() {
        let rows = vec![
            siswa(Some(19), Some(19), Some(0), Some(0)),
            siswa(Some(19), Some(19), Some(0), Some(0)),
        ];
        let rekap = RekapKolom::dari_siswa(&rows);
        assert_eq!(rekap.jumlah_lk, Some(38));
        assert_eq!(rekap.jumlah_pr, Some(38));
        assert_eq!(rekap.mutasi_masuk, Some(0));
        assert_eq!(rekap.mutasi_keluar, Some(0));
        // Total footer = jumlah total turunan per baris (38 + 38).
        assert_eq!(rekap.total, Some(76));
        let total_per_baris: i64 = rows.iter().map(|r| i64::from(r.total())).sum();
        assert_eq!(rekap.total, Some(total_per_baris));
    }

    #[test]
    fn rekap_kolom_ikut_menghitung_baris_nol() {
        let rows = vec![
            siswa(Some(12), Some(8), Some(1), Some(0)),
            siswa(Some(0), Some(0), Some(0), Some(0)),
        ];
        let rekap = RekapKolom::dari_siswa(&rows);
        assert_eq!(rekap.jumlah_lk, Some(12));
        assert_eq!(rekap.total, Some(21));
    }

    #[test]
    fn rekap_kolom_kosong_saat_tanpa_baris() {
        let rekap = RekapKolom::dari_siswa(&[]);
        assert_eq!(rekap, RekapKolom::default());
        assert_eq!(rekap.total, None);
    }

    #[test]
    fn total_keuangan_per_baris_dan_laporan() {
        let baris = KeuanganRow {
            uraian_kegiatan: "PEMBELIAN ATK".to_string(),
            volume: Some(5),
            satuan: Some("PAKET".to_string()),
            harga_satuan: Some(Decimal::from(20_000)),
        };
        assert_eq!(baris.total(), Decimal::from(100_000));
        assert_eq!(format_rupiah(baris.total()), "Rp 100.000");

        let kosong = KeuanganRow {
            uraian_kegiatan: "HONOR".to_string(),
            volume: None,
            satuan: None,
            harga_satuan: Some(Decimal::from(50_000)),
        };
        assert_eq!(kosong.total(), Decimal::ZERO);
        assert_eq!(total_keuangan(&[baris, kosong]), Decimal::from(100_000));
    }

    #[test]
    fn status_editabel_hanya_draft_dan_revisi() {
        assert!(StatusLaporan::Draft.dapat_diedit());
        assert!(StatusLaporan::Revisi.dapat_diedit());
        assert!(!StatusLaporan::Submitted.dapat_diedit());
        assert!(!StatusLaporan::Verified.dapat_diedit());
    }

    #[test]
    fn validasi_admin_hanya_untuk_laporan_terkirim() {
        assert!(StatusLaporan::Submitted.menunggu_validasi());
        assert!(!StatusLaporan::Draft.menunggu_validasi());
        assert!(!StatusLaporan::Revisi.menunggu_validasi());
        assert!(!StatusLaporan::Verified.menunggu_validasi());
    }

    #[test]
    fn saring_status_sama_persis() {
        let daftar = vec![
            masuk("MI NURUL HUDA", "69995016", StatusLaporan::Verified),
            masuk("RA AL ITTIHAD", "69995017", StatusLaporan::Submitted),
            masuk("MTS AL FALAH", "69995018", StatusLaporan::Verified),
        ];
        let hasil = saring_laporan_masuk(daftar, "", Some("verified"));
        assert_eq!(hasil.len(), 2);
        assert!(hasil
            .iter()
            .all(|l| l.status_laporan == StatusLaporan::Verified));
    }

    #[test]
    fn saring_teks_tanpa_memperhatikan_kapital() {
        let daftar = vec![
            masuk("MI NURUL HUDA", "69995016", StatusLaporan::Submitted),
            masuk("RA AL ITTIHAD", "69995017", StatusLaporan::Submitted),
        ];
        let hasil = saring_laporan_masuk(daftar.clone(), "nurul", None);
        assert_eq!(hasil.len(), 1);
        assert_eq!(hasil[0].madrasah.nama_madrasah, "MI NURUL HUDA");

        // NPSN dicocokkan sebagai substring apa adanya.
        let hasil = saring_laporan_masuk(daftar, "995017", None);
        assert_eq!(hasil.len(), 1);
        assert_eq!(hasil[0].madrasah.npsn, "69995017");
    }

    #[test]
    fn saring_komutatif_antar_sumbu() {
        let daftar = vec![
            masuk("MI NURUL HUDA", "69995016", StatusLaporan::Verified),
            masuk("MI NURUL IMAN", "69995017", StatusLaporan::Submitted),
            masuk("RA AL ITTIHAD", "69995018", StatusLaporan::Verified),
        ];

        let teks_lalu_status = saring_laporan_masuk(
            saring_laporan_masuk(daftar.clone(), "nurul", None),
            "",
            Some("verified"),
        );
        let status_lalu_teks = saring_laporan_masuk(
            saring_laporan_masuk(daftar.clone(), "", Some("verified")),
            "nurul",
            None,
        );
        let sekaligus = saring_laporan_masuk(daftar, "nurul", Some("verified"));

        let kunci = |d: &[LaporanMasuk]| {
            d.iter().map(|l| l.madrasah.npsn.clone()).collect::<Vec<_>>()
        };
        assert_eq!(kunci(&teks_lalu_status), kunci(&sekaligus));
        assert_eq!(kunci(&status_lalu_teks), kunci(&sekaligus));

        // Idempoten: menyaring dua kali tidak mengubah hasil.
        let dua_kali = saring_laporan_masuk(sekaligus.clone(), "nurul", Some("verified"));
        assert_eq!(kunci(&dua_kali), kunci(&sekaligus));
    }

    #[test]
    fn saring_laporan_operator_per_bulan() {
        let laporan = |bulan: NaiveDate, status: StatusLaporan| Laporan {
            id_laporan: 1,
            id_madrasah: 1,
            bulan_tahun: bulan,
            status_laporan: status,
            catatan_revisi: None,
            submitted_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let daftar = vec![
            laporan(
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                StatusLaporan::Verified,
            ),
            laporan(
                NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                StatusLaporan::Draft,
            ),
        ];
        let hasil = saring_laporan_operator(daftar.clone(), "2026-02", None);
        assert_eq!(hasil.len(), 1);
        assert_eq!(hasil[0].status_laporan, StatusLaporan::Draft);

        let hasil = saring_laporan_operator(daftar, "", Some("verified"));
        assert_eq!(hasil.len(), 1);
    }
}
