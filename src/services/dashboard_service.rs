// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::{DashboardRepository, LaporanRepository},
    models::dashboard::{AdminStats, KecamatanProgress, OperatorDashboard, RecapRow, persentase},
};

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
    laporan_repo: LaporanRepository,
}

impl DashboardService {
    pub fn new(dashboard_repo: DashboardRepository, laporan_repo: LaporanRepository) -> Self {
        Self {
            dashboard_repo,
            laporan_repo,
        }
    }

    pub async fn statistik_admin(&self) -> Result<AdminStats, AppError> {
        let ringkasan = self.dashboard_repo.hitung_ringkasan().await?;
        let recent_submissions = self.laporan_repo.recent_masuk(5).await?;
        let kecamatan_progress: Vec<KecamatanProgress> = self
            .dashboard_repo
            .progres_kecamatan()
            .await?
            .into_iter()
            .map(|k| KecamatanProgress {
                percentage: persentase(k.laporan_masuk, k.total_madrasah),
                kecamatan: k.kecamatan,
                total_madrasah: k.total_madrasah,
                laporan_masuk: k.laporan_masuk,
            })
            .collect();

        Ok(AdminStats {
            total_madrasah: ringkasan.total_madrasah,
            laporan_masuk: ringkasan.laporan_masuk,
            terverifikasi: ringkasan.terverifikasi,
            perlu_revisi: ringkasan.perlu_revisi,
            recent_submissions,
            kecamatan_progress,
        })
    }

    // Rekap kabupaten; bulan disaring dengan awalan kunci YYYY-MM,
    // kecamatan dengan kecocokan persis (tanpa membedakan kapital).
    pub async fn rekap(
        &self,
        bulan: Option<&str>,
        kecamatan: Option<&str>,
    ) -> Result<Vec<RecapRow>, AppError> {
        let daftar = self.dashboard_repo.rekap().await?;
        Ok(daftar
            .into_iter()
            .filter(|r| {
                let cocok_bulan = match bulan {
                    None | Some("") => true,
                    Some(b) => r.bulan_tahun.to_string().starts_with(b),
                };
                let cocok_kecamatan = match kecamatan {
                    None | Some("") => true,
                    Some(k) => r
                        .kecamatan
                        .as_deref()
                        .is_some_and(|rk| rk.eq_ignore_ascii_case(k)),
                };
                cocok_bulan && cocok_kecamatan
            })
            .collect())
    }

    pub async fn dashboard_operator(
        &self,
        id_madrasah: i32,
    ) -> Result<OperatorDashboard, AppError> {
        let laporan = self.laporan_repo.list_by_madrasah(id_madrasah).await?;

        // Kartu ringkasan diisi dari laporan terbaru (daftar sudah
        // terurut bulan menurun); tanpa laporan, semua nol.
        let (status_terakhir, total_siswa, total_guru) = match laporan.first() {
            Some(terbaru) => {
                let total = self
                    .dashboard_repo
                    .total_bagian(terbaru.id_laporan)
                    .await?;
                (
                    terbaru.status_laporan.to_string(),
                    total.total_siswa,
                    total.total_guru,
                )
            }
            None => ("BELUM ADA".to_string(), 0, 0),
        };

        Ok(OperatorDashboard {
            status_terakhir,
            total_siswa,
            total_guru,
            laporan,
        })
    }
}
