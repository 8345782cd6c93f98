// src/services/madrasah_service.rs

use crate::{
    common::error::AppError,
    db::{MadrasahRepository, PengumumanRepository},
    models::{
        madrasah::{Madrasah, MadrasahPayload, ProfilMadrasahPayload, saring_madrasah},
        pengumuman::{Pengumuman, PengumumanPayload},
    },
};

#[derive(Clone)]
pub struct MadrasahService {
    madrasah_repo: MadrasahRepository,
    pengumuman_repo: PengumumanRepository,
}

impl MadrasahService {
    pub fn new(madrasah_repo: MadrasahRepository, pengumuman_repo: PengumumanRepository) -> Self {
        Self {
            madrasah_repo,
            pengumuman_repo,
        }
    }

    pub async fn daftar(&self, cari: &str, status: Option<i16>) -> Result<Vec<Madrasah>, AppError> {
        let daftar = self.madrasah_repo.get_all().await?;
        Ok(saring_madrasah(daftar, cari, status))
    }

    pub async fn simpan(&self, payload: &MadrasahPayload) -> Result<Madrasah, AppError> {
        let madrasah = self.madrasah_repo.create(payload).await?;
        tracing::info!(
            id_madrasah = madrasah.id_madrasah,
            nama = %madrasah.nama_madrasah,
            "Madrasah baru terdaftar"
        );
        Ok(madrasah)
    }

    pub async fn perbarui(
        &self,
        id_madrasah: i32,
        payload: &MadrasahPayload,
    ) -> Result<(), AppError> {
        if !self.madrasah_repo.update(id_madrasah, payload).await? {
            return Err(AppError::MadrasahTidakDitemukan);
        }
        Ok(())
    }

    pub async fn hapus(&self, id_madrasah: i32) -> Result<(), AppError> {
        if !self.madrasah_repo.delete(id_madrasah).await? {
            return Err(AppError::MadrasahTidakDitemukan);
        }
        tracing::info!(id_madrasah, "Madrasah dihapus");
        Ok(())
    }

    // Profil madrasah milik operator yang sedang login.
    pub async fn profil(&self, id_madrasah: i32) -> Result<Madrasah, AppError> {
        self.madrasah_repo
            .find_by_id(id_madrasah)
            .await?
            .ok_or(AppError::MadrasahTidakDitemukan)
    }

    pub async fn perbarui_profil(
        &self,
        id_madrasah: i32,
        payload: &ProfilMadrasahPayload,
    ) -> Result<(), AppError> {
        if !self
            .madrasah_repo
            .update_profil(id_madrasah, payload)
            .await?
        {
            return Err(AppError::MadrasahTidakDitemukan);
        }
        Ok(())
    }

    // ---
    // Pengumuman
    // ---

    pub async fn daftar_pengumuman(&self) -> Result<Vec<Pengumuman>, AppError> {
        self.pengumuman_repo.get_all().await
    }

    pub async fn buat_pengumuman(
        &self,
        payload: &PengumumanPayload,
    ) -> Result<Pengumuman, AppError> {
        self.pengumuman_repo.create(payload).await
    }

    pub async fn hapus_pengumuman(&self, id: i32) -> Result<(), AppError> {
        if !self.pengumuman_repo.delete(id).await? {
            return Err(AppError::PengumumanTidakDitemukan);
        }
        Ok(())
    }
}
