pub mod user_repo;
pub use user_repo::UserRepository;
pub mod madrasah_repo;
pub use madrasah_repo::MadrasahRepository;
pub mod laporan_repo;
pub use laporan_repo::LaporanRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod pengumuman_repo;
pub use pengumuman_repo::PengumumanRepository;
