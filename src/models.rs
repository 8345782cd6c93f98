pub mod auth;
pub mod dashboard;
pub mod laporan;
pub mod madrasah;
pub mod pengumuman;
