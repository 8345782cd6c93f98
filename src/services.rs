pub mod auth;
pub mod dashboard_service;
pub mod laporan_service;
pub mod madrasah_service;
