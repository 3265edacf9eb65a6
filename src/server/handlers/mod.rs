pub mod geocode;
pub mod routes;
pub mod statistics;
pub mod tour_logs;
pub mod tours;
pub mod transfer;
