pub mod admin_repository;
pub mod group_repository;
pub mod monthly_record_repository;
pub mod promoter_repository;

pub use admin_repository::AdminRepository;
pub use group_repository::GroupRepository;
pub use monthly_record_repository::MonthlyRecordRepository;
pub use promoter_repository::PromoterRepository;
