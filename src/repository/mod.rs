pub mod account_repository;
pub mod application_repository;

pub use account_repository::InMemoryAccountRepository;
pub use application_repository::{ApplicationRepository, InMemoryApplicationRepository};
