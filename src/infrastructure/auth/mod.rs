mod static_token_repository;

pub use static_token_repository::StaticTokenRepository;
