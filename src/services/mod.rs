pub mod auth;
pub mod movies;
pub mod seed;
pub mod users;

pub use auth::AuthService;
pub use movies::MovieService;
pub use seed::SeedService;
pub use users::UserService;
