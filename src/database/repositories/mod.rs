pub mod lists;
pub mod movies;
pub mod users;

pub use lists::{FavoriteRepository, WatchlistRepository};
pub use movies::MovieRepository;
pub use users::UserRepository;
