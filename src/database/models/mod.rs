pub mod lists;
pub mod movie;
pub mod user;

pub use lists::{FavoriteEntry, FavoriteItem, WatchlistEntry, WatchlistItem};
pub use movie::{CreateMovie, Movie, MovieFilter, UpdateMovie};
pub use user::User;
