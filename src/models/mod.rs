mod collection;
mod movie;
mod user;

pub use collection::{Collection, NewCollection};
pub use movie::{Movie, NewMovie};
pub use user::User;
