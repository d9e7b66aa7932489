//! Domain entities - the core business objects.

mod page;
mod post;
mod user;

pub use page::{Page, PageRequest};
pub use post::{
    CreatePost, NewPost, Post, PostChanges, PostWithAuthor, TITLE_MAX_LEN, Visibility,
};
pub use user::User;
