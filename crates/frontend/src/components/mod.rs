pub mod post_form;
pub mod post_list;
pub mod post_manager;
pub mod spinner;

pub use post_form::PostForm;
pub use post_list::{PostCard, PostList};
pub use post_manager::PostManager;
pub use spinner::LoadingSpinner;
