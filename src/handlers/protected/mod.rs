pub mod pages;
pub mod posts;
pub mod projects;
pub mod users;
