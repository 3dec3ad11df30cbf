pub mod contact;
pub mod landing;
pub mod users;
