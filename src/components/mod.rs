//! The components module contains the page shell rendered by Dioxus.

mod landing;
mod music_toggle;

pub use landing::*;
pub use music_toggle::*;
