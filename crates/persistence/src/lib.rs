pub mod error;
pub mod image;
pub mod store;

pub use error::{PersistenceError, Result};
pub use image::{image_digest, read_image, write_image_atomic};
pub use store::{FileImageStore, ImageStore, LoadStatus, LoadedWindow, MemoryImageStore};
