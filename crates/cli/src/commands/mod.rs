pub mod dump;
pub mod inspect;
pub mod read;
pub mod reset;
