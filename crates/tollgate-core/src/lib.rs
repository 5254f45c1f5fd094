#![allow(clippy::must_use_candidate)]

mod error;
mod identity;
mod modality;

pub use error::HttpError;
pub use identity::AccountIdentity;
pub use modality::Modality;
