mod embed;
mod ident;
mod unembed;

pub use crate::embed::*;
pub use crate::ident::*;
pub use crate::unembed::*;
