//! Wire types shared between the dashboard core and the cats service.

pub mod domain;
pub mod error;
pub mod protocol;
