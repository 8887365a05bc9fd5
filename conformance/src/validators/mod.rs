//! Validators over a directory of generated declaration files.

pub mod declarations;
pub mod inventory;
