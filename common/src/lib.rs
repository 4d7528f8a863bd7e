//! Types shared between the wizard backend and its browser frontend, plus
//! the column type inferencer that both sides rely on.

pub mod inference;
pub mod model;
pub mod requests;
