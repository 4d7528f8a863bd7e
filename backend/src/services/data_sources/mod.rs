//! Readers for the files the wizard consumes: the uploaded CSV data
//! sources and the business usecase reference list.

pub mod csv;
pub mod reference;
