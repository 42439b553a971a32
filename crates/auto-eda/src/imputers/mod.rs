//! Imputation module for handling missing values.
//!
//! Only mean imputation of numeric columns is offered to the user.

mod statistical;

pub use statistical::StatisticalImputer;
