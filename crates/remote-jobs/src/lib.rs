//! Remote job board core: the posting catalog, its filters, draft validation, and the
//! application submission pipeline that hands résumés to the delivery boundary.

pub mod applications;
pub mod board;
pub mod catalog;
pub mod config;
pub mod delivery;
pub mod error;
pub mod telemetry;
pub mod validation;
