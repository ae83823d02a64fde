pub mod config;
pub mod inspect;
pub mod normalize;
pub mod report;
