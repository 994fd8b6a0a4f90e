#![allow(clippy::too_many_arguments)]

pub mod error;
pub mod validation;
pub mod model;
pub mod store;
pub mod ops;
pub mod queries;
pub mod storage;
pub mod config;
pub mod logging;
pub mod cli;
