//! NeuroScan: a desktop front end for uploading MRI scans and watching
//! simulated segmentation jobs.
pub mod app;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod scheduler;
pub mod store;
pub mod upload;
pub mod utils;
