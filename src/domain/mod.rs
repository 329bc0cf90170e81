pub mod converter;
pub mod destination;
pub mod models;
pub mod report;
pub mod run_summary;
pub mod source_tree;
pub mod webp_file;
