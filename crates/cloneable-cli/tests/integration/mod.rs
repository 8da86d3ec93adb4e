//! Integration test modules.

mod binary;
mod report_properties;
