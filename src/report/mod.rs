// src/report/mod.rs
// =============================================================================
// CSV reports.
//
// Submodules:
// - table: string table with position-aligned columns and branch flattening
// - writer: timestamped CSV output
// - catalog: Canvas content x GitHub repositories
// - reading: README reading-time estimates from a catalog report
// =============================================================================

mod catalog;
mod reading;
mod table;
mod writer;

pub use catalog::generate_catalog_report;
pub use reading::generate_reading_time_report;
