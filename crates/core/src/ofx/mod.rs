//! OFX statement import - parser, duplicate heuristic and import service.

mod ofx_model;
mod ofx_parser;
mod ofx_service;

pub use ofx_model::{ImportSummary, OfxPreviewEntry, OfxRecord};
pub use ofx_parser::parse_ofx;
pub use ofx_service::OfxImportService;
