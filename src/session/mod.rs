//! The end-to-end booth flow and its inputs: uploads, camera capture and the photo selection.

pub mod capture;
pub mod ingest;
pub mod orchestrator;
pub mod selection;
