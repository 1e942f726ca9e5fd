//! Coordinate mapping between display space and source-image space.

pub mod mapper;
