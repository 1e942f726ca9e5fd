//! Rasterization.

/// `vello_cpu` drawing surface.
pub mod cpu;
