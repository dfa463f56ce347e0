pub mod geometry;
pub mod topo;
pub mod inference;

pub fn version() -> &'static str {
    "0.1.0"
}
