pub mod lineage;
pub mod object;
pub mod transition;
