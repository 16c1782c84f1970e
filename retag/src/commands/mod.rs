/// Retag command handler
pub mod retag;
