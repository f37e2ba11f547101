pub mod chunk;
pub mod evaluation;
