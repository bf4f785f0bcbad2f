pub mod field;
pub mod particle;
pub mod sampler;
