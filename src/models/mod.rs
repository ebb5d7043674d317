pub mod generate;
pub mod openai;

pub use generate::*;
pub use openai::*;
