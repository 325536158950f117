mod assets;
mod provider;

pub mod alias;
pub mod completion;
pub mod config;
pub mod error;
pub mod prompt;

pub use crate::assets::get_data_dir;
pub use crate::provider::llm::get_completion_llm;
pub use crate::provider::openai::GroqModel;
