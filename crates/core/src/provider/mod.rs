pub mod llm;
pub mod openai;
mod openai_types;
