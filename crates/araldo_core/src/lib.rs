//! Core data types and collaborator traits for the araldo posting bot.
//!
//! This crate defines the vocabulary shared by the rest of the workspace:
//!
//! - **Topics**: the fixed catalog of subjects posts are written about
//! - **Prompts**: the template that turns a topic into a generation prompt
//! - **Collaborators**: trait seams for the text-generation backend and the
//!   delivery sink, so the pipeline can be exercised against test doubles

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod prompt;
mod topic;
mod traits;

pub use prompt::{DEFAULT_PROMPT_TEMPLATE, DEFAULT_SYSTEM_PROMPT, PromptTemplate};
pub use topic::{DEFAULT_TOPICS, Topic, TopicCatalog};
pub use traits::{DeliverySink, GeneratedPost, MessageId, TextGenerator};
