//! Content normalization: turns loosely-typed message bodies into typed, display-ready values.
//!
//! - [`repair`] - resolves backspace control characters in producer text
//! - [`classify`] - maps a raw segment onto a [`ClassifiedSegment`](crate::models::ClassifiedSegment)
//! - [`extract_tasks`] - pulls the task list out of a todo-writing tool's output
//! - [`normalize`] - applies the above to a whole message body
//!
//! All functions here are pure and total. Malformed producer output degrades to a fallback
//! value (an unrecognized segment, no task list) rather than an error.

pub mod classifier;
pub mod normalize;
pub mod repair;
pub mod tasks;

pub use classifier::{TYPE_TAG_FIELDS, classify, effective_tag};
pub use normalize::{MessageBody, normalize};
pub use repair::repair;
pub use tasks::{extract_tasks, first_success, is_task_list_mutation};
