pub mod form;

pub use form::{FormRecord, FormSchema, FormSummary, Submission};
