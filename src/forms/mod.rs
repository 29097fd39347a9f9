pub mod publish;
pub mod schema;
pub mod submit;

pub use publish::{FORM_URL_PREFIX, Published, publish};
pub use submit::submit;
