pub mod analytics;
pub mod intent;
pub mod resolution;

pub use analytics::*;
pub use intent::*;
pub use resolution::*;
