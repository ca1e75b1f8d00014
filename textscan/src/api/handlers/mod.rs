pub(crate) mod health;
pub mod scan;

pub use health::health_check;
pub use scan::scan;
