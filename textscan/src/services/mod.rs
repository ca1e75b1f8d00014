mod scanner;
mod upload;

pub use scanner::{ScanMode, ScanOutput, ScanService};
pub use upload::{ensure_image_upload, is_image_upload, TempImage, Upload, IMAGE_EXTENSIONS};
