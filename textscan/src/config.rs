use serde::Deserialize;
use std::env;
use std::path::PathBuf;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on the request body, applied to multipart uploads.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// `+`-separated Tesseract language codes, e.g. `eng` or `eng+deu`.
    pub languages: String,
    /// Directory containing `tessdata`; `None` lets Tesseract use its own default.
    pub data_path: Option<String>,
    /// Where uploads are written for the duration of one request.
    pub temp_dir: PathBuf,
    pub preprocess: bool,
    pub max_image_dimension: u32,
    pub min_image_dimension: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: "eng".to_string(),
            data_path: None,
            temp_dir: env::temp_dir(),
            preprocess: false,
            max_image_dimension: 4096,
            min_image_dimension: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("TEXTSCAN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("TEXTSCAN_PORT", 8000),
                max_upload_bytes: parse_env_or("TEXTSCAN_MAX_UPLOAD_BYTES", 25 * 1024 * 1024),
            },
            ocr: OcrConfig {
                languages: env::var("OCR_LANGUAGES").unwrap_or_else(|_| "eng".to_string()),
                data_path: env::var("OCR_DATA_PATH").ok(),
                temp_dir: env::var("OCR_TEMP_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| env::temp_dir()),
                preprocess: parse_env_or("OCR_PREPROCESS", false),
                max_image_dimension: parse_env_or("OCR_MAX_DIMENSION", 4096),
                min_image_dimension: parse_env_or("OCR_MIN_DIMENSION", 50),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
