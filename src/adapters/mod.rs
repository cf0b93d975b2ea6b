// Adapters - External system implementations

pub mod checksum_sha256;
pub mod exec_ffmpeg;
pub mod fs_local;
pub mod manifest_json;
pub mod progress_indicatif;
pub mod toml_config;

// Re-export adapters
pub use checksum_sha256::Sha256ChecksumAdapter;
pub use exec_ffmpeg::FFmpegAdapter;
pub use fs_local::LocalFsAdapter;
pub use manifest_json::JsonManifestStore;
pub use progress_indicatif::IndicatifProgress;
pub use toml_config::{TomlConfigAdapter, ToolConfig};
