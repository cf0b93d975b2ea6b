use std::sync::Arc;

use crate::adapters::{
    FFmpegAdapter, IndicatifProgress, JsonManifestStore, LocalFsAdapter, Sha256ChecksumAdapter,
    ToolConfig,
};
use crate::app::{
    add_interactor::AddInteractor, clip_interactor::ClipInteractor,
    validate_interactor::ValidateInteractor,
};
use crate::ports::{ChecksumPort, FsPort, ManifestStorePort, ProgressPort, TranscodePort};

pub trait AppContainer: Send + Sync {
    fn add_interactor(&self) -> Arc<AddInteractor>;
    fn clip_interactor(&self) -> Arc<ClipInteractor>;
    fn validate_interactor(&self) -> Arc<ValidateInteractor>;
}

pub struct DefaultAppContainer {
    add_interactor: Arc<AddInteractor>,
    clip_interactor: Arc<ClipInteractor>,
    validate_interactor: Arc<ValidateInteractor>,
}

impl DefaultAppContainer {
    /// Wire the production adapters from the resolved configuration
    pub fn new(config: &ToolConfig) -> Self {
        let transcode_port = Arc::new(FFmpegAdapter::new(config.ffmpeg_path.clone()));
        let progress = Arc::new(IndicatifProgress::for_stderr(config.logging.format));
        Self::with_ports(config, transcode_port, progress)
    }

    /// Wire the production adapters around a given transcoder, without progress output
    pub fn with_transcoder(config: &ToolConfig, transcode_port: Arc<dyn TranscodePort>) -> Self {
        Self::with_ports(config, transcode_port, Arc::new(IndicatifProgress::hidden()))
    }

    /// Wire the production adapters around a given transcoder and progress display
    pub fn with_ports(
        config: &ToolConfig,
        transcode_port: Arc<dyn TranscodePort>,
        progress: Arc<dyn ProgressPort>,
    ) -> Self {
        let checksum_port = Arc::new(Sha256ChecksumAdapter::new());
        let fs_port = Arc::new(LocalFsAdapter::new());
        let store = Arc::new(JsonManifestStore::new(config.backup));

        let add_interactor = Arc::new(AddInteractor::new(
            Arc::clone(&store) as Arc<dyn ManifestStorePort>
        ));

        let clip_interactor = Arc::new(ClipInteractor::new(
            transcode_port,
            Arc::clone(&checksum_port) as Arc<dyn ChecksumPort>,
            Arc::clone(&fs_port) as Arc<dyn FsPort>,
            Arc::clone(&store) as Arc<dyn ManifestStorePort>,
            Arc::clone(&progress),
        ));

        let validate_interactor = Arc::new(ValidateInteractor::new(
            Arc::clone(&checksum_port) as Arc<dyn ChecksumPort>,
            Arc::clone(&fs_port) as Arc<dyn FsPort>,
            Arc::clone(&store) as Arc<dyn ManifestStorePort>,
            progress,
        ));

        Self {
            add_interactor,
            clip_interactor,
            validate_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn add_interactor(&self) -> Arc<AddInteractor> {
        Arc::clone(&self.add_interactor)
    }

    fn clip_interactor(&self) -> Arc<ClipInteractor> {
        Arc::clone(&self.clip_interactor)
    }

    fn validate_interactor(&self) -> Arc<ValidateInteractor> {
        Arc::clone(&self.validate_interactor)
    }
}
