use kgextract::config::{ConfigLoader, KgConfig};
use kgextract::extraction::Extractor;
use std::path::Path;

pub struct KgCliContext {
    pub config: KgConfig,
    pub extractor: Extractor,
}

impl KgCliContext {
    pub fn new(config: KgConfig) -> kgextract::Result<Self> {
        let extractor = Extractor::from_config(&config)?;

        Ok(Self { config, extractor })
    }
}

/// Load configuration from `path` (or the default locations) and the environment.
pub fn load_config(path: Option<&Path>, conversation: bool) -> kgextract::Result<KgConfig> {
    let mut loader = ConfigLoader::new();
    match path {
        Some(path) => {
            loader.load_file(path)?;
        }
        None => {
            loader.load_default_files();
        }
    }

    let mut config = loader.load_env().extract()?;
    if conversation {
        config.extraction.is_conversation = true;
    }
    Ok(config)
}
