//! ---
//! plt_section: "03-fixtures-payloads"
//! plt_subsection: "module"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Binary image fixtures and the sample model archive."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use indexmap::IndexMap;
use plt_common::{ConfigurationError, FixtureSettings};
use thiserror::Error;
use tracing::{debug, info};

/// Location of the data files relative to `TEST_FOLDER_ABS_PATH`.
pub const DATA_DIR: &str = "integration-test/data";
pub const MODEL_ARCHIVE_FILE: &str = "dummy-det-model.zip";

pub type FixtureResult<T> = std::result::Result<T, FixtureError>;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("unable to read fixture {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Image inputs sent to the detection pipelines.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ImageFixture {
    Dog,
    Cat,
    Bear,
    DogRgba,
}

impl ImageFixture {
    pub const ALL: [ImageFixture; 4] = [
        ImageFixture::Dog,
        ImageFixture::Cat,
        ImageFixture::Bear,
        ImageFixture::DogRgba,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ImageFixture::Dog => "dog.jpg",
            ImageFixture::Cat => "cat.jpg",
            ImageFixture::Bear => "bear.jpg",
            ImageFixture::DogRgba => "dog-rgba.png",
        }
    }
}

/// Resolves fixture paths under a checkout root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRoot {
    data_dir: PathBuf,
}

impl FixtureRoot {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            data_dir: root.as_ref().join(DATA_DIR),
        }
    }

    pub fn from_settings(settings: &FixtureSettings) -> FixtureResult<Self> {
        Ok(Self::new(settings.require_root()?))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn image_path(&self, image: ImageFixture) -> PathBuf {
        self.data_dir.join(image.file_name())
    }

    pub fn model_archive_path(&self) -> PathBuf {
        self.data_dir.join(MODEL_ARCHIVE_FILE)
    }
}

fn read_fixture(path: PathBuf) -> FixtureResult<Bytes> {
    debug!(fixture = %path.display(), "reading fixture");
    match fs::read(&path) {
        Ok(raw) => Ok(Bytes::from(raw)),
        Err(source) => Err(FixtureError::Read { path, source }),
    }
}

/// Every binary asset, read once. Cloning is cheap; the buffers are shared.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    images: IndexMap<ImageFixture, Bytes>,
    model_archive: Bytes,
}

impl FixtureSet {
    pub fn load(root: &FixtureRoot) -> FixtureResult<Self> {
        let mut images = IndexMap::with_capacity(ImageFixture::ALL.len());
        for image in ImageFixture::ALL {
            images.insert(image, read_fixture(root.image_path(image))?);
        }
        let model_archive = read_fixture(root.model_archive_path())?;
        info!(
            data_dir = %root.data_dir().display(),
            images = images.len(),
            model_archive_bytes = model_archive.len(),
            "fixtures loaded"
        );
        Ok(Self {
            images,
            model_archive,
        })
    }

    pub fn image(&self, image: ImageFixture) -> &Bytes {
        // `load` inserts every variant of `ImageFixture::ALL`.
        &self.images[&image]
    }

    /// Standard base64 encoding of an image, as embedded in JSON request bodies.
    pub fn image_base64(&self, image: ImageFixture) -> String {
        general_purpose::STANDARD.encode(self.image(image))
    }

    pub fn model_archive(&self) -> &Bytes {
        &self.model_archive
    }

    pub fn images(&self) -> impl Iterator<Item = (ImageFixture, &Bytes)> {
        self.images.iter().map(|(image, raw)| (*image, raw))
    }
}
