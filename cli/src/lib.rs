use jersey_swap::{
    GenerationClient, ImageAsset, JerseyType, NegativeConstraintSet, PendingGeneration,
    ProcessingStatus, Session, SwapError,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    SwapError(#[from] SwapError),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
    #[error("Unsupported image format '{0}'. Please use png, jpg, jpeg, webp, gif or bmp")]
    UnsupportedImageFormat(String),
}

/// MIME type for an image file, chosen by extension.
pub fn mime_for_path(path: &Path) -> Result<&'static str, CliError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "webp" => Ok("image/webp"),
        "gif" => Ok("image/gif"),
        "bmp" => Ok("image/bmp"),
        _ => Err(CliError::UnsupportedImageFormat(ext)),
    }
}

/// Read an image file into a data URI asset.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageAsset, CliError> {
    let path = path.as_ref();
    let mime_type = mime_for_path(path)?;
    let bytes = fs::read(path)?;
    info!("Loaded {:?} ({} bytes, {})", path, bytes.len(), mime_type);
    Ok(ImageAsset::from_bytes(mime_type, &bytes))
}

/// Decode an asset and write the raw image bytes, creating parent directories.
pub fn write_image<P: AsRef<Path>>(image: &ImageAsset, path: P) -> Result<PathBuf, CliError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, image.decode_bytes()?)?;
    Ok(path.to_path_buf())
}

/// `result.png` -> `result-background.png`
pub fn background_output_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("result");
    let name = match output.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{}-background.{}", stem, ext),
        None => format!("{}-background", stem),
    };
    output.with_file_name(name)
}

/// One end-to-end run: swap the jersey, then optionally replace the background.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SwapJob {
    pub player: PathBuf,
    pub jersey: PathBuf,
    #[serde(default)]
    pub jersey_type: JerseyType,
    #[serde(default)]
    pub negative_constraints: NegativeConstraintSet,
    pub output: PathBuf,
    /// Scene to composite the swapped player into
    pub background: Option<PathBuf>,
    /// Defaults to `<output>-background.<ext>`
    pub background_output: Option<PathBuf>,
}

impl SwapJob {
    /// Load a job from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a job from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load the job
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(CliError::UnsupportedFileFormat),
        }
    }

    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    pub fn to_json(&self) -> Result<String, CliError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }
}

/// Files written by a job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub swap_output: PathBuf,
    pub background_output: Option<PathBuf>,
}

pub async fn run_job(
    job: &SwapJob,
    client: &dyn GenerationClient,
    status: &ProcessingStatus,
) -> Result<JobReport, CliError> {
    let mut session = Session::new();
    session.set_player_image(load_image(&job.player)?)?;
    session.set_jersey_image(load_image(&job.jersey)?)?;
    session.set_jersey_type(job.jersey_type)?;
    session.set_negative_constraints(job.negative_constraints.clone())?;

    info!("Swapping jersey ({}) via {}", job.jersey_type, client.model_name());
    let pending = session.begin_jersey_swap()?;
    generate(&mut session, client, status, pending).await?;
    let swap_output = write_result(&session, &job.output)?;
    info!("Jersey swap written to {:?}", swap_output);

    let background_output = match &job.background {
        Some(background) => {
            session.begin_background_edit()?;
            session.set_background_image(load_image(background)?)?;
            let pending = session.begin_background_replace()?;
            generate(&mut session, client, status, pending).await?;

            let path = job
                .background_output
                .clone()
                .unwrap_or_else(|| background_output_path(&job.output));
            let written = write_result(&session, path)?;
            info!("Background replacement written to {:?}", written);
            Some(written)
        }
        None => None,
    };

    Ok(JobReport {
        swap_output,
        background_output,
    })
}

async fn generate(
    session: &mut Session,
    client: &dyn GenerationClient,
    status: &ProcessingStatus,
    pending: PendingGeneration,
) -> Result<(), CliError> {
    let PendingGeneration { ticket, request } = pending;
    let outcome = status
        .while_processing(client.generate(request), |message| info!("{}", message))
        .await;

    if let Err(e) = session.complete(ticket, outcome) {
        if let Some(message) = session.last_error() {
            error!("{}", message);
        }
        return Err(e.into());
    }
    Ok(())
}

fn write_result<P: AsRef<Path>>(session: &Session, path: P) -> Result<PathBuf, CliError> {
    let result = session.result_image().ok_or(SwapError::NoImageReturned)?;
    write_image(result, path)
}
