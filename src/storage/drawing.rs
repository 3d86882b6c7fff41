use super::options::{
    CompressionMode, StorageOptions, backup_file_path, lock_file_path, with_suffix,
};
use crate::draw::{LineCap, LineJoin, Stroke};
use crate::ink::{InkSession, RedoPolicy, ToolConfig};
use crate::util::Bounds;
use anyhow::{Context, Result};
use chrono::Utc;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const CURRENT_VERSION: u32 = 1;

/// A stroke list plus the toolbar state it was drawn with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedDrawing {
    /// Visible strokes in paint order
    pub strokes: Vec<Stroke>,
    pub tool: Option<ToolStateSnapshot>,
}

impl SavedDrawing {
    /// Captures the visible strokes of `session`. The redo buffer is not saved.
    pub fn from_session(session: &InkSession, tool: Option<&ToolConfig>) -> Self {
        Self {
            strokes: session.strokes().to_vec(),
            tool: tool.map(ToolStateSnapshot::from_tool),
        }
    }

    /// Rebuilds a session with these strokes and an empty redo buffer.
    pub fn into_session(self, redo_policy: RedoPolicy) -> InkSession {
        InkSession::from_strokes(self.strokes, redo_policy)
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(|stroke| stroke.points.len()).sum()
    }

    /// Union of every stroke's point bounds.
    pub fn bounds(&self) -> Option<Bounds> {
        self.strokes
            .iter()
            .filter_map(Stroke::point_bounds)
            .reduce(|mut acc, bounds| {
                acc.include(bounds.min_x, bounds.min_y);
                acc.include(bounds.max_x, bounds.max_y);
                acc
            })
    }
}

/// Subset of [`ToolConfig`] persisted alongside the strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolStateSnapshot {
    pub color: usize,
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub opacity: f32,
}

impl ToolStateSnapshot {
    fn from_tool(tool: &ToolConfig) -> Self {
        Self {
            color: tool.color,
            width: tool.width,
            cap: tool.cap,
            join: tool.join,
            opacity: tool.opacity,
        }
    }

    /// Restores the saved values onto `tool`, clamping anything out of range.
    pub fn apply_to(&self, tool: ToolConfig) -> ToolConfig {
        let tool = tool
            .with_color(self.color)
            .with_width(self.width)
            .with_opacity(self.opacity);
        ToolConfig {
            cap: self.cap,
            join: self.join,
            ..tool
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DrawingFile {
    version: u32,
    last_modified: String,
    #[serde(default)]
    strokes: Vec<Stroke>,
    #[serde(default)]
    tool: Option<ToolStateSnapshot>,
}

pub(crate) struct LoadedDrawing {
    pub drawing: SavedDrawing,
    pub compressed: bool,
}

/// Summary of a drawing file for CLI reporting.
#[derive(Debug, Clone)]
pub struct DrawingInspection {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub compressed: bool,
    pub stroke_count: usize,
    pub point_count: usize,
    pub bounds: Option<Bounds>,
    pub tool_state_present: bool,
    pub backup_exists: bool,
}

/// Write `drawing` to `path`, honouring compression, size and backup options.
///
/// The payload goes to a temporary sibling first and is renamed into place,
/// so readers never observe a partial file. Writers hold an exclusive lock on
/// `<path>.lock` for the duration.
pub fn save_drawing(path: &Path, drawing: &SavedDrawing, options: &StorageOptions) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create drawing directory {}", parent.display()))?;
    }

    let lock_path = lock_file_path(path);
    let lock_file = open_lock_file(&lock_path)?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("failed to lock drawing file {}", lock_path.display()))?;

    let result = save_drawing_inner(path, drawing, options);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock drawing file {}: {}",
            lock_path.display(),
            err
        )
    });

    result
}

fn save_drawing_inner(path: &Path, drawing: &SavedDrawing, options: &StorageOptions) -> Result<()> {
    let file_payload = DrawingFile {
        version: CURRENT_VERSION,
        last_modified: Utc::now().to_rfc3339(),
        strokes: drawing.strokes.clone(),
        tool: drawing.tool,
    };

    let mut bytes =
        serde_json::to_vec_pretty(&file_payload).context("failed to serialise drawing payload")?;

    if bytes.len() as u64 > options.max_file_size_bytes {
        anyhow::bail!(
            "drawing data is {} bytes which exceeds the configured limit of {} bytes",
            bytes.len(),
            options.max_file_size_bytes
        );
    }

    let should_compress = match options.compression {
        CompressionMode::Off => false,
        CompressionMode::On => true,
        CompressionMode::Auto => (bytes.len() as u64) >= options.auto_compress_threshold_bytes,
    };

    if should_compress {
        bytes = compress_bytes(&bytes)?;
    }

    let tmp_path = temp_path(path);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .with_context(|| {
                format!(
                    "failed to open temporary drawing file {}",
                    tmp_path.display()
                )
            })?;
        tmp_file
            .write_all(&bytes)
            .context("failed to write drawing payload")?;
        tmp_file
            .sync_all()
            .context("failed to sync temporary drawing file")?;
    }

    if path.exists() && options.keep_backup {
        let backup_path = backup_file_path(path);
        fs::rename(path, &backup_path).with_context(|| {
            format!(
                "failed to keep previous drawing {} -> {}",
                path.display(),
                backup_path.display()
            )
        })?;
    }

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "failed to move temporary drawing file {} -> {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    info!(
        "Drawing saved to {} ({} strokes, {} bytes, compression={})",
        path.display(),
        drawing.strokes.len(),
        bytes.len(),
        should_compress
    );

    Ok(())
}

/// Load a drawing previously written by [`save_drawing`].
///
/// Returns `Ok(None)` when the file does not exist or is larger than the
/// configured limit. Stroke lists longer than `max_strokes` are truncated.
pub fn load_drawing(path: &Path, options: &StorageOptions) -> Result<Option<SavedDrawing>> {
    Ok(load_locked(path, options)?.map(|loaded| loaded.drawing))
}

/// Inspect a drawing file without building a session.
///
/// Returns `Ok(None)` under the same conditions as [`load_drawing`].
pub fn inspect_drawing(path: &Path, options: &StorageOptions) -> Result<Option<DrawingInspection>> {
    let Some(loaded) = load_locked(path, options)? else {
        return Ok(None);
    };
    let size_bytes = fs::metadata(path)
        .with_context(|| format!("failed to stat drawing file {}", path.display()))?
        .len();
    let drawing = &loaded.drawing;

    Ok(Some(DrawingInspection {
        path: path.to_path_buf(),
        size_bytes,
        compressed: loaded.compressed,
        stroke_count: drawing.strokes.len(),
        point_count: drawing.point_count(),
        bounds: drawing.bounds(),
        tool_state_present: drawing.tool.is_some(),
        backup_exists: backup_file_path(path).exists(),
    }))
}

fn load_locked(path: &Path, options: &StorageOptions) -> Result<Option<LoadedDrawing>> {
    if !path.exists() {
        debug!("No drawing file present at {}, skipping load", path.display());
        return Ok(None);
    }

    let metadata = fs::metadata(path)
        .with_context(|| format!("failed to stat drawing file {}", path.display()))?;
    if metadata.len() > options.max_file_size_bytes {
        warn!(
            "Drawing file {} is {} bytes which exceeds the configured limit ({} bytes); refusing to load",
            path.display(),
            metadata.len(),
            options.max_file_size_bytes
        );
        return Ok(None);
    }

    let lock_path = lock_file_path(path);
    let lock_file = open_lock_file(&lock_path)?;
    lock_file
        .lock_shared()
        .with_context(|| format!("failed to acquire shared lock {}", lock_path.display()))?;

    let result = load_drawing_inner(path, options);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock drawing file {}: {}",
            lock_path.display(),
            err
        )
    });

    result
}

fn load_drawing_inner(path: &Path, options: &StorageOptions) -> Result<Option<LoadedDrawing>> {
    let mut file_bytes = Vec::new();
    File::open(path)
        .with_context(|| format!("failed to open drawing file {}", path.display()))?
        .read_to_end(&mut file_bytes)
        .context("failed to read drawing file")?;

    let compressed = is_gzip(&file_bytes);
    let decompressed = if compressed {
        let limit = options.max_file_size_bytes;
        let mut out = Vec::new();
        GzDecoder::new(&file_bytes[..])
            .take(limit.saturating_add(1))
            .read_to_end(&mut out)
            .context("failed to decompress drawing file")?;
        if out.len() as u64 > limit {
            warn!(
                "Drawing file {} decompresses past the configured limit ({} bytes); refusing to load",
                path.display(),
                limit
            );
            return Ok(None);
        }
        out
    } else {
        file_bytes
    };

    let file: DrawingFile =
        serde_json::from_slice(&decompressed).context("failed to parse drawing json")?;

    if file.version > CURRENT_VERSION {
        warn!(
            "Drawing file {} has version {} (newest known is {}); reading what is recognised",
            path.display(),
            file.version,
            CURRENT_VERSION
        );
    }

    let mut drawing = SavedDrawing {
        strokes: file.strokes,
        tool: file.tool,
    };
    enforce_stroke_limit(&mut drawing, options.max_strokes);

    debug!(
        "Loaded {} strokes from {} (modified {})",
        drawing.strokes.len(),
        path.display(),
        file.last_modified
    );

    Ok(Some(LoadedDrawing {
        drawing,
        compressed,
    }))
}

fn enforce_stroke_limit(drawing: &mut SavedDrawing, max_strokes: usize) {
    if drawing.strokes.len() > max_strokes {
        warn!(
            "Drawing contains {} strokes which exceeds the limit of {}; truncating",
            drawing.strokes.len(),
            max_strokes
        );
        drawing.strokes.truncate(max_strokes);
    }
}

fn open_lock_file(lock_path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .with_context(|| format!("failed to open drawing lock file {}", lock_path.display()))
}

fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .context("failed to compress drawing payload")?;
    encoder
        .finish()
        .context("failed to finalise compressed drawing payload")
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn temp_path(target: &Path) -> PathBuf {
    let mut candidate = with_suffix(target, ".tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = with_suffix(target, &format!(".tmp{}", counter));
    }
    candidate
}
