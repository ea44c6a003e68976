//! Async studio facade over the store/render/export pipeline.
//!
//! A dedicated worker thread owns the `ChunkStore` and the renderers; async
//! callers send commands over an mpsc channel and await oneshot replies. All
//! mutation happens on the worker, so update-then-render sequences stay
//! ordered and the store's version check drops any render that a newer edit
//! superseded.

use std::sync::mpsc::{self, Sender};
use std::thread;

use serde::Serialize;
use tokio::sync::oneshot;

use crate::error::{Error, Result};
use crate::export::{self, ArchiveWriter, ExportedImage, ZipArchiveWriter};
use crate::rendering::code::CodeRenderer;
use crate::rendering::slide::render_slide;
use crate::segment::{segment, SegmentOptions};
use crate::store::{ChunkStore, Direction};
use crate::{StyleConfig, CAROUSEL_CHAR_LIMIT};

/// Which pipeline the studio drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One chunk per textarea, rendered as an editor frame
    Code,
    /// Input re-segmented into slides on every submission
    Carousel,
}

/// Studio configuration; presets cover the two shipped tools
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub mode: Mode,
    pub style: StyleConfig,
    pub segment: SegmentOptions,
    /// Input cap in characters, applied before segmentation
    pub input_char_limit: Option<usize>,
    /// Filename stem for exported images
    pub export_stem: String,
}

impl StudioConfig {
    pub fn code() -> Self {
        Self {
            mode: Mode::Code,
            style: StyleConfig::default(),
            segment: SegmentOptions::default(),
            input_char_limit: None,
            export_stem: "code-image".to_string(),
        }
    }

    pub fn carousel() -> Self {
        Self {
            mode: Mode::Carousel,
            style: StyleConfig::default(),
            segment: SegmentOptions::carousel(),
            input_char_limit: Some(CAROUSEL_CHAR_LIMIT),
            export_stem: "linkedin-carousel-slide".to_string(),
        }
    }
}

/// Read-only view of one chunk
#[derive(Debug, Clone, Serialize)]
pub struct ChunkSnapshot {
    pub content: String,
    pub order: usize,
    pub character_count: usize,
    pub has_image: bool,
}

/// Read-only view of the whole store
#[derive(Debug, Clone, Serialize)]
pub struct StudioSnapshot {
    pub chunks: Vec<ChunkSnapshot>,
    pub cursor: usize,
}

enum Command {
    SetInput(String, oneshot::Sender<Result<usize>>),
    UpdateCurrent(String, oneshot::Sender<Result<()>>),
    AddChunk(oneshot::Sender<usize>),
    RemoveChunk(oneshot::Sender<usize>),
    Navigate(Direction, oneshot::Sender<usize>),
    Jump(usize, oneshot::Sender<bool>),
    SetStyle(StyleConfig, oneshot::Sender<Result<()>>),
    Snapshot(oneshot::Sender<StudioSnapshot>),
    ExportAll(oneshot::Sender<Result<Vec<u8>>>),
    ExportCurrent(oneshot::Sender<Result<ExportedImage>>),
    Close(oneshot::Sender<()>),
}

/// Async handle to a studio worker thread
#[derive(Clone)]
pub struct Studio {
    cmd_tx: Sender<Command>,
}

struct Worker {
    config: StudioConfig,
    store: ChunkStore,
    code: CodeRenderer,
    archive: Box<dyn ArchiveWriter + Send>,
}

impl Worker {
    fn new(config: StudioConfig, archive: Box<dyn ArchiveWriter + Send>) -> Self {
        Self {
            config,
            store: ChunkStore::new(),
            code: CodeRenderer::new(),
            archive,
        }
    }

    fn clamp_input(&self, input: String) -> String {
        match self.config.input_char_limit {
            Some(limit) if input.chars().count() > limit => input.chars().take(limit).collect(),
            _ => input,
        }
    }

    /// Render one chunk against its current version. The commit is dropped by
    /// the store if the content changed in the meantime.
    fn render_chunk(&mut self, index: usize) {
        let Some(chunk) = self.store.get(index) else {
            return;
        };
        if chunk.content.trim().is_empty() {
            return;
        }
        let version = chunk.version();
        let content = chunk.content.clone();
        let order = chunk.order;
        let total = self.store.len();

        let rendered = match self.config.mode {
            Mode::Code => self.code.render(&content),
            Mode::Carousel => render_slide(&content, &self.config.style, order, total),
        };
        match rendered {
            Ok(image) => {
                self.store.commit_render(index, version, image);
            }
            Err(e) => log::error!("render failed for chunk {index}: {e}"),
        }
    }

    fn render_all(&mut self) {
        for index in 0..self.store.len() {
            self.render_chunk(index);
        }
    }

    fn set_input(&mut self, input: String) -> Result<usize> {
        let input = self.clamp_input(input);
        let contents = match self.config.mode {
            Mode::Carousel => {
                let chunks = segment(&input, &self.config.segment);
                if chunks.is_empty() {
                    return Err(Error::InvalidInput("nothing to segment".to_string()));
                }
                chunks
            }
            Mode::Code => vec![input],
        };
        self.store.replace_all(contents);
        self.render_all();
        log::info!("input accepted: {} chunk(s)", self.store.len());
        Ok(self.store.len())
    }

    fn run(mut self, cmd_rx: mpsc::Receiver<Command>) {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                Command::SetInput(input, resp) => {
                    let _ = resp.send(self.set_input(input));
                }
                Command::UpdateCurrent(content, resp) => {
                    let cursor = self.store.cursor();
                    self.store.update_chunk(cursor, content);
                    self.render_chunk(cursor);
                    let _ = resp.send(Ok(()));
                }
                Command::AddChunk(resp) => {
                    let index = self.store.add_chunk();
                    // Pagination totals shift for every slide.
                    if self.config.mode == Mode::Carousel {
                        self.render_all();
                    }
                    let _ = resp.send(index);
                }
                Command::RemoveChunk(resp) => {
                    let cursor = self.store.remove_chunk();
                    if self.config.mode == Mode::Carousel {
                        self.render_all();
                    }
                    let _ = resp.send(cursor);
                }
                Command::Navigate(direction, resp) => {
                    let _ = resp.send(self.store.navigate(direction));
                }
                Command::Jump(index, resp) => {
                    let _ = resp.send(self.store.set_cursor(index));
                }
                Command::SetStyle(style, resp) => {
                    self.config.style = style;
                    // Every cached image was rendered with the old style.
                    self.render_all();
                    let _ = resp.send(Ok(()));
                }
                Command::Snapshot(resp) => {
                    let snapshot = StudioSnapshot {
                        chunks: self
                            .store
                            .chunks()
                            .iter()
                            .map(|c| ChunkSnapshot {
                                content: c.content.clone(),
                                order: c.order,
                                character_count: c.character_count(),
                                has_image: c.image.is_some(),
                            })
                            .collect(),
                        cursor: self.store.cursor(),
                    };
                    let _ = resp.send(snapshot);
                }
                Command::ExportAll(resp) => {
                    let res =
                        export::export_all(&self.store, self.archive.as_ref(), &self.config.export_stem);
                    let _ = resp.send(res);
                }
                Command::ExportCurrent(resp) => {
                    let _ = resp.send(export::export_current(&self.store, &self.config.export_stem));
                }
                Command::Close(resp) => {
                    let _ = resp.send(());
                    break;
                }
            }
        }
    }
}

impl Studio {
    /// Spawn a studio worker using the zip archive backend
    pub async fn new(config: StudioConfig) -> Result<Self> {
        Self::with_archive(config, Box::new(ZipArchiveWriter)).await
    }

    /// Spawn a studio worker with an injected archive backend
    pub async fn with_archive(
        config: StudioConfig,
        archive: Box<dyn ArchiveWriter + Send>,
    ) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx) = oneshot::channel::<Result<()>>();

        thread::spawn(move || {
            let worker = Worker::new(config, archive);
            let _ = init_tx.send(Ok(()));
            worker.run(cmd_rx);
        });

        init_rx
            .await
            .map_err(|e| Error::Other(format!("worker init canceled: {e}")))??;

        Ok(Self { cmd_tx })
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
        what: &str,
    ) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(make(tx));
        rx.await
            .map_err(|e| Error::Other(format!("{what} canceled: {e}")))
    }

    /// Submit new input text; segments in carousel mode, passes through in
    /// code mode. Returns the resulting chunk count.
    pub async fn set_input(&self, input: &str) -> Result<usize> {
        self.request(|tx| Command::SetInput(input.to_string(), tx), "set_input")
            .await?
    }

    /// Replace the content of the chunk under the cursor and re-render it
    pub async fn update_current(&self, content: &str) -> Result<()> {
        self.request(
            |tx| Command::UpdateCurrent(content.to_string(), tx),
            "update_current",
        )
        .await?
    }

    /// Append an empty chunk; returns its index
    pub async fn add_chunk(&self) -> Result<usize> {
        self.request(Command::AddChunk, "add_chunk").await
    }

    /// Remove the chunk under the cursor; returns the cursor afterwards
    pub async fn remove_chunk(&self) -> Result<usize> {
        self.request(Command::RemoveChunk, "remove_chunk").await
    }

    /// Step the cursor; returns the new position
    pub async fn navigate(&self, direction: Direction) -> Result<usize> {
        self.request(|tx| Command::Navigate(direction, tx), "navigate")
            .await
    }

    /// Jump to a chunk index; false when out of range
    pub async fn jump(&self, index: usize) -> Result<bool> {
        self.request(|tx| Command::Jump(index, tx), "jump").await
    }

    /// Swap the style configuration and re-render every chunk
    pub async fn set_style(&self, style: StyleConfig) -> Result<()> {
        self.request(|tx| Command::SetStyle(style, tx), "set_style")
            .await?
    }

    /// Current chunk contents and cursor
    pub async fn snapshot(&self) -> Result<StudioSnapshot> {
        self.request(Command::Snapshot, "snapshot").await
    }

    /// Archive of all rendered images
    pub async fn export_all(&self) -> Result<Vec<u8>> {
        self.request(Command::ExportAll, "export_all").await?
    }

    /// The cursor chunk's image as a named PNG
    pub async fn export_current(&self) -> Result<ExportedImage> {
        self.request(Command::ExportCurrent, "export_current").await?
    }

    /// Shut the worker down
    pub async fn close(self) -> Result<()> {
        self.request(Command::Close, "close").await
    }
}
