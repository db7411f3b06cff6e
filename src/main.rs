//! Desktop front end: look up a video, pick an encoding, download it

// Thumbnail fetching module
mod thumbnail;

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

// eframe/egui for GUI application framework
use eframe::{egui, App, Frame};
use egui::{ColorImage, TextureOptions, Visuals};
// OnceCell for single-time runtime initialization
use once_cell::sync::OnceCell;
// FileDialog for folder selection dialogs
use rfd::FileDialog;
use tokio::{
    runtime::Runtime,
    sync::mpsc::{unbounded_channel, UnboundedReceiver},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tubegrab::{Client, ClientConfig, VideoMetadata};

// Global Tokio runtime; blocking jobs run on its pool
static RUNTIME: OnceCell<Arc<Runtime>> = OnceCell::new();

/// Program entry point: logging, runtime, client, then the GUI
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tubegrab=info")),
        )
        .init();

    let config = ClientConfig::from_env().unwrap_or_else(|e| {
        warn!("ignoring environment overrides: {e}");
        ClientConfig::default()
    });
    let client = Arc::new(Client::new(config)?);

    let rt = Arc::new(Runtime::new()?);
    let _ = RUNTIME.set(rt);

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "tubegrab",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(Visuals::dark());
            Box::new(TubegrabApp::new(client))
        }),
    )?;
    Ok(())
}

fn runtime() -> &'static Runtime {
    RUNTIME.get().expect("runtime is initialized before the GUI starts")
}

/// Current state of one download
#[derive(Clone, PartialEq)]
enum DownloadStatus {
    Downloading,
    Done,
    Failed(String),
}

/// Messages sent from a download job to the UI
enum DownloadEvent {
    Progress { transferred: u64, total: u64 },
    Finished,
    Failed(String),
}

/// A download shown in the side panel
struct DownloadTask {
    title: String,
    path: PathBuf,
    status: DownloadStatus,
    transferred: u64,
    total: u64,
    events: UnboundedReceiver<DownloadEvent>,
}

impl DownloadTask {
    /// Fraction done, or `None` while the size is unknown
    fn fraction(&self) -> Option<f32> {
        (self.total > 0).then(|| (self.transferred as f64 / self.total as f64).min(1.0) as f32)
    }
}

struct TubegrabApp {
    client: Arc<Client>,
    /// Video id or watch URL
    id_input: String,
    download_folder: String,
    video: Option<VideoMetadata>,
    selected_format: usize,
    /// Pending metadata lookup
    lookup: Option<UnboundedReceiver<Result<VideoMetadata, String>>>,
    lookup_error: Option<String>,
    downloads: Vec<DownloadTask>,
    /// Cached thumbnail textures keyed by video id
    thumbnails: HashMap<String, egui::TextureHandle>,
    thumbnail_results: Arc<Mutex<Vec<(String, ColorImage)>>>,
}

impl TubegrabApp {
    fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            id_input: String::new(),
            download_folder: "./downloads".to_string(),
            video: None,
            selected_format: 0,
            lookup: None,
            lookup_error: None,
            downloads: Vec::new(),
            thumbnails: HashMap::new(),
            thumbnail_results: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn start_lookup(&mut self, ctx: &egui::Context) {
        let Some(video_id) = extract_video_id(&self.id_input) else {
            self.lookup_error = Some("enter a video id or watch URL".to_string());
            return;
        };
        self.video = None;
        self.lookup_error = None;
        self.selected_format = 0;

        let (tx, rx) = unbounded_channel();
        self.lookup = Some(rx);

        let client = Arc::clone(&self.client);
        let ctx = ctx.clone();
        runtime().spawn_blocking(move || {
            let result = client.fetch_metadata(&video_id).map_err(|e| e.to_string());
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    fn start_thumbnail(&self, ctx: &egui::Context, video: &VideoMetadata) {
        if self.thumbnails.contains_key(&video.id) {
            return;
        }
        let id = video.id.clone();
        let url = video.thumbnail_url.clone();
        let results = Arc::clone(&self.thumbnail_results);
        let ctx = ctx.clone();
        runtime().spawn_blocking(move || {
            if let Some(img) = thumbnail::fetch_thumbnail(&url) {
                if let Ok(mut pending) = results.lock() {
                    pending.push((id, img));
                }
                ctx.request_repaint();
            }
        });
    }

    fn start_download(&mut self, ctx: &egui::Context) {
        let Some(video) = self.video.clone() else {
            return;
        };
        let index = self.selected_format;
        let ext = video.extension(index).unwrap_or(tubegrab::config::FALLBACK_EXTENSION);
        let path = PathBuf::from(&self.download_folder)
            .join(format!("{}.{}", file_stem(&video), ext));

        if let Err(e) = std::fs::create_dir_all(&self.download_folder) {
            warn!(folder = %self.download_folder, "unable to create download folder: {e}");
        }

        let (tx, rx) = unbounded_channel();
        self.downloads.push(DownloadTask {
            title: video.title.clone(),
            path: path.clone(),
            status: DownloadStatus::Downloading,
            transferred: 0,
            total: 0,
            events: rx,
        });

        let client = Arc::clone(&self.client);
        let ctx = ctx.clone();
        runtime().spawn_blocking(move || {
            let progress_tx = tx.clone();
            let progress_ctx = ctx.clone();
            let result = client.download(&video, index, &path, move |transferred, total| {
                let _ = progress_tx.send(DownloadEvent::Progress { transferred, total });
                progress_ctx.request_repaint();
            });
            let event = match result {
                Ok(_) => DownloadEvent::Finished,
                Err(e) => {
                    error!(video_id = %video.id, "download failed: {e}");
                    DownloadEvent::Failed(e.to_string())
                }
            };
            let _ = tx.send(event);
            ctx.request_repaint();
        });
    }

    fn poll_jobs(&mut self, ctx: &egui::Context) {
        if let Some(rx) = self.lookup.as_mut() {
            if let Ok(result) = rx.try_recv() {
                self.lookup = None;
                match result {
                    Ok(video) => {
                        self.start_thumbnail(ctx, &video);
                        self.video = Some(video);
                    }
                    Err(e) => self.lookup_error = Some(e),
                }
            }
        }

        for task in &mut self.downloads {
            while let Ok(event) = task.events.try_recv() {
                match event {
                    DownloadEvent::Progress { transferred, total } => {
                        task.transferred = transferred;
                        task.total = total;
                    }
                    DownloadEvent::Finished => {
                        info!(path = %task.path.display(), "saved");
                        task.status = DownloadStatus::Done;
                    }
                    DownloadEvent::Failed(e) => task.status = DownloadStatus::Failed(e),
                }
            }
        }

        if let Ok(mut pending) = self.thumbnail_results.lock() {
            for (id, img) in pending.drain(..) {
                let tex = ctx.load_texture(&id, img, TextureOptions::default());
                self.thumbnails.insert(id, tex);
            }
        }
    }

    fn downloads_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Downloads");
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                let mut to_remove = None;
                for (i, task) in self.downloads.iter().enumerate() {
                    ui.group(|ui| {
                        ui.label(&task.title);
                        match &task.status {
                            DownloadStatus::Downloading => {
                                ui.label("⬇️ Downloading");
                                match task.fraction() {
                                    Some(f) => {
                                        ui.add(egui::ProgressBar::new(f).show_percentage());
                                    }
                                    None => {
                                        ui.label(format_bytes(task.transferred));
                                    }
                                }
                            }
                            DownloadStatus::Done => {
                                ui.label(format!("✅ Done ({})", format_bytes(task.transferred)));
                            }
                            DownloadStatus::Failed(e) => {
                                ui.colored_label(egui::Color32::RED, format!("Failed: {e}"));
                            }
                        }
                        if task.status != DownloadStatus::Downloading
                            && ui.add(egui::Button::new("❌").fill(egui::Color32::RED)).clicked()
                        {
                            to_remove = Some(i);
                        }
                    });
                }
                if let Some(i) = to_remove {
                    self.downloads.remove(i);
                }
            });
    }

    fn video_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("tubegrab");

        ui.label("Video id or watch URL:");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.id_input);
            let busy = self.lookup.is_some();
            if ui.add_enabled(!busy, egui::Button::new("Fetch info")).clicked() {
                self.start_lookup(ctx);
            }
            if busy {
                ui.spinner();
            }
        });

        if let Some(e) = &self.lookup_error {
            ui.colored_label(egui::Color32::RED, e.as_str());
        }

        ui.horizontal(|ui| {
            ui.label("Download folder:");
            ui.text_edit_singleline(&mut self.download_folder);
            if ui.button("Browse…").clicked() {
                if let Some(folder) = FileDialog::new().set_directory(&self.download_folder).pick_folder() {
                    self.download_folder = folder.display().to_string();
                }
            }
        });

        let Some(video) = &self.video else {
            return;
        };

        ui.separator();
        ui.horizontal(|ui| {
            if let Some(tex) = self.thumbnails.get(&video.id) {
                ui.image(tex);
            }
            ui.vertical(|ui| {
                ui.strong(&video.title);
                ui.label(format!("by {}", video.author));
                ui.label(format!(
                    "{} · {} views · rated {:.1}",
                    format_duration(video.length_seconds),
                    video.view_count,
                    video.avg_rating
                ));
            });
        });

        if video.formats.is_empty() {
            ui.label("No downloadable encodings.");
            return;
        }

        let label = |i: usize| {
            let f = &video.formats[i];
            format!("{} [{}] {}", f.quality, f.itag, f.video_type)
        };
        egui::ComboBox::from_label("Encoding")
            .selected_text(label(self.selected_format))
            .show_ui(ui, |ui| {
                for i in 0..video.formats.len() {
                    ui.selectable_value(&mut self.selected_format, i, label(i));
                }
            });

        if ui.button("Download").clicked() {
            self.start_download(ctx);
        }
    }
}

impl App for TubegrabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_jobs(ctx);

        egui::SidePanel::right("downloads_panel").show(ctx, |ui| self.downloads_panel(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.video_panel(ui, ctx));
    }
}

/// Takes the `v` parameter from a watch URL, or the input itself as an id
fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    let id = match input.split("v=").nth(1) {
        Some(rest) => rest.split('&').next().unwrap_or_default(),
        None => input,
    };
    (!id.is_empty()).then(|| id.to_string())
}

/// Title reduced to characters that are safe in a file name
fn file_stem(video: &VideoMetadata) -> String {
    let stem: String = video
        .title
        .chars()
        .map(|c| if c.is_alphanumeric() || " -_".contains(c) { c } else { '_' })
        .collect();
    let stem = stem.trim();
    if stem.is_empty() { video.id.clone() } else { stem.to_string() }
}

fn format_duration(seconds: i64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn format_bytes(bytes: u64) -> String {
    const MIB: f64 = 1024.0 * 1024.0;
    format!("{:.1} MiB", bytes as f64 / MIB)
}
