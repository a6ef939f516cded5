use std::num::NonZeroUsize;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use log::warn;
use lru::LruCache;

use crate::datagen::{self, DemoDataConfig};
use crate::plotting::{render_rgb, ChartStyle, ChartTheme, PlotError};
use crate::session::{FrameCapture, Session};
use crate::types::{ChartFrame, GroupId, PartitionId};

/// Main application state
pub struct App {
    pub session: Session<FrameCapture>,
    pub chart: ChartView,
    pub new_group_name: String,
    /// Message for the last rejected operation, cleared on the next success.
    pub status: Option<String>,
    pub demo_cfg: DemoDataConfig,
    pub theme: ChartTheme,
    pub style: ChartStyle,
}

/// A mutation collected from widgets during one frame.
///
/// The panels only gather these; they are applied after the frame is built,
/// each as a single session event.
#[derive(Debug, Clone)]
pub enum UiAction {
    AddGroup(String),
    RemoveGroup(GroupId),
    Move {
        label: String,
        from: PartitionId,
        to: PartitionId,
    },
    SetSeriesActive {
        label: String,
        active: bool,
    },
    SetGroupActive {
        id: GroupId,
        active: bool,
    },
    SetMembersActive {
        partition: PartitionId,
        active: bool,
    },
    Regenerate,
    Reset,
}

impl App {
    /// Build the app around an already seeded session.
    pub fn new(session: Session<FrameCapture>, demo_cfg: DemoDataConfig) -> Self {
        Self {
            session,
            chart: ChartView::new(),
            new_group_name: String::new(),
            status: None,
            demo_cfg,
            theme: ChartTheme::default(),
            style: ChartStyle::default(),
        }
    }

    /// Apply one collected action as a single session event.
    ///
    /// A rejected operation lands in the status line and leaves the session
    /// untouched; it never aborts the app.
    pub fn apply(&mut self, action: UiAction) {
        let result = match action {
            UiAction::AddGroup(name) => self.session.add_group(&name).map(|_| ()),
            UiAction::RemoveGroup(id) => self.session.remove_group(id),
            UiAction::Move { label, from, to } => self.session.move_series(&label, from, to),
            UiAction::SetSeriesActive { label, active } => {
                self.session.set_series_active(&label, active)
            }
            UiAction::SetGroupActive { id, active } => self.session.set_group_active(id, active),
            UiAction::SetMembersActive { partition, active } => {
                self.session.set_members_active(partition, active)
            }
            UiAction::Regenerate => {
                // A fixed seed reproduces the starting dataset, but the
                // regenerate button should always produce fresh data.
                let cfg = DemoDataConfig {
                    seed: None,
                    ..self.demo_cfg.clone()
                };
                self.session.replace_data(datagen::generate(&cfg))
            }
            UiAction::Reset => self.session.reset(),
        };

        match result {
            Ok(()) => self.status = None,
            Err(err) => {
                warn!("rejected: {err}");
                self.status = Some(err.to_string());
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::ui::draw_ui(self, ctx);
    }
}

/// Rasterizes frames into egui textures, with a small cache of recent plots.
///
/// The cache key is (session revision, width, height): a repaint at an
/// unchanged revision and panel size reuses the texture instead of running
/// the renderer again.
pub struct ChartView {
    cache: LruCache<(u64, u32, u32), TextureHandle>,
}

impl ChartView {
    pub fn new() -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(8).unwrap()),
        }
    }

    /// Texture for `frame` at the given revision and pixel size.
    pub fn texture(
        &mut self,
        ctx: &Context,
        revision: u64,
        size: (u32, u32),
        frame: &ChartFrame,
        theme: &ChartTheme,
        style: &ChartStyle,
    ) -> Result<TextureHandle, PlotError> {
        let key = (revision, size.0, size.1);
        if let Some(texture) = self.cache.get(&key) {
            return Ok(texture.clone());
        }

        let rgb = render_rgb(frame, size, theme, style)?;
        let image = ColorImage::from_rgb([size.0 as usize, size.1 as usize], &rgb);
        let texture = ctx.load_texture(
            format!("chart-{revision}"),
            image,
            TextureOptions::LINEAR,
        );
        self.cache.put(key, texture.clone());
        Ok(texture)
    }
}

impl Default for ChartView {
    fn default() -> Self {
        Self::new()
    }
}
