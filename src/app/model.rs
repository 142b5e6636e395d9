use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::block::{Block, BlockList, caret};

/// Severity of a transient status notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// A field in the style/attribute panel.
///
/// `Href` and `Target` only apply to link blocks; selection clamps back to
/// `FontSize` when the active block stops being a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelField {
    Tag,
    Color,
    FontSize,
    Href,
    Target,
}

impl PanelField {
    const fn order(self) -> usize {
        match self {
            Self::Tag => 0,
            Self::Color => 1,
            Self::FontSize => 2,
            Self::Href => 3,
            Self::Target => 4,
        }
    }

    fn fields(link: bool) -> &'static [Self] {
        if link {
            &[
                Self::Tag,
                Self::Color,
                Self::FontSize,
                Self::Href,
                Self::Target,
            ]
        } else {
            &[Self::Tag, Self::Color, Self::FontSize]
        }
    }

    pub fn next(self, link: bool) -> Self {
        let fields = Self::fields(link);
        let idx = self.order().min(fields.len() - 1);
        fields[(idx + 1).min(fields.len() - 1)]
    }

    pub fn prev(self, link: bool) -> Self {
        let fields = Self::fields(link);
        let idx = self.order().min(fields.len() - 1);
        fields[idx.saturating_sub(1)]
    }

    /// Clamp the selection when link-only fields disappear.
    pub fn clamp(self, link: bool) -> Self {
        if link || matches!(self, Self::Tag | Self::Color | Self::FontSize) {
            self
        } else {
            Self::FontSize
        }
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The block document being edited
    pub list: BlockList,
    /// Index of the block that owns the caret
    pub active: usize,
    /// Caret column within the active block (character offset)
    pub col: usize,
    /// Path of the document file
    pub file_path: PathBuf,
    /// Whether the document has unsaved changes
    pub dirty: bool,
    /// Whether the document is saved after every mutation
    pub autosave: bool,
    /// Whether the style panel is visible
    pub panel_visible: bool,
    /// Focus: true = panel, false = blocks
    pub panel_focused: bool,
    /// Selected panel field
    pub panel_field: PanelField,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Whether the JSON source overlay is visible
    pub source_visible: bool,
    /// Index of the first visible block
    pub scroll_offset: usize,
    /// Terminal size
    pub width: u16,
    pub height: u16,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after first quit attempt with unsaved changes; allows second quit
    /// to discard
    pub quit_confirmed: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("active", &self.active)
            .field("col", &self.col)
            .field("dirty", &self.dirty)
            .field("panel_visible", &self.panel_visible)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model over initial document content.
    pub fn new(file_path: PathBuf, blocks: Vec<Block>, terminal_size: (u16, u16)) -> Self {
        Self {
            list: BlockList::new(blocks),
            active: 0,
            col: 0,
            file_path,
            dirty: false,
            autosave: false,
            panel_visible: false,
            panel_focused: false,
            panel_field: PanelField::Tag,
            help_visible: false,
            source_visible: false,
            scroll_offset: 0,
            width: terminal_size.0,
            height: terminal_size.1,
            config_global_path: None,
            config_local_path: None,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
        }
    }

    /// The block that owns the caret.
    ///
    /// The active index is re-clamped after every mutation, so the lookup
    /// only falls back when called on a freshly constructed model with an
    /// inconsistent index.
    pub fn active_block(&self) -> &Block {
        self.list
            .get(self.active.min(self.list.len().saturating_sub(1)))
            .expect("block list is never empty")
    }

    /// Contents of the active block.
    pub fn active_text(&self) -> String {
        self.active_block().contents.clone()
    }

    /// Character count of the active block's contents.
    pub fn active_len(&self) -> usize {
        self.active_block().text_len()
    }

    /// Consume a pending caret instruction, moving focus to its block.
    ///
    /// The instruction is cleared by the take, so re-renders cannot replay
    /// it.
    pub fn apply_pending_caret(&mut self) {
        if let Some((index, target)) = self.list.take_pending_caret() {
            self.active = index;
            let text = &self.list.get(index).expect("caret index in range").contents;
            self.col = caret::resolve(target, text);
        }
    }

    /// Rows available for block content (frame height minus the status bar).
    pub fn content_rows(&self) -> usize {
        self.height.saturating_sub(1) as usize
    }

    /// Re-clamp focus and scroll after a mutation or resize so the active
    /// block stays addressable and visible.
    pub fn ensure_active_visible(&mut self) {
        self.active = self.active.min(self.list.len().saturating_sub(1));
        self.col = self.col.min(self.active_len());
        let rows = self.content_rows().max(1);
        if self.active < self.scroll_offset {
            self.scroll_offset = self.active;
        } else if self.active >= self.scroll_offset + rows {
            self.scroll_offset = self.active + 1 - rows;
        }
        let max_scroll = self.list.len().saturating_sub(rows);
        self.scroll_offset = self.scroll_offset.min(max_scroll);
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(PathBuf::new(), Vec::new(), (80, 24))
    }
}
