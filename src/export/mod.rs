pub mod rasterize;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba};
use ratatui::backend::TestBackend;
use ratatui::{Frame, Terminal};
use thiserror::Error;

use crate::app::{AppState, ExportStatus};
use crate::storage::config::ExportConfig;
use crate::ui::theme::Theme;
use crate::ui::week_layout;

pub const EXPORT_FILE_NAME: &str = "class-timetable.png";
pub const ERROR_REVERT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid background colour '{0}'")]
    InvalidColor(String),
    #[error("Export area must not be empty")]
    EmptyArea,
    #[error("Export of {width}x{height} cells at scale {scale} is too large")]
    TooLarge { width: u16, height: u16, scale: u32 },
    #[error("Render failed: {0}")]
    Terminal(#[source] io::Error),
    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("Cannot write export: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub width: u16,
    pub height: u16,
    pub scale: u32,
    pub background: Rgba<u8>,
    pub theme: Theme,
}

impl ExportOptions {
    pub fn from_config(config: &ExportConfig) -> Result<Self, ExportError> {
        let background = rasterize::parse_hex_color(&config.background)
            .ok_or_else(|| ExportError::InvalidColor(config.background.clone()))?;

        Ok(Self {
            output_dir: config.output_dir.clone(),
            width: config.width,
            height: config.height,
            scale: config.scale.max(1),
            background,
            theme: Theme::get_by_name(&config.theme),
        })
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(EXPORT_FILE_NAME)
    }
}

/// Renders the timetable off-screen with `draw` and writes it as a PNG.
///
/// Interactive controls and the loading indicator are hidden for the capture
/// and restored afterwards whatever the outcome. The result is also recorded
/// in `app.export_status`.
pub fn export_timetable<F>(app: &mut AppState, options: &ExportOptions, draw: F) -> Result<PathBuf, ExportError>
where
    F: FnMut(&mut Frame, &AppState),
{
    let chrome = app.hide_chrome();
    let theme = std::mem::replace(&mut app.theme, options.theme.clone());

    let result = capture(app, options, draw);

    app.theme = theme;
    app.restore_chrome(chrome);

    match &result {
        Ok(path) => {
            tracing::info!("Exported timetable to {}", path.display());
            app.export_status = ExportStatus::Saved(path.clone());
        }
        Err(e) => {
            tracing::error!("Export failed: {}", e);
            app.export_status = ExportStatus::Failed {
                message: e.to_string(),
                until: Instant::now() + ERROR_REVERT_DELAY,
            };
        }
    }

    result
}

fn capture<F>(app: &AppState, options: &ExportOptions, mut draw: F) -> Result<PathBuf, ExportError>
where
    F: FnMut(&mut Frame, &AppState),
{
    if options.width == 0 || options.height == 0 {
        return Err(ExportError::EmptyArea);
    }

    // Grow past the configured height so a busy day is never cut off.
    let height = options.height.max(week_layout::calculate_layout(app).capture_height(options.width));
    if height > options.height {
        tracing::debug!("Export height raised from {} to {} rows", options.height, height);
    }

    let mut terminal = Terminal::new(TestBackend::new(options.width, height))
        .map_err(ExportError::Terminal)?;
    terminal.draw(|frame| draw(frame, app)).map_err(ExportError::Terminal)?;

    let image = rasterize::rasterize(terminal.backend().buffer(), options.scale, options.background)?;
    let path = options.output_path();
    write_png(&path, &image)?;
    Ok(path)
}

fn write_png(path: &Path, image: &image::RgbaImage) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let encoder = PngEncoder::new(BufWriter::new(file));
    encoder.write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgba8)?;
    Ok(())
}
