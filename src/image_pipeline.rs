use crate::model::OrganOverlay;
use iced::widget::{image, svg};
use std::path::{Path, PathBuf};

/// Something the viewer can draw: raster illustrations and study images go
/// through `image`, the organ overlays and most base drawings are SVG.
#[derive(Debug, Clone)]
pub enum Picture {
    Raster(image::Handle),
    Vector(svg::Handle),
}

/// Download state of a study image, keyed by URL in the app.
#[derive(Debug, Clone)]
pub enum RemotePicture {
    Loading,
    Ready(Picture),
    Failed,
}

/// Loaded handles for an asset-based scene: the base drawing plus the
/// overlays that were found on disk, in stacking order.
#[derive(Debug, Clone)]
pub struct Illustration {
    pub base: Picture,
    pub overlays: Vec<Picture>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
    Svg,
}

pub struct PicturePipeline {
    assets_dir: PathBuf,
}

impl PicturePipeline {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    /// Loads an illustration or overlay relative to the assets directory.
    pub fn asset(&self, relative: &str) -> Result<Picture, String> {
        let path = self.assets_dir.join(relative);
        if !path.is_file() {
            return Err(format!("Viewer asset {} is missing", path.display()));
        }

        if is_svg_path(&path) {
            Ok(Picture::Vector(svg::Handle::from_path(path)))
        } else {
            Ok(Picture::Raster(image::Handle::from_path(path)))
        }
    }

    /// Loads the base drawing and every given overlay. A missing base is an
    /// error; a missing overlay is logged and left out of the stack.
    pub fn illustration<'a>(
        &self,
        base: &str,
        overlays: impl IntoIterator<Item = &'a OrganOverlay>,
    ) -> Result<Illustration, String> {
        let base = self.asset(base)?;
        let overlays = overlays
            .into_iter()
            .filter_map(|overlay| match self.asset(overlay.asset) {
                Ok(picture) => Some(picture),
                Err(err) => {
                    log::warn!("Skipping overlay for {}: {err}", overlay.organ);
                    None
                }
            })
            .collect();

        Ok(Illustration { base, overlays })
    }

    /// Wraps a downloaded study image after checking it is a format the
    /// renderer understands.
    pub fn remote(bytes: Vec<u8>) -> Result<Picture, String> {
        match sniff_format(&bytes) {
            Some(Format::Svg) => Ok(Picture::Vector(svg::Handle::from_memory(bytes))),
            Some(_) => Ok(Picture::Raster(image::Handle::from_bytes(bytes))),
            None => Err(format!(
                "Unrecognised image data ({} byte{})",
                bytes.len(),
                if bytes.len() == 1 { "" } else { "s" }
            )),
        }
    }
}

fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn sniff_format(bytes: &[u8]) -> Option<Format> {
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    if bytes.starts_with(PNG) {
        return Some(Format::Png);
    }
    if bytes.starts_with(JPEG) {
        return Some(Format::Jpeg);
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some(Format::Gif);
    }
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return Some(Format::Webp);
    }
    if bytes.starts_with(b"BM") {
        return Some(Format::Bmp);
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(256)]);
    let head = head.trim_start();
    if head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg")) {
        return Some(Format::Svg);
    }

    None
}
