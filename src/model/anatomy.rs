//! Resolution of the anatomical viewer scene: which illustration is drawn
//! and which organ overlays are stacked on top of it.
//!
//! Organ names arrive from OCR'd reports with inconsistent Spanish
//! diacritics, so every comparison goes through [`normalize_organ`], both
//! for incoming study data and for the fixed tables below.

use std::collections::BTreeSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const DEFAULT_ILLUSTRATION: &str = "viewer/dog_1/dog_1.svg";
const MID_BODY_BASE: &str = "viewer/mid_body/media_base.png";
const URINARY_BASE: &str = "viewer/urinary_system/urinary_base.svg";

const BREED_ILLUSTRATIONS: &[(&str, &str)] = &[
    ("doberman", "viewer/dog_1/dog_1.svg"),
    ("caniche", "viewer/dog_1/dog_3.png"),
    ("schnauzer miniatura", "viewer/dog_1/dog_2.png"),
    ("schnauzer mini", "viewer/dog_1/dog_2.png"),
];

struct OverlayDef {
    organ: &'static str,
    aliases: &'static [&'static str],
    asset: &'static str,
}

const fn overlay(organ: &'static str, asset: &'static str) -> OverlayDef {
    OverlayDef {
        organ,
        aliases: &[],
        asset,
    }
}

const MID_BODY_OVERLAYS: &[OverlayDef] = &[
    overlay("bazo", "viewer/mid_body/media_bazo.svg"),
    overlay("corazon", "viewer/mid_body/media_corazon.svg"),
    overlay("diafragma", "viewer/mid_body/media_diafragma.svg"),
    overlay("esofago", "viewer/mid_body/media_esofago.svg"),
    overlay("estomago", "viewer/mid_body/media_estomago.svg"),
    overlay("higado", "viewer/mid_body/media_higado.svg"),
    overlay("intestino grueso", "viewer/mid_body/media_intestino_grueso.svg"),
    overlay("intestino delgado", "viewer/mid_body/media_intestino_delgado.svg"),
    overlay("pancreas", "viewer/mid_body/media_pancreas.svg"),
    overlay("pulmon", "viewer/mid_body/media_pulmon.svg"),
    overlay("rinon", "viewer/mid_body/media_rinon.svg"),
    overlay("vejiga", "viewer/mid_body/media_vejiga.svg"),
    overlay("traquea", "viewer/mid_body/media_traquea.svg"),
    overlay("vesicula biliar", "viewer/mid_body/media_vesicula_biliar.svg"),
];

const URINARY_OVERLAYS: &[OverlayDef] = &[
    overlay(
        "glándula suprarrenal",
        "viewer/urinary_system/glandula_suprarenal.svg",
    ),
    overlay("útero", "viewer/urinary_system/utero.svg"),
    OverlayDef {
        organ: "ovario",
        aliases: &["ovario izquierdo", "ovario derecho"],
        asset: "viewer/urinary_system/ovario_izquierdo.svg",
    },
];

/// Lower-cased, trimmed and stripped of combining diacritics.
pub fn normalize_organ(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect()
}

pub fn normalize_organs<'a>(names: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
    names
        .into_iter()
        .map(normalize_organ)
        .filter(|name| !name.is_empty())
        .collect()
}

pub fn illustration_for_breed(breed: Option<&str>) -> &'static str {
    let Some(breed) = breed.map(|breed| breed.trim().to_lowercase()) else {
        return DEFAULT_ILLUSTRATION;
    };

    BREED_ILLUSTRATIONS
        .iter()
        .find(|(name, _)| *name == breed)
        .map_or(DEFAULT_ILLUSTRATION, |&(_, path)| path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Baseline,
    MidBody,
    UrinaryFemale,
}

impl ViewMode {
    /// Mid-body is checked first and the urinary group overwrites it when
    /// both match, so a mixed selection ends up in the urinary view.
    pub fn detect(organs: &BTreeSet<String>) -> Self {
        let mut mode = ViewMode::Baseline;
        if group_matches(MID_BODY_OVERLAYS, organs) {
            mode = ViewMode::MidBody;
        }
        if group_matches(URINARY_OVERLAYS, organs) {
            mode = ViewMode::UrinaryFemale;
        }
        mode
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Baseline => "Baseline",
            ViewMode::MidBody => "Mid body",
            ViewMode::UrinaryFemale => "Urinary system",
        }
    }

    fn overlays(self) -> &'static [OverlayDef] {
        match self {
            ViewMode::Baseline => &[],
            ViewMode::MidBody => MID_BODY_OVERLAYS,
            ViewMode::UrinaryFemale => URINARY_OVERLAYS,
        }
    }
}

fn group_matches(group: &[OverlayDef], organs: &BTreeSet<String>) -> bool {
    group.iter().any(|def| def_matches(def, organs))
}

fn def_matches(def: &OverlayDef, organs: &BTreeSet<String>) -> bool {
    std::iter::once(def.organ)
        .chain(def.aliases.iter().copied())
        .any(|name| organs.contains(&normalize_organ(name)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneBase {
    /// Path relative to the assets directory.
    Asset(&'static str),
    /// A study image picked by the user, already resolved to a full URL.
    Remote(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganOverlay {
    pub organ: String,
    pub asset: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerScene {
    pub mode: ViewMode,
    pub base: SceneBase,
    pub overlays: Vec<OrganOverlay>,
}

impl ViewerScene {
    pub fn visible_overlays(&self) -> impl Iterator<Item = &OrganOverlay> {
        self.overlays.iter().filter(|overlay| overlay.active)
    }
}

/// A selected study image replaces the whole illustration and suppresses
/// every overlay. Otherwise the mode is derived from `organs`, which must
/// already be normalized.
pub fn resolve_scene(
    breed: Option<&str>,
    organs: &BTreeSet<String>,
    selected_image: Option<&str>,
) -> ViewerScene {
    if let Some(url) = selected_image {
        return ViewerScene {
            mode: ViewMode::Baseline,
            base: SceneBase::Remote(url.to_string()),
            overlays: Vec::new(),
        };
    }

    let mode = ViewMode::detect(organs);
    let base = match mode {
        ViewMode::Baseline => illustration_for_breed(breed),
        ViewMode::MidBody => MID_BODY_BASE,
        ViewMode::UrinaryFemale => URINARY_BASE,
    };

    let overlays = mode
        .overlays()
        .iter()
        .map(|def| OrganOverlay {
            organ: normalize_organ(def.organ),
            asset: def.asset,
            active: def_matches(def, organs),
        })
        .collect();

    log::debug!(
        "Resolved viewer scene: mode={mode:?}, base={base}, organs={:?}",
        organs
    );

    ViewerScene {
        mode,
        base: SceneBase::Asset(base),
        overlays,
    }
}

#[cfg(test)]
#[path = "anatomy_test.rs"]
mod tests;
