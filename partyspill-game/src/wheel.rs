//! Prize, punishment and rules wheels.
//!
//! Picking is uniform; the rotation math only decides where the rendered
//! wheel stops so that the pointer sits inside the picked segment.
use crate::constants::{WHEEL_EXTRA_TURNS, WHEEL_FULL_TURN_DEGREES, WHEEL_OFFSET_FRACTION};
use crate::views::View;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WheelItem {
    pub id: &'static str,
    pub text: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

const fn item(
    id: &'static str,
    text: &'static str,
    icon: &'static str,
    color: &'static str,
) -> WheelItem {
    WheelItem {
        id,
        text,
        icon,
        color,
    }
}

const RED: &str = "#BA0C2F";
const WHITE: &str = "#FFFFFF";
const BLUE: &str = "#00205B";

pub const PRICE_WHEEL: [WheelItem; 8] = [
    item("1", "Gi 1 slurk", "🥤", RED),
    item("2", "Gi 2 slurker", "🥤", WHITE),
    item("3", "Gi 3 slurker", "🥤", BLUE),
    item("4", "Gratis shot", "🍾", RED),
    item("5", "Velg noen som må drikke", "👉", WHITE),
    item("6", "Alle drikker", "🎉", BLUE),
    item("7", "Gratis shot", "🍾", RED),
    item("8", "Skål!", "🥂", WHITE),
];

pub const PUNISHMENT_WHEEL: [WheelItem; 8] = [
    item("1", "Ta 1 slurk", "🥤", RED),
    item("2", "Ta 2 slurker", "🥤", WHITE),
    item("3", "Ta 3 slurker", "🥤", BLUE),
    item("4", "Spinn regelhjulet", "📜", RED),
    item("5", "Tøm drikken din", "🍺", WHITE),
    item("6", "Ta en shot", "🥃", BLUE),
    item("7", "Spinn regelhjulet", "📜", RED),
    item("8", "Hopp over en runde", "⏭️", WHITE),
];

pub const RULES_WHEEL: [WheelItem; 8] = [
    item("1", "Ingen peking", "👉", RED),
    item("2", "Drikk med ikke-dominant hånd", "🤚", WHITE),
    item("3", "Ingen navn", "📛", BLUE),
    item("4", "Ikke si \"drikke\"", "🙊", RED),
    item("5", "Ingen toalettpauser", "🚽", WHITE),
    item("6", "Må skåle før du drikker", "🥂", BLUE),
    item("7", "Snakk med aksent", "🗣️", RED),
    item("8", "Ingen telefoner", "📱", WHITE),
];

/// The three wheels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WheelKind {
    Price,
    Punishment,
    Rules,
}

impl WheelKind {
    pub const ALL: [Self; 3] = [Self::Price, Self::Punishment, Self::Rules];

    #[must_use]
    pub const fn items(self) -> &'static [WheelItem] {
        match self {
            Self::Price => &PRICE_WHEEL,
            Self::Punishment => &PUNISHMENT_WHEEL,
            Self::Rules => &RULES_WHEEL,
        }
    }

    #[must_use]
    pub const fn view(self) -> View {
        match self {
            Self::Price => View::PriceWheel,
            Self::Punishment => View::PunishmentWheel,
            Self::Rules => View::RulesWheel,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Price => "Premiehjulet",
            Self::Punishment => "Straffehjulet",
            Self::Rules => "Regelhjulet",
        }
    }
}

/// Uniform pick; `None` only for an empty catalog.
pub fn pick_random<'a, R: Rng + ?Sized>(
    items: &'a [WheelItem],
    rng: &mut R,
) -> Option<&'a WheelItem> {
    items.choose(rng)
}

#[allow(clippy::cast_precision_loss)]
fn segment_angle(len: usize) -> f64 {
    WHEEL_FULL_TURN_DEGREES / len as f64
}

/// Clockwise (negative) rotation in degrees that stops on `target_id`.
///
/// Returns `0.0` when the target is not in `items`.
pub fn rotation_for<R: Rng + ?Sized>(items: &[WheelItem], target_id: &str, rng: &mut R) -> f64 {
    let Some(index) = items.iter().position(|item| item.id == target_id) else {
        return 0.0;
    };
    let segment = segment_angle(items.len());
    #[allow(clippy::cast_precision_loss)]
    let base = index as f64 * segment;
    let offset = rng.gen_range(0.0..segment * WHEEL_OFFSET_FRACTION);
    let extra = WHEEL_EXTRA_TURNS * WHEEL_FULL_TURN_DEGREES;
    -(base + offset + extra)
}

/// Index of the segment a rotation produced by [`rotation_for`] stops on.
#[must_use]
pub fn segment_at(items: &[WheelItem], rotation: f64) -> Option<usize> {
    if items.is_empty() || !rotation.is_finite() {
        return None;
    }
    let segment = segment_angle(items.len());
    let normalized = (-rotation).rem_euclid(WHEEL_FULL_TURN_DEGREES);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (normalized / segment).floor() as usize;
    Some(index.min(items.len() - 1))
}

/// A completed spin: what was picked and how far to turn the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spin {
    pub item: WheelItem,
    pub rotation: f64,
}

pub fn spin<R: Rng + ?Sized>(items: &[WheelItem], rng: &mut R) -> Option<Spin> {
    let item = *pick_random(items, rng)?;
    let rotation = rotation_for(items, item.id, rng);
    Some(Spin { item, rotation })
}
