//! Board generation and layout.
use super::{
    ChanceOutcome, GameSpace, Position, SpaceKind, SpaceType, StartBonus, TriviaAssignment,
    TriviaReward,
};
use crate::config::BoardConfig;
use crate::constants::{SPACE_COLORS, START_SPACE_COLOR};
use rand::Rng;
use rand::seq::SliceRandom;

/// Generate a fresh loop: index 0 is the start, the rest are drawn from
/// shuffled copies of the weighted type cycle.
pub fn generate_spaces<R: Rng + ?Sized>(cfg: &BoardConfig, rng: &mut R) -> Vec<GameSpace> {
    let total = cfg.loop_length.max(2);
    let mut cycle = cfg.weighted_cycle();
    if cycle.is_empty() {
        log::warn!("board config has no weighted spaces; using defaults");
        cycle = BoardConfig::default().weighted_cycle();
    }

    let mut kinds = Vec::with_capacity(total + cycle.len());
    kinds.push(SpaceType::Start);
    while kinds.len() < total {
        let mut round = cycle.clone();
        round.shuffle(rng);
        kinds.extend(round);
    }
    kinds.truncate(total);

    let (lo, hi) = if cfg.sips_min <= cfg.sips_max {
        (cfg.sips_min.max(1), cfg.sips_max.max(1))
    } else {
        (cfg.sips_max.max(1), cfg.sips_min.max(1))
    };

    kinds
        .into_iter()
        .enumerate()
        .map(|(id, space_type)| {
            let kind = space_kind(space_type, lo..=hi, rng);
            let color = if space_type.is_start() {
                START_SPACE_COLOR
            } else {
                SPACE_COLORS[id % SPACE_COLORS.len()]
            };
            GameSpace {
                id,
                kind,
                color: color.to_string(),
                position: position_for(id, total),
                icon: space_type.icon().to_string(),
                label: space_type.label().to_string(),
            }
        })
        .collect()
}

fn space_kind<R: Rng + ?Sized>(
    space_type: SpaceType,
    sips: std::ops::RangeInclusive<u8>,
    rng: &mut R,
) -> SpaceKind {
    match space_type {
        SpaceType::Start => SpaceKind::Start {
            special_action: StartBonus::default(),
        },
        SpaceType::Finish => SpaceKind::Finish,
        SpaceType::Trivia => SpaceKind::Trivia {
            trivia_question: TriviaAssignment {
                question_id: None,
                reward: *TriviaReward::ALL.choose(rng).unwrap_or(&TriviaReward::None),
            },
        },
        SpaceType::Chance => SpaceKind::Chance {
            chance_outcome: *ChanceOutcome::ALL
                .choose(rng)
                .unwrap_or(&ChanceOutcome::PickPrize),
        },
        SpaceType::MusicBingo => SpaceKind::MusicBingo,
        SpaceType::InstantPrize => SpaceKind::InstantPrize,
        SpaceType::RandomWheel => SpaceKind::RandomWheel,
        SpaceType::Cheers => SpaceKind::Cheers,
        SpaceType::DrinkSips => SpaceKind::DrinkSips {
            sips_count: rng.gen_range(sips),
        },
        SpaceType::GiveSips => SpaceKind::GiveSips {
            sips_count: rng.gen_range(sips),
        },
    }
}

/// Grid cell for space `index` on a loop of `total` spaces.
///
/// Spaces walk clockwise around the border of a rectangle whose perimeter
/// holds `total` cells (one more for odd totals, leaving the cell left of
/// the start empty). Loops shorter than four are laid out in a row.
#[must_use]
pub fn position_for(index: usize, total: usize) -> Position {
    if total < 4 {
        return grid(index, 0);
    }
    let cells = total + total % 2;
    let width = cells.div_ceil(4) + 1;
    let height = (cells + 4) / 2 - width;
    let i = index % total;

    if i < width {
        grid(i, 0)
    } else if i < width + height - 1 {
        grid(width - 1, i + 1 - width)
    } else if i < 2 * width + height - 2 {
        grid(width - 1 - (i + 2 - width - height), height - 1)
    } else {
        grid(0, height - 1 - (i + 3 - 2 * width - height))
    }
}

fn grid(x: usize, y: usize) -> Position {
    Position {
        x: u32::try_from(x).unwrap_or(u32::MAX),
        y: u32::try_from(y).unwrap_or(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::{BTreeMap, HashSet};

    #[test]
    fn default_board_has_one_start_at_zero() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let spaces = generate_spaces(&BoardConfig::default(), &mut rng);
        assert_eq!(spaces.len(), 32);
        assert_eq!(spaces[0].space_type(), SpaceType::Start);
        assert_eq!(spaces[0].color, "checkered");
        assert_eq!(
            spaces.iter().filter(|s| s.space_type().is_start()).count(),
            1
        );
        for (idx, space) in spaces.iter().enumerate() {
            assert_eq!(space.id, idx);
            assert_eq!(space.icon, space.space_type().icon());
        }
    }

    #[test]
    fn colors_cycle_after_start() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let spaces = generate_spaces(&BoardConfig::default(), &mut rng);
        assert_eq!(spaces[1].color, "#FFFFFF");
        assert_eq!(spaces[2].color, "#00205B");
        assert_eq!(spaces[3].color, "#BA0C2F");
    }

    #[test]
    fn every_weighted_type_appears_in_the_first_cycle() {
        let cfg = BoardConfig::default();
        let mut rng = ChaCha20Rng::seed_from_u64(99);
        let spaces = generate_spaces(&cfg, &mut rng);
        let cycle_len = cfg.weighted_cycle().len();
        let mut counts: BTreeMap<SpaceType, u32> = BTreeMap::new();
        for space in &spaces[1..=cycle_len] {
            *counts.entry(space.space_type()).or_default() += 1;
        }
        assert_eq!(counts, cfg.weights);
    }

    #[test]
    fn sips_respect_configured_range() {
        let cfg = BoardConfig {
            sips_min: 2,
            sips_max: 2,
            ..BoardConfig::default()
        };
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for space in generate_spaces(&cfg, &mut rng) {
            if let SpaceKind::DrinkSips { sips_count } | SpaceKind::GiveSips { sips_count } =
                space.kind
            {
                assert_eq!(sips_count, 2);
            }
        }
    }

    #[test]
    fn trivia_spaces_start_without_questions() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let spaces = generate_spaces(&BoardConfig::default(), &mut rng);
        let trivia: Vec<_> = spaces
            .iter()
            .filter_map(|s| match &s.kind {
                SpaceKind::Trivia { trivia_question } => Some(trivia_question),
                _ => None,
            })
            .collect();
        assert!(!trivia.is_empty());
        assert!(trivia.iter().all(|t| t.question_id.is_none()));
    }

    #[test]
    fn same_rng_seed_same_board() {
        let cfg = BoardConfig::default();
        let a = generate_spaces(&cfg, &mut ChaCha20Rng::seed_from_u64(42));
        let b = generate_spaces(&cfg, &mut ChaCha20Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn layout_positions_are_distinct() {
        for total in [2, 3, 4, 5, 7, 10, 16, 31, 32, 50] {
            let cells: HashSet<_> = (0..total).map(|i| position_for(i, total)).collect();
            assert_eq!(cells.len(), total, "duplicate cell for total {total}");
        }
    }

    #[test]
    fn even_layouts_step_between_neighbouring_cells() {
        for total in [4, 6, 10, 32] {
            for i in 0..total {
                let a = position_for(i, total);
                let b = position_for((i + 1) % total, total);
                let dist = a.x.abs_diff(b.x) + a.y.abs_diff(b.y);
                assert_eq!(dist, 1, "spaces {i} and next are not adjacent on {total}");
            }
        }
    }

    #[test]
    fn default_board_is_a_nine_by_nine_ring() {
        assert_eq!(position_for(0, 32), Position { x: 0, y: 0 });
        assert_eq!(position_for(8, 32), Position { x: 8, y: 0 });
        assert_eq!(position_for(16, 32), Position { x: 8, y: 8 });
        assert_eq!(position_for(24, 32), Position { x: 0, y: 8 });
        assert_eq!(position_for(31, 32), Position { x: 0, y: 1 });
    }
}
