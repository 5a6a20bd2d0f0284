//! Dice and movement around the loop.
use super::Player;
use crate::constants::DIE_FACES;
use rand::Rng;
use serde::Serialize;

/// Uniform roll of a six-sided die.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=DIE_FACES)
}

/// Where a move started and ended, and how it related to the start space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReport {
    pub from: usize,
    pub to: usize,
    pub steps: usize,
    pub passed_start: bool,
    pub landed_on_start: bool,
}

/// Move `steps` forward from `position` on a loop of `loop_length` spaces.
///
/// `passed_start` is set whenever the walk reaches or crosses index 0, so a
/// move that lands exactly on the start reports both flags.
#[must_use]
pub fn advance(position: usize, steps: usize, loop_length: usize) -> MoveReport {
    if loop_length == 0 {
        return MoveReport {
            from: position,
            to: position,
            steps,
            passed_start: false,
            landed_on_start: false,
        };
    }
    let from = position % loop_length;
    let to = (from + steps % loop_length) % loop_length;
    MoveReport {
        from,
        to,
        steps,
        passed_start: steps >= loop_length - from,
        landed_on_start: to == 0,
    }
}

/// Move a player in place and report what the move touched.
pub fn move_player(player: &mut Player, steps: usize, loop_length: usize) -> MoveReport {
    let report = advance(player.position, steps, loop_length);
    player.position = report.to;
    report
}

/// Index of the player after `current`, wrapping around.
#[must_use]
pub const fn next_player_index(current: usize, player_count: usize) -> usize {
    if player_count == 0 {
        0
    } else {
        (current + 1) % player_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn dice_cover_every_face_roughly_evenly() {
        let mut rng = ChaCha20Rng::seed_from_u64(2025);
        let mut counts = [0_u32; 6];
        for _ in 0..10_000 {
            let roll = roll_die(&mut rng);
            assert!((1..=6).contains(&roll));
            counts[usize::from(roll - 1)] += 1;
        }
        for count in counts {
            assert!((1_400..=1_950).contains(&count), "skewed face count {count}");
        }
    }

    #[test]
    fn passing_start_without_landing() {
        let report = advance(30, 5, 32);
        assert_eq!(report.to, 3);
        assert!(report.passed_start);
        assert!(!report.landed_on_start);
    }

    #[test]
    fn landing_exactly_on_start() {
        let report = advance(26, 6, 32);
        assert_eq!(report.to, 0);
        assert!(report.passed_start);
        assert!(report.landed_on_start);
    }

    #[test]
    fn full_lap_lands_on_start_and_large_steps_wrap() {
        let lap = advance(0, 32, 32);
        assert_eq!(lap.to, 0);
        assert!(lap.landed_on_start);

        let twice = advance(5, 70, 32);
        assert_eq!(twice.to, 11);
        assert!(twice.passed_start);
    }

    #[test]
    fn huge_step_counts_do_not_overflow() {
        let far = advance(31, usize::MAX, 32);
        assert_eq!(far.to, 30);
        assert!(far.passed_start);
        assert!(!far.landed_on_start);

        let from_far = advance(usize::MAX, 1, 32);
        assert_eq!(from_far.from, 31);
        assert!(from_far.landed_on_start);
    }

    #[test]
    fn ordinary_move_touches_nothing() {
        let report = advance(4, 3, 32);
        assert_eq!((report.from, report.to), (4, 7));
        assert!(!report.passed_start && !report.landed_on_start);
    }

    #[test]
    fn move_player_updates_position() {
        let mut player = Player {
            id: "a".to_string(),
            name: "Kari".to_string(),
            position: 30,
            color: "#FF5252".to_string(),
        };
        let report = move_player(&mut player, 4, 32);
        assert_eq!(player.position, 2);
        assert_eq!(report.from, 30);
        assert!(report.passed_start);
    }

    #[test]
    fn turn_order_wraps() {
        assert_eq!(next_player_index(0, 3), 1);
        assert_eq!(next_player_index(2, 3), 0);
        assert_eq!(next_player_index(0, 0), 0);
    }
}
