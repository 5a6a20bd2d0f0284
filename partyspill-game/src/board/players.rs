use super::Player;
use crate::constants::{MAX_PLAYER_NAME_CHARS, PLAYER_COLORS};
use rand::Rng;
use rand::seq::SliceRandom;

/// Trim a display name and cap it at the allowed length; `None` when blank.
#[must_use]
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_PLAYER_NAME_CHARS).collect())
}

/// First palette color nobody uses yet; a random palette color once all are taken.
pub fn pick_color<R: Rng + ?Sized>(players: &[Player], rng: &mut R) -> &'static str {
    PLAYER_COLORS
        .iter()
        .find(|color| players.iter().all(|p| p.color != **color))
        .or_else(|| PLAYER_COLORS.choose(rng))
        .copied()
        .unwrap_or(PLAYER_COLORS[0])
}

/// New player at the start space, or `None` for a blank name.
pub fn create_player<R: Rng + ?Sized>(
    name: &str,
    players: &[Player],
    rng: &mut R,
) -> Option<Player> {
    let name = normalize_name(name)?;
    Some(Player {
        id: uuid::Uuid::new_v4().to_string(),
        name,
        position: 0,
        color: pick_color(players, rng).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn names_are_trimmed_and_capped() {
        assert_eq!(normalize_name("  Ola  ").as_deref(), Some("Ola"));
        assert_eq!(normalize_name("   "), None);
        let long = normalize_name("Åsmund Bjørnstjerne Kristoffersen").unwrap();
        assert_eq!(long.chars().count(), 20);
        assert!(long.starts_with("Åsmund"));
    }

    #[test]
    fn colors_fill_the_palette_before_repeating() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let mut players = Vec::new();
        for i in 0..PLAYER_COLORS.len() {
            let player = create_player(&format!("p{i}"), &players, &mut rng).unwrap();
            assert_eq!(player.color, PLAYER_COLORS[i]);
            players.push(player);
        }
        let ninth = create_player("extra", &players, &mut rng).unwrap();
        assert!(PLAYER_COLORS.contains(&ninth.color.as_str()));
    }

    #[test]
    fn new_players_start_at_zero_with_unique_ids() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let a = create_player("Kari", &[], &mut rng).unwrap();
        let b = create_player("Kari", &[a.clone()], &mut rng).unwrap();
        assert_eq!(a.position, 0);
        assert_ne!(a.id, b.id);
    }
}
