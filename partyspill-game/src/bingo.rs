//! Music bingo board generation and line checks.
use crate::seed::SeededLcg;
use crate::storage::Repository;
use crate::{KeyValueStore, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Song titles that can appear on a board.
pub const BINGO_SONGS: [&str; 25] = [
    "Ja, vi elsker dette landet",
    "Norge i rødt, hvitt og blått",
    "Alle fugler små de er",
    "Blåfjell 2: Når noen blir igjen",
    "Postgirobygget - En solskinnsdag",
    "Jahn Teigen - Mil etter mil",
    "a-ha - Take On Me",
    "Kygo - Firestone",
    "Sigrid - Mirror",
    "Karpe - Gunerius",
    "Gabrielle - Ring meg",
    "Astrid S - Hurts So Good",
    "DDE - Vinsjan på kaia",
    "Hellbillies - Liten by",
    "Seigmen - Hjernen er alene",
    "Röyksopp - Eple",
    "Datarock - Fa-Fa-Fa",
    "Katzenjammer - A Bar in Amsterdam",
    "Kaizers Orchestra - Kontroll på kontinentet",
    "Sissel Kyrkjebø - Solvguttene",
    "Madcon - Beggin",
    "Alan Walker - Faded",
    "Ylvis - The Fox",
    "Marcus & Martinus - Elektrisk",
    "Aurora - Runaway",
];

/// Supported board sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardSize {
    #[default]
    #[serde(rename = "3x3")]
    ThreeByThree,
    #[serde(rename = "4x4")]
    FourByFour,
    #[serde(rename = "5x5")]
    FiveByFive,
}

impl BoardSize {
    pub const ALL: [Self; 3] = [Self::ThreeByThree, Self::FourByFour, Self::FiveByFive];

    /// Parse a size tag; anything unknown falls back to 3x3.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag.trim() {
            "4x4" => Self::FourByFour,
            "5x5" => Self::FiveByFive,
            _ => Self::ThreeByThree,
        }
    }

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::ThreeByThree => "3x3",
            Self::FourByFour => "4x4",
            Self::FiveByFive => "5x5",
        }
    }

    /// `(rows, cols)` for this size.
    #[must_use]
    pub const fn dimensions(self) -> (usize, usize) {
        match self {
            Self::ThreeByThree => (3, 3),
            Self::FourByFour => (4, 4),
            Self::FiveByFive => (5, 5),
        }
    }

    #[must_use]
    pub const fn square_count(self) -> usize {
        let (rows, cols) = self.dimensions();
        rows * cols
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// `(rows, cols)` for a raw size tag, with the 3x3 fallback.
#[must_use]
pub fn dimensions_for(tag: &str) -> (usize, usize) {
    BoardSize::parse(tag).dimensions()
}

/// One square on a bingo board. `id` is the square's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BingoSquare {
    #[serde(deserialize_with = "square_id")]
    pub id: usize,
    #[serde(alias = "songTitle")]
    pub label: String,
    #[serde(default)]
    pub marked: bool,
}

/// Older boards stored the id as a string such as `"0"`.
fn square_id<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(usize),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Build a board for `size` whose labels depend only on `seed`.
#[must_use]
pub fn generate_board(size: BoardSize, seed: &str) -> Vec<BingoSquare> {
    let mut labels = BINGO_SONGS.to_vec();
    SeededLcg::from_seed(seed).shuffle(&mut labels);
    labels
        .into_iter()
        .take(size.square_count())
        .enumerate()
        .map(|(id, label)| BingoSquare {
            id,
            label: label.to_string(),
            marked: false,
        })
        .collect()
}

/// Whether a stored board can be used as-is for `size`.
///
/// The length must match, every square must sit at its own id, and labels
/// must be non-empty and unique.
#[must_use]
pub fn is_valid_board(board: &[BingoSquare], size: BoardSize) -> bool {
    if board.len() != size.square_count() {
        return false;
    }
    let positional = board
        .iter()
        .enumerate()
        .all(|(idx, square)| square.id == idx && !square.label.trim().is_empty());
    if !positional {
        return false;
    }
    let mut labels: Vec<&str> = board.iter().map(|sq| sq.label.as_str()).collect();
    labels.sort_unstable();
    labels.windows(2).all(|pair| pair[0] != pair[1])
}

/// True if any row, column or (on square boards) diagonal is fully marked.
///
/// Malformed boards never win.
#[must_use]
pub fn has_winning_line(board: &[BingoSquare], size: BoardSize) -> bool {
    if !is_valid_board(board, size) {
        return false;
    }
    let (rows, cols) = size.dimensions();
    let marked = |row: usize, col: usize| board[row * cols + col].marked;

    let any_row = (0..rows).any(|row| (0..cols).all(|col| marked(row, col)));
    let any_col = (0..cols).any(|col| (0..rows).all(|row| marked(row, col)));
    if any_row || any_col {
        return true;
    }
    if rows != cols {
        return false;
    }
    let main = (0..rows).all(|i| marked(i, i));
    let anti = (0..rows).all(|i| marked(i, cols - 1 - i));
    main || anti
}

/// Flip the `marked` flag of the square with `id`. Returns false if absent.
pub fn toggle_square(board: &mut [BingoSquare], id: usize) -> bool {
    match board.iter_mut().find(|square| square.id == id) {
        Some(square) => {
            square.marked = !square.marked;
            true
        }
        None => false,
    }
}

/// Persistent bingo board for one browser.
///
/// The user id doubles as the board seed, so reloading cannot reshuffle.
pub struct BingoSession<S: KeyValueStore> {
    repo: Repository<S>,
    user_id: String,
    size: BoardSize,
    board: Vec<BingoSquare>,
}

impl<S: KeyValueStore> BingoSession<S> {
    /// Load the saved size and board, regenerating anything missing or invalid.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn open(repo: Repository<S>) -> Result<Self, StorageError> {
        let user_id = match repo.load_bingo_user_id()? {
            Some(id) => id,
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                repo.save_bingo_user_id(&id)?;
                id
            }
        };
        let size = repo.load_bingo_size()?.unwrap_or_default();
        let board = Self::load_or_generate(&repo, &user_id, size)?;
        Ok(Self {
            repo,
            user_id,
            size,
            board,
        })
    }

    fn load_or_generate(
        repo: &Repository<S>,
        user_id: &str,
        size: BoardSize,
    ) -> Result<Vec<BingoSquare>, StorageError> {
        if let Some(board) = repo.load_bingo_board(size)? {
            if is_valid_board(&board, size) {
                return Ok(board);
            }
            log::warn!("discarding invalid {size} bingo board");
        }
        let board = generate_board(size, user_id);
        log::info!("generated {size} bingo board");
        repo.save_bingo_board(size, &board)?;
        Ok(board)
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    #[must_use]
    pub fn board(&self) -> &[BingoSquare] {
        &self.board
    }

    /// Switch to another size, loading that size's own saved board.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn set_size(&mut self, size: BoardSize) -> Result<(), StorageError> {
        self.repo.save_bingo_size(size)?;
        self.board = Self::load_or_generate(&self.repo, &self.user_id, size)?;
        self.size = size;
        Ok(())
    }

    /// Toggle a square and persist the board.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn toggle(&mut self, id: usize) -> Result<bool, StorageError> {
        if !toggle_square(&mut self.board, id) {
            return Ok(false);
        }
        self.repo.save_bingo_board(self.size, &self.board)?;
        Ok(true)
    }

    #[must_use]
    pub fn has_bingo(&self) -> bool {
        has_winning_line(&self.board, self.size)
    }
}
