use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// One player's run of games: the current configuration, the board in play
/// and the seed source for the next board.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    engine: RevealEngine,
    seeds: SmallRng,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut seeds = SmallRng::seed_from_u64(seed);
        let engine = Self::deal(config, &mut seeds);
        Ok(Self {
            config,
            engine,
            seeds,
        })
    }

    /// Start over with new dimensions. Invalid settings leave the current game
    /// as it was.
    pub fn new_game(&mut self, width: Coord, height: Coord, mines: CellCount) -> Result<()> {
        let config = GameConfig::new(width, height, mines)?;
        self.config = config;
        self.restart();
        Ok(())
    }

    /// Start over on a fresh board with the current configuration.
    pub fn restart(&mut self) {
        self.engine = Self::deal(self.config, &mut self.seeds);
    }

    fn deal(config: GameConfig, seeds: &mut SmallRng) -> RevealEngine {
        let seed = seeds.random();
        log::debug!(
            "New game {}x{} with {} mines",
            config.width,
            config.height,
            config.mines
        );
        RevealEngine::new(ShuffleGenerator::new(seed).generate(config))
    }

    pub fn open(&mut self, index: CellIndex) -> OpenOutcome {
        self.engine.open(index)
    }

    pub fn chord(&mut self, index: CellIndex) -> OpenOutcome {
        self.engine.chord(index)
    }

    pub fn toggle_flag(&mut self, index: CellIndex) -> FlagOutcome {
        self.engine.toggle_flag(index)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn topology(&self) -> Topology {
        self.config.topology()
    }

    pub fn engine(&self) -> &RevealEngine {
        &self.engine
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn cell(&self, index: CellIndex) -> Cell {
        self.engine.cell(index)
    }

    pub fn mines_left(&self) -> isize {
        self.engine.mines_left()
    }

    pub fn triggered_mine(&self) -> Option<CellIndex> {
        self.engine.triggered_mine()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(&self.engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_safe(session: &GameSession) -> CellIndex {
        (0..session.topology().len())
            .find(|&index| !session.cell(index).is_mine())
            .unwrap()
    }

    fn first_mine(session: &GameSession) -> CellIndex {
        (0..session.topology().len())
            .find(|&index| session.cell(index).is_mine())
            .unwrap()
    }

    #[test]
    fn new_session_starts_in_progress() {
        let session = GameSession::new(GameConfig::beginner(), 1).unwrap();

        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.board().mine_count(), 10);
        assert_eq!(session.mines_left(), 10);
        assert!(session.board().cells().all(|cell| !cell.is_opened()));
    }

    #[test]
    fn new_session_rejects_bad_config() {
        let config = GameConfig {
            width: 2,
            height: 2,
            mines: 4,
        };

        assert_eq!(
            GameSession::new(config, 0).err(),
            Some(GameError::TooManyMines { mines: 4, cells: 4 })
        );
    }

    #[test]
    fn rejected_new_game_keeps_current_state() {
        let mut session = GameSession::new(GameConfig::beginner(), 5).unwrap();
        session.open(first_safe(&session));
        let board = session.board().clone();
        let status = session.status();

        assert_eq!(
            session.new_game(3, 3, 9),
            Err(GameError::TooManyMines { mines: 9, cells: 9 })
        );
        assert_eq!(session.new_game(0, 3, 1), Err(GameError::EmptyBoard));
        assert_eq!(session.new_game(3, 3, 0), Err(GameError::NoMines));

        assert_eq!(session.board(), &board);
        assert_eq!(session.status(), status);
        assert_eq!(session.config(), GameConfig::beginner());
    }

    #[test]
    fn new_game_resets_after_loss() {
        let mut session = GameSession::new(GameConfig::beginner(), 9).unwrap();
        assert_eq!(session.open(first_mine(&session)), OpenOutcome::Exploded);
        assert_eq!(session.status(), GameStatus::Lost);

        session.new_game(5, 4, 3).unwrap();

        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.config(), GameConfig::new(5, 4, 3).unwrap());
        assert_eq!(session.topology().len(), 20);
        assert_eq!(session.board().mine_count(), 3);
        assert_eq!(session.triggered_mine(), None);
        assert!(session.board().cells().all(|cell| !cell.is_opened()));
    }

    #[test]
    fn restart_deals_a_fresh_board() {
        let mut session = GameSession::new(GameConfig::expert(), 3).unwrap();
        let first = session.board().clone();
        session.toggle_flag(0);

        session.restart();

        assert_ne!(session.board(), &first);
        assert_eq!(session.config(), GameConfig::expert());
        assert_eq!(session.mines_left(), 99);
    }

    #[test]
    fn sessions_with_same_seed_agree() {
        let a = GameSession::new(GameConfig::intermediate(), 77).unwrap();
        let b = GameSession::new(GameConfig::intermediate(), 77).unwrap();

        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn playing_every_safe_cell_wins() {
        let mut session = GameSession::new(GameConfig::new(3, 3, 1).unwrap(), 11).unwrap();
        let mut outcome = OpenOutcome::NoChange;
        for index in 0..session.topology().len() {
            if !session.cell(index).is_mine() {
                outcome = outcome | session.open(index);
            }
        }

        assert_eq!(outcome, OpenOutcome::Won);
        assert_eq!(session.status(), GameStatus::Won);
        let closed = session.board().cells().filter(|cell| !cell.is_opened()).count();
        assert_eq!(closed, 1);
    }
}
