use thiserror::Error;

/// The result of attempting an invalid operation on a [Game](crate::game::Game).
///
/// Every variant is a categorical failure with a stable wire identifier; none
/// of them indicates an infrastructure fault.
#[derive(Error, Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameError {
    #[error("player names must be unique")]
    PlayersNameNotUnique,
    #[error("game does not exist")]
    GameNotFound,
    #[error("game status must be \"playing\" to accept plays")]
    GameNotPlaying,
    #[error("a card cannot be played twice in the same turn")]
    CantPlayCardTwice,
    #[error("card does not belong to this game")]
    CardNotInGame,
    #[error("card was already guessed during this round")]
    CardAlreadyGuessed,
    #[error("cards cannot be skipped during the first round")]
    CantSkipCard,
    #[error("game does not belong to this user")]
    GameDoesntBelongToUser,
    #[error("user already has one or more games in progress")]
    UserHasOnGoingGames,
    #[error("game status can't be updated anymore")]
    GameNotUpdatable,
    #[error("this status cannot be set explicitly")]
    ForbiddenNewGameStatus,
    #[error("cards can only be shuffled while the game is preparing or playing")]
    CantShuffleCards,
    #[error("players can only be updated while the game is preparing")]
    CantUpdatePlayers,
    #[error("no player exists with the given id")]
    PlayerNotFound,
    #[error("team is not one of the game's teams")]
    UnknownTeam,
    #[error("every team must keep at least two players")]
    TeamTooSmall,
    #[error("too few players in the game")]
    TooFewPlayers,
    #[error("too many players in the game")]
    TooManyPlayers,
    #[error("player names must be between 1 and 30 characters long")]
    InvalidPlayerName,
    #[error("invalid combination of game options")]
    InvalidGameOptions,
}

impl GameError {
    /// Stable identifier surfaced on the wire as the error `type`.
    pub fn kind(&self) -> &'static str {
        use GameError::*;
        match self {
            PlayersNameNotUnique => "PLAYERS_NAME_NOT_UNIQUE",
            GameNotFound => "GAME_NOT_FOUND",
            GameNotPlaying => "GAME_NOT_PLAYING",
            CantPlayCardTwice => "CANT_PLAY_CARD_TWICE",
            CardNotInGame => "CARD_NOT_IN_GAME",
            CardAlreadyGuessed => "CARD_ALREADY_GUESSED",
            CantSkipCard => "CANT_SKIP_CARD",
            GameDoesntBelongToUser => "GAME_DOESNT_BELONG_TO_USER",
            UserHasOnGoingGames => "USER_HAS_ON_GOING_GAMES",
            GameNotUpdatable => "GAME_NOT_UPDATABLE",
            ForbiddenNewGameStatus => "FORBIDDEN_NEW_GAME_STATUS",
            CantShuffleCards => "CANT_SHUFFLE_CARDS",
            CantUpdatePlayers => "CANT_UPDATE_PLAYERS",
            PlayerNotFound => "PLAYER_NOT_FOUND",
            UnknownTeam => "UNKNOWN_TEAM",
            TeamTooSmall => "TEAM_TOO_SMALL",
            TooFewPlayers | TooManyPlayers | InvalidPlayerName | InvalidGameOptions => {
                "BAD_REQUEST"
            }
        }
    }
}
