//! One command per player gesture, routed to the matching orchestrator.
use super::GameClient;
use crate::api::{AuthProvider, GameApi};
use crate::error::ClientError;
use crate::flow::FlowState;
use crate::model::{
    AdviceResponse, Hint, Id, LeaderboardEntry, LoanKind, MarketStatus, ProfileResponse, Sector,
    TradeResponse,
};
use crate::pointer::KeyValueStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Bootstrap,
    Login {
        username: String,
        password: String,
    },
    Register {
        username: String,
        password: String,
        email: Option<String>,
    },
    Resume,
    StartGame,
    Choose(Id),
    Continue,
    Skip,
    UseLifeline,
    AskAdvice,
    TakeLoan(LoanKind),
    Buy {
        sector: Sector,
        amount: i64,
    },
    Sell {
        sector: Sector,
        units: f64,
    },
    LoadMarket,
    LoadLeaderboard,
    LoadProfile,
    PlayAgain,
    Logout,
    DismissNotice,
}

impl Command {
    /// Name safe to log; credentials never appear in it.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::Resume => "resume",
            Self::StartGame => "start_game",
            Self::Choose(_) => "choose",
            Self::Continue => "continue",
            Self::Skip => "skip",
            Self::UseLifeline => "use_lifeline",
            Self::AskAdvice => "ask_advice",
            Self::TakeLoan(_) => "take_loan",
            Self::Buy { .. } => "buy",
            Self::Sell { .. } => "sell",
            Self::LoadMarket => "load_market",
            Self::LoadLeaderboard => "load_leaderboard",
            Self::LoadProfile => "load_profile",
            Self::PlayAgain => "play_again",
            Self::Logout => "logout",
            Self::DismissNotice => "dismiss_notice",
        }
    }

    /// Commands that may change server-side session state.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::StartGame
                | Self::Choose(_)
                | Self::Skip
                | Self::UseLifeline
                | Self::TakeLoan(_)
                | Self::Buy { .. }
                | Self::Sell { .. }
        )
    }
}

/// What a dispatched command produced beyond the state change itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Flow(FlowState),
    Hints(Option<Vec<Hint>>),
    Advice(Option<AdviceResponse>),
    Message(String),
    Trade(TradeResponse),
    Market(Option<MarketStatus>),
    Leaderboard(Option<Vec<LeaderboardEntry>>),
    Profile(Option<ProfileResponse>),
    Done,
}

impl<A, S, P> GameClient<A, S, P>
where
    A: GameApi,
    S: KeyValueStore,
    P: AuthProvider,
{
    /// Route `command` to its orchestrator.
    ///
    /// # Errors
    ///
    /// Propagates the orchestrator's error unchanged.
    pub async fn dispatch(&self, command: Command) -> Result<Outcome, ClientError> {
        log::debug!("dispatch {}", command.label());
        Ok(match command {
            Command::Bootstrap => Outcome::Flow(self.bootstrap().await?),
            Command::Login { username, password } => {
                Outcome::Flow(self.login(&username, &password).await?)
            }
            Command::Register {
                username,
                password,
                email,
            } => Outcome::Flow(
                self.register(&username, &password, email.as_deref())
                    .await?,
            ),
            Command::Resume => Outcome::Flow(self.resume().await?),
            Command::StartGame => Outcome::Flow(self.start_game().await?),
            Command::Choose(choice) => Outcome::Flow(self.submit_choice(&choice).await?),
            Command::Continue => Outcome::Flow(self.continue_turn().await?),
            Command::Skip => Outcome::Flow(self.skip_card().await?),
            Command::UseLifeline => Outcome::Hints(self.use_lifeline().await?),
            Command::AskAdvice => Outcome::Advice(self.ai_advice().await?),
            Command::TakeLoan(kind) => Outcome::Message(self.take_loan(kind).await?),
            Command::Buy { sector, amount } => {
                Outcome::Trade(self.buy_stock(&sector, amount).await?)
            }
            Command::Sell { sector, units } => Outcome::Trade(self.sell_stock(&sector, units).await?),
            Command::LoadMarket => Outcome::Market(self.market_status().await?),
            Command::LoadLeaderboard => Outcome::Leaderboard(self.leaderboard().await?),
            Command::LoadProfile => Outcome::Profile(self.profile().await?),
            Command::PlayAgain => Outcome::Flow(self.play_again()?),
            Command::Logout => Outcome::Flow(self.logout()),
            Command::DismissNotice => {
                self.dismiss_notice();
                Outcome::Done
            }
        })
    }
}
