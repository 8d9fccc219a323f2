//! Money actions available during a game: emergency loans and stock trades.
use super::{GameClient, Notice, Severity};
use crate::api::{AuthProvider, GameApi};
use crate::error::{ApiError, ClientError};
use crate::flow::FlowState;
use crate::model::{LoanKind, MarketStatus, Sector, TradeResponse};
use crate::pointer::KeyValueStore;

const TRADING_STATES: [FlowState; 2] = [FlowState::InTurn, FlowState::ShowingFeedback];

impl<A, S, P> GameClient<A, S, P>
where
    A: GameApi,
    S: KeyValueStore,
    P: AuthProvider,
{
    /// Take an emergency loan. Eligibility is decided by the server.
    ///
    /// # Errors
    ///
    /// Returns the rejection, shown inline, when the loan is refused or the
    /// request fails.
    pub async fn take_loan(&self, kind: LoanKind) -> Result<String, ClientError> {
        self.require_in(&TRADING_STATES, "take a loan")?;
        let _busy = self.begin()?;
        let session = self.session_id()?;
        let epoch = self.epoch();

        let taken = self.api.take_loan(&session, kind).await;
        self.ensure_current(epoch)?;
        match taken {
            Ok(resp) => {
                let mut state = self.state.borrow_mut();
                state.store.apply(resp.session);
                state.notice = Some(Notice::Info(resp.message.clone()));
                Ok(resp.message)
            }
            Err(err) => Err(self.surface(err.into(), Severity::Recoverable)),
        }
    }

    /// Invest `amount` of cash in `sector`.
    ///
    /// # Errors
    ///
    /// Non-positive amounts are rejected locally; server rejections such as
    /// insufficient funds are returned and shown inline.
    pub async fn buy_stock(&self, sector: &Sector, amount: i64) -> Result<TradeResponse, ClientError> {
        self.require_in(&TRADING_STATES, "buy stock")?;
        if amount <= 0 {
            return Err(self.surface(
                ClientError::InvalidInput("Amount must be a positive number.".into()),
                Severity::Recoverable,
            ));
        }
        let _busy = self.begin()?;
        let session = self.session_id()?;
        let epoch = self.epoch();

        let bought = self.api.buy_stock(&session, sector, amount).await;
        self.ensure_current(epoch)?;
        self.settle_trade(bought)
    }

    /// Sell `units` of `sector`.
    ///
    /// # Errors
    ///
    /// Non-positive quantities and quantities above the holding in the current
    /// snapshot are rejected locally without a network call.
    pub async fn sell_stock(&self, sector: &Sector, units: f64) -> Result<TradeResponse, ClientError> {
        self.require_in(&TRADING_STATES, "sell stock")?;
        if !units.is_finite() || units <= 0.0 {
            return Err(self.surface(
                ClientError::InvalidInput("Units must be a positive number.".into()),
                Severity::Recoverable,
            ));
        }
        let owned = self
            .state
            .borrow()
            .store
            .current()
            .map(|session| session.units_owned(sector));
        let Some(owned) = owned else {
            return Err(ClientError::NoSession);
        };
        if units > owned {
            return Err(self.surface(
                ClientError::InvalidInput(format!("Insufficient {sector} units. You have {owned:.2}")),
                Severity::Recoverable,
            ));
        }
        let _busy = self.begin()?;
        let session = self.session_id()?;
        let epoch = self.epoch();

        let sold = self.api.sell_stock(&session, sector, units).await;
        self.ensure_current(epoch)?;
        self.settle_trade(sold)
    }

    fn settle_trade(
        &self,
        result: Result<TradeResponse, ApiError>,
    ) -> Result<TradeResponse, ClientError> {
        match result {
            Ok(resp) => {
                let mut state = self.state.borrow_mut();
                state.store.apply(resp.session.clone());
                if !resp.message.is_empty() {
                    state.notice = Some(Notice::Info(resp.message.clone()));
                }
                Ok(resp)
            }
            Err(err) => Err(self.surface(err.into(), Severity::Recoverable)),
        }
    }

    /// Current prices and holdings. Read-only; never touches the snapshot.
    ///
    /// # Errors
    ///
    /// Only a rejected credential is returned; other failures yield `Ok(None)`.
    pub async fn market_status(&self) -> Result<Option<MarketStatus>, ClientError> {
        let session = self.session_id()?;
        let epoch = self.epoch();
        let fetched = self.api.market_status(&session).await;
        self.ensure_current(epoch)?;
        match fetched {
            Ok(status) => Ok(Some(status)),
            Err(err) if err.is_auth() => Err(self.surface(err.into(), Severity::Recoverable)),
            Err(err) => {
                log::warn!("market status unavailable: {err}");
                Ok(None)
            }
        }
    }
}
