//! Wire data model for the Arth-Neeti game API.
//!
//! Every type here mirrors a JSON shape produced by the server. The client
//! treats all numeric game state as opaque server output: nothing in this
//! module recomputes wealth, happiness, credit or portfolio values.
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Wealth below which the server offers emergency loans.
pub const LOAN_WEALTH_THRESHOLD: i64 = 4_000;

/// Opaque identifier for sessions, cards and choices.
///
/// The server emits integer keys; the client never interprets them, so both
/// JSON numbers and strings are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Number(serde_json::Number),
}

impl RawText {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(num) => num.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawText::deserialize(deserializer).map(|raw| Self(raw.into_string()))
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawText>::deserialize(deserializer).map(|raw| raw.map(RawText::into_string))
}

/// Stock market sector traded by the player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sector {
    Gold,
    Tech,
    RealEstate,
    /// Sector the client does not know about yet; kept verbatim.
    Other(String),
}

impl Sector {
    pub const TRADABLE: [Self; 3] = [Self::Gold, Self::Tech, Self::RealEstate];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gold => "gold",
            Self::Tech => "tech",
            Self::RealEstate => "real_estate",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Sector {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "gold" => Self::Gold,
            "tech" => Self::Tech,
            "real_estate" => Self::RealEstate,
            _ => Self::Other(value),
        }
    }
}

impl From<Sector> for String {
    fn from(value: Sector) -> Self {
        match value {
            Sector::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monthly expense attached to the session by an earlier choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub started_month: u32,
    #[serde(default)]
    pub is_cancelled: bool,
}

/// Server-authoritative snapshot of one playthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Id,
    #[serde(default)]
    pub username: Option<String>,
    pub is_active: bool,
    pub wealth: i64,
    pub happiness: i32,
    pub credit_score: i32,
    pub current_month: u32,
    pub lifelines: u32,
    #[serde(default)]
    pub portfolio: BTreeMap<Sector, f64>,
    #[serde(default)]
    pub market_prices: BTreeMap<Sector, f64>,
    #[serde(default)]
    pub recurring_expenses: i64,
    #[serde(default)]
    pub financial_literacy: i32,
    #[serde(default)]
    pub active_expenses: Vec<RecurringExpense>,
}

impl Session {
    /// Units of `sector` held according to this snapshot.
    #[must_use]
    pub fn units_owned(&self, sector: &Sector) -> f64 {
        self.portfolio.get(sector).copied().unwrap_or(0.0)
    }

    /// Whether the loan offer should be shown. The server still decides.
    #[must_use]
    pub const fn loan_eligible(&self) -> bool {
        self.is_active && self.wealth < LOAN_WEALTH_THRESHOLD
    }
}

/// One selectable answer on a scenario card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: Id,
    pub text: String,
    #[serde(default)]
    pub wealth_impact: i64,
    #[serde(default)]
    pub happiness_impact: i32,
    #[serde(default)]
    pub credit_impact: i32,
    #[serde(default)]
    pub literacy_impact: Option<i32>,
    /// Lifeline annotation; never sent to or received from the server.
    #[serde(skip)]
    pub hint: Option<bool>,
}

impl Choice {
    #[must_use]
    pub fn is_recommended(&self) -> bool {
        self.hint == Some(true)
    }
}

/// Recommendation for a single choice revealed by a lifeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub choice_id: Id,
    pub is_recommended: bool,
}

/// Scenario presented to the player for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: Id,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub difficulty: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub title_hi: Option<String>,
    #[serde(default)]
    pub description_hi: Option<String>,
    #[serde(default)]
    pub title_mr: Option<String>,
    #[serde(default)]
    pub description_mr: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Card {
    /// Attach lifeline hints. Choices absent from `hints` stay unmarked.
    pub fn apply_hints(&mut self, hints: &[Hint]) {
        for choice in &mut self.choices {
            choice.hint = hints
                .iter()
                .find(|hint| hint.choice_id == choice.id)
                .map(|hint| hint.is_recommended);
        }
    }

    #[must_use]
    pub fn hints_applied(&self) -> bool {
        self.choices.iter().any(|choice| choice.hint.is_some())
    }

    #[must_use]
    pub fn choice(&self, id: &Id) -> Option<&Choice> {
        self.choices.iter().find(|choice| &choice.id == id)
    }

    #[must_use]
    pub fn localized_title(&self, lang: &str) -> &str {
        pick_localized(lang, &self.title, self.title_hi.as_deref(), self.title_mr.as_deref())
    }

    #[must_use]
    pub fn localized_description(&self, lang: &str) -> &str {
        pick_localized(
            lang,
            &self.description,
            self.description_hi.as_deref(),
            self.description_mr.as_deref(),
        )
    }
}

fn pick_localized<'a>(
    lang: &str,
    default: &'a str,
    hi: Option<&'a str>,
    mr: Option<&'a str>,
) -> &'a str {
    let candidate = match lang {
        "hi" => hi,
        "mr" => mr,
        _ => None,
    };
    candidate.filter(|text| !text.trim().is_empty()).unwrap_or(default)
}

/// Why a playthrough ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EndReason {
    Bankruptcy,
    Burnout,
    Completed,
    Other(String),
}

impl EndReason {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bankruptcy => "BANKRUPTCY",
            Self::Burnout => "BURNOUT",
            Self::Completed => "COMPLETED",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for EndReason {
    fn from(value: String) -> Self {
        match value.as_str() {
            "BANKRUPTCY" => Self::Bankruptcy,
            "BURNOUT" => Self::Burnout,
            "COMPLETED" => Self::Completed,
            _ => Self::Other(value),
        }
    }
}

impl From<EndReason> for String {
    fn from(value: EndReason) -> Self {
        match value {
            EndReason::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// End-of-game archetype computed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(alias = "title")]
    pub persona: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub final_score: Option<i64>,
    #[serde(default)]
    pub net_worth: Option<i64>,
}

/// Emergency loan offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanKind {
    /// Interest-free help from family, costs happiness.
    Family,
    /// Instant app loan, costs credit score.
    InstantApp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: Session,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartGameResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub session: Session,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardResponse {
    #[serde(default)]
    pub card: Option<Card>,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub game_complete: bool,
    #[serde(default)]
    pub cards_remaining: Option<u32>,
    #[serde(default)]
    pub persona: Option<Persona>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceResponse {
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub was_recommended: bool,
    pub session: Session,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub game_over_reason: Option<EndReason>,
    #[serde(default)]
    pub final_persona: Option<Persona>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifelineResponse {
    #[serde(default)]
    pub hints: Vec<Hint>,
    #[serde(default)]
    pub lifelines_remaining: Option<u32>,
    #[serde(default)]
    pub session: Option<Session>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResponse {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipResponse {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub skipped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub advice: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_name: String,
    pub score: i64,
    #[serde(default)]
    pub wealth: i64,
    #[serde(default)]
    pub credit_score: i32,
    #[serde(default)]
    pub persona: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub sector: Sector,
    pub units: f64,
    pub current_price: f64,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStatus {
    #[serde(default)]
    pub market_prices: BTreeMap<Sector, f64>,
    #[serde(default)]
    pub portfolio: Vec<Holding>,
    #[serde(default)]
    pub total_portfolio_value: i64,
    #[serde(default)]
    pub net_worth: i64,
}

/// Settlement details of a stock trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub sector: Sector,
    pub units: f64,
    pub price_per_unit: f64,
    #[serde(alias = "total_spent", alias = "total_received")]
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default, alias = "purchase", alias = "sale")]
    pub receipt: Option<TradeReceipt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub username: String,
    #[serde(default)]
    pub total_games: u32,
    #[serde(default)]
    pub highest_wealth: i64,
    #[serde(default)]
    pub highest_score: i64,
    #[serde(default)]
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistoryEntry {
    pub id: Id,
    pub final_wealth: i64,
    pub final_happiness: i32,
    pub final_credit_score: i32,
    #[serde(default)]
    pub financial_literacy_score: i32,
    #[serde(default)]
    pub persona: String,
    #[serde(default)]
    pub end_reason: Option<String>,
    #[serde(default)]
    pub months_played: u32,
    #[serde(default)]
    pub played_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: PlayerProfile,
    #[serde(default)]
    pub game_history: Vec<GameHistoryEntry>,
}

/// Credential issued by the login or registration endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub message: Option<String>,
}
