use anyhow::{Context, Result, ensure};
use async_trait::async_trait;

use arthneeti_client::FlowState;

use super::{Scenario, ScenarioCtx, expect_flow, start_fresh_game};

/// Sign in, start a game, see the first card, sign out.
pub struct SmokeScenario;

#[async_trait(?Send)]
impl Scenario for SmokeScenario {
    fn key(&self) -> &'static str {
        "smoke"
    }

    fn description(&self) -> &'static str {
        "Sign in, start a game and receive the first card"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<Vec<String>> {
        let player = start_fresh_game(ctx).await?;
        let view = player.client.view();
        let session = view.session.context("no session after start")?;
        let card = view.card.context("no card after start")?;
        ensure!(session.is_active, "new session {} is inactive", session.id);
        ensure!(!card.choices.is_empty(), "card {} has no choices", card.id);
        ensure!(
            view.has_saved_game,
            "session {} was not remembered for resume",
            session.id
        );

        let notes = vec![
            format!("started session {}", session.id),
            format!("first card: {} ({} choices)", card.title, card.choices.len()),
        ];

        expect_flow(player.client.logout(), FlowState::Unauthenticated)?;
        ensure!(
            !player.client.view().has_saved_game,
            "saved game survived sign-out"
        );
        Ok(notes)
    }
}
