use anyhow::{Context, Result, ensure};
use async_trait::async_trait;

use arthneeti_client::FlowState;

use super::{Scenario, ScenarioCtx, build_client, expect_flow, start_fresh_game};

/// A second client over the same storage lands back on the same card.
pub struct ResumeScenario;

#[async_trait(?Send)]
impl Scenario for ResumeScenario {
    fn key(&self) -> &'static str {
        "resume"
    }

    fn description(&self) -> &'static str {
        "Reload over persisted storage and resume the same session"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<Vec<String>> {
        let player = start_fresh_game(ctx).await?;
        let before = player.client.view();
        let session_id = before.session.context("no session after start")?.id;
        let card_id = before.card.context("no card after start")?.id;

        let reloaded = build_client(&ctx.config, player.store.clone(), player.auth.clone())?;
        let flow = reloaded.bootstrap().await.context("bootstrap after reload")?;
        expect_flow(flow, FlowState::InTurn)?;

        let after = reloaded.view();
        let resumed = after.session.context("no session after resume")?;
        ensure!(
            resumed.id == session_id,
            "resumed session {} instead of {session_id}",
            resumed.id
        );
        let card = after.card.context("no card after resume")?;
        ensure!(
            card.id == card_id,
            "resumed on card {} instead of {card_id}",
            card.id
        );

        reloaded.logout();
        Ok(vec![format!("resumed session {session_id} on card {card_id}")])
    }
}
