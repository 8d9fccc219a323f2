use anyhow::{Context, Result, ensure};
use async_trait::async_trait;

use arthneeti_client::ClientError;

use super::{Scenario, ScenarioCtx, start_fresh_game};

/// Reveal hints once; a second use on the same card is refused locally.
pub struct LifelineScenario;

#[async_trait(?Send)]
impl Scenario for LifelineScenario {
    fn key(&self) -> &'static str {
        "lifeline"
    }

    fn description(&self) -> &'static str {
        "Use a lifeline and check hints and the remaining count"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<Vec<String>> {
        let player = start_fresh_game(ctx).await?;
        let before = player
            .client
            .session()
            .context("no session after start")?
            .lifelines;
        ensure!(before > 0, "new game started without lifelines");

        let hints = player
            .client
            .use_lifeline()
            .await?
            .context("lifeline unavailable")?;
        ensure!(!hints.is_empty(), "lifeline returned no hints");

        let view = player.client.view();
        let card = view.card.context("card vanished after lifeline")?;
        ensure!(card.hints_applied(), "hints were not attached to card {}", card.id);
        let after = view.session.context("no session after lifeline")?.lifelines;
        ensure!(after <= before, "lifelines went up from {before} to {after}");

        let again = player.client.use_lifeline().await;
        ensure!(
            matches!(again, Err(ClientError::InvalidInput(_))),
            "second lifeline on the same card was not refused: {again:?}"
        );

        player.client.logout();
        Ok(vec![format!(
            "{} hints revealed, lifelines {before} -> {after}",
            hints.len()
        )])
    }
}
