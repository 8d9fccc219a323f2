use anyhow::{Context, Result, bail, ensure};
use async_trait::async_trait;

use arthneeti_client::FlowState;
use arthneeti_client::pointer::SESSION_KEY;

use super::{Scenario, ScenarioCtx, answer_current, expect_flow, start_fresh_game};

/// Play until the server ends the game, then return to the idle screen.
pub struct FullGameScenario;

#[async_trait(?Send)]
impl Scenario for FullGameScenario {
    fn key(&self) -> &'static str {
        "full-game"
    }

    fn description(&self) -> &'static str {
        "Answer every card until the game ends, then play again"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<Vec<String>> {
        let player = start_fresh_game(ctx).await?;
        let mut answered = 0;

        loop {
            match player.flow() {
                FlowState::InTurn => {
                    if answered >= ctx.max_turns {
                        bail!("game still running after {answered} answers");
                    }
                    answer_current(&player, ctx.policy).await?;
                    answered += 1;
                    if ctx.verbose {
                        println!("   answered card {answered}");
                    }
                }
                FlowState::ShowingFeedback => {
                    player.client.continue_turn().await.context("continue")?;
                }
                FlowState::Ended => break,
                other => bail!("unexpected {other} during play"),
            }
        }

        let view = player.client.view();
        let over = view.game_over.context("game ended without a result")?;
        ensure!(
            player.store.contains(SESSION_KEY),
            "finished game was forgotten before play again"
        );
        let mut notes = vec![format!("game ended after {answered} answers: {}", over.reason)];
        if let Some(persona) = over.persona {
            notes.push(format!("persona: {}", persona.persona));
        }

        expect_flow(player.client.play_again()?, FlowState::AuthenticatedIdle)?;
        ensure!(
            !player.store.contains(SESSION_KEY),
            "finished game still saved after play again"
        );
        player.client.logout();
        Ok(notes)
    }
}
