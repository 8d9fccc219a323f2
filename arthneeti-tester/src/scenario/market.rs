use anyhow::{Context, Result, ensure};
use async_trait::async_trait;

use arthneeti_client::{ClientError, Sector};

use super::{Scenario, ScenarioCtx, start_fresh_game};

const PURCHASE_RUPEES: i64 = 1_000;

/// Buy, then sell half, then try to sell more than is held.
pub struct MarketScenario;

#[async_trait(?Send)]
impl Scenario for MarketScenario {
    fn key(&self) -> &'static str {
        "market"
    }

    fn description(&self) -> &'static str {
        "Buy and sell gold mid-game; oversized sells are refused locally"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<Vec<String>> {
        let player = start_fresh_game(ctx).await?;
        let sector = Sector::Gold;

        let status = player
            .client
            .market_status()
            .await?
            .context("market status unavailable")?;
        let price = status.market_prices.get(&sector).copied();

        let bought = player
            .client
            .buy_stock(&sector, PURCHASE_RUPEES)
            .await
            .context("buy gold")?;
        let held = player
            .client
            .session()
            .context("no session after buy")?
            .units_owned(&sector);
        ensure!(held > 0.0, "bought gold but hold {held} units");
        if let Some(reported) = bought.session.as_ref().map(|s| s.units_owned(&sector)) {
            ensure!(
                (reported - held).abs() < f64::EPSILON,
                "snapshot shows {held} units, server reported {reported}"
            );
        }

        let oversell = player.client.sell_stock(&sector, held + 1.0).await;
        ensure!(
            matches!(oversell, Err(ClientError::InvalidInput(_))),
            "selling more than held was not refused: {oversell:?}"
        );

        player
            .client
            .sell_stock(&sector, held / 2.0)
            .await
            .context("sell gold")?;
        let remaining = player
            .client
            .session()
            .context("no session after sale")?
            .units_owned(&sector);
        ensure!(
            remaining < held,
            "still hold {remaining} units after selling half of {held}"
        );

        player.client.logout();
        let mut notes = vec![format!("bought {held:.2} units, {remaining:.2} left after sale")];
        if let Some(price) = price {
            notes.push(format!("gold quoted at {price:.2}"));
        }
        Ok(notes)
    }
}
