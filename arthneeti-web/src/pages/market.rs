use std::collections::BTreeMap;

use arthneeti_client::{Command, MarketStatus, Notice, Sector, Session};
use yew::prelude::*;

use crate::components::notice_banner::NoticeBanner;
use crate::format::{rupees, sector_label, units};

#[derive(Properties, Clone, PartialEq)]
pub struct MarketPageProps {
    #[prop_or_default]
    pub session: Option<Session>,
    #[prop_or_default]
    pub market: Option<MarketStatus>,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub notice: Option<Notice>,
    pub on_command: Callback<Command>,
    pub on_back: Callback<()>,
}

/// Whole rupees typed by the player. Unparseable input becomes zero so the
/// client rejects it with its own message.
#[must_use]
pub fn parse_amount(raw: &str) -> i64 {
    raw.trim().replace(',', "").parse().unwrap_or(0)
}

#[must_use]
pub fn parse_units(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Prices from the market status, falling back to the session snapshot.
#[must_use]
pub fn price_board(
    market: Option<&MarketStatus>,
    session: Option<&Session>,
) -> BTreeMap<Sector, f64> {
    market
        .map(|status| status.market_prices.clone())
        .filter(|prices| !prices.is_empty())
        .or_else(|| session.map(|session| session.market_prices.clone()))
        .unwrap_or_default()
}

fn bind_input(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
            handle.set(input.value());
        }
    })
}

#[function_component(MarketPage)]
pub fn market_page(props: &MarketPageProps) -> Html {
    let amount = use_state(String::new);
    let sell_units = use_state(String::new);

    let prices = price_board(props.market.as_ref(), props.session.as_ref());
    let rows = Sector::TRADABLE.into_iter().map(|sector| {
        let price = prices.get(&sector).copied().unwrap_or_default();
        let owned = props
            .session
            .as_ref()
            .map_or(0.0, |session| session.units_owned(&sector));
        let buy = {
            let cb = props.on_command.clone();
            let amount = amount.clone();
            let sector = sector.clone();
            Callback::from(move |_| {
                cb.emit(Command::Buy {
                    sector: sector.clone(),
                    amount: parse_amount(&amount),
                });
            })
        };
        let sell = {
            let cb = props.on_command.clone();
            let sell_units = sell_units.clone();
            let sector = sector.clone();
            Callback::from(move |_| {
                cb.emit(Command::Sell {
                    sector: sector.clone(),
                    units: parse_units(&sell_units),
                });
            })
        };
        html! {
            <tr data-testid={format!("sector-{sector}")}>
                <td>{ sector_label(&sector) }</td>
                <td>{ format!("₹{price:.2}") }</td>
                <td>{ units(owned) }</td>
                <td class="flex gap-1">
                    <button type="button" class="btn btn-xs btn-primary" disabled={props.busy} onclick={buy}>{ "Buy" }</button>
                    <button type="button" class="btn btn-xs" disabled={props.busy || owned <= 0.0} onclick={sell}>{ "Sell" }</button>
                </td>
            </tr>
        }
    });

    let totals = props.market.as_ref().map(|status| {
        html! {
            <p class="text-sm" data-testid="market-totals">
                { format!("Portfolio {} · Net worth {}", rupees(status.total_portfolio_value), rupees(status.net_worth)) }
            </p>
        }
    });
    let cash = props
        .session
        .as_ref()
        .map(|session| html! { <p class="text-sm">{ format!("Cash available: {}", rupees(session.wealth)) }</p> });
    let notice = props.notice.clone().map(|notice| {
        let cb = props.on_command.clone();
        html! { <NoticeBanner {notice} on_dismiss={Callback::from(move |()| cb.emit(Command::DismissNotice))} /> }
    });
    let refresh = {
        let cb = props.on_command.clone();
        Callback::from(move |_| cb.emit(Command::LoadMarket))
    };
    let back = {
        let cb = props.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <div class="max-w-3xl mx-auto p-4 flex flex-col gap-4" data-testid="market-screen">
            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-bold">{ "Stock market" }</h1>
                <div class="flex gap-2">
                    <button type="button" class="btn btn-sm" onclick={refresh}>{ "Refresh" }</button>
                    <button type="button" class="btn btn-sm btn-ghost" onclick={back}>{ "Back to game" }</button>
                </div>
            </div>
            { for notice }
            { for cash }
            { for totals }
            <div class="flex gap-4">
                <label class="form-control">
                    <span class="label-text">{ "Invest amount (₹)" }</span>
                    <input class="input input-bordered input-sm" inputmode="numeric" name="amount"
                        value={(*amount).clone()} oninput={bind_input(&amount)} />
                </label>
                <label class="form-control">
                    <span class="label-text">{ "Units to sell" }</span>
                    <input class="input input-bordered input-sm" inputmode="decimal" name="units"
                        value={(*sell_units).clone()} oninput={bind_input(&sell_units)} />
                </label>
            </div>
            <table class="table">
                <thead>
                    <tr><th>{ "Sector" }</th><th>{ "Price" }</th><th>{ "Owned" }</th><th></th></tr>
                </thead>
                <tbody>{ for rows }</tbody>
            </table>
        </div>
    }
}
