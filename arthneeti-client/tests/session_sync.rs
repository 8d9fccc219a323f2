mod common;

use arthneeti_client::pointer::SESSION_KEY;
use arthneeti_client::{
    ApiError, AuthProvider, ClientError, Command, EndReason, FlowState, GameClient, Id,
    KeyValueStore, LoanKind, MemoryAuth, MemoryStore, Notice, Outcome, Sector, SessionPointer,
};
use common::{ScriptedApi, as_session, card_reply, client_in_turn, session, signed_in_client};
use futures::executor::block_on;
use futures::poll;
use serde_json::json;

#[test]
fn store_mirrors_each_returned_snapshot() {
    block_on(async {
        let first = session(7, json!({}));
        let (client, api, _, _) = client_in_turn(first.clone()).await;
        assert_eq!(client.session(), Some(as_session(&first)));

        let after_choice = session(7, json!({"wealth": 23000, "happiness": 64, "current_month": 2}));
        api.reply(
            "submit_choice",
            json!({"feedback": "Nice.", "was_recommended": true, "session": after_choice.clone()}),
        );
        client.submit_choice(&Id::new("c1-b")).await.unwrap();
        assert_eq!(client.session(), Some(as_session(&after_choice)));

        let after_buy = session(
            7,
            json!({"wealth": 22000, "current_month": 2, "portfolio": {"tech": 10.0}}),
        );
        api.reply(
            "buy_stock",
            json!({"message": "Bought 10.00 units of TECH", "session": after_buy.clone(),
                   "purchase": {"sector": "tech", "units": 10.0, "price_per_unit": 100, "total_spent": 1000}}),
        );
        let trade = client.buy_stock(&Sector::Tech, 1000).await.unwrap();
        assert_eq!(trade.receipt.map(|r| r.total), Some(1000));
        assert_eq!(client.session(), Some(as_session(&after_buy)));

        let next_turn = session(7, json!({"wealth": 21500, "current_month": 3, "portfolio": {"tech": 10.0}}));
        api.reply("get_card", card_reply("c2", next_turn.clone()));
        assert_eq!(client.continue_turn().await, Ok(FlowState::InTurn));
        assert_eq!(client.session(), Some(as_session(&next_turn)));
        assert_eq!(client.view().revision, 4);
    });
}

#[test]
fn inactive_saved_session_is_cleared_on_resume() {
    let (client, api, store, _) = signed_in_client();
    SessionPointer::new(store.clone()).save(&Id::new("9"));
    api.reply("get_session", json!({"session": session(9, json!({"is_active": false}))}));

    let state = block_on(client.bootstrap()).unwrap();

    assert_eq!(state, FlowState::AuthenticatedIdle);
    assert_eq!(SessionPointer::new(store).load(), None);
    assert_eq!(api.count("get_card"), 0);
    assert!(client.session().is_none());
}

#[test]
fn active_saved_session_resumes_into_the_pending_card() {
    let (client, api, store, _) = signed_in_client();
    SessionPointer::new(store.clone()).save(&Id::new("9"));
    let snapshot = session(9, json!({"current_month": 5}));
    api.reply("get_session", json!({"session": snapshot.clone()}));
    api.reply("get_card", card_reply("c40", snapshot.clone()));

    assert_eq!(block_on(client.bootstrap()), Ok(FlowState::InTurn));
    let view = client.view();
    assert_eq!(view.card.map(|c| c.id), Some(Id::new("c40")));
    assert_eq!(view.session, Some(as_session(&snapshot)));
    assert!(view.has_saved_game);
}

#[test]
fn missing_or_unreachable_saved_session_falls_back_to_idle() {
    for failure in [
        ApiError::NotFound("Session not found.".into()),
        ApiError::Network("connection refused".into()),
    ] {
        let (client, api, store, _) = signed_in_client();
        SessionPointer::new(store.clone()).save(&Id::new("9"));
        api.fail("get_session", failure);

        assert_eq!(block_on(client.bootstrap()), Ok(FlowState::AuthenticatedIdle));
        assert!(!store.contains(SESSION_KEY));
        assert!(client.view().notice.is_none());
    }
}

#[test]
fn rejected_credential_on_resume_signs_out() {
    let (client, api, store, auth) = signed_in_client();
    SessionPointer::new(store.clone()).save(&Id::new("9"));
    api.fail("get_session", ApiError::Unauthorized);

    let err = block_on(client.bootstrap()).unwrap_err();

    assert_eq!(err, ClientError::Api(ApiError::Unauthorized));
    assert_eq!(client.flow(), FlowState::Unauthenticated);
    assert_eq!(auth.token(), None);
    assert!(!store.contains(SESSION_KEY));
}

#[test]
fn no_credential_starts_signed_out_without_network() {
    let api = ScriptedApi::default();
    let store = MemoryStore::default();
    SessionPointer::new(store.clone()).save(&Id::new("3"));
    let client = GameClient::new(api.clone(), store, MemoryAuth::default());

    assert_eq!(block_on(client.bootstrap()), Ok(FlowState::Unauthenticated));
    assert_eq!(api.total_calls(), 0);
}

#[test]
fn second_submission_while_pending_is_rejected_locally() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({}))).await;
        api.reply(
            "submit_choice",
            json!({"feedback": "ok", "session": session(7, json!({"current_month": 2}))}),
        );
        let release = api.hold_next();

        let choice = Id::new("c1-a");
        let mut first = Box::pin(client.submit_choice(&choice));
        assert!(poll!(first.as_mut()).is_pending());
        assert!(client.is_busy());

        let second = client.submit_choice(&Id::new("c1-b")).await;
        assert_eq!(second, Err(ClientError::Busy));
        let skipped = client.skip_card().await;
        assert_eq!(skipped, Err(ClientError::Busy));
        assert_eq!(api.count("submit_choice"), 1);
        assert_eq!(api.count("skip_card"), 0);

        release.send(()).unwrap();
        assert_eq!(first.await, Ok(FlowState::ShowingFeedback));
        assert!(!client.is_busy());
    });
}

#[test]
fn read_only_lookups_are_not_gated_by_busy() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({}))).await;
        api.reply("submit_choice", json!({"feedback": "ok", "session": session(7, json!({}))}));
        api.reply("leaderboard", json!({"leaderboard": [
            {"rank": 1, "player_name": "ravi", "score": 910}
        ]}));
        let release = api.hold_next();

        let choice = Id::new("c1-a");
        let mut pending = Box::pin(client.submit_choice(&choice));
        assert!(poll!(pending.as_mut()).is_pending());

        let board = client.leaderboard().await.unwrap().unwrap();
        assert_eq!(board[0].player_name, "ravi");

        release.send(()).unwrap();
        pending.await.unwrap();
    });
}

#[test]
fn selling_more_than_owned_never_reaches_the_server() {
    block_on(async {
        let start = session(7, json!({"wealth": 5000, "portfolio": {"gold": 1.5}}));
        let (client, api, _, _) = client_in_turn(start.clone()).await;

        let err = client.sell_stock(&Sector::Gold, 2.5).await.unwrap_err();

        assert_eq!(
            err,
            ClientError::InvalidInput("Insufficient gold units. You have 1.50".into())
        );
        assert_eq!(api.count("sell_stock"), 0);
        assert_eq!(client.session(), Some(as_session(&start)));
        assert!(matches!(client.view().notice, Some(Notice::Inline(_))));
        assert_eq!(client.flow(), FlowState::InTurn);
    });
}

#[test]
fn server_rejected_sale_leaves_wealth_untouched() {
    block_on(async {
        let start = session(7, json!({"wealth": 5000, "portfolio": {"gold": 3.0}}));
        let (client, api, _, _) = client_in_turn(start.clone()).await;
        api.fail(
            "sell_stock",
            ApiError::Unprocessable("Insufficient gold units. You have 0.00".into()),
        );

        let err = client.sell_stock(&Sector::Gold, 2.0).await.unwrap_err();

        assert!(err.api().is_some_and(ApiError::is_business_rule));
        assert_eq!(client.session().map(|s| s.wealth), Some(5000));
        assert_eq!(
            client.view().notice,
            Some(Notice::Inline("Insufficient gold units. You have 0.00".into()))
        );
    });
}

#[test]
fn lifeline_marks_only_the_recommended_choice() {
    block_on(async {
        let start = session(
            7,
            json!({"wealth": 3000, "happiness": 40, "credit_score": 680, "current_month": 4}),
        );
        let (client, api, _, _) = signed_in_client();
        client.bootstrap().await.unwrap();
        api.reply("start_game", json!({"session": start.clone()}));
        api.reply("get_card", card_reply("c17", start.clone()));
        client.start_game().await.unwrap();

        let after = session(
            7,
            json!({"wealth": 3000, "happiness": 40, "credit_score": 680, "current_month": 4, "lifelines": 2}),
        );
        api.reply(
            "use_lifeline",
            json!({"hints": [{"choice_id": "c17-a", "is_recommended": true}],
                   "lifelines_remaining": 2, "session": after}),
        );

        let hints = client.use_lifeline().await.unwrap().unwrap();
        assert_eq!(hints.len(), 1);

        let view = client.view();
        let marked: Vec<&str> = view
            .card
            .as_ref()
            .unwrap()
            .choices
            .iter()
            .filter(|c| c.is_recommended())
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(marked, vec!["c17-a"]);
        assert_eq!(view.session.map(|s| s.lifelines), Some(2));
    });
}

#[test]
fn lifeline_count_only_changes_with_the_returned_snapshot() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({"lifelines": 3}))).await;
        api.reply(
            "use_lifeline",
            json!({"hints": [{"choice_id": "c1-b", "is_recommended": true}], "lifelines_remaining": 2}),
        );

        client.use_lifeline().await.unwrap();

        assert_eq!(client.session().map(|s| s.lifelines), Some(3));
    });
}

#[test]
fn lifeline_transport_failure_degrades_quietly() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({}))).await;
        api.fail("use_lifeline", ApiError::Network("timeout".into()));

        assert_eq!(client.use_lifeline().await, Ok(None));
        assert_eq!(client.flow(), FlowState::InTurn);
        assert!(client.view().notice.is_none());
    });
}

#[test]
fn exhausted_lifelines_are_rejected_locally() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({"lifelines": 0}))).await;
        let err = client.use_lifeline().await.unwrap_err();
        assert_eq!(err, ClientError::InvalidInput("No lifelines remaining!".into()));
        assert_eq!(api.count("use_lifeline"), 0);
    });
}

#[test]
fn bankruptcy_ends_the_game_and_pointer_survives_until_play_again() {
    block_on(async {
        let (client, api, store, _) = client_in_turn(session(7, json!({}))).await;
        let pointer = SessionPointer::new(store.clone());
        assert_eq!(pointer.load(), Some(Id::new("7")));

        api.reply(
            "submit_choice",
            json!({
                "feedback": "The EMI bounced.",
                "game_over": true,
                "game_over_reason": "BANKRUPTCY",
                "final_persona": {"persona": "The FOMO Victim", "description": "Trends first."},
                "session": session(7, json!({"is_active": false, "wealth": -1200}))
            }),
        );

        assert_eq!(
            client.submit_choice(&Id::new("c1-b")).await,
            Ok(FlowState::ShowingFeedback)
        );
        assert_eq!(pointer.load(), Some(Id::new("7")));

        let calls_before = api.total_calls();
        assert_eq!(client.continue_turn().await, Ok(FlowState::Ended));
        assert_eq!(api.total_calls(), calls_before);
        assert_eq!(pointer.load(), Some(Id::new("7")));

        let over = client.view().game_over.unwrap();
        assert_eq!(over.reason, EndReason::Bankruptcy);
        assert_eq!(over.persona.map(|p| p.persona), Some("The FOMO Victim".into()));

        assert_eq!(client.play_again(), Ok(FlowState::AuthenticatedIdle));
        assert_eq!(pointer.load(), None);
        assert!(client.session().is_none());
        assert!(client.view().card.is_none());
    });
}

#[test]
fn exhausted_deck_completes_the_game_on_continue() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({}))).await;
        api.reply("submit_choice", json!({"feedback": "ok", "session": session(7, json!({"current_month": 12}))}));
        client.submit_choice(&Id::new("c1-a")).await.unwrap();

        api.reply(
            "get_card",
            json!({"message": "No more scenarios available!", "game_complete": true,
                   "session": session(7, json!({"current_month": 12}))}),
        );
        assert_eq!(client.continue_turn().await, Ok(FlowState::Ended));
        assert_eq!(
            client.view().game_over.map(|g| g.reason),
            Some(EndReason::Completed)
        );
    });
}

#[test]
fn card_fetch_failure_on_continue_keeps_feedback_with_retry_prompt() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({}))).await;
        api.reply("submit_choice", json!({"feedback": "ok", "session": session(7, json!({}))}));
        client.submit_choice(&Id::new("c1-a")).await.unwrap();
        api.fail("get_card", ApiError::Unexpected { status: 502, body: String::new() });

        assert!(client.continue_turn().await.is_err());
        let view = client.view();
        assert_eq!(view.flow, FlowState::ShowingFeedback);
        assert!(view.notice.as_ref().is_some_and(Notice::is_blocking));

        api.reply("get_card", card_reply("c2", session(7, json!({}))));
        assert_eq!(client.continue_turn().await, Ok(FlowState::InTurn));
    });
}

#[test]
fn continue_on_a_session_the_server_dropped_returns_to_idle() {
    block_on(async {
        let (client, api, store, _) = client_in_turn(session(7, json!({}))).await;
        api.reply("submit_choice", json!({"feedback": "ok", "session": session(7, json!({}))}));
        client.submit_choice(&Id::new("c1-a")).await.unwrap();
        api.fail("get_card", ApiError::NotFound("Session not found.".into()));

        assert_eq!(client.continue_turn().await, Ok(FlowState::AuthenticatedIdle));
        let view = client.view();
        assert!(view.session.is_none());
        assert!(view.feedback.is_none());
        assert!(!view.has_saved_game);
        assert!(matches!(view.notice, Some(Notice::Info(_))));
        assert!(!store.contains(SESSION_KEY));

        api.reply("start_game", json!({"session": session(8, json!({}))}));
        api.reply("get_card", card_reply("c9", session(8, json!({}))));
        assert_eq!(client.start_game().await, Ok(FlowState::InTurn));
    });
}

#[test]
fn failed_start_leaves_the_player_idle_without_a_pointer() {
    block_on(async {
        let (client, api, store, _) = signed_in_client();
        client.bootstrap().await.unwrap();
        api.fail("start_game", ApiError::Network("connection reset".into()));

        let err = client.start_game().await.unwrap_err();

        assert!(matches!(err, ClientError::Api(ApiError::Network(_))));
        let view = client.view();
        assert_eq!(view.flow, FlowState::AuthenticatedIdle);
        assert!(matches!(view.notice, Some(Notice::Blocking(_))));
        assert!(!view.busy);
        assert!(!store.contains(SESSION_KEY));
        assert_eq!(api.count("get_card"), 0);
    });
}

#[test]
fn first_card_failure_keeps_the_new_session_resumable() {
    block_on(async {
        let (client, api, store, _) = signed_in_client();
        client.bootstrap().await.unwrap();
        let created = session(11, json!({}));
        api.reply("start_game", json!({"message": "Game started!", "session": created.clone()}));
        api.fail("get_card", ApiError::Network("timeout".into()));

        assert!(client.start_game().await.is_err());
        let view = client.view();
        assert_eq!(view.flow, FlowState::AuthenticatedIdle);
        assert!(matches!(view.notice, Some(Notice::Blocking(_))));
        assert!(view.has_saved_game);
        assert_eq!(store.get(SESSION_KEY).unwrap().as_deref(), Some("11"));

        api.reply("get_session", json!({"session": created.clone()}));
        api.reply("get_card", card_reply("c1", created));
        assert_eq!(client.resume().await, Ok(FlowState::InTurn));
        let view = client.view();
        assert_eq!(view.card.map(|c| c.id), Some(Id::new("c1")));
        assert!(view.notice.is_none());
        assert_eq!(api.last_args("get_session"), Some(json!({"session": "11"})));
    });
}

#[test]
fn skip_shows_feedback_then_consumes_the_staged_card() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({}))).await;
        let penalised = session(7, json!({"happiness": 65, "credit_score": 690}));
        api.reply(
            "skip_card",
            json!({"session": penalised.clone(), "message": "Card skipped. -5 happiness, -10 credit score.", "skipped": true}),
        );
        api.reply("get_card", card_reply("c2", penalised.clone()));

        assert_eq!(client.skip_card().await, Ok(FlowState::ShowingFeedback));
        let feedback = client.view().feedback.unwrap();
        assert!(feedback.skipped);
        assert!(feedback.message.starts_with("Card skipped"));

        let calls = api.total_calls();
        assert_eq!(client.continue_turn().await, Ok(FlowState::InTurn));
        assert_eq!(api.total_calls(), calls);
        assert_eq!(client.view().card.map(|c| c.id), Some(Id::new("c2")));
        assert_eq!(client.session(), Some(as_session(&penalised)));
    });
}

#[test]
fn failed_skip_recovers_with_any_available_card() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({}))).await;
        api.fail("skip_card", ApiError::Network("reset".into()));
        api.reply("get_card", card_reply("c9", session(7, json!({}))));

        assert_eq!(client.skip_card().await, Ok(FlowState::InTurn));
        assert_eq!(client.view().card.map(|c| c.id), Some(Id::new("c9")));
        assert_eq!(api.count("get_card"), 2);
    });
}

#[test]
fn failed_skip_and_failed_recovery_keep_the_original_card() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({}))).await;
        api.fail("skip_card", ApiError::Network("reset".into()));
        api.fail("get_card", ApiError::Network("reset".into()));

        let err = client.skip_card().await.unwrap_err();

        assert_eq!(err, ClientError::Api(ApiError::Network("reset".into())));
        let view = client.view();
        assert_eq!(view.flow, FlowState::InTurn);
        assert_eq!(view.card.map(|c| c.id), Some(Id::new("c1")));
        assert!(view.notice.as_ref().is_some_and(Notice::is_blocking));
    });
}

#[test]
fn rejected_credential_mid_game_forces_sign_out() {
    block_on(async {
        let (client, api, store, auth) = client_in_turn(session(7, json!({}))).await;
        api.fail("submit_choice", ApiError::Unauthorized);

        let err = client.submit_choice(&Id::new("c1-a")).await.unwrap_err();

        assert!(err.api().is_some_and(ApiError::is_auth));
        assert_eq!(client.flow(), FlowState::Unauthenticated);
        assert_eq!(auth.token(), None);
        assert_eq!(store.get(SESSION_KEY).unwrap(), None);
        assert!(client.session().is_none());
    });
}

#[test]
fn response_arriving_after_logout_is_discarded() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({}))).await;
        api.reply(
            "submit_choice",
            json!({"feedback": "late", "session": session(7, json!({"wealth": 1}))}),
        );
        let release = api.hold_next();

        let choice = Id::new("c1-a");
        let mut pending = Box::pin(client.submit_choice(&choice));
        assert!(poll!(pending.as_mut()).is_pending());
        assert_eq!(client.logout(), FlowState::Unauthenticated);

        release.send(()).unwrap();
        assert_eq!(pending.await, Err(ClientError::Stale));
        assert_eq!(client.flow(), FlowState::Unauthenticated);
        assert!(client.session().is_none());
        assert!(!client.is_busy());
    });
}

#[test]
fn loan_applies_snapshot_and_shows_server_message() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({"wealth": 2500}))).await;
        assert!(client.session().unwrap().loan_eligible());
        api.reply(
            "take_loan",
            json!({"message": "Family helped. You owe them ₹5,000 (No interest).",
                   "session": session(7, json!({"wealth": 7500, "happiness": 65}))}),
        );

        let msg = client.take_loan(LoanKind::Family).await.unwrap();

        assert!(msg.starts_with("Family helped"));
        assert_eq!(client.session().map(|s| s.wealth), Some(7500));
        assert_eq!(client.view().notice, Some(Notice::Info(msg)));
        assert_eq!(
            api.last_args("take_loan"),
            Some(json!({"session": "7", "kind": "FAMILY"}))
        );
    });
}

#[test]
fn non_positive_buy_is_rejected_locally() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({}))).await;
        assert!(matches!(
            client.buy_stock(&Sector::Gold, 0).await,
            Err(ClientError::InvalidInput(_))
        ));
        assert_eq!(api.count("buy_stock"), 0);
    });
}

#[test]
fn login_failure_stays_signed_out_with_inline_message() {
    let api = ScriptedApi::default();
    let auth = MemoryAuth::default();
    let client = GameClient::new(api.clone(), MemoryStore::default(), auth.clone());
    block_on(client.bootstrap()).unwrap();
    api.fail("login", ApiError::Unauthorized);

    assert!(block_on(client.login("asha", "wrong")).is_err());
    assert_eq!(client.flow(), FlowState::Unauthenticated);
    assert_eq!(
        client.view().notice,
        Some(Notice::Inline("Invalid username or password.".into()))
    );

    api.reply("login", json!({"token": "t-1", "username": "asha", "message": "Login successful!"}));
    assert_eq!(
        block_on(client.login("asha", "secret1")),
        Ok(FlowState::AuthenticatedIdle)
    );
    assert_eq!(auth.token().as_deref(), Some("t-1"));
    assert_eq!(client.view().username.as_deref(), Some("asha"));
    assert!(client.view().notice.is_none());
}

#[test]
fn commands_route_to_orchestrators() {
    block_on(async {
        let (client, api, _, _) = client_in_turn(session(7, json!({}))).await;
        api.reply("ai_advice", json!({"advice": "Build an emergency fund first.", "source": "fallback"}));

        let outcome = client.dispatch(Command::AskAdvice).await.unwrap();
        assert!(matches!(outcome, Outcome::Advice(Some(_))));
        assert_eq!(
            client.view().advice.as_deref(),
            Some("Build an emergency fund first.")
        );

        api.reply("submit_choice", json!({"feedback": "ok", "session": session(7, json!({}))}));
        assert_eq!(
            client.dispatch(Command::Choose(Id::new("c1-c"))).await,
            Ok(Outcome::Flow(FlowState::ShowingFeedback))
        );
        assert!(client.view().advice.is_none());

        assert_eq!(
            client.dispatch(Command::Logout).await,
            Ok(Outcome::Flow(FlowState::Unauthenticated))
        );
        assert!(Command::Skip.is_mutating());
        assert!(!Command::LoadLeaderboard.is_mutating());
    });
}

#[test]
fn actions_outside_their_screen_are_refused() {
    block_on(async {
        let (client, api, _, _) = signed_in_client();
        client.bootstrap().await.unwrap();

        assert!(matches!(
            client.submit_choice(&Id::new("x")).await,
            Err(ClientError::InvalidTransition { .. })
        ));
        assert!(matches!(
            client.continue_turn().await,
            Err(ClientError::InvalidTransition { .. })
        ));
        assert!(matches!(
            client.play_again(),
            Err(ClientError::InvalidTransition { .. })
        ));
        assert_eq!(api.total_calls(), 0);
    });
}
