//! Overlapping intents under the permissive and guarded reentry policies

mod common;

use std::time::Duration;

use orbit::config::ReentryPolicy;
use orbit::ledger::OptionKind;
use orbit::orchestrator::DialoguePhase;
use orbit::BookingOrchestrator;

use common::{answer_interview, orchestrator, ANSWERS};

const ORIGIN_PROMPT: &str = "Great choice. Where will you be flying from?";
const DATES_PROMPT: &str = "Noted. What are your preferred travel dates?";

#[tokio::test(start_paused = true)]
async fn test_permissive_fires_every_pending_reply() {
    let orchestrator = orchestrator(ReentryPolicy::Permissive);
    orchestrator.submit_text("Goa").await.unwrap();
    orchestrator.submit_text("Delhi").await.unwrap();
    orchestrator.settle().await.unwrap();

    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.step, 2);
    assert_eq!(snapshot.messages.len(), 5);
    let texts: Vec<&str> = snapshot.messages.iter().map(|m| m.text.as_str()).collect();
    assert!(texts.contains(&ORIGIN_PROMPT));
    assert!(texts.contains(&DATES_PROMPT));
    assert!(!snapshot.thinking);
}

#[tokio::test(start_paused = true)]
async fn test_guarded_drops_superseded_reply() {
    let orchestrator = orchestrator(ReentryPolicy::Guarded);
    orchestrator.submit_text("Goa").await.unwrap();
    orchestrator.submit_text("Delhi").await.unwrap();
    orchestrator.settle().await.unwrap();

    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.step, 2);
    assert_eq!(snapshot.messages.len(), 4);
    assert_eq!(snapshot.last_message().unwrap().text, DATES_PROMPT);
    assert!(!snapshot.messages.iter().any(|m| m.text == ORIGIN_PROMPT));
    assert!(!snapshot.thinking);
}

#[tokio::test(start_paused = true)]
async fn test_sequential_intents_behave_the_same_under_both_policies() {
    for policy in [ReentryPolicy::Permissive, ReentryPolicy::Guarded] {
        let orchestrator = orchestrator(policy);
        answer_interview(&orchestrator).await;
        orchestrator
            .select_option("opt1", OptionKind::Flight)
            .await
            .unwrap();
        orchestrator.settle().await.unwrap();
        orchestrator
            .select_option("h3", OptionKind::Hotel)
            .await
            .unwrap();
        orchestrator.settle().await.unwrap();

        let snapshot = orchestrator.snapshot().await;
        assert!(snapshot.dashboard_visible, "policy {}", policy);
        assert_eq!(snapshot.messages.len(), 13, "policy {}", policy);
    }
}

#[tokio::test(start_paused = true)]
async fn test_quick_flight_change_permissive_presents_hotels_and_replans() {
    let orchestrator = orchestrator(ReentryPolicy::Permissive);
    orchestrator
        .select_option("opt1", OptionKind::Flight)
        .await
        .unwrap();
    orchestrator
        .select_option("opt2", OptionKind::Flight)
        .await
        .unwrap();
    orchestrator.settle().await.unwrap();

    let snapshot = orchestrator.snapshot().await;
    assert!(snapshot.replanning);
    assert!(snapshot
        .messages
        .iter()
        .any(|m| m.option_kind() == Some(OptionKind::Hotel)));
}

#[tokio::test(start_paused = true)]
async fn test_quick_flight_change_guarded_only_replans() {
    let orchestrator = orchestrator(ReentryPolicy::Guarded);
    orchestrator
        .select_option("opt1", OptionKind::Flight)
        .await
        .unwrap();
    orchestrator
        .select_option("opt2", OptionKind::Flight)
        .await
        .unwrap();
    orchestrator.settle().await.unwrap();

    let snapshot = orchestrator.snapshot().await;
    assert!(snapshot.replanning);
    assert_eq!(
        snapshot.selected_flight.as_ref().map(|f| f.id.as_str()),
        Some("opt2")
    );
    assert!(!snapshot
        .messages
        .iter()
        .any(|m| m.option_kind() == Some(OptionKind::Hotel)));
}

#[tokio::test(start_paused = true)]
async fn test_text_during_generation_under_each_policy() {
    for (policy, expect_dashboard) in [
        (ReentryPolicy::Permissive, true),
        (ReentryPolicy::Guarded, false),
    ] {
        let orchestrator = orchestrator(policy);
        orchestrator
            .select_option("h1", OptionKind::Hotel)
            .await
            .unwrap();

        // confirmation fires at 1500 ms, generation would start at 2300 ms
        tokio::time::sleep(Duration::from_millis(1600)).await;
        orchestrator.submit_text("Actually, one more thing").await.unwrap();
        orchestrator.settle().await.unwrap();

        let snapshot = orchestrator.snapshot().await;
        assert_eq!(snapshot.dashboard_visible, expect_dashboard, "policy {}", policy);
        assert!(!snapshot.generating_plan, "policy {}", policy);
    }
}

#[tokio::test(start_paused = true)]
async fn test_day_change_does_not_supersede_pending_phases() {
    let orchestrator = orchestrator(ReentryPolicy::Guarded);
    orchestrator
        .select_option("h1", OptionKind::Hotel)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(2000)).await;
    orchestrator.set_current_day(2).await;
    orchestrator.settle().await.unwrap();

    let snapshot = orchestrator.snapshot().await;
    assert!(snapshot.dashboard_visible);
    assert_eq!(snapshot.current_day, 2);
    assert_eq!(snapshot.visible_events.len(), 3);
}

async fn answer_all_but_vibe(orchestrator: &BookingOrchestrator) {
    for answer in &ANSWERS[..4] {
        orchestrator.submit_text(answer).await.unwrap();
        orchestrator.settle().await.unwrap();
    }
}

fn flight_offers(snapshot: &orbit::SessionSnapshot) -> usize {
    snapshot
        .messages
        .iter()
        .filter(|m| m.option_kind() == Some(OptionKind::Flight))
        .count()
}

#[tokio::test(start_paused = true)]
async fn test_guarded_text_during_flight_scan_still_offers_flights() {
    let orchestrator = orchestrator(ReentryPolicy::Guarded);
    answer_all_but_vibe(&orchestrator).await;

    orchestrator.submit_text("Relaxed").await.unwrap();
    orchestrator.submit_text("hello?").await.unwrap();
    orchestrator.settle().await.unwrap();

    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.step, 6);
    assert_eq!(snapshot.phase, DialoguePhase::FlightsPresented);
    assert_eq!(flight_offers(&snapshot), 1);
    assert!(!snapshot.thinking);

    orchestrator.submit_text("still there?").await.unwrap();
    orchestrator.settle().await.unwrap();
    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.step, 7);
    assert_eq!(snapshot.phase, DialoguePhase::FlightsPresented);
    assert_eq!(flight_offers(&snapshot), 1);
    assert_eq!(snapshot.last_message().unwrap().text, "I'm listening...");
}

#[tokio::test(start_paused = true)]
async fn test_guarded_text_while_scanning_still_offers_flights() {
    let orchestrator = orchestrator(ReentryPolicy::Guarded);
    answer_all_but_vibe(&orchestrator).await;

    orchestrator.submit_text("Relaxed").await.unwrap();
    // scan label is up from 1000 ms until 3000 ms
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(orchestrator.snapshot().await.phase, DialoguePhase::Scanning);
    orchestrator.submit_text("any window seats?").await.unwrap();
    orchestrator.settle().await.unwrap();

    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.phase, DialoguePhase::FlightsPresented);
    assert_eq!(flight_offers(&snapshot), 1);
    assert!(!snapshot.thinking);
}

#[tokio::test(start_paused = true)]
async fn test_guarded_selection_during_flight_scan_still_offers_flights() {
    let orchestrator = orchestrator(ReentryPolicy::Guarded);
    answer_all_but_vibe(&orchestrator).await;

    orchestrator.submit_text("Relaxed").await.unwrap();
    orchestrator
        .select_option("opt1", OptionKind::Flight)
        .await
        .unwrap();
    orchestrator.settle().await.unwrap();

    let snapshot = orchestrator.snapshot().await;
    assert_eq!(snapshot.phase, DialoguePhase::FlightsPresented);
    assert_eq!(flight_offers(&snapshot), 1);
    assert!(snapshot
        .messages
        .iter()
        .any(|m| m.option_kind() == Some(OptionKind::Hotel)));
}
