//! Async server tests: reply timeouts and notification fan-out.
//!
//! All tests run on a paused clock, so sleeping past a timeout is instant
//! and the timer tasks fire in deadline order.

use std::time::Duration;

use tokio::sync::broadcast::error::TryRecvError;
use tokio::time::sleep;
use wildtrail::attack::{AttackProgress, AttackState, Awaiting};
use wildtrail::cards::{CardInstanceId, CardKind, CatalogEntry, Forage, Multiplicity, StandardCatalog};
use wildtrail::core::{GameConfig, PlayerId};
use wildtrail::error::EngineError;
use wildtrail::game::{Game, Seat};
use wildtrail::messages::{Recipients, TemplateBook};
use wildtrail::server::GameServer;

const ANN: PlayerId = PlayerId::new(0);
const BO: PlayerId = PlayerId::new(1);
const CY: PlayerId = PlayerId::new(2);

const VICTIM_WAIT: Duration = Duration::from_secs(5);
const DEFENSE_WAIT: Duration = Duration::from_secs(10);

fn game() -> Game {
    let mut catalog = StandardCatalog::empty(TemplateBook::standard());
    for kind in [
        CardKind::Forage(Forage::Honey),
        CardKind::Steal,
        CardKind::River,
        CardKind::Guard,
    ] {
        catalog.register(CatalogEntry::new(kind, Multiplicity::Fixed(3)));
    }

    let config = GameConfig::new(3)
        .with_starting_hand_size(0)
        .with_pre_attack_timeout(VICTIM_WAIT)
        .with_defense_timeout(DEFENSE_WAIT);
    let seats = vec![Seat::new("Ann"), Seat::new("Bo"), Seat::new("Cy")];
    Game::new(config, &catalog, seats).unwrap()
}

fn give(game: &mut Game, player: PlayerId, kind: CardKind) -> CardInstanceId {
    let card = game.table().find_in_deck(kind).unwrap();
    game.table_mut().deal_specific(player, card).unwrap();
    card
}

#[tokio::test(start_paused = true)]
async fn test_victim_timeout_abandons_attack() {
    let mut game = game();
    let steal = give(&mut game, ANN, CardKind::Steal);
    let server = GameServer::new(game);

    let progress = server.play_card(ANN, steal).await.unwrap();
    assert_eq!(progress, AttackProgress::Awaiting(Awaiting::Victim));

    sleep(VICTIM_WAIT + Duration::from_millis(1)).await;

    let snapshot = server.snapshot().await;
    assert_eq!(snapshot.attack_state, AttackState::NoAttack);
    assert!(snapshot.pending.is_none());
    assert_eq!(snapshot.current_player, ANN);

    // The late answer is refused rather than starting anything.
    let err = server.choose_victim(ANN, BO).await.unwrap_err();
    assert!(matches!(err, EngineError::IllegalTransition { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_defense_timeout_counts_as_declined() {
    let mut game = game();
    let steal = give(&mut game, ANN, CardKind::Steal);
    let guard = give(&mut game, BO, CardKind::Guard);
    let server = GameServer::new(game);

    server.play_card(ANN, steal).await.unwrap();
    let progress = server.choose_victim(ANN, BO).await.unwrap();
    assert_eq!(progress, AttackProgress::Awaiting(Awaiting::Defense));

    sleep(DEFENSE_WAIT + Duration::from_millis(1)).await;

    let ann_holds_guard = server
        .inspect(|g| g.table().player(ANN).unwrap().holds(guard))
        .await;
    assert!(ann_holds_guard);
    assert_eq!(server.inspect(|g| g.attack_state()).await, AttackState::NoAttack);
}

#[tokio::test(start_paused = true)]
async fn test_answered_victim_timer_does_not_cut_defense_short() {
    let mut game = game();
    let steal = give(&mut game, ANN, CardKind::Steal);
    let guard = give(&mut game, BO, CardKind::Guard);
    let server = GameServer::new(game);

    server.play_card(ANN, steal).await.unwrap();
    sleep(Duration::from_secs(4)).await;
    server.choose_victim(ANN, BO).await.unwrap();

    // Victim deadline passes while the defense wait is still open.
    sleep(Duration::from_secs(2)).await;
    assert_eq!(server.inspect(|g| g.attack_state()).await, AttackState::DoAttack);

    let progress = server.defend(BO, guard).await.unwrap();
    assert!(matches!(progress, AttackProgress::Resolved { succeeded: false, .. }));

    // And the defense timer is stale once it fires.
    sleep(DEFENSE_WAIT).await;
    let snapshot = server.snapshot().await;
    assert_eq!(snapshot.attack_state, AttackState::NoAttack);
    assert_eq!(snapshot.player(BO).unwrap().hand_size, 0);
    assert_eq!(snapshot.player(ANN).unwrap().hand_size, 0);
}

#[tokio::test(start_paused = true)]
async fn test_reply_from_wrong_seat_leaves_timer_running() {
    let mut game = game();
    let steal = give(&mut game, ANN, CardKind::Steal);
    give(&mut game, BO, CardKind::Forage(Forage::Honey));
    let server = GameServer::new(game);

    server.play_card(ANN, steal).await.unwrap();
    let err = server.choose_victim(CY, BO).await.unwrap_err();
    assert_eq!(err, EngineError::UnexpectedReply(CY));

    sleep(VICTIM_WAIT + Duration::from_millis(1)).await;
    assert_eq!(server.inspect(|g| g.attack_state()).await, AttackState::NoAttack);
    assert_eq!(server.snapshot().await.player(BO).unwrap().hand_size, 1);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_receive_notifications_in_order() {
    let mut game = game();
    let river = give(&mut game, ANN, CardKind::River);
    let server = GameServer::new(game);
    let mut events = server.subscribe();

    server.publish_pending().await;
    server.play_card(ANN, river).await.unwrap();
    server.draw(ANN).await.unwrap();

    let mut texts = Vec::new();
    loop {
        match events.try_recv() {
            Ok(notification) => {
                if notification.recipients == Recipients::Broadcast {
                    texts.push(notification.message.text);
                }
            }
            Err(TryRecvError::Empty) => break,
            Err(err) => panic!("unexpected receive error: {}", err),
        }
    }

    assert_eq!(
        texts,
        vec![
            "It is Ann's turn",
            "Ann floods the trail with a River",
            "The next player loses their turn",
            "It is Cy's turn",
        ]
    );
}
