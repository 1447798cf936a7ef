//! Two peers over the in-process loopback hub.

use std::time::Duration;

use game_core::{Element, GameConfig, Outcome, Side};
use runtime::net::encode;
use runtime::{
    LoopbackHub, MatchView, NetMessage, PeerId, Runtime, RuntimeConfig, RuntimeError,
    RuntimeHandle, TurnBroadcast,
};

async fn join(hub: &LoopbackHub, peer: u64) -> Runtime {
    join_with(hub, peer, RuntimeConfig::default()).await
}

async fn join_with(hub: &LoopbackHub, peer: u64, config: RuntimeConfig) -> Runtime {
    let (catalog, _) = game_content::default_catalog().unwrap();
    Runtime::builder()
        .config(config)
        .catalog(catalog)
        .build_online(hub.connect(PeerId(peer)).await)
        .unwrap()
}

fn one_second_turns() -> RuntimeConfig {
    RuntimeConfig {
        game: GameConfig::default().with_pick_time_limit(Duration::from_millis(1_000)),
        ..RuntimeConfig::default()
    }
}

async fn seated_pair(hub: &LoopbackHub, config: RuntimeConfig) -> (Runtime, Runtime) {
    let low = join_with(hub, 3, config.clone()).await;
    let high = join_with(hub, 7, config).await;
    wait_for(&low.handle(), |view| view.side == Some(Side::A)).await;
    wait_for(&high.handle(), |view| view.side == Some(Side::B)).await;
    (low, high)
}

fn open_turn(turn: u32) -> impl Fn(&MatchView) -> bool {
    move |view| view.turn == turn && !view.input_locked
}

async fn wait_for(handle: &RuntimeHandle, done: impl Fn(&MatchView) -> bool) -> MatchView {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let view = handle.view().await.unwrap();
            if done(&view) {
                return view;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("peer did not reach the expected state")
}

async fn cast(handle: &RuntimeHandle, first: Element, second: Element) {
    handle.pick(first).await.unwrap();
    handle.pick(second).await.unwrap();
    handle.confirm().await.unwrap();
}

#[tokio::test]
async fn lone_peer_waits_for_an_opponent() {
    let hub = LoopbackHub::new();
    let runtime = join(&hub, 3).await;
    let handle = runtime.handle();

    let view = handle.view().await.unwrap();
    assert_eq!(view.side, None);
    assert!(view.input_locked);
    assert!(handle.pick(Element::Fire).await.is_err());
    assert!(matches!(
        handle.restart().await,
        Err(RuntimeError::RestartUnavailable)
    ));
}

#[tokio::test]
async fn lower_peer_is_side_a_whatever_the_arrival_order() {
    let hub = LoopbackHub::new();
    let high = join(&hub, 7).await;
    let low = join(&hub, 3).await;
    let (a, b) = (low.handle(), high.handle());

    wait_for(&a, |view| view.side == Some(Side::A)).await;
    wait_for(&b, |view| view.side == Some(Side::B)).await;

    // Peer 7 confirms first; the authority (peer 3) still maps it to side B.
    cast(&b, Element::Water, Element::Water).await;
    cast(&a, Element::Fire, Element::Fire).await;

    let view_a = wait_for(&a, |view| view.turn == 2).await;
    let view_b = wait_for(&b, |view| view.turn == 2).await;

    assert_eq!((view_a.my_hp, view_a.opponent_hp), (20, 18));
    assert_eq!((view_b.my_hp, view_b.opponent_hp), (18, 20));
    for view in [&view_a, &view_b] {
        assert!(view.log.iter().any(|line| line == "Side A: Great Fireball / Side B: Healing Rain"));
        assert_eq!(view.log.last().map(String::as_str), Some("--- Turn 2 ---"));
        assert!(!view.input_locked);
    }
}

#[tokio::test]
async fn stale_and_garbled_frames_are_dropped() {
    let hub = LoopbackHub::new();
    let (low, high) = (join(&hub, 3).await, join(&hub, 7).await);
    let (a, b) = (low.handle(), high.handle());
    wait_for(&a, |view| view.side == Some(Side::A)).await;
    wait_for(&b, |view| view.side == Some(Side::B)).await;

    cast(&a, Element::Fire, Element::Fire).await;
    cast(&b, Element::Earth, Element::Earth).await;
    wait_for(&b, |view| view.turn == 2).await;

    let broadcast = |turn, hp_a, hp_b| {
        encode(&NetMessage::ApplyTurn(TurnBroadcast {
            hp_a,
            hp_b,
            line1: format!("injected {turn}"),
            line2: format!("--- Turn {turn} ---"),
            turn,
        }))
        .unwrap()
    };

    hub.inject(PeerId(7), PeerId(3), broadcast(2, 1, 1)).await.unwrap();
    hub.inject(PeerId(7), PeerId(3), vec![0xff, 0xff, 0xff]).await.unwrap();
    hub.inject(PeerId(7), PeerId(3), broadcast(3, 12, 10)).await.unwrap();

    // Frames are delivered in order, so once turn 3 shows the rest were handled.
    let view = wait_for(&b, |view| view.turn == 3).await;
    assert_eq!((view.my_hp, view.opponent_hp), (10, 12));
    assert!(!view.log.iter().any(|line| line == "injected 2"));
    assert!(view.log.iter().any(|line| line == "injected 3"));
}

#[tokio::test]
async fn confirmed_peer_is_locked_until_the_turn_resolves() {
    let hub = LoopbackHub::new();
    let (low, high) = (join(&hub, 3).await, join(&hub, 7).await);
    let (a, b) = (low.handle(), high.handle());
    wait_for(&a, |view| view.side == Some(Side::A)).await;
    wait_for(&b, |view| view.side == Some(Side::B)).await;

    cast(&a, Element::Wind, Element::Wind).await;
    let view = a.view().await.unwrap();
    assert!(view.input_locked);
    assert!(a.pick(Element::Fire).await.is_err());
    assert_eq!(view.turn, 1);

    cast(&b, Element::Earth, Element::Earth).await;
    let view = wait_for(&a, |view| view.turn == 2).await;
    assert!(!view.input_locked);
    assert_eq!(view.picks, "-");
}

#[tokio::test]
async fn new_authority_picks_up_the_match_after_a_leave() {
    let hub = LoopbackHub::new();
    let (low, high) = seated_pair(&hub, RuntimeConfig::default()).await;
    let (a, b) = (low.handle(), high.handle());

    cast(&a, Element::Fire, Element::Fire).await;
    cast(&b, Element::Water, Element::Water).await;
    wait_for(&b, open_turn(2)).await;

    hub.disconnect(PeerId(3)).await;
    wait_for(&b, |view| view.side.is_none()).await;

    // Peer 7 is now the lowest id: authority and side A.
    let newcomer = join(&hub, 9).await;
    let c = newcomer.handle();
    wait_for(&b, |view| view.side == Some(Side::A)).await;
    wait_for(&c, |view| view.side == Some(Side::B)).await;

    cast(&b, Element::Fire, Element::Fire).await;
    cast(&c, Element::Fire, Element::Fire).await;

    let view_b = wait_for(&b, open_turn(3)).await;
    let view_c = wait_for(&c, open_turn(3)).await;
    assert_eq!((view_b.my_hp, view_b.opponent_hp), (12, 14));
    assert_eq!((view_c.my_hp, view_c.opponent_hp), (14, 12));
    for view in [&view_b, &view_c] {
        assert!(view.log.iter().any(|line| line == "Side A: Great Fireball / Side B: Great Fireball"));
        assert_eq!(view.log.last().map(String::as_str), Some("--- Turn 3 ---"));
    }
}

#[tokio::test]
async fn opponent_leaving_mid_turn_unlocks_input() {
    let hub = LoopbackHub::new();
    let (low, high) = seated_pair(&hub, RuntimeConfig::default()).await;
    let b = high.handle();

    cast(&b, Element::Water, Element::Water).await;
    assert!(b.view().await.unwrap().input_locked);

    hub.disconnect(PeerId(3)).await;
    let view = wait_for(&b, |view| view.side.is_none()).await;
    assert_eq!(view.picks, "-");
    drop(low);

    let newcomer = join(&hub, 9).await;
    wait_for(&newcomer.handle(), |view| view.side == Some(Side::B)).await;
    wait_for(&b, open_turn(1)).await;
    b.pick(Element::Fire).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn idle_peer_is_forced_then_forfeits() {
    let hub = LoopbackHub::new();
    let (low, high) = seated_pair(&hub, one_second_turns()).await;
    let (a, b) = (low.handle(), high.handle());

    // Peer 7 never picks; its countdown submits Earth + Earth to peer 3.
    cast(&a, Element::Fire, Element::Fire).await;
    let view = wait_for(&b, |view| view.turn == 2).await;
    assert_eq!((view.my_hp, view.opponent_hp), (16, 20));
    assert!(view.log.iter().any(|line| line == "Side A: Great Fireball / Side B: Stone Skin"));

    wait_for(&a, open_turn(2)).await;
    cast(&a, Element::Fire, Element::Fire).await;

    let view = wait_for(&b, |view| view.outcome.is_some()).await;
    assert_eq!(view.outcome, Some(Outcome::Loss));
    assert_eq!(view.turn, 2);
    assert!(view.input_locked);
    assert!(view.log.iter().any(|line| line == "Side B forfeits after repeated timeouts."));

    // Only picks travel towards the authority, so peer 3 is left waiting.
    let view = a.view().await.unwrap();
    assert_eq!(view.outcome, None);
    assert!(view.input_locked);
}

#[tokio::test(start_paused = true)]
async fn authority_forfeit_is_broadcast_to_the_opponent() {
    let hub = LoopbackHub::new();
    let (low, high) = seated_pair(&hub, one_second_turns()).await;
    let (a, b) = (low.handle(), high.handle());

    cast(&b, Element::Water, Element::Water).await;
    wait_for(&b, open_turn(2)).await;
    cast(&b, Element::Water, Element::Water).await;

    let view = wait_for(&b, |view| view.outcome.is_some()).await;
    assert_eq!(view.outcome, Some(Outcome::Win));
    assert_eq!(view.turn, 3);
    assert_eq!(view.opponent_hp, 0);
    assert!(view.input_locked);
    assert!(view.log.iter().any(|line| line == "Side A forfeits after repeated timeouts."));
    assert_eq!(view.log.last().map(String::as_str), Some("Side B wins!"));

    let view = wait_for(&a, |view| view.turn == 3).await;
    assert_eq!(view.outcome, Some(Outcome::Loss));
    assert_eq!(view.my_hp, 0);
    assert_eq!(view.log.last().map(String::as_str), Some("Side B wins!"));
}
