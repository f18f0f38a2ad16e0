use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wildtrail::attack::Awaiting;
use wildtrail::cards::{CardKind, StandardCatalog};
use wildtrail::core::{GameConfig, PlayerId};
use wildtrail::game::{Game, Seat};

fn seats() -> Vec<Seat> {
    ["Ann", "Bo", "Cy", "Di"].iter().map(|name| Seat::new(*name)).collect()
}

/// Game where the first player holds a Steal and everyone has a hand.
fn steal_ready() -> (Game, wildtrail::cards::CardInstanceId) {
    let mut game = Game::new(GameConfig::new(7), &StandardCatalog::new(), seats()).unwrap();
    let steal = game.table().find_in_deck(CardKind::Steal).unwrap();
    game.table_mut().deal_specific(PlayerId::new(0), steal).unwrap();
    game.drain_notifications();
    (game, steal)
}

fn steal_benchmark(c: &mut Criterion) {
    let (game, steal) = steal_ready();

    c.bench_function("steal attack round trip", |b| {
        b.iter(|| {
            let mut game = game.clone();
            game.play_card(PlayerId::new(0), steal).unwrap();
            let progress = game.choose_victim(PlayerId::new(0), PlayerId::new(1)).unwrap();
            if !progress.is_complete() {
                game.decline_defense(PlayerId::new(1)).unwrap();
            }
            black_box(game.drain_notifications())
        })
    });
}

fn playout_benchmark(c: &mut Criterion) {
    c.bench_function("full game draws only", |b| {
        b.iter(|| {
            let mut game = Game::new(GameConfig::new(black_box(7)), &StandardCatalog::new(), seats()).unwrap();
            while game.result().is_none() {
                match game.pending() {
                    Some(reply) if reply.awaiting == Awaiting::Defense => {
                        if let Some(victim) = reply.from {
                            game.decline_defense(victim).unwrap();
                        }
                    }
                    _ => {
                        game.draw(game.current_player()).unwrap();
                    }
                }
            }
            black_box(game.snapshot())
        })
    });
}

criterion_group!(benches, steal_benchmark, playout_benchmark);
criterion_main!(benches);
