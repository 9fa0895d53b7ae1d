use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chess_core::{
    Bitboard, GamePosition, MoveKinds, Side, Square, StandardGamePosition,
};

const MIDGAME_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_pseudo_legal_moves(c: &mut Criterion) {
    let initial = StandardGamePosition::initial();
    let midgame = StandardGamePosition::from_fen(MIDGAME_FEN).unwrap();

    c.bench_function("pseudo-legal moves, initial", |b| {
        b.iter(|| black_box(initial.pseudo_legal_moves(MoveKinds::ALL, Bitboard::EVERYTHING)))
    });
    c.bench_function("pseudo-legal moves, midgame", |b| {
        b.iter(|| black_box(midgame.pseudo_legal_moves(MoveKinds::ALL, Bitboard::EVERYTHING)))
    });
    c.bench_function("pseudo-legal captures, midgame", |b| {
        b.iter(|| black_box(midgame.pseudo_legal_moves(MoveKinds::CAPTURE, Bitboard::EVERYTHING)))
    });
}

fn bench_attack_queries(c: &mut Criterion) {
    let midgame = StandardGamePosition::from_fen(MIDGAME_FEN).unwrap();
    let squares: Vec<Square> = (0..64)
        .map(|index| Square::from_index(index).unwrap())
        .collect();

    c.bench_function("attackers of every square", |b| {
        b.iter(|| {
            for &square in &squares {
                black_box(midgame.attackers(square, Side::White));
                black_box(midgame.attackers(square, Side::Black));
            }
        })
    });
}

fn bench_fen_round_trip(c: &mut Criterion) {
    let midgame = StandardGamePosition::from_fen(MIDGAME_FEN).unwrap();

    c.bench_function("fen parse", |b| {
        b.iter(|| black_box(StandardGamePosition::from_fen(MIDGAME_FEN).unwrap()))
    });
    c.bench_function("fen format", |b| b.iter(|| black_box(midgame.to_fen())));
}

criterion_group!(
    benches,
    bench_pseudo_legal_moves,
    bench_attack_queries,
    bench_fen_round_trip
);
criterion_main!(benches);
