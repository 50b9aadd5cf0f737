use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use sync_wire::protocol::kinds::{default_registry, Chat, ChatScope, Move};
use sync_wire::Packet;

#[allow(clippy::unwrap_used)]
fn bench_encode_decode(c: &mut Criterion) {
    let registry = default_registry().unwrap();
    let keys: [(&str, Option<&str>); 2] = [("plain", None), ("keyed", Some("session-secret"))];

    let mut group = c.benchmark_group("move_packet");
    for (label, key) in keys {
        group.bench_function(format!("encode_{label}"), |b| {
            b.iter_batched(
                || Packet::new(Move { x: 120, y: 45 }),
                |mut pkt| pkt.to_bytes(key).unwrap(),
                BatchSize::SmallInput,
            )
        });

        let bytes = Packet::new(Move { x: 120, y: 45 }).to_bytes(key).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_function(format!("decode_{label}"), |b| {
            b.iter(|| {
                let decoded = registry.decode_bytes(&bytes, key);
                assert!(decoded.is_ok());
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("chat_packet");
    for &size in &[16usize, 256, 4096] {
        let chat = Chat {
            sender: 7,
            scope: ChatScope::Global,
            message: "x".repeat(size),
        };
        let bytes = Packet::new(chat.clone())
            .to_bytes(Some("session-secret"))
            .unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_function(format!("encode_keyed_{size}b"), |b| {
            b.iter_batched(
                || Packet::new(chat.clone()),
                |mut pkt| pkt.to_bytes(Some("session-secret")).unwrap(),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("decode_keyed_{size}b"), |b| {
            b.iter(|| {
                let decoded = registry.decode_bytes(&bytes, Some("session-secret"));
                assert!(decoded.is_ok());
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode_decode);
criterion_main!(benches);
