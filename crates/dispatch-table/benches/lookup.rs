use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dispatch_table::DispatchTable;

const IDS: [u32; 19] = [
    0x20, 0x30, 0x40, 0x283, 0x284, 0x287, 0x288, 0x285, 0x286, 0x289, 0x28A, 0x290, 0x291,
    0x292, 0x293, 0x184, 0x185, 0x188, 0x189,
];

fn lookup(c: &mut Criterion) {
    let mut table = DispatchTable::new(64).unwrap();
    for id in IDS {
        table.insert(id, id).unwrap();
    }

    c.bench_function("lookup_routed", |b| {
        b.iter(|| {
            for id in IDS {
                black_box(table.lookup(black_box(id)));
            }
        })
    });

    c.bench_function("lookup_unrouted", |b| {
        b.iter(|| black_box(table.lookup(black_box(0x7FF))))
    });
}

criterion_group!(benches, lookup);
criterion_main!(benches);
