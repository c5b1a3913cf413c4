use criterion::{
    criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion, PlotConfiguration,
};
use std::sync::Arc;
use std::thread;
use traffic_synch::control_system::IntersectionSync;
use traffic_synch::simulation_engine::directions::Direction;

fn bench_fast_path(c: &mut Criterion) {
    let sync = IntersectionSync::new();
    c.bench_function("fast_path_entry_exit", |b| {
        b.iter(|| {
            sync.before_entry(Direction::North, Direction::South);
            sync.after_exit(Direction::North, Direction::South);
        });
    });
}

fn bench_contended_crossings(c: &mut Criterion) {
    let thread_counts: [usize; 3] = [4, 8, 16];

    let mut group = c.benchmark_group("contended_crossings");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Linear));

    for &threads in &thread_counts {
        group.bench_with_input(
            BenchmarkId::from_parameter(threads),
            &threads,
            |b, &threads| {
                b.iter(|| {
                    let sync = Arc::new(IntersectionSync::new());
                    let handles: Vec<_> = (0..threads)
                        .map(|i| {
                            let sync = Arc::clone(&sync);
                            thread::spawn(move || {
                                let origin = Direction::ALL[i % 4];
                                sync.before_entry(origin, origin.next());
                                sync.after_exit(origin, origin.next());
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_fast_path, bench_contended_crossings);
criterion_main!(benches);
