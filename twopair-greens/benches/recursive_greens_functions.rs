use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex;
use rand::{thread_rng, Rng};
use twopair_greens::greens_functions::{
    methods::recursive::diagonal_greens_function, RecursionContextBuilder, RecursionData,
};
use twopair_greens::interaction::{InteractionBuilder, InteractionData};
use twopair_lattice::{Basis, LatticeShape, SectorTable};

fn interaction_data(max_distance: usize) -> InteractionData {
    InteractionData {
        onsite_energy: 1.,
        hopping: 1.,
        dynamic: 1.,
        random_onsite: true,
        random_hopping: false,
        random_dynamic: false,
        max_distance,
        seed: 0,
    }
}

pub fn bench_diagonal_greens_function(c: &mut Criterion) {
    let mut rng = thread_rng();
    let energy = Complex::new(rng.gen::<f64>() - 0.5, 1e-3);

    for max_distance in [1, 2, 3] {
        let mut group = c.benchmark_group(format!("diagonal_greens_function_range_{}", max_distance));
        for x_max in [16, 32, 64, 128] {
            let lattice = LatticeShape::one_dimensional(x_max).unwrap();
            let sectors = SectorTable::build(&lattice).unwrap();
            let interaction = InteractionBuilder::default()
                .with_lattice(&lattice)
                .with_interaction_data(&interaction_data(max_distance))
                .build()
                .unwrap();
            let context = RecursionContextBuilder::default()
                .with_lattice(&lattice)
                .with_sectors(&sectors)
                .with_interaction(&interaction)
                .build()
                .unwrap();
            let initial = Basis::new(x_max / 2, x_max / 2 + 1).unwrap();
            let data = RecursionData::new(&context, &initial).unwrap();
            group.bench_with_input(BenchmarkId::from_parameter(x_max), &x_max, |b, _| {
                b.iter(|| diagonal_greens_function(black_box(&context), black_box(&data), black_box(energy)))
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_diagonal_greens_function);
criterion_main!(benches);
