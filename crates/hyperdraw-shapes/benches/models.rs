use criterion::{Criterion, black_box, criterion_group, criterion_main};

use hyperdraw_geom::{Geometry, RegularTiling};
use hyperdraw_shapes::{ModelParams, ShapeCatalog, SilhouetteLibrary};

fn bench_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape_catalog");
    let lib = SilhouetteLibrary::builtin();
    let tiling = RegularTiling::new(7, 3);
    group.bench_function("flat_7_3", |b| {
        b.iter(|| {
            let cat = ShapeCatalog::build(Geometry::Hyperbolic, tiling, ModelParams::default(), &lib, &[6, 7]);
            black_box(cat.point_count());
        })
    });
    let solid = ModelParams { solid: true, ..ModelParams::default() };
    group.bench_function("solid_7_3", |b| {
        b.iter(|| {
            let cat = ShapeCatalog::build(Geometry::Hyperbolic, tiling, solid.clone(), &lib, &[6, 7]);
            black_box(cat.point_count());
        })
    });
    group.finish();
}

criterion_group!(benches, bench_catalog);
criterion_main!(benches);
