use criterion::{Criterion, black_box, criterion_group, criterion_main};

use hyperdraw_geom::Transmatrix;
use hyperdraw_render::{DrawRecord, RenderConfig, Renderer};
use hyperdraw_shapes::{ModelParams, ShapeCatalog, SilhouetteLibrary};
use hyperdraw_world::{CellGraph, CellId, Map, MapConfig};

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    let lib = SilhouetteLibrary::builtin();
    let map = Map::generate(&MapConfig::default());
    let tiling = map.tiling();
    let geom = map.geometry();
    for (name, solid) in [("flat", false), ("solid", true)] {
        let params = ModelParams { solid, ..ModelParams::default() };
        let cat = ShapeCatalog::build(geom, tiling, params, &lib, &[tiling.p]);
        let mut r = Renderer::new(RenderConfig::from_toml_str("").unwrap());
        let mut out: Vec<DrawRecord> = Vec::new();
        let mut ticks = 0;
        group.bench_function(name, |b| {
            b.iter(|| {
                ticks += 16;
                out.clear();
                r.begin_frame(ticks);
                r.draw_map(&map, &cat, CellId(0), &Transmatrix::IDENTITY, 4);
                black_box(r.end_frame(&cat, &mut out));
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
