use hyperdraw_geom::{Geometry, RegularTiling};
use hyperdraw_shapes::{FloorStyle, MeshBuilder, ModelParams, Ppr, ShapeCatalog, SilhouetteLibrary};

fn solid() -> ModelParams {
    ModelParams { solid: true, ..ModelParams::default() }
}

fn catalog(p: ModelParams) -> ShapeCatalog {
    ShapeCatalog::build(Geometry::Hyperbolic, RegularTiling::new(7, 3), p, &SilhouetteLibrary::builtin(), &[6, 7])
}

#[test]
fn ball_has_20_times_4_to_the_depth_triangles() {
    for lev in 0..4u32 {
        let mut mb = MeshBuilder::new(Geometry::Hyperbolic, RegularTiling::new(7, 3), solid());
        let id = mb.new_shape(Ppr::ITEM);
        mb.make_ball(id, 0.1, lev);
        let sh = mb.shape(id).unwrap();
        assert!(sh.triangles);
        assert_eq!(sh.len(), 3 * 20 * 4usize.pow(lev));
        assert_eq!(sh.prio, Ppr::ITEM);
        let g = mb.geom;
        assert!(mb.points_of(id).iter().all(|&h| (g.hdist0(h) - 0.1).abs() < 1e-9));
    }
}

#[test]
fn solid_catalog_has_models() {
    let cat = catalog(solid());
    let body = cat.get("PBody").unwrap();
    assert!(body.triangles);
    assert!(body.texture.is_some());
    assert!(body.shadow.is_some());
    let eagle = cat.get("Eagle").unwrap();
    assert_eq!(eagle.rev_steps, 36);
    assert!(cat.bird_frame("Eagle", 7).is_some());
    assert!(cat.bird_frame("TinyBird", 31).is_some());
    // disabled
    assert!(cat.get("PFace").is_none());
    assert!(cat.get("DragonNostril").is_none());
    assert_eq!(cat.id("Jelly"), cat.id("Slime"));
    assert!(cat.points(cat.get("SkullEyes").unwrap()).iter().all(|h| h.is_finite()));
    assert!(cat.get("SkullEyes").unwrap().texture.is_none());
}

#[test]
fn flat_catalog_keeps_outlines() {
    let cat = catalog(ModelParams::default());
    let body = cat.get("PBody").unwrap();
    assert!(!body.triangles);
    let pts = cat.points(body);
    assert_eq!(pts.first(), pts.last());
    assert!(cat.bird_frame("Eagle", 0).is_none());
    assert_eq!(cat.id("Jelly"), cat.id("Slime"));
}

#[test]
fn floors_for_each_degree() {
    let cat = catalog(ModelParams::default());
    for deg in [6, 7] {
        for style in FloorStyle::ALL {
            let fs = cat.floor(style, deg).unwrap();
            assert_eq!(fs.side[0].len(), deg as usize);
        }
    }
    assert!(cat.floor(FloorStyle::Full, 5).is_none());
}

#[test]
fn all_model_points_are_finite() {
    let cat = catalog(solid());
    for name in cat.names() {
        if let Some(sh) = cat.get(name) {
            assert!(cat.points(sh).iter().all(|h| h.is_finite()), "{name}");
        }
    }
}

#[test]
fn euclidean_and_spherical_catalogs_build() {
    for (g, t) in [(Geometry::Euclidean, RegularTiling::new(6, 3)), (Geometry::Spherical, RegularTiling::new(5, 3))] {
        let cat = ShapeCatalog::build(g, t, solid(), &SilhouetteLibrary::builtin(), &[t.p]);
        assert!(cat.shape_count() > 0);
        assert!(cat.get("Disk").unwrap().triangles);
    }
}
